use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::validate_join_link;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::meetings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub scheduled_time: DateTime<Utc>,
    pub zoom_join_link: String,
    pub participants: Vec<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::meetings)]
pub struct NewMeeting {
    pub title: String,
    pub scheduled_time: DateTime<Utc>,
    pub zoom_join_link: String,
    pub participants: Vec<Uuid>,
    pub created_by: Uuid,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    #[validate(length(min = 1, max = 255, message = "Meeting title is required"))]
    pub title: String,
    pub scheduled_time: DateTime<Utc>,
    #[validate(custom(function = "validate_join_link"))]
    pub zoom_join_link: String,
    #[serde(default)]
    pub participants: Vec<Uuid>,
}
