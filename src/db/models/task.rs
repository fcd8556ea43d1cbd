use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::auth::UserBasicInfo;
use crate::db::enums::TaskStatus;

// Task models
#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub assigned_to: Uuid,
    pub status: TaskStatus,
    pub progress: i32,
    pub deadline: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub assigned_to: Uuid,
    pub status: TaskStatus,
    pub progress: i32,
    pub deadline: NaiveDate,
}

// Task API DTOs
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub project_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Task title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: Uuid,
    pub deadline: NaiveDate,
}

#[derive(Deserialize, Validate, Default, Clone, Copy)]
pub struct UpdateTaskRequest {
    pub status: Option<TaskStatus>,
    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100"))]
    pub progress: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub project_id: Option<Uuid>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub assigned_to: UserBasicInfo,
    pub status: TaskStatus,
    pub progress: i32,
    pub deadline: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskInfo {
    pub fn build(task: Task, assignee: UserBasicInfo) -> Self {
        Self {
            id: task.id,
            project_id: task.project_id,
            title: task.title,
            description: task.description,
            assigned_to: assignee,
            status: task.status,
            progress: task.progress,
            deadline: task.deadline,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Tasks of one project, used by the leader's grouped view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTasks {
    pub project_id: Uuid,
    pub project_name: String,
    pub tasks: Vec<TaskInfo>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNameResponse {
    pub project_id: Uuid,
    pub name: String,
}
