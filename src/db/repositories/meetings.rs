use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::meeting::{Meeting, NewMeeting};

pub struct MeetingsRepo;

impl MeetingsRepo {
    pub fn insert(conn: &mut PgConnection, new_meeting: &NewMeeting) -> Result<Meeting, diesel::result::Error> {
        diesel::insert_into(crate::schema::meetings::table)
            .values(new_meeting)
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, meeting_id: Uuid) -> Result<Option<Meeting>, diesel::result::Error> {
        use crate::schema::meetings::dsl::*;
        meetings.filter(id.eq(meeting_id)).first::<Meeting>(conn).optional()
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Meeting>, diesel::result::Error> {
        use crate::schema::meetings::dsl::*;
        meetings.order(scheduled_time.asc()).load::<Meeting>(conn)
    }

    /// Meetings the user created or was invited to.
    pub fn list_for_user(conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<Meeting>, diesel::result::Error> {
        use crate::schema::meetings::dsl::*;
        meetings
            .filter(created_by.eq(user_id).or(participants.contains(vec![user_id])))
            .order(scheduled_time.asc())
            .load::<Meeting>(conn)
    }

    pub fn delete_by_id(conn: &mut PgConnection, meeting_id: Uuid) -> Result<usize, diesel::result::Error> {
        use crate::schema::meetings::dsl::*;
        diesel::delete(meetings.filter(id.eq(meeting_id))).execute(conn)
    }
}
