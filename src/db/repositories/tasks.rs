use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::TaskStatus;
use crate::db::models::auth::UserBasicInfo;
use crate::db::models::task::{NewTask, Task};

pub struct TasksRepo;

impl TasksRepo {
    pub fn insert(conn: &mut PgConnection, new_task: &NewTask) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(crate::schema::tasks::table)
            .values(new_task)
            .get_result(conn)
    }

    pub fn find_with_assignee(
        conn: &mut PgConnection,
        task_id: Uuid,
    ) -> Result<Option<(Task, UserBasicInfo)>, diesel::result::Error> {
        use crate::schema::{tasks, users};
        tasks::table
            .inner_join(users::table)
            .filter(tasks::id.eq(task_id))
            .select((Task::as_select(), UserBasicInfo::as_select()))
            .first(conn)
            .optional()
    }

    pub fn list_with_assignee_by_projects(
        conn: &mut PgConnection,
        project_ids: &[Uuid],
    ) -> Result<Vec<(Task, UserBasicInfo)>, diesel::result::Error> {
        use crate::schema::{tasks, users};
        tasks::table
            .inner_join(users::table)
            .filter(tasks::project_id.eq_any(project_ids))
            .order(tasks::created_at.asc())
            .select((Task::as_select(), UserBasicInfo::as_select()))
            .load(conn)
    }

    pub fn list_with_assignee_by_assignee(
        conn: &mut PgConnection,
        assignee_id: Uuid,
    ) -> Result<Vec<(Task, UserBasicInfo)>, diesel::result::Error> {
        use crate::schema::{tasks, users};
        tasks::table
            .inner_join(users::table)
            .filter(tasks::assigned_to.eq(assignee_id))
            .order(tasks::deadline.asc())
            .select((Task::as_select(), UserBasicInfo::as_select()))
            .load(conn)
    }

    pub fn update_state(
        conn: &mut PgConnection,
        task_id: Uuid,
        new_status: TaskStatus,
        new_progress: i32,
    ) -> Result<Task, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::update(tasks.filter(id.eq(task_id)))
            .set((
                status.eq(new_status),
                progress.eq(new_progress),
                updated_at.eq(chrono::Utc::now()),
            ))
            .get_result(conn)
    }

    pub fn statuses_for_assignee(
        conn: &mut PgConnection,
        assignee_id: Uuid,
    ) -> Result<Vec<TaskStatus>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks
            .filter(assigned_to.eq(assignee_id))
            .select(status)
            .load(conn)
    }
}
