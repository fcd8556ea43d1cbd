use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::ProjectStatus;
use crate::db::models::project::{NewProject, Project, ProjectChanges, ProjectSummary};

pub struct ProjectsRepo;

impl ProjectsRepo {
    pub fn insert(conn: &mut PgConnection, new_project: &NewProject) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(crate::schema::projects::table)
            .values(new_project)
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, project_id: Uuid) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects.filter(id.eq(project_id)).first::<Project>(conn).optional()
    }

    /// Row-locks the project until the surrounding transaction ends.
    pub fn find_for_update(conn: &mut PgConnection, project_id: Uuid) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .for_update()
            .first::<Project>(conn)
            .optional()
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects.order(created_at.desc()).load::<Project>(conn)
    }

    /// Projects the user manages or leads.
    pub fn list_for_member(conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(manager_id.eq(user_id).or(project_leader_id.eq(user_id)))
            .order(created_at.desc())
            .load::<Project>(conn)
    }

    pub fn list_by_leader(conn: &mut PgConnection, leader_id: Uuid) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(project_leader_id.eq(leader_id))
            .order(created_at.desc())
            .load::<Project>(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        project_id: Uuid,
        changes: &ProjectChanges,
    ) -> Result<Project, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(projects.filter(id.eq(project_id)))
            .set(changes)
            .get_result(conn)
    }

    pub fn update_status(
        conn: &mut PgConnection,
        project_id: Uuid,
        new_status: ProjectStatus,
    ) -> Result<Project, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(projects.filter(id.eq(project_id)))
            .set((status.eq(new_status), updated_at.eq(chrono::Utc::now())))
            .get_result(conn)
    }

    pub fn set_task_ids(
        conn: &mut PgConnection,
        project_id: Uuid,
        ids: &[Uuid],
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(projects.filter(id.eq(project_id)))
            .set((task_ids.eq(ids), updated_at.eq(chrono::Utc::now())))
            .execute(conn)
    }

    pub fn summaries_by_manager(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<ProjectSummary>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(manager_id.eq(user_id))
            .select((status, task_ids))
            .load::<ProjectSummary>(conn)
    }

    pub fn summaries_by_leader(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Vec<ProjectSummary>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(project_leader_id.eq(user_id))
            .select((status, task_ids))
            .load::<ProjectSummary>(conn)
    }
}
