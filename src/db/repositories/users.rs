use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::UserRole;
use crate::db::models::auth::{NewUser, User, UserBasicInfo, UserChanges};

pub struct UsersRepo;

impl UsersRepo {
    pub fn find_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.filter(email.eq(target_email)).first::<User>(conn).optional()
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(user_id)).first::<User>(conn).optional()
    }

    pub fn exists_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(email.eq(target_email)))).get_result(conn)
    }

    pub fn insert_user(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .get_result(conn)
    }

    pub fn update_user(
        conn: &mut PgConnection,
        user_id: Uuid,
        changes: &UserChanges,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set(changes)
            .get_result(conn)
    }

    pub fn update_role(
        conn: &mut PgConnection,
        user_id: Uuid,
        new_role: UserRole,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set((role.eq(new_role), updated_at.eq(chrono::Utc::now())))
            .get_result(conn)
            .optional()
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.order(name.asc()).load::<User>(conn)
    }

    pub fn list_non_admins(conn: &mut PgConnection) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(role.ne(UserRole::Admin))
            .order(name.asc())
            .load::<User>(conn)
    }

    pub fn list_basic_by_role(
        conn: &mut PgConnection,
        target_role: UserRole,
    ) -> Result<Vec<UserBasicInfo>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(role.eq(target_role))
            .order(name.asc())
            .select(UserBasicInfo::as_select())
            .load(conn)
    }

    pub fn find_basic_by_ids(
        conn: &mut PgConnection,
        ids: &[Uuid],
    ) -> Result<Vec<UserBasicInfo>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq_any(ids))
            .select(UserBasicInfo::as_select())
            .load(conn)
    }

    pub fn assigned_project_ids(
        conn: &mut PgConnection,
        target_user_id: Uuid,
    ) -> Result<Vec<Uuid>, diesel::result::Error> {
        use crate::schema::user_assigned_projects::dsl::*;
        user_assigned_projects
            .filter(user_id.eq(target_user_id))
            .select(project_id)
            .load(conn)
    }

    pub fn is_assigned_to_project(
        conn: &mut PgConnection,
        target_user_id: Uuid,
        target_project_id: Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::user_assigned_projects::dsl::*;
        diesel::select(diesel::dsl::exists(
            user_assigned_projects
                .filter(user_id.eq(target_user_id))
                .filter(project_id.eq(target_project_id)),
        ))
        .get_result(conn)
    }

    /// Adds the project to the user's assigned set. Idempotent.
    pub fn link_assigned_project(
        conn: &mut PgConnection,
        target_user_id: Uuid,
        target_project_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::user_assigned_projects::dsl::*;
        diesel::insert_into(user_assigned_projects)
            .values((user_id.eq(target_user_id), project_id.eq(target_project_id)))
            .on_conflict_do_nothing()
            .execute(conn)
    }
}
