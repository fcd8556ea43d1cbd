use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::auth::{UpdateRoleRequest, User, UserDirectoryEntry},
    db::models::project::{ProjectDetails, ProjectInfo},
    db::repositories::{projects::ProjectsRepo, users::UsersRepo},
    error::AppError,
    services::context::RequestContext,
    services::permissions::{Operation, authorize},
    services::projects_service::{build_details, build_infos, find_project},
    utils::AssetUrlHelper,
    validation::auth::validate_role_change,
};

/// Admin console. Every call is gated on the Admin role before anything is
/// read or written.
pub struct AdminService;

impl AdminService {
    pub fn list_projects(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        assets: &AssetUrlHelper,
    ) -> Result<Vec<ProjectInfo>, AppError> {
        authorize(ctx, Operation::ListAllProjects)?;
        let projects = ProjectsRepo::list_all(conn)?;
        build_infos(conn, projects, assets)
    }

    pub fn project_details(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        assets: &AssetUrlHelper,
    ) -> Result<ProjectDetails, AppError> {
        authorize(ctx, Operation::ViewAnyProject)?;
        let project = find_project(conn, project_id)?;
        build_details(conn, project, assets)
    }

    /// All non-admin users.
    pub fn list_users(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        assets: &AssetUrlHelper,
    ) -> Result<Vec<UserDirectoryEntry>, AppError> {
        authorize(ctx, Operation::ListAllUsers)?;
        let users = UsersRepo::list_non_admins(conn)?;
        Ok(users
            .iter()
            .map(|user| UserDirectoryEntry::from_user(user, assets))
            .collect())
    }

    /// Gate first, then the requested role. Nothing is read or written here.
    pub fn prepare_role_change(
        ctx: &RequestContext,
        req: &UpdateRoleRequest,
    ) -> Result<UserRole, AppError> {
        authorize(ctx, Operation::ChangeUserRole)?;
        validate_role_change(&req.new_role)
    }

    pub fn change_role(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        user_id: Uuid,
        new_role: UserRole,
    ) -> Result<User, AppError> {
        authorize(ctx, Operation::ChangeUserRole)?;

        let user = UsersRepo::update_role(conn, user_id, new_role)?
            .ok_or_else(|| AppError::not_found("User"))?;

        tracing::info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            new_role = %user.role,
            "User role changed"
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(new_role: &str) -> UpdateRoleRequest {
        UpdateRoleRequest {
            user_id: Uuid::new_v4(),
            new_role: new_role.to_string(),
        }
    }

    #[test]
    fn non_admin_is_refused_before_the_role_is_read() {
        let manager = RequestContext::new(Uuid::new_v4(), UserRole::Manager);
        for role in ["Superuser", "Admin", "Team Member", ""] {
            let err = AdminService::prepare_role_change(&manager, &request(role)).unwrap_err();
            assert!(matches!(err, AppError::Forbidden), "{}", role);
        }
    }

    #[test]
    fn admin_gets_invalid_role_for_admin_or_unknown_targets() {
        let admin = RequestContext::new(Uuid::new_v4(), UserRole::Admin);
        for role in ["Admin", "Superuser"] {
            let err = AdminService::prepare_role_change(&admin, &request(role)).unwrap_err();
            assert!(matches!(err, AppError::Validation { ref message } if message == "Invalid role"));
        }
        assert_eq!(
            AdminService::prepare_role_change(&admin, &request("Project Leader")).unwrap(),
            UserRole::ProjectLeader
        );
    }
}
