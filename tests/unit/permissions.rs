use managemate_backend::db::enums::UserRole;
use managemate_backend::error::AppError;
use managemate_backend::services::RequestContext;
use managemate_backend::services::permissions::{Operation, authorize, is_allowed};
use uuid::Uuid;

const ROLES: [UserRole; 4] = [
    UserRole::Admin,
    UserRole::Manager,
    UserRole::ProjectLeader,
    UserRole::TeamMember,
];

fn caller(role: UserRole) -> RequestContext {
    RequestContext::new(Uuid::new_v4(), role)
}

#[test]
fn role_changes_are_refused_for_non_admins() {
    for role in ROLES {
        let result = authorize(&caller(role), Operation::ChangeUserRole);
        if role == UserRole::Admin {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(AppError::Forbidden)), "{:?}", role);
        }
    }
}

#[test]
fn project_creation_and_leader_listing_are_manager_only() {
    for role in ROLES {
        let expected = role == UserRole::Manager;
        assert_eq!(is_allowed(&caller(role), &Operation::CreateProject), expected);
        assert_eq!(is_allowed(&caller(role), &Operation::ListProjectLeaders), expected);
    }
}

#[test]
fn own_project_listing_is_for_managers_and_leaders() {
    assert!(is_allowed(&caller(UserRole::Manager), &Operation::ListOwnProjects));
    assert!(is_allowed(&caller(UserRole::ProjectLeader), &Operation::ListOwnProjects));
    assert!(!is_allowed(&caller(UserRole::TeamMember), &Operation::ListOwnProjects));
    assert!(!is_allowed(&caller(UserRole::Admin), &Operation::ListOwnProjects));
}

#[test]
fn project_view_is_scoped() {
    let manager = caller(UserRole::Manager);
    let leader = caller(UserRole::ProjectLeader);
    let outsider = caller(UserRole::Manager);
    let member = caller(UserRole::TeamMember);

    let op = |assigned| Operation::ViewProject {
        manager_id: manager.user_id,
        project_leader_id: leader.user_id,
        assigned,
    };

    assert!(is_allowed(&manager, &op(false)));
    assert!(is_allowed(&leader, &op(false)));
    assert!(is_allowed(&caller(UserRole::Admin), &op(false)));
    assert!(!is_allowed(&outsider, &op(false)));
    assert!(!is_allowed(&member, &op(false)));
    assert!(is_allowed(&member, &op(true)));
}

#[test]
fn only_the_projects_leader_creates_tasks_and_sets_status() {
    let leader = caller(UserRole::ProjectLeader);
    let other_leader = caller(UserRole::ProjectLeader);

    let create = Operation::CreateTask {
        project_leader_id: leader.user_id,
    };
    let status = Operation::UpdateProjectStatus {
        project_leader_id: leader.user_id,
    };

    assert!(is_allowed(&leader, &create));
    assert!(is_allowed(&leader, &status));
    assert!(!is_allowed(&other_leader, &create));
    assert!(!is_allowed(&other_leader, &status));
    assert!(!is_allowed(&caller(UserRole::Manager), &create));
}

#[test]
fn submission_is_refused_for_every_other_role() {
    for role in [UserRole::Admin, UserRole::Manager, UserRole::ProjectLeader] {
        let ctx = caller(role);
        let op = Operation::SubmitTask {
            assignee_id: Some(ctx.user_id),
        };
        assert!(matches!(authorize(&ctx, op), Err(AppError::Forbidden)));
    }
}

#[test]
fn denial_renders_access_denied() {
    let err = authorize(&caller(UserRole::TeamMember), Operation::ListAllUsers).unwrap_err();
    assert_eq!(err.to_string(), managemate_backend::error::ACCESS_DENIED);
    assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
}
