use axum::http::StatusCode;
use chrono::{Duration, NaiveDate, Utc};
use managemate_backend::db::enums::UserRole;
use managemate_backend::error::AppError;
use managemate_backend::db::models::{
    CreateMeetingRequest, CreateProjectRequest, CreateTaskRequest, UpdateRoleRequest,
    UpdateTaskRequest,
};
use managemate_backend::validation::{
    auth::validate_role_change,
    meeting::validate_create_meeting,
    project::{validate_create_project, validate_leader_role},
    task::{validate_assignee_role, validate_create_task},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn admin_is_not_an_assignable_role() {
    let req: UpdateRoleRequest = serde_json::from_value(json!({
        "userId": Uuid::new_v4(),
        "newRole": "Admin",
    }))
    .unwrap();

    let err = validate_role_change(&req.new_role).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert!(matches!(err, AppError::Validation { ref message } if message == "Invalid role"));

    for role in UserRole::ASSIGNABLE {
        assert_eq!(validate_role_change(role.as_str()).unwrap(), role);
    }
}

#[test]
fn unknown_role_names_parse_as_text_and_fail_validation() {
    let req: UpdateRoleRequest = serde_json::from_value(json!({
        "userId": Uuid::new_v4(),
        "newRole": "Overlord",
    }))
    .unwrap();
    let err = validate_role_change(&req.new_role).unwrap_err();
    assert!(matches!(err, AppError::Validation { ref message } if message == "Invalid role"));

    let req: UpdateRoleRequest = serde_json::from_value(json!({
        "userId": Uuid::new_v4(),
        "newRole": "Project Leader",
    }))
    .unwrap();
    assert_eq!(validate_role_change(&req.new_role).unwrap(), UserRole::ProjectLeader);
}

#[test]
fn task_update_payloads() {
    let req: UpdateTaskRequest =
        serde_json::from_value(json!({ "status": "In Progress", "progress": 40 })).unwrap();
    assert!(req.validate().is_ok());

    let req: UpdateTaskRequest = serde_json::from_value(json!({ "progress": 140 })).unwrap();
    assert!(req.validate().is_err());

    assert!(serde_json::from_value::<UpdateTaskRequest>(json!({ "status": "Done" })).is_err());
}

#[test]
fn project_rules() {
    let today = day(2025, 3, 1);
    assert!(validate_create_project("Apollo", day(2025, 6, 1), today).is_ok());
    assert!(validate_create_project("  ", day(2025, 6, 1), today).is_err());
    assert!(validate_create_project("Apollo", day(2025, 2, 1), today).is_err());

    assert!(validate_leader_role(UserRole::ProjectLeader).is_ok());
    assert!(validate_leader_role(UserRole::TeamMember).is_err());

    let req: CreateProjectRequest = serde_json::from_value(json!({
        "name": "Apollo",
        "projectLeader": Uuid::new_v4(),
        "deadline": "2025-06-01",
        "files": ["uploads/projects/brief.pdf", "../secrets"],
    }))
    .unwrap();
    assert!(req.validate().is_err());
}

#[test]
fn task_rules() {
    assert!(validate_create_task("Wireframes").is_ok());
    assert!(validate_create_task(" ").is_err());
    assert!(validate_assignee_role(UserRole::TeamMember).is_ok());
    assert!(validate_assignee_role(UserRole::Manager).is_err());
}

#[test]
fn task_deadline_may_fall_after_the_project_deadline() {
    let req: CreateTaskRequest = serde_json::from_value(json!({
        "projectId": Uuid::new_v4(),
        "title": "Post-launch review",
        "assignedTo": Uuid::new_v4(),
        "deadline": "2031-01-15",
    }))
    .unwrap();
    assert!(req.validate().is_ok());
    assert!(validate_create_task(&req.title).is_ok());
}

#[test]
fn meeting_rules() {
    let now = Utc::now();
    let participants = [Uuid::new_v4()];
    assert!(validate_create_meeting("Standup", now + Duration::hours(1), now, &participants).is_ok());
    assert!(validate_create_meeting("Standup", now - Duration::hours(1), now, &participants).is_err());
    assert!(validate_create_meeting("Standup", now + Duration::hours(1), now, &[]).is_err());

    let req: CreateMeetingRequest = serde_json::from_value(json!({
        "title": "Kickoff",
        "scheduledTime": "2030-01-01T10:00:00Z",
        "zoomJoinLink": "javascript:alert(1)",
        "participants": [Uuid::new_v4()],
    }))
    .unwrap();
    assert!(req.validate().is_err());
}
