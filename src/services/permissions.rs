//! Role and ownership gate. Every service call states the operation it is
//! about to perform, together with the ownership facts of its target, and
//! asks [`authorize`] before touching the store.

use uuid::Uuid;

use crate::db::enums::UserRole;
use crate::error::{AppError, AppResult};
use crate::services::context::RequestContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    // Admin console
    /// Entry check for every `/admin` route, made before the body is read.
    AccessAdminConsole,
    ListAllProjects,
    ViewAnyProject,
    ListAllUsers,
    ChangeUserRole,

    // Projects
    CreateProject,
    ListProjectLeaders,
    ListOwnProjects,
    ViewProject {
        manager_id: Uuid,
        project_leader_id: Uuid,
        assigned: bool,
    },
    EditProject {
        manager_id: Uuid,
    },
    UpdateProjectStatus {
        project_leader_id: Uuid,
    },

    // Tasks
    CreateTask {
        project_leader_id: Uuid,
    },
    ListProjectTasks {
        manager_id: Uuid,
        project_leader_id: Uuid,
    },
    ListLedProjectTasks,
    ListAssignedTasks,
    ListTeamMembers,
    UpdateTask {
        assignee_id: Uuid,
        project_leader_id: Uuid,
    },
    /// `assignee_id` is `None` for the role check made before the task is
    /// looked up.
    SubmitTask {
        assignee_id: Option<Uuid>,
    },

    // Meetings
    ScheduleMeeting,
    DeleteMeeting {
        created_by: Uuid,
    },
}

impl Operation {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AccessAdminConsole => "access_admin_console",
            Operation::ListAllProjects => "list_all_projects",
            Operation::ViewAnyProject => "view_any_project",
            Operation::ListAllUsers => "list_all_users",
            Operation::ChangeUserRole => "change_user_role",
            Operation::CreateProject => "create_project",
            Operation::ListProjectLeaders => "list_project_leaders",
            Operation::ListOwnProjects => "list_own_projects",
            Operation::ViewProject { .. } => "view_project",
            Operation::EditProject { .. } => "edit_project",
            Operation::UpdateProjectStatus { .. } => "update_project_status",
            Operation::CreateTask { .. } => "create_task",
            Operation::ListProjectTasks { .. } => "list_project_tasks",
            Operation::ListLedProjectTasks => "list_led_project_tasks",
            Operation::ListAssignedTasks => "list_assigned_tasks",
            Operation::ListTeamMembers => "list_team_members",
            Operation::UpdateTask { .. } => "update_task",
            Operation::SubmitTask { .. } => "submit_task",
            Operation::ScheduleMeeting => "schedule_meeting",
            Operation::DeleteMeeting { .. } => "delete_meeting",
        }
    }
}

pub fn is_allowed(ctx: &RequestContext, operation: &Operation) -> bool {
    use UserRole::*;

    let caller = ctx.user_id;
    match (*operation, ctx.role) {
        (
            Operation::AccessAdminConsole
            | Operation::ListAllProjects
            | Operation::ViewAnyProject
            | Operation::ListAllUsers
            | Operation::ChangeUserRole,
            role,
        ) => role == Admin,

        (Operation::CreateProject | Operation::ListProjectLeaders, role) => role == Manager,
        (Operation::ListOwnProjects, role) => matches!(role, Manager | ProjectLeader),
        (
            Operation::ViewProject {
                manager_id,
                project_leader_id,
                assigned,
            },
            role,
        ) => role == Admin || caller == manager_id || caller == project_leader_id || assigned,
        (Operation::EditProject { manager_id }, role) => role == Manager && caller == manager_id,
        (Operation::UpdateProjectStatus { project_leader_id }, role) => {
            role == ProjectLeader && caller == project_leader_id
        }

        (Operation::CreateTask { project_leader_id }, role) => {
            role == ProjectLeader && caller == project_leader_id
        }
        (
            Operation::ListProjectTasks {
                manager_id,
                project_leader_id,
            },
            role,
        ) => role == Admin || caller == manager_id || caller == project_leader_id,
        (Operation::ListLedProjectTasks | Operation::ListTeamMembers, role) => {
            role == ProjectLeader
        }
        (Operation::ListAssignedTasks, role) => role == TeamMember,
        (
            Operation::UpdateTask {
                assignee_id,
                project_leader_id,
            },
            _,
        ) => caller == assignee_id || caller == project_leader_id,
        (Operation::SubmitTask { assignee_id }, role) => {
            role == TeamMember && assignee_id.is_none_or(|assignee| assignee == caller)
        }

        (Operation::ScheduleMeeting, role) => matches!(role, Manager | ProjectLeader),
        (Operation::DeleteMeeting { created_by }, role) => {
            role == Admin || (matches!(role, Manager | ProjectLeader) && caller == created_by)
        }
    }
}

/// Allows or denies. A denial is always the fixed `Access Denied` error.
pub fn authorize(ctx: &RequestContext, operation: Operation) -> AppResult<()> {
    if is_allowed(ctx, &operation) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %ctx.user_id,
            role = %ctx.role,
            operation = operation.name(),
            "Access denied"
        );
        Err(AppError::Forbidden)
    }
}
