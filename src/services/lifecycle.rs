//! Task lifecycle: `Not Started -> In Progress -> Completed`.
//!
//! Progress is a percentage tracked next to the status. A progress report
//! without an explicit status begins the task; an explicit status always
//! wins; submission completes it. Project status has no derivation at all
//! and only changes through an explicit status update.

use crate::db::enums::TaskStatus;
use crate::db::models::UpdateTaskRequest;
use crate::error::{AppError, AppResult};

pub const MIN_PROGRESS: i32 = 0;
pub const MAX_PROGRESS: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskState {
    pub status: TaskStatus,
    pub progress: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTransition {
    /// Work has been reported on the task.
    Begin,
    /// The assignee hands the task in.
    Submit,
    /// The caller named the status explicitly.
    Override(TaskStatus),
}

impl TaskTransition {
    pub fn apply(self, _current: TaskStatus) -> TaskStatus {
        match self {
            TaskTransition::Begin => TaskStatus::InProgress,
            TaskTransition::Submit => TaskStatus::Completed,
            TaskTransition::Override(status) => status,
        }
    }
}

/// Picks the transition an update request implies, if any. A progress of 0
/// with no status implies nothing: the status is left alone rather than reset.
pub fn derive_transition(update: &UpdateTaskRequest) -> Option<TaskTransition> {
    match (update.status, update.progress) {
        (Some(status), _) => Some(TaskTransition::Override(status)),
        (None, Some(progress)) if progress > MIN_PROGRESS && progress <= MAX_PROGRESS => {
            Some(TaskTransition::Begin)
        }
        _ => None,
    }
}

pub fn plan_task_update(current: TaskState, update: &UpdateTaskRequest) -> AppResult<TaskState> {
    if update.status.is_none() && update.progress.is_none() {
        return Err(AppError::validation("No update data provided"));
    }

    if let Some(progress) = update.progress {
        if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&progress) {
            return Err(AppError::validation("Progress must be between 0 and 100"));
        }
    }

    let status = derive_transition(update)
        .map(|transition| transition.apply(current.status))
        .unwrap_or(current.status);

    Ok(TaskState {
        status,
        progress: update.progress.unwrap_or(current.progress),
    })
}

/// Completion does not look at progress.
pub fn plan_submission(current: TaskState) -> TaskState {
    TaskState {
        status: TaskTransition::Submit.apply(current.status),
        progress: current.progress,
    }
}
