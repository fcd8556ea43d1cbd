use managemate_backend::db::enums::TaskStatus;
use managemate_backend::db::models::UpdateTaskRequest;
use managemate_backend::error::AppError;
use managemate_backend::services::lifecycle::{TaskState, plan_submission, plan_task_update};

fn progress(p: i32) -> UpdateTaskRequest {
    UpdateTaskRequest {
        status: None,
        progress: Some(p),
    }
}

#[test]
fn any_positive_progress_without_status_means_in_progress() {
    for prior in TaskStatus::ALL {
        for p in 1..=100 {
            let current = TaskState {
                status: prior,
                progress: 0,
            };
            let next = plan_task_update(current, &progress(p)).unwrap();
            assert_eq!(next.status, TaskStatus::InProgress, "prior {:?}, p {}", prior, p);
            assert_eq!(next.progress, p);
        }
    }
}

#[test]
fn zero_progress_without_status_keeps_status() {
    for prior in TaskStatus::ALL {
        let current = TaskState {
            status: prior,
            progress: 55,
        };
        let next = plan_task_update(current, &progress(0)).unwrap();
        assert_eq!(next.status, prior);
        assert_eq!(next.progress, 0);
    }
}

#[test]
fn submission_completes_from_any_state() {
    for prior in TaskStatus::ALL {
        for p in [0, 1, 42, 100] {
            let next = plan_submission(TaskState {
                status: prior,
                progress: p,
            });
            assert_eq!(next.status, TaskStatus::Completed);
        }
    }
}

#[test]
fn out_of_range_progress_is_a_validation_error() {
    let current = TaskState {
        status: TaskStatus::InProgress,
        progress: 10,
    };
    for p in [-5, 101, 1000] {
        let err = plan_task_update(current, &progress(p)).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}

#[test]
fn status_only_update_leaves_progress() {
    let current = TaskState {
        status: TaskStatus::NotStarted,
        progress: 30,
    };
    let update = UpdateTaskRequest {
        status: Some(TaskStatus::Completed),
        progress: None,
    };
    let next = plan_task_update(current, &update).unwrap();
    assert_eq!(next.status, TaskStatus::Completed);
    assert_eq!(next.progress, 30);
}
