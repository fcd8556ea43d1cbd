use std::collections::BTreeMap;

use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{TaskStatus, UserRole},
    db::models::auth::UserBasicInfo,
    db::models::task::{
        CreateTaskRequest, NewTask, ProjectNameResponse, ProjectTasks, TaskInfo, TaskListQuery,
        UpdateTaskRequest,
    },
    db::repositories::{projects::ProjectsRepo, tasks::TasksRepo, users::UsersRepo},
    error::AppError,
    services::context::RequestContext,
    services::lifecycle::{TaskState, plan_submission, plan_task_update},
    services::permissions::{Operation, authorize},
    services::projects_service::find_project,
    validation::task::{validate_assignee_role, validate_create_task},
};

pub struct TasksService;

impl TasksService {
    /// Inserts the task, appends it to the project's task list and links the
    /// assignee to the project, all in one transaction.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateTaskRequest,
    ) -> Result<TaskInfo, AppError> {
        let (task, assignee) = conn.transaction::<_, AppError, _>(|conn| {
            let project = ProjectsRepo::find_for_update(conn, req.project_id)?
                .ok_or_else(|| AppError::not_found("Project"))?;
            authorize(
                ctx,
                Operation::CreateTask {
                    project_leader_id: project.project_leader_id,
                },
            )?;

            let assignee = UsersRepo::find_by_id(conn, req.assigned_to)?
                .ok_or_else(|| AppError::validation("Assigned user not found"))?;
            validate_assignee_role(assignee.role)?;
            validate_create_task(&req.title)?;

            let new_task = NewTask {
                id: Uuid::new_v4(),
                project_id: project.id,
                title: req.title.trim().to_string(),
                description: req.description.clone(),
                assigned_to: assignee.id,
                status: TaskStatus::default(),
                progress: 0,
                deadline: req.deadline,
            };
            let task = TasksRepo::insert(conn, &new_task)?;

            let mut task_ids = project.task_ids;
            task_ids.push(task.id);
            ProjectsRepo::set_task_ids(conn, project.id, &task_ids)?;
            UsersRepo::link_assigned_project(conn, assignee.id, project.id)?;

            let assignee = UserBasicInfo {
                id: assignee.id,
                name: assignee.name,
                email: assignee.email,
            };
            Ok((task, assignee))
        })?;

        tracing::info!(
            task_id = %task.id,
            project_id = %task.project_id,
            assigned_to = %task.assigned_to,
            "Task created"
        );
        Ok(TaskInfo::build(task, assignee))
    }

    /// Team Members see their own tasks, optionally narrowed to one project.
    /// Everyone else must name a project they manage or lead.
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &TaskListQuery,
    ) -> Result<Vec<TaskInfo>, AppError> {
        let rows = if ctx.role == UserRole::TeamMember {
            authorize(ctx, Operation::ListAssignedTasks)?;
            TasksRepo::list_with_assignee_by_assignee(conn, ctx.user_id)?
                .into_iter()
                .filter(|(task, _)| query.project_id.is_none_or(|id| task.project_id == id))
                .collect()
        } else {
            let project_id = query
                .project_id
                .ok_or_else(|| AppError::validation("projectId is required"))?;
            let project = find_project(conn, project_id)?;
            authorize(
                ctx,
                Operation::ListProjectTasks {
                    manager_id: project.manager_id,
                    project_leader_id: project.project_leader_id,
                },
            )?;
            TasksRepo::list_with_assignee_by_projects(conn, &[project.id])?
        };

        Ok(rows
            .into_iter()
            .map(|(task, assignee)| TaskInfo::build(task, assignee))
            .collect())
    }

    /// Every project the caller leads, each with its tasks.
    pub fn all_for_leader(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<ProjectTasks>, AppError> {
        authorize(ctx, Operation::ListLedProjectTasks)?;

        let projects = ProjectsRepo::list_by_leader(conn, ctx.user_id)?;
        let project_ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();

        let mut by_project: BTreeMap<Uuid, Vec<TaskInfo>> = BTreeMap::new();
        for (task, assignee) in TasksRepo::list_with_assignee_by_projects(conn, &project_ids)? {
            by_project
                .entry(task.project_id)
                .or_default()
                .push(TaskInfo::build(task, assignee));
        }

        Ok(projects
            .into_iter()
            .map(|project| ProjectTasks {
                tasks: by_project.remove(&project.id).unwrap_or_default(),
                project_id: project.id,
                project_name: project.name,
            })
            .collect())
    }

    /// Candidate assignees.
    pub fn members(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Vec<UserBasicInfo>, AppError> {
        authorize(ctx, Operation::ListTeamMembers)?;
        Ok(UsersRepo::list_basic_by_role(conn, UserRole::TeamMember)?)
    }

    pub fn project_name(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<ProjectNameResponse, AppError> {
        let project = find_project(conn, project_id)?;
        let assigned = UsersRepo::is_assigned_to_project(conn, ctx.user_id, project.id)?;
        authorize(
            ctx,
            Operation::ViewProject {
                manager_id: project.manager_id,
                project_leader_id: project.project_leader_id,
                assigned,
            },
        )?;

        Ok(ProjectNameResponse {
            project_id: project.id,
            name: project.name,
        })
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
        req: &UpdateTaskRequest,
    ) -> Result<TaskInfo, AppError> {
        let (task, assignee) = TasksRepo::find_with_assignee(conn, task_id)?
            .ok_or_else(|| AppError::not_found("Task"))?;
        let project = find_project(conn, task.project_id)?;
        authorize(
            ctx,
            Operation::UpdateTask {
                assignee_id: task.assigned_to,
                project_leader_id: project.project_leader_id,
            },
        )?;

        let current = TaskState {
            status: task.status,
            progress: task.progress,
        };
        let next = plan_task_update(current, req)?;
        let updated = TasksRepo::update_state(conn, task.id, next.status, next.progress)?;

        tracing::info!(
            task_id = %updated.id,
            user_id = %ctx.user_id,
            status = %updated.status,
            progress = updated.progress,
            "Task updated"
        );
        Ok(TaskInfo::build(updated, assignee))
    }

    /// Role check for submission. Needs no store access, so callers can run
    /// it before checking out a connection.
    pub fn ensure_submitter(ctx: &RequestContext) -> Result<(), AppError> {
        authorize(ctx, Operation::SubmitTask { assignee_id: None })
    }

    /// Marks the caller's task Completed. Non-members are refused before the
    /// task is looked up.
    pub fn submit(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: Uuid,
    ) -> Result<TaskInfo, AppError> {
        Self::ensure_submitter(ctx)?;

        let (task, assignee) = TasksRepo::find_with_assignee(conn, task_id)?
            .ok_or_else(|| AppError::not_found("Task"))?;
        authorize(
            ctx,
            Operation::SubmitTask {
                assignee_id: Some(task.assigned_to),
            },
        )?;

        let next = plan_submission(TaskState {
            status: task.status,
            progress: task.progress,
        });
        let updated = TasksRepo::update_state(conn, task.id, next.status, next.progress)?;

        tracing::info!(
            task_id = %updated.id,
            user_id = %ctx.user_id,
            "Task submitted"
        );
        Ok(TaskInfo::build(updated, assignee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_team_members_may_submit() {
        for role in [UserRole::Admin, UserRole::Manager, UserRole::ProjectLeader] {
            let ctx = RequestContext::new(Uuid::new_v4(), role);
            assert!(matches!(TasksService::ensure_submitter(&ctx), Err(AppError::Forbidden)));
        }
        let member = RequestContext::new(Uuid::new_v4(), UserRole::TeamMember);
        assert!(TasksService::ensure_submitter(&member).is_ok());
    }
}
