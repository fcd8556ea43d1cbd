use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{ProjectStatus, UserRole},
    db::models::auth::UserBasicInfo,
    db::models::project::{
        CreateProjectRequest, NewProject, Project, ProjectChanges, ProjectDetails, ProjectInfo,
        UpdateProjectRequest, UpdateProjectStatusRequest,
    },
    db::models::task::TaskInfo,
    db::repositories::{projects::ProjectsRepo, tasks::TasksRepo, users::UsersRepo},
    error::AppError,
    services::context::RequestContext,
    services::permissions::{Operation, authorize},
    utils::AssetUrlHelper,
    validation::project::{
        UpdateProjectChanges, validate_create_project, validate_leader_role,
        validate_update_project,
    },
};

pub struct ProjectsService;

impl ProjectsService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateProjectRequest,
        assets: &AssetUrlHelper,
    ) -> Result<ProjectInfo, AppError> {
        authorize(ctx, Operation::CreateProject)?;
        validate_create_project(&req.name, req.deadline, Utc::now().date_naive())?;

        let project = conn.transaction::<_, AppError, _>(|conn| {
            ensure_project_leader(conn, req.project_leader)?;

            let new_project = NewProject {
                name: req.name.trim().to_string(),
                description: req.description.clone(),
                manager_id: ctx.user_id,
                project_leader_id: req.project_leader,
                status: ProjectStatus::default(),
                deadline: req.deadline,
                files: req.files.clone(),
            };

            let project = ProjectsRepo::insert(conn, &new_project)?;
            UsersRepo::link_assigned_project(conn, project.project_leader_id, project.id)?;
            Ok(project)
        })?;

        tracing::info!(
            project_id = %project.id,
            manager_id = %ctx.user_id,
            leader_id = %project.project_leader_id,
            "Project created"
        );

        let mut infos = build_infos(conn, vec![project], assets)?;
        infos.pop().ok_or_else(|| AppError::internal("Failed to assemble project"))
    }

    /// Projects the caller manages or leads.
    pub fn list_own(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        assets: &AssetUrlHelper,
    ) -> Result<Vec<ProjectInfo>, AppError> {
        authorize(ctx, Operation::ListOwnProjects)?;
        let projects = ProjectsRepo::list_for_member(conn, ctx.user_id)?;
        build_infos(conn, projects, assets)
    }

    pub fn leaders(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Vec<UserBasicInfo>, AppError> {
        authorize(ctx, Operation::ListProjectLeaders)?;
        Ok(UsersRepo::list_basic_by_role(conn, UserRole::ProjectLeader)?)
    }

    pub fn details(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        assets: &AssetUrlHelper,
    ) -> Result<ProjectDetails, AppError> {
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

        build_details(conn, project, assets)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        req: &UpdateProjectRequest,
        assets: &AssetUrlHelper,
    ) -> Result<ProjectInfo, AppError> {
        let project = find_project(conn, project_id)?;
        authorize(
            ctx,
            Operation::EditProject {
                manager_id: project.manager_id,
            },
        )?;

        validate_update_project(&UpdateProjectChanges {
            name: req.name.as_deref(),
            description_present: req.description.is_some(),
            leader_present: req.project_leader.is_some(),
            deadline: req.deadline,
            file_count: req.files.as_ref().map_or(0, Vec::len),
        })?;

        let updated = conn.transaction::<_, AppError, _>(|conn| {
            let current = ProjectsRepo::find_for_update(conn, project_id)?
                .ok_or_else(|| AppError::not_found("Project"))?;

            if let Some(leader_id) = req.project_leader {
                ensure_project_leader(conn, leader_id)?;
                UsersRepo::link_assigned_project(conn, leader_id, current.id)?;
            }

            // New attachments go after the existing ones.
            let files = req.files.as_ref().filter(|f| !f.is_empty()).map(|new_files| {
                let mut files = current.files.clone();
                files.extend(new_files.iter().cloned());
                files
            });

            let changes = ProjectChanges {
                name: req.name.as_ref().map(|name| name.trim().to_string()),
                description: req.description.clone(),
                project_leader_id: req.project_leader,
                deadline: req.deadline,
                files,
                updated_at: Some(Utc::now()),
            };

            Ok(ProjectsRepo::update(conn, current.id, &changes)?)
        })?;

        tracing::info!(project_id = %updated.id, user_id = %ctx.user_id, "Project updated");

        let mut infos = build_infos(conn, vec![updated], assets)?;
        infos.pop().ok_or_else(|| AppError::internal("Failed to assemble project"))
    }

    /// Project status only ever changes here; it is never derived from tasks.
    pub fn update_status(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: Uuid,
        req: &UpdateProjectStatusRequest,
        assets: &AssetUrlHelper,
    ) -> Result<ProjectInfo, AppError> {
        let project = find_project(conn, project_id)?;
        authorize(
            ctx,
            Operation::UpdateProjectStatus {
                project_leader_id: project.project_leader_id,
            },
        )?;

        let updated = ProjectsRepo::update_status(conn, project.id, req.status)?;
        tracing::info!(
            project_id = %updated.id,
            from = %project.status,
            to = %updated.status,
            "Project status changed"
        );

        let mut infos = build_infos(conn, vec![updated], assets)?;
        infos.pop().ok_or_else(|| AppError::internal("Failed to assemble project"))
    }
}

pub(crate) fn find_project(conn: &mut PgConnection, project_id: Uuid) -> Result<Project, AppError> {
    ProjectsRepo::find_by_id(conn, project_id)?.ok_or_else(|| AppError::not_found("Project"))
}

fn ensure_project_leader(conn: &mut PgConnection, leader_id: Uuid) -> Result<(), AppError> {
    let leader = UsersRepo::find_by_id(conn, leader_id)?
        .ok_or_else(|| AppError::validation("Project leader not found"))?;
    validate_leader_role(leader.role)
}

/// Attaches manager and leader info. Users are loaded in one query for the
/// whole batch.
pub(crate) fn build_infos(
    conn: &mut PgConnection,
    projects: Vec<Project>,
    assets: &AssetUrlHelper,
) -> Result<Vec<ProjectInfo>, AppError> {
    let mut user_ids: Vec<Uuid> = projects
        .iter()
        .flat_map(|p| [p.manager_id, p.project_leader_id])
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let users: HashMap<Uuid, UserBasicInfo> = UsersRepo::find_basic_by_ids(conn, &user_ids)?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    projects
        .into_iter()
        .map(|project| {
            let manager = users
                .get(&project.manager_id)
                .cloned()
                .ok_or_else(|| AppError::internal("Failed to retrieve project manager"))?;
            let leader = users
                .get(&project.project_leader_id)
                .cloned()
                .ok_or_else(|| AppError::internal("Failed to retrieve project leader"))?;
            Ok(ProjectInfo::build(project, manager, leader, assets))
        })
        .collect()
}

pub(crate) fn build_details(
    conn: &mut PgConnection,
    project: Project,
    assets: &AssetUrlHelper,
) -> Result<ProjectDetails, AppError> {
    let tasks = TasksRepo::list_with_assignee_by_projects(conn, &[project.id])?
        .into_iter()
        .map(|(task, assignee)| TaskInfo::build(task, assignee))
        .collect();

    let mut infos = build_infos(conn, vec![project], assets)?;
    let project = infos
        .pop()
        .ok_or_else(|| AppError::internal("Failed to assemble project"))?;

    Ok(ProjectDetails { project, tasks })
}
