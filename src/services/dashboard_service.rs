use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::enums::{ProjectStatus, TaskStatus, UserRole},
    db::models::ProjectSummary,
    db::repositories::{projects::ProjectsRepo, tasks::TasksRepo},
    error::AppError,
    services::context::RequestContext,
};

/// Role-shaped counters. Every field is always serialized; fields outside
/// the caller's role stay at zero.
#[derive(Serialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: i64,
    pub total_tasks: i64,
    pub pending_tasks: i64,
    pub completed_tasks: i64,
    pub assigned_projects: i64,
    pub assigned_tasks: i64,
    pub projects_not_started: i64,
    pub projects_in_progress: i64,
    pub projects_completed: i64,
}

impl DashboardStats {
    fn count_statuses(&mut self, projects: &[ProjectSummary]) {
        for project in projects {
            match project.status {
                ProjectStatus::NotStarted => self.projects_not_started += 1,
                ProjectStatus::InProgress => self.projects_in_progress += 1,
                ProjectStatus::Completed => self.projects_completed += 1,
            }
        }
    }

    /// Projects the caller manages.
    pub fn for_manager(projects: &[ProjectSummary]) -> Self {
        let mut stats = Self {
            total_projects: projects.len() as i64,
            total_tasks: projects.iter().map(|p| p.task_ids.len() as i64).sum(),
            ..Self::default()
        };
        stats.count_statuses(projects);
        stats
    }

    /// Projects the caller leads.
    pub fn for_project_leader(projects: &[ProjectSummary]) -> Self {
        let mut stats = Self {
            assigned_projects: projects.len() as i64,
            ..Self::default()
        };
        stats.count_statuses(projects);
        stats
    }

    /// Statuses of the tasks assigned to the caller.
    pub fn for_team_member(task_statuses: &[TaskStatus]) -> Self {
        let completed = task_statuses
            .iter()
            .filter(|status| **status == TaskStatus::Completed)
            .count() as i64;
        let assigned = task_statuses.len() as i64;

        Self {
            assigned_tasks: assigned,
            pending_tasks: assigned - completed,
            completed_tasks: completed,
            ..Self::default()
        }
    }
}

/// Where the per-role counters come from. Implemented by the database
/// connection; the role dispatch only ever asks for the caller's own scope.
pub trait DashboardSource {
    fn managed_projects(&mut self, user_id: Uuid) -> Result<Vec<ProjectSummary>, AppError>;
    fn led_projects(&mut self, user_id: Uuid) -> Result<Vec<ProjectSummary>, AppError>;
    fn assigned_task_statuses(&mut self, user_id: Uuid) -> Result<Vec<TaskStatus>, AppError>;
}

impl DashboardSource for PgConnection {
    fn managed_projects(&mut self, user_id: Uuid) -> Result<Vec<ProjectSummary>, AppError> {
        Ok(ProjectsRepo::summaries_by_manager(self, user_id)?)
    }

    fn led_projects(&mut self, user_id: Uuid) -> Result<Vec<ProjectSummary>, AppError> {
        Ok(ProjectsRepo::summaries_by_leader(self, user_id)?)
    }

    fn assigned_task_statuses(&mut self, user_id: Uuid) -> Result<Vec<TaskStatus>, AppError> {
        Ok(TasksRepo::statuses_for_assignee(self, user_id)?)
    }
}

impl DashboardStats {
    /// Dispatches on the caller's role. Roles without a dashboard scope get
    /// all zeros and cause no reads.
    pub fn for_role<S: DashboardSource + ?Sized>(
        source: &mut S,
        ctx: &RequestContext,
    ) -> Result<Self, AppError> {
        let stats = match ctx.role {
            UserRole::Manager => Self::for_manager(&source.managed_projects(ctx.user_id)?),
            UserRole::ProjectLeader => Self::for_project_leader(&source.led_projects(ctx.user_id)?),
            UserRole::TeamMember => {
                Self::for_team_member(&source.assigned_task_statuses(ctx.user_id)?)
            }
            UserRole::Admin => Self::default(),
        };
        Ok(stats)
    }
}

pub struct DashboardService;

impl DashboardService {
    pub fn stats(conn: &mut PgConnection, ctx: &RequestContext) -> Result<DashboardStats, AppError> {
        let stats = DashboardStats::for_role(conn, ctx)?;

        tracing::debug!(user_id = %ctx.user_id, role = %ctx.role, "Computed dashboard stats");
        Ok(stats)
    }
}
