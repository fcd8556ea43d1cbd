use managemate_backend::db::enums::{ProjectStatus, TaskStatus, UserRole};
use managemate_backend::db::models::ProjectSummary;
use managemate_backend::error::AppError;
use managemate_backend::services::{DashboardSource, DashboardStats, RequestContext};
use uuid::Uuid;

fn project(status: ProjectStatus, tasks: usize) -> ProjectSummary {
    ProjectSummary {
        status,
        task_ids: std::iter::repeat_with(Uuid::new_v4).take(tasks).collect(),
    }
}

#[test]
fn manager_with_one_project_per_status() {
    let stats = DashboardStats::for_manager(&[
        project(ProjectStatus::NotStarted, 1),
        project(ProjectStatus::InProgress, 1),
        project(ProjectStatus::Completed, 1),
    ]);

    assert_eq!(stats.total_projects, 3);
    assert_eq!(stats.projects_not_started, 1);
    assert_eq!(stats.projects_in_progress, 1);
    assert_eq!(stats.projects_completed, 1);
    assert_eq!(stats.total_tasks, 3);

    assert_eq!(stats.assigned_projects, 0);
    assert_eq!(stats.assigned_tasks, 0);
    assert_eq!(stats.pending_tasks, 0);
    assert_eq!(stats.completed_tasks, 0);
}

#[test]
fn empty_scopes_are_all_zero() {
    assert_eq!(DashboardStats::for_manager(&[]), DashboardStats::default());
    assert_eq!(DashboardStats::for_project_leader(&[]), DashboardStats::default());
    assert_eq!(DashboardStats::for_team_member(&[]), DashboardStats::default());
}

#[test]
fn team_member_pending_excludes_completed() {
    let stats = DashboardStats::for_team_member(&[
        TaskStatus::Completed,
        TaskStatus::Completed,
        TaskStatus::InProgress,
    ]);
    assert_eq!(stats.assigned_tasks, 3);
    assert_eq!(stats.completed_tasks, 2);
    assert_eq!(stats.pending_tasks, 1);
    assert_eq!(stats.total_projects, 0);
}

#[test]
fn wire_names_are_camel_case() {
    let json = serde_json::to_value(DashboardStats::for_project_leader(&[project(
        ProjectStatus::Completed,
        2,
    )]))
    .unwrap();
    assert_eq!(json["assignedProjects"], 1);
    assert_eq!(json["projectsCompleted"], 1);
    assert_eq!(json["totalProjects"], 0);
}

/// Serves fixed scopes and records which ones were asked for.
#[derive(Default)]
struct FixedSource {
    managed: Vec<ProjectSummary>,
    led: Vec<ProjectSummary>,
    assigned: Vec<TaskStatus>,
    reads: Vec<&'static str>,
}

impl FixedSource {
    fn populated() -> Self {
        Self {
            managed: vec![
                project(ProjectStatus::NotStarted, 2),
                project(ProjectStatus::InProgress, 1),
                project(ProjectStatus::Completed, 0),
            ],
            led: vec![project(ProjectStatus::InProgress, 4)],
            assigned: vec![TaskStatus::InProgress, TaskStatus::Completed],
            reads: Vec::new(),
        }
    }
}

impl DashboardSource for FixedSource {
    fn managed_projects(&mut self, _user_id: Uuid) -> Result<Vec<ProjectSummary>, AppError> {
        self.reads.push("managed");
        Ok(self.managed.clone())
    }

    fn led_projects(&mut self, _user_id: Uuid) -> Result<Vec<ProjectSummary>, AppError> {
        self.reads.push("led");
        Ok(self.led.clone())
    }

    fn assigned_task_statuses(&mut self, _user_id: Uuid) -> Result<Vec<TaskStatus>, AppError> {
        self.reads.push("assigned");
        Ok(self.assigned.clone())
    }
}

fn stats_for(role: UserRole, source: &mut FixedSource) -> DashboardStats {
    DashboardStats::for_role(source, &RequestContext::new(Uuid::new_v4(), role)).unwrap()
}

#[test]
fn admin_dashboard_is_all_zero_without_reads() {
    let mut source = FixedSource::populated();
    assert_eq!(stats_for(UserRole::Admin, &mut source), DashboardStats::default());
    assert!(source.reads.is_empty());
}

#[test]
fn manager_dispatch_reads_only_managed_projects() {
    let mut source = FixedSource::populated();
    let stats = stats_for(UserRole::Manager, &mut source);

    assert_eq!(source.reads, ["managed"]);
    assert_eq!(stats.total_projects, 3);
    assert_eq!(stats.total_tasks, 3);
    assert_eq!(stats.projects_not_started, 1);
    assert_eq!(stats.projects_in_progress, 1);
    assert_eq!(stats.projects_completed, 1);
    assert_eq!(stats.assigned_projects, 0);
    assert_eq!(stats.assigned_tasks, 0);
    assert_eq!(stats.pending_tasks, 0);
    assert_eq!(stats.completed_tasks, 0);
}

#[test]
fn leader_dispatch_reads_only_led_projects() {
    let mut source = FixedSource::populated();
    let stats = stats_for(UserRole::ProjectLeader, &mut source);

    assert_eq!(source.reads, ["led"]);
    assert_eq!(stats.assigned_projects, 1);
    assert_eq!(stats.projects_in_progress, 1);
    assert_eq!(stats.total_projects, 0);
    assert_eq!(stats.total_tasks, 0);
    assert_eq!(stats.assigned_tasks, 0);
    assert_eq!(stats.pending_tasks, 0);
    assert_eq!(stats.completed_tasks, 0);
}

#[test]
fn team_member_dispatch_reads_only_assigned_tasks() {
    let mut source = FixedSource::populated();
    let stats = stats_for(UserRole::TeamMember, &mut source);

    assert_eq!(source.reads, ["assigned"]);
    assert_eq!(stats.assigned_tasks, 2);
    assert_eq!(stats.pending_tasks, 1);
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.total_projects, 0);
    assert_eq!(stats.assigned_projects, 0);
    assert_eq!(stats.projects_not_started, 0);
    assert_eq!(stats.projects_in_progress, 0);
    assert_eq!(stats.projects_completed, 0);
}
