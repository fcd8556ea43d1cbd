use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::auth::UserBasicInfo;
use super::task::TaskInfo;
use crate::db::enums::ProjectStatus;
use crate::utils::AssetUrlHelper;
use crate::validation::rules::validate_asset_paths;

// Project models
#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub manager_id: Uuid,
    pub project_leader_id: Uuid,
    pub status: ProjectStatus,
    pub deadline: NaiveDate,
    pub files: Vec<String>,
    pub task_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub manager_id: Uuid,
    pub project_leader_id: Uuid,
    pub status: ProjectStatus,
    pub deadline: NaiveDate,
    pub files: Vec<String>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::projects)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_leader_id: Option<Uuid>,
    pub deadline: Option<NaiveDate>,
    pub files: Option<Vec<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The slice of a project the dashboard reduces over.
#[derive(Queryable, Clone, Debug, PartialEq)]
pub struct ProjectSummary {
    pub status: ProjectStatus,
    pub task_ids: Vec<Uuid>,
}

// Project API DTOs
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Project name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub project_leader: Uuid,
    pub deadline: NaiveDate,
    #[serde(default)]
    #[validate(custom(function = "validate_asset_paths"))]
    pub files: Vec<String>,
}

#[derive(Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Project name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_leader: Option<Uuid>,
    pub deadline: Option<NaiveDate>,
    /// Appended to the existing attachment list, in order.
    #[validate(custom(function = "validate_asset_paths"))]
    pub files: Option<Vec<String>>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateProjectStatusRequest {
    pub status: ProjectStatus,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub path: String,
    pub full_path: String,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub manager: UserBasicInfo,
    pub project_leader: UserBasicInfo,
    pub status: ProjectStatus,
    pub deadline: NaiveDate,
    pub files: Vec<ProjectFile>,
    pub tasks: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectInfo {
    pub fn build(
        project: Project,
        manager: UserBasicInfo,
        project_leader: UserBasicInfo,
        assets: &AssetUrlHelper,
    ) -> Self {
        let files = project
            .files
            .iter()
            .map(|path| ProjectFile {
                path: path.clone(),
                full_path: assets.process_url(path),
            })
            .collect();

        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            manager,
            project_leader,
            status: project.status,
            deadline: project.deadline,
            files,
            tasks: project.task_ids,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ProjectDetails {
    pub project: ProjectInfo,
    pub tasks: Vec<TaskInfo>,
}
