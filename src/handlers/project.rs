// handlers/project.rs - /api/project handlers
//
// POST creates a project for a mentor, GET lists projects (or one mentor
// with its projects), PATCH edits a project. Anything other than the two
// domain rejections on POST is reported as a 500 with a fixed message.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::project::double_option;
use crate::database::models::{MentorWithProjects, NewProject, ProjectUpdate, ProjectWithOwner};
use crate::error::ApiError;
use crate::services::{ProjectError, ProjectService};

use super::AppState;

const UPLOAD_FAILED: &str = "An error occurred while uploading project.";
const LIST_FAILED: &str = "Something Went Wrong.";
const UPDATE_FAILED: &str = "Something Went Wrong";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub project_name: String,
    pub project_link: String,
    pub project_description: String,
    #[serde(default)]
    pub project_types: Vec<String>,
    #[serde(default)]
    pub project_tags: Vec<String>,
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<String>,
}

impl CreateProjectRequest {
    /// A missing or null `mentorId` resolves to no mentor
    fn into_new_project(self) -> Result<NewProject, ProjectError> {
        let raw = self.mentor_id.ok_or(ProjectError::MentorNotFound)?;
        Ok(NewProject {
            mentor_id: ProjectService::parse_id("mentorId", &raw)?,
            project_name: self.project_name,
            project_link: self.project_link,
            project_description: self.project_description,
            project_types: self.project_types,
            project_tags: self.project_tags,
            video_link: self.video_link,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub video_link: Option<Option<String>>,
}

impl UpdateProjectRequest {
    fn into_update(self) -> Result<ProjectUpdate, ProjectError> {
        Ok(ProjectUpdate {
            id: ProjectService::parse_id("projectId", &self.project_id)?,
            project_name: self.project_name,
            project_description: self.project_description,
            project_link: self.project_link,
            project_tags: self.project_tags,
            video_link: self.video_link,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    #[serde(rename = "mentorId")]
    pub mentor_id: Option<String>,
}

/// Either listing shape returned by GET /api/project
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProjectListing {
    Projects(Vec<ProjectWithOwner>),
    Mentors(Vec<MentorWithProjects>),
}

/// POST /api/project - Register a project for a mentor
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(request) = payload.map_err(|e| ApiError::internal(UPLOAD_FAILED, e))?;
    let created = match request.into_new_project() {
        Ok(new_project) => state.projects.create(new_project).await,
        Err(e) => Err(e),
    };

    match created {
        Ok(project) => {
            info!("Registered project {} for mentor {}", project.id, project.project_owner);
            Ok(ApiResponse::message_only("Project uploaded successfully."))
        }
        Err(e) if e.is_rejection() => Err(ApiError::bad_request(e.to_string())),
        Err(e) => Err(ApiError::internal(UPLOAD_FAILED, e)),
    }
}

/// GET /api/project[?mentorId=<id>] - List every project with its owner, or
/// one mentor with its registered projects
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<ProjectQuery>, QueryRejection>,
) -> ApiResult<ProjectListing> {
    let Query(query) = query.map_err(|e| ApiError::internal(LIST_FAILED, e))?;

    let listing = match query.mentor_id {
        None => state
            .projects
            .list_with_owners()
            .await
            .map(ProjectListing::Projects),
        Some(raw) => {
            let mentor_id = ProjectService::parse_id("mentorId", &raw)
                .map_err(|e| ApiError::internal(LIST_FAILED, e))?;
            state
                .projects
                .mentor_with_projects(mentor_id)
                .await
                .map(ProjectListing::Mentors)
        }
    }
    .map_err(|e| ApiError::internal(LIST_FAILED, e))?;

    Ok(ApiResponse::success("Projects found successfully.", listing))
}

/// PATCH /api/project - Replace a project's editable fields and mark it edited
pub async fn patch(
    State(state): State<AppState>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(request) = payload.map_err(|e| ApiError::internal(UPDATE_FAILED, e))?;
    let update = request
        .into_update()
        .map_err(|e| ApiError::internal(UPDATE_FAILED, e))?;

    state
        .projects
        .update(update)
        .await
        .map_err(|e| ApiError::internal(UPDATE_FAILED, e))?;

    Ok(ApiResponse::message_only("Project Details updated successfully."))
}
