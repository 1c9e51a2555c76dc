use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::mentor::PublicMentor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub project_name: String,
    pub project_link: String,
    pub project_description: String,
    pub project_types: Vec<String>,
    pub project_tags: Vec<String>,
    pub video_link: Option<String>,
    pub project_owner: Uuid,
    pub edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const PROJECT_COLUMNS: &str = "id, project_name, project_link, project_description, \
     project_types, project_tags, video_link, project_owner, edited, created_at, updated_at";

/// Fields accepted when registering a project for a mentor
#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_name: String,
    pub project_link: String,
    pub project_description: String,
    pub project_types: Vec<String>,
    pub project_tags: Vec<String>,
    pub video_link: Option<String>,
    pub mentor_id: Uuid,
}

impl Project {
    pub fn from_new(new: NewProject, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_name: new.project_name,
            project_link: new.project_link,
            project_description: new.project_description,
            project_types: new.project_types,
            project_tags: new.project_tags,
            video_link: new.video_link,
            project_owner: new.mentor_id,
            edited: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial replacement of a project's editable fields.
///
/// `None` leaves the stored value alone. For `video_link` the outer option
/// means "supplied" and the inner one is the new value, so an explicit
/// `null` clears the link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub id: Uuid,
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub project_link: Option<String>,
    pub project_tags: Option<Vec<String>>,
    pub video_link: Option<Option<String>>,
}

impl ProjectUpdate {
    /// Applies the update in place. Always marks the project as edited.
    pub fn apply(&self, project: &mut Project, now: DateTime<Utc>) {
        if let Some(name) = &self.project_name {
            project.project_name = name.clone();
        }
        if let Some(description) = &self.project_description {
            project.project_description = description.clone();
        }
        if let Some(link) = &self.project_link {
            project.project_link = link.clone();
        }
        if let Some(tags) = &self.project_tags {
            project.project_tags = tags.clone();
        }
        if let Some(video) = &self.video_link {
            project.video_link = video.clone();
        }
        project.edited = true;
        project.updated_at = now;
    }
}

/// A project joined with its owner's public fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithOwner {
    #[serde(flatten)]
    pub project: Project,
    /// Zero entries when the owner no longer resolves
    #[serde(rename = "ownerDetails")]
    pub owner_details: Vec<PublicMentor>,
}

impl ProjectWithOwner {
    pub fn join(projects: Vec<Project>, owners: &[PublicMentor]) -> Vec<Self> {
        projects
            .into_iter()
            .map(|project| {
                let owner_details = owners
                    .iter()
                    .filter(|m| m.id == project.project_owner)
                    .cloned()
                    .collect();
                Self { project, owner_details }
            })
            .collect()
    }
}

/// Distinguishes an absent field from an explicit `null`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
