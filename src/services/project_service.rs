use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{MentorWithProjects, NewProject, Project, ProjectUpdate, ProjectWithOwner};
use crate::database::store::{PortalStore, Registration};

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Mentor couldn't be found")]
    MentorNotFound,
    #[error("Mentor have already registered 3 projecs")]
    LimitExceeded,
    #[error("Invalid {field}: {value}")]
    InvalidId { field: &'static str, value: String },
    #[error("Store error: {0}")]
    Store(#[from] DatabaseError),
}

impl ProjectError {
    /// Domain rejections the caller can act on, as opposed to failures
    pub fn is_rejection(&self) -> bool {
        matches!(self, ProjectError::MentorNotFound | ProjectError::LimitExceeded)
    }
}

/// Project operations over a [`PortalStore`], free of HTTP concerns
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn PortalStore>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub fn parse_id(field: &'static str, value: &str) -> Result<Uuid, ProjectError> {
        Uuid::parse_str(value.trim()).map_err(|_| ProjectError::InvalidId {
            field,
            value: value.to_string(),
        })
    }

    /// Register a new project for `new.mentor_id`
    pub async fn create(&self, new: NewProject) -> Result<Project, ProjectError> {
        match self.store.register_project(new).await? {
            Registration::Registered(project) => Ok(project),
            Registration::MentorNotFound => Err(ProjectError::MentorNotFound),
            Registration::LimitReached => Err(ProjectError::LimitExceeded),
        }
    }

    pub async fn list_with_owners(&self) -> Result<Vec<ProjectWithOwner>, ProjectError> {
        Ok(self.store.projects_with_owners().await?)
    }

    pub async fn mentor_with_projects(&self, mentor_id: Uuid) -> Result<Vec<MentorWithProjects>, ProjectError> {
        Ok(self.store.mentor_with_projects(mentor_id).await?)
    }

    /// Apply a partial update. Succeeds whether or not the id matched.
    pub async fn update(&self, update: ProjectUpdate) -> Result<(), ProjectError> {
        if !self.store.update_project(&update).await? {
            debug!("Update for unknown project {} ignored", update.id);
        }
        Ok(())
    }
}
