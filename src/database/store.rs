use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Mentor, MentorWithProjects, NewMentor, NewProject, Project, ProjectUpdate, ProjectWithOwner,
};

/// Outcome of registering a project against a mentor
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Registered(Project),
    MentorNotFound,
    LimitReached,
}

/// Persistence operations behind the project API.
///
/// `register_project` is atomic: the ownership-cap check, the project insert
/// and the append to the mentor's list either all happen or none do, and two
/// concurrent registrations for one mentor are serialized.
#[async_trait]
pub trait PortalStore: Send + Sync {
    async fn insert_mentor(&self, new: NewMentor) -> Result<Mentor, DatabaseError>;

    async fn find_mentor(&self, id: Uuid) -> Result<Option<Mentor>, DatabaseError>;

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError>;

    async fn register_project(&self, new: NewProject) -> Result<Registration, DatabaseError>;

    /// Every project with its owner's public fields
    async fn projects_with_owners(&self) -> Result<Vec<ProjectWithOwner>, DatabaseError>;

    /// Zero or one mentors, each with the projects its list names
    async fn mentor_with_projects(&self, id: Uuid) -> Result<Vec<MentorWithProjects>, DatabaseError>;

    /// Returns whether a project matched `update.id`
    async fn update_project(&self, update: &ProjectUpdate) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
