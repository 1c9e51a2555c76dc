use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Mentor, MentorWithProjects, NewMentor, NewProject, Project, ProjectUpdate, ProjectWithOwner,
    PublicMentor,
};
use crate::database::store::{PortalStore, Registration};

#[derive(Default)]
struct Collections {
    mentors: HashMap<Uuid, Mentor>,
    // insertion order doubles as listing order
    projects: Vec<Project>,
}

/// In-process portal store for tests and local runs without Postgres.
/// One mutex guards both collections.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn project_count(&self) -> usize {
        self.inner.lock().await.projects.len()
    }
}

#[async_trait]
impl PortalStore for MemoryStore {
    async fn insert_mentor(&self, new: NewMentor) -> Result<Mentor, DatabaseError> {
        let mentor = Mentor::from_new(new, Utc::now());
        self.inner.lock().await.mentors.insert(mentor.id, mentor.clone());
        Ok(mentor)
    }

    async fn find_mentor(&self, id: Uuid) -> Result<Option<Mentor>, DatabaseError> {
        Ok(self.inner.lock().await.mentors.get(&id).cloned())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        let inner = self.inner.lock().await;
        Ok(inner.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn register_project(&self, new: NewProject) -> Result<Registration, DatabaseError> {
        let mut inner = self.inner.lock().await;
        let collections = &mut *inner;

        let Some(mentor) = collections.mentors.get_mut(&new.mentor_id) else {
            return Ok(Registration::MentorNotFound);
        };
        if !mentor.can_register_project() {
            return Ok(Registration::LimitReached);
        }

        let project = Project::from_new(new, Utc::now());
        mentor.registered_project_ids.push(project.id);
        collections.projects.push(project.clone());
        Ok(Registration::Registered(project))
    }

    async fn projects_with_owners(&self) -> Result<Vec<ProjectWithOwner>, DatabaseError> {
        let inner = self.inner.lock().await;
        let owners: Vec<PublicMentor> = inner.mentors.values().map(PublicMentor::from).collect();
        Ok(ProjectWithOwner::join(inner.projects.clone(), &owners))
    }

    async fn mentor_with_projects(&self, id: Uuid) -> Result<Vec<MentorWithProjects>, DatabaseError> {
        let inner = self.inner.lock().await;
        let Some(mentor) = inner.mentors.get(&id) else {
            return Ok(Vec::new());
        };
        let candidates = inner
            .projects
            .iter()
            .filter(|p| mentor.owns(p.id))
            .cloned()
            .collect();
        Ok(vec![MentorWithProjects::join(PublicMentor::from(mentor), candidates)])
    }

    async fn update_project(&self, update: &ProjectUpdate) -> Result<bool, DatabaseError> {
        let mut inner = self.inner.lock().await;
        match inner.projects.iter_mut().find(|p| p.id == update.id) {
            Some(project) => {
                update.apply(project, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
