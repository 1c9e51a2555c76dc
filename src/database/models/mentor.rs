use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::project::Project;

/// Upper bound on the projects a single mentor may register
pub const MAX_PROJECTS_PER_MENTOR: usize = 3;

/// Full mentor row, credentials included. Not `Serialize`; responses carry
/// [`PublicMentor`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct Mentor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub question1: String,
    pub answer1: String,
    pub question2: String,
    pub answer2: String,
    pub registered_project_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Registration payload for a mentor. Registration itself lives outside this
/// service; this is used to seed stores.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMentor {
    pub name: String,
    pub email: String,
    pub password: String,
    pub question1: String,
    pub answer1: String,
    pub question2: String,
    pub answer2: String,
}

impl Mentor {
    pub fn from_new(new: NewMentor, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password: new.password,
            question1: new.question1,
            answer1: new.answer1,
            question2: new.question2,
            answer2: new.answer2,
            registered_project_ids: Vec::new(),
            created_at: now,
        }
    }

    pub fn can_register_project(&self) -> bool {
        self.registered_project_ids.len() < MAX_PROJECTS_PER_MENTOR
    }

    pub fn owns(&self, project_id: Uuid) -> bool {
        self.registered_project_ids.contains(&project_id)
    }
}

/// Mentor projection safe to return to clients: no password, no security
/// questions or answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PublicMentor {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "RegisteredProjectId")]
    pub registered_project_ids: Vec<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Column list matching [`PublicMentor`]
pub const PUBLIC_MENTOR_COLUMNS: &str = "id, name, email, registered_project_ids, created_at";

impl From<&Mentor> for PublicMentor {
    fn from(mentor: &Mentor) -> Self {
        Self {
            id: mentor.id,
            name: mentor.name.clone(),
            email: mentor.email.clone(),
            registered_project_ids: mentor.registered_project_ids.clone(),
            created_at: mentor.created_at,
        }
    }
}

/// A mentor joined with every project listed in its `RegisteredProjectId`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorWithProjects {
    #[serde(flatten)]
    pub mentor: PublicMentor,
    #[serde(rename = "registeredProjects")]
    pub registered_projects: Vec<Project>,
}

impl MentorWithProjects {
    /// Joins on the mentor's list, keeping list order. Projects not named in
    /// the list are dropped even if their `projectOwner` points here.
    pub fn join(mentor: PublicMentor, candidates: Vec<Project>) -> Self {
        let mut registered_projects = Vec::with_capacity(mentor.registered_project_ids.len());
        for id in &mentor.registered_project_ids {
            if let Some(project) = candidates.iter().find(|p| p.id == *id) {
                registered_projects.push(project.clone());
            }
        }
        Self { mentor, registered_projects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::project::NewProject;

    fn mentor() -> Mentor {
        Mentor::from_new(
            NewMentor {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: "$argon2id$hash".into(),
                question1: "First pet?".into(),
                answer1: "Rex".into(),
                question2: "Home town?".into(),
                answer2: "Leeds".into(),
            },
            Utc::now(),
        )
    }

    fn project(owner: Uuid, name: &str) -> Project {
        Project::from_new(
            NewProject {
                project_name: name.into(),
                project_link: format!("https://github.com/example/{}", name),
                project_description: "demo".into(),
                project_types: vec!["web".into()],
                project_tags: vec![],
                video_link: None,
                mentor_id: owner,
            },
            Utc::now(),
        )
    }

    #[test]
    fn registration_cap_is_three() {
        let mut m = mentor();
        for _ in 0..MAX_PROJECTS_PER_MENTOR {
            assert!(m.can_register_project());
            m.registered_project_ids.push(Uuid::new_v4());
        }
        assert!(!m.can_register_project());
    }

    #[test]
    fn public_projection_omits_credentials() {
        let m = mentor();
        let value = serde_json::to_value(PublicMentor::from(&m)).unwrap();
        let obj = value.as_object().unwrap();
        for hidden in ["password", "question1", "question2", "answer1", "answer2"] {
            assert!(!obj.contains_key(hidden), "{} leaked: {}", hidden, value);
        }
        assert_eq!(obj["_id"], serde_json::json!(m.id));
        assert!(obj.contains_key("RegisteredProjectId"));
    }

    #[test]
    fn join_follows_mentor_list_not_owner_field() {
        let mut m = mentor();
        let listed_b = project(m.id, "b");
        let listed_a = project(Uuid::new_v4(), "a");
        let unlisted = project(m.id, "c");
        m.registered_project_ids = vec![listed_b.id, listed_a.id];

        let joined = MentorWithProjects::join(
            PublicMentor::from(&m),
            vec![unlisted, listed_a.clone(), listed_b.clone()],
        );

        let names: Vec<_> = joined.registered_projects.iter().map(|p| p.project_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
