use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::mentor::PUBLIC_MENTOR_COLUMNS;
use crate::database::models::project::PROJECT_COLUMNS;
use crate::database::models::{
    Mentor, MentorWithProjects, NewMentor, NewProject, Project, ProjectUpdate, ProjectWithOwner,
    PublicMentor,
};
use crate::database::store::{PortalStore, Registration};

const MENTOR_COLUMNS: &str = "id, name, email, password, question1, answer1, question2, answer2, \
     registered_project_ids, created_at";

const SCHEMA_LOCK_KEY: i64 = 0x6d656e746f72;

// projects.project_owner carries no foreign key; the mentor's list is the
// authoritative side of the relationship.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS mentors (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        question1 TEXT NOT NULL,
        answer1 TEXT NOT NULL,
        question2 TEXT NOT NULL,
        answer2 TEXT NOT NULL,
        registered_project_ids UUID[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS projects (
        id UUID PRIMARY KEY,
        project_name TEXT NOT NULL,
        project_link TEXT NOT NULL,
        project_description TEXT NOT NULL,
        project_types TEXT[] NOT NULL DEFAULT '{}',
        project_tags TEXT[] NOT NULL DEFAULT '{}',
        video_link TEXT,
        project_owner UUID NOT NULL,
        edited BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    "CREATE INDEX IF NOT EXISTS projects_owner_idx ON projects (project_owner)",
];

/// Postgres-backed portal store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the mentors and projects tables if they are missing
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        // Concurrent CREATE TABLE IF NOT EXISTS can still collide in pg_type
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("Portal schema ready");
        Ok(())
    }
}

#[async_trait]
impl PortalStore for PgStore {
    async fn insert_mentor(&self, new: NewMentor) -> Result<Mentor, DatabaseError> {
        let mentor = Mentor::from_new(new, Utc::now());
        sqlx::query(
            "INSERT INTO mentors (id, name, email, password, question1, answer1, question2, answer2, \
             registered_project_ids, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(mentor.id)
        .bind(&mentor.name)
        .bind(&mentor.email)
        .bind(&mentor.password)
        .bind(&mentor.question1)
        .bind(&mentor.answer1)
        .bind(&mentor.question2)
        .bind(&mentor.answer2)
        .bind(&mentor.registered_project_ids)
        .bind(mentor.created_at)
        .execute(&self.pool)
        .await?;
        Ok(mentor)
    }

    async fn find_mentor(&self, id: Uuid) -> Result<Option<Mentor>, DatabaseError> {
        let query = format!("SELECT {} FROM mentors WHERE id = $1", MENTOR_COLUMNS);
        let mentor = sqlx::query_as::<_, Mentor>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(mentor)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        let query = format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS);
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn register_project(&self, new: NewProject) -> Result<Registration, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes registrations for the same mentor until commit
        let query = format!("SELECT {} FROM mentors WHERE id = $1 FOR UPDATE", MENTOR_COLUMNS);
        let mentor = sqlx::query_as::<_, Mentor>(&query)
            .bind(new.mentor_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mentor) = mentor else {
            tx.rollback().await?;
            return Ok(Registration::MentorNotFound);
        };
        if !mentor.can_register_project() {
            tx.rollback().await?;
            return Ok(Registration::LimitReached);
        }

        let project = Project::from_new(new, Utc::now());
        let insert = format!(
            "INSERT INTO projects ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            PROJECT_COLUMNS
        );
        sqlx::query(&insert)
            .bind(project.id)
            .bind(&project.project_name)
            .bind(&project.project_link)
            .bind(&project.project_description)
            .bind(&project.project_types)
            .bind(&project.project_tags)
            .bind(&project.video_link)
            .bind(project.project_owner)
            .bind(project.edited)
            .bind(project.created_at)
            .bind(project.updated_at)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE mentors SET registered_project_ids = array_append(registered_project_ids, $1) \
             WHERE id = $2",
        )
        .bind(project.id)
        .bind(mentor.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Registration::Registered(project))
    }

    async fn projects_with_owners(&self) -> Result<Vec<ProjectWithOwner>, DatabaseError> {
        let query = format!("SELECT {} FROM projects ORDER BY created_at, id", PROJECT_COLUMNS);
        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(&self.pool)
            .await?;

        let mut owner_ids: Vec<Uuid> = projects.iter().map(|p| p.project_owner).collect();
        owner_ids.sort();
        owner_ids.dedup();

        let query = format!("SELECT {} FROM mentors WHERE id = ANY($1)", PUBLIC_MENTOR_COLUMNS);
        let owners = sqlx::query_as::<_, PublicMentor>(&query)
            .bind(owner_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(ProjectWithOwner::join(projects, &owners))
    }

    async fn mentor_with_projects(&self, id: Uuid) -> Result<Vec<MentorWithProjects>, DatabaseError> {
        let query = format!("SELECT {} FROM mentors WHERE id = $1", PUBLIC_MENTOR_COLUMNS);
        let Some(mentor) = sqlx::query_as::<_, PublicMentor>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(Vec::new());
        };

        let query = format!("SELECT {} FROM projects WHERE id = ANY($1)", PROJECT_COLUMNS);
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(&mentor.registered_project_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(vec![MentorWithProjects::join(mentor, projects)])
    }

    async fn update_project(&self, update: &ProjectUpdate) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE projects SET \
                project_name = COALESCE($2, project_name), \
                project_description = COALESCE($3, project_description), \
                project_link = COALESCE($4, project_link), \
                project_tags = COALESCE($5, project_tags), \
                video_link = CASE WHEN $6 THEN $7 ELSE video_link END, \
                edited = TRUE, \
                updated_at = $8 \
             WHERE id = $1",
        )
        .bind(update.id)
        .bind(&update.project_name)
        .bind(&update.project_description)
        .bind(&update.project_link)
        .bind(&update.project_tags)
        .bind(update.video_link.is_some())
        .bind(update.video_link.clone().flatten())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!("update_project {} matched {} row(s)", update.id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
