pub mod mentor;
pub mod project;

pub use mentor::{Mentor, MentorWithProjects, NewMentor, PublicMentor, MAX_PROJECTS_PER_MENTOR};
pub use project::{NewProject, Project, ProjectUpdate, ProjectWithOwner};
