use clap::Subcommand;
use serde_json::json;

use crate::cli::client::PortalClient;
use crate::cli::utils::{join_or_dash, output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::database::models::{MentorWithProjects, Project, ProjectWithOwner};
use crate::handlers::project::{CreateProjectRequest, UpdateProjectRequest};

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List all projects, or one mentor's projects")]
    List {
        #[arg(long, help = "Mentor ID to show")]
        mentor: Option<String>,
    },

    #[command(about = "Register a project for a mentor")]
    Create {
        #[arg(long, help = "Owning mentor ID")]
        mentor: String,
        #[arg(long, help = "Project name")]
        name: String,
        #[arg(long, help = "Repository or site URL")]
        link: String,
        #[arg(long, help = "Project description")]
        description: String,
        #[arg(long = "type", help = "Project type (repeatable)")]
        types: Vec<String>,
        #[arg(long = "tag", help = "Free-form tag (repeatable)")]
        tags: Vec<String>,
        #[arg(long, help = "Video walkthrough URL")]
        video: Option<String>,
    },

    #[command(about = "Edit a project; omitted fields stay as they are")]
    Update {
        #[arg(help = "Project ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long = "tag", help = "Replacement tag list (repeatable)")]
        tags: Vec<String>,
        #[arg(long, conflicts_with = "clear_video")]
        video: Option<String>,
        #[arg(long, help = "Remove the video link")]
        clear_video: bool,
    },
}

pub async fn handle(
    cmd: ProjectCommands,
    client: &PortalClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ProjectCommands::List { mentor } => {
            let envelope = client.list_projects(mentor.as_deref()).await?.into_result()?;
            let data = envelope.data.unwrap_or_else(|| json!([]));

            if matches!(output_format, OutputFormat::Json) {
                return output_success(&output_format, &envelope.message, Some(data));
            }

            match mentor {
                None => {
                    let projects: Vec<ProjectWithOwner> = serde_json::from_value(data)?;
                    if projects.is_empty() {
                        return output_empty_collection(&output_format, "projects", "No projects registered");
                    }
                    for entry in &projects {
                        let owner = entry
                            .owner_details
                            .first()
                            .map(|m| m.name.as_str())
                            .unwrap_or("(unknown mentor)");
                        print_project(&entry.project);
                        println!("    mentor: {}", owner);
                    }
                }
                Some(id) => {
                    let mentors: Vec<MentorWithProjects> = serde_json::from_value(data)?;
                    let Some(found) = mentors.first() else {
                        return output_empty_collection(
                            &output_format,
                            "mentors",
                            &format!("No mentor with id {}", id),
                        );
                    };
                    println!(
                        "{} <{}>: {} project(s)",
                        found.mentor.name,
                        found.mentor.email,
                        found.registered_projects.len()
                    );
                    for project in &found.registered_projects {
                        print_project(project);
                    }
                }
            }
            Ok(())
        }
        ProjectCommands::Create { mentor, name, link, description, types, tags, video } => {
            let body = CreateProjectRequest {
                project_name: name,
                project_link: link,
                project_description: description,
                project_types: types,
                project_tags: tags,
                video_link: video,
                mentor_id: Some(mentor),
            };
            let envelope = client.create_project(&body).await?.into_result()?;
            output_success(&output_format, &envelope.message, None)
        }
        ProjectCommands::Update { id, name, description, link, tags, video, clear_video } => {
            let body = UpdateProjectRequest {
                project_id: id,
                project_name: name,
                project_description: description,
                project_link: link,
                project_tags: if tags.is_empty() { None } else { Some(tags) },
                video_link: if clear_video { Some(None) } else { video.map(Some) },
            };
            let envelope = client.update_project(&body).await?.into_result()?;
            output_success(&output_format, &envelope.message, None)
        }
    }
}

fn print_project(project: &Project) {
    let marker = if project.edited { " (edited)" } else { "" };
    println!("• {}{} [{}]", project.project_name, marker, project.id);
    println!("    {}", project.project_link);
    println!("    types: {}  tags: {}", join_or_dash(&project.project_types), join_or_dash(&project.project_tags));
    if let Some(video) = &project.video_link {
        println!("    video: {}", video);
    }
}
