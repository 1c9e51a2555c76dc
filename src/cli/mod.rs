pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::PortalClient;

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Portal CLI - Command-line client for the mentor portal API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "PORTAL_URL", default_value = "http://localhost:3000", help = "API base URL")]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Project registration and editing")]
    Project {
        #[command(subcommand)]
        cmd: commands::project::ProjectCommands,
    },

    #[command(about = "Check server health status from API /health endpoint")]
    Health,

    #[command(about = "Render the mobile navigation menu")]
    Nav(commands::nav::NavArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = PortalClient::new(&cli.server);

    match cli.command {
        Commands::Project { cmd } => commands::project::handle(cmd, &client, output_format).await,
        Commands::Health => {
            let envelope = client.health().await?.into_result()?;
            utils::output_success(
                &output_format,
                &format!("{} is up", client.base_url()),
                envelope.data,
            )
        }
        Commands::Nav(args) => commands::nav::handle(args, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::AuthStatus;

    #[test]
    fn parses_project_create() {
        let cli = Cli::try_parse_from([
            "portal", "--server", "http://127.0.0.1:9", "project", "create",
            "--mentor", "m", "--name", "n", "--link", "l", "--description", "d",
            "--type", "web", "--type", "cli", "--tag", "rust",
        ])
        .unwrap();
        assert_eq!(cli.server, "http://127.0.0.1:9");
        match cli.command {
            Commands::Project { cmd: commands::project::ProjectCommands::Create { types, tags, video, .. } } => {
                assert_eq!(types, vec!["web", "cli"]);
                assert_eq!(tags, vec!["rust"]);
                assert!(video.is_none());
            }
            _ => panic!("expected project create"),
        }
    }

    #[test]
    fn parses_nav_status() {
        let cli = Cli::try_parse_from(["portal", "nav", "--status", "authenticated", "--open"]).unwrap();
        match cli.command {
            Commands::Nav(args) => {
                assert_eq!(args.status, AuthStatus::Authenticated);
                assert!(args.open);
            }
            _ => panic!("expected nav"),
        }
    }

    #[test]
    fn update_rejects_video_and_clear_together() {
        let parsed = Cli::try_parse_from([
            "portal", "project", "update", "id", "--video", "v", "--clear-video",
        ]);
        assert!(parsed.is_err());
    }
}
