use clap::Args;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::nav::{AuthStatus, MobileNav};

#[derive(Args)]
pub struct NavArgs {
    #[arg(long, default_value = "unauthenticated", help = "Session status: unauthenticated, authenticated or loading")]
    pub status: AuthStatus,
    #[arg(long, help = "Render the menu as opened")]
    pub open: bool,
}

/// Render the mobile navigation menu without a browser
pub fn handle(args: NavArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut nav = MobileNav::new();
    if args.open {
        nav.toggle();
    }
    let view = nav.view(args.status);

    match output_format {
        OutputFormat::Json => output_success(&output_format, "Navigation rendered", Some(json!(view))),
        OutputFormat::Text => {
            let icon = if view.state.is_open() { "✕" } else { "☰" };
            println!("{} menu {:?}", icon, view.state);
            if view.state.is_open() {
                for item in &view.items {
                    println!("  {}", item);
                }
                println!("  {} →", view.account);
            }
            Ok(())
        }
    }
}
