//! Watch-mode command

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::config::{split_args, BuildTool};

/// Watch source files and rebuild on change
#[derive(Args, Debug)]
pub struct StartCommand {}

impl StartCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        eprintln!(
            "{} Watching for CSS changes... Press {} to stop\n",
            "→".blue(),
            "Ctrl+C".yellow()
        );

        // Runs until the watcher exits or the user interrupts it; an
        // interrupt is the expected way to stop and exits cleanly.
        match ctx.tool {
            BuildTool::Npm => ctx.npm().run(&["run", "start"]).await?,
            BuildTool::Standalone => {
                let args = split_args(&ctx.config.standalone_watch_args())?;
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                ctx.standalone_cli().run(&args).await?
            }
        };

        Ok(())
    }
}
