//! Dependency installation command

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::build::run_build;
use crate::cli::AppContext;
use crate::config::BuildTool;
use crate::standalone;

/// Install Tailwind CSS dependencies, then build
#[derive(Args, Debug)]
pub struct InstallCommand {
    /// Disable package-lock.json creation during install
    #[arg(long)]
    pub no_package_lock: bool,
}

impl InstallCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        match ctx.tool {
            BuildTool::Standalone => {
                if standalone::install(&ctx.config, &ctx.paths)
                    .await?
                    .is_interrupted()
                {
                    return Ok(());
                }
            }
            BuildTool::Npm => {
                eprintln!("{} Installing npm dependencies...", "→".blue());
                let mut args = vec!["install"];
                if self.no_package_lock {
                    args.push("--no-package-lock");
                }
                if ctx.npm().run(&args).await?.is_interrupted() {
                    return Ok(());
                }
                eprintln!("{} Dependencies installed\n", "✓".green());
            }
        }

        // An install is immediately followed by a first build so the
        // compiled stylesheet exists before the server is ever started.
        run_build(ctx).await
    }
}
