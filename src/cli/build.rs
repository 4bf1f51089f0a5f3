//! Production build command

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::config::{split_args, BuildTool};

/// Compile the production stylesheet
#[derive(Args, Debug)]
pub struct BuildCommand {}

impl BuildCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        run_build(ctx).await
    }
}

/// One-shot, minified CSS build; also run by `install` after a successful
/// dependency installation.
pub(crate) async fn run_build(ctx: &AppContext) -> Result<()> {
    eprintln!("{} Building Tailwind CSS...", "→".blue());

    let outcome = match ctx.tool {
        BuildTool::Npm => ctx.npm().run(&["run", "build"]).await?,
        BuildTool::Standalone => {
            let args = split_args(&ctx.config.standalone_build_args())?;
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            ctx.standalone_cli().run(&args).await?
        }
    };

    if outcome.is_interrupted() {
        return Ok(());
    }

    eprintln!("{} Tailwind CSS built\n", "✓".green().bold());
    Ok(())
}
