//! Dependency maintenance commands

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;

/// List available updates for Tailwind CSS and its dependencies
#[derive(Args, Debug)]
pub struct CheckUpdatesCommand {}

impl CheckUpdatesCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let npm = ctx.require_npm("check-updates")?;
        npm.run(&["outdated"]).await?;
        Ok(())
    }
}

/// Update Tailwind CSS and its dependencies
#[derive(Args, Debug)]
pub struct UpdateCommand {}

impl UpdateCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let npm = ctx.require_npm("update")?;
        if npm.run(&["update"]).await?.is_interrupted() {
            return Ok(());
        }
        eprintln!("{} Dependencies updated\n", "✓".green().bold());
        Ok(())
    }
}
