//! Combined dev-server + watcher command
//!
//! tailbridge does not manage the two long-running processes itself; it
//! writes a Procfile (once) and hands control to a Procfile supervisor,
//! waiting for it to terminate.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use crate::cli::AppContext;
use crate::paths::{extract_server_url_from_procfile, PROCFILE_NAME};
use crate::runner::Runner;

/// Run the dev server and the Tailwind watcher together
#[derive(Args, Debug)]
pub struct DevCommand {}

impl DevCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        if cfg!(windows) {
            bail!(
                "The dev command is not supported on Windows. Run the dev server and \
                 `tailbridge start` in two separate terminals instead."
            );
        }

        let supervisor = &ctx.config.dev.supervisor;
        ensure_supervisor_available(supervisor)?;

        let procfile_path = ctx.config.root.join(PROCFILE_NAME);
        if !procfile_path.exists() {
            eprintln!("{} Creating {}...", "→".blue(), PROCFILE_NAME);
            fs::write(
                &procfile_path,
                procfile_content(&ctx.config.dev.server_command),
            )
            .with_context(|| format!("Failed to write {}", procfile_path.display()))?;
            eprintln!(
                "  {} {} created! You can customize the dev-server command in this file.\n",
                "✓".green(),
                PROCFILE_NAME.cyan()
            );
        } else {
            debug!("{} already exists, leaving it untouched", PROCFILE_NAME);
        }

        print_dev_banner(&procfile_path);

        let runner = Runner::new(
            supervisor,
            &ctx.config.root,
            supervisor_remediation(supervisor),
        );
        let outcome = runner.run(&["-f", PROCFILE_NAME, "start"]).await?;
        if outcome.is_interrupted() {
            eprintln!("\nStopping development servers...");
        }

        Ok(())
    }
}

/// The two process definitions written when no Procfile exists yet
fn procfile_content(server_command: &str) -> String {
    format!("server: {}\ntailwind: tailbridge start\n", server_command)
}

/// Capability check: the supervisor must already be installed; tailbridge
/// does not install tools behind the user's back.
fn ensure_supervisor_available(supervisor: &str) -> Result<()> {
    let available = std::process::Command::new(supervisor)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    if !available {
        bail!("{}", supervisor_remediation(supervisor));
    }
    Ok(())
}

fn supervisor_remediation(supervisor: &str) -> String {
    format!(
        "The process supervisor '{}' is not installed or cannot be found.\n\
         Install it (for honcho: https://pypi.org/project/honcho/, e.g. `pipx install honcho`)\n\
         or point supervisor in the [dev] section of tailbridge.toml at another\n\
         Procfile runner, then run `tailbridge dev` again.",
        supervisor
    )
}

fn print_dev_banner(procfile_path: &Path) {
    let message = "🚀 Starting Tailwind watcher and dev server";
    let line = "#".repeat(message.len() + 1);

    eprintln!("{}", line);
    eprintln!("{}", message);
    if let Some(server_url) = extract_server_url_from_procfile(procfile_path) {
        eprintln!(
            "   You can access the server at: {}",
            server_url.cyan().underline()
        );
    }
    eprintln!("   Press {} to stop the servers", "Ctrl+C".yellow());
    eprintln!("{}\n", line);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_procfile_content_lines() {
        let content = procfile_content("python manage.py runserver");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "server: python manage.py runserver",
                "tailwind: tailbridge start",
            ]
        );
    }

    #[test]
    fn test_missing_supervisor_is_reported() {
        let err = ensure_supervisor_available("definitely-not-a-real-supervisor-9c1d").unwrap_err();
        assert!(err.to_string().contains("not installed"));
        assert!(err
            .to_string()
            .contains("definitely-not-a-real-supervisor-9c1d"));
    }
}
