//! Tailwind plugin installation command

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;

/// Import directive every stylesheet entry file starts from
pub const IMPORT_DIRECTIVE: &str = "@import \"tailwindcss\";";

/// Install a Tailwind plugin and register it in the stylesheet
#[derive(Args, Debug)]
pub struct PluginInstallCommand {
    /// npm package name of the plugin (e.g. @tailwindcss/typography)
    pub plugin_name: String,
}

impl PluginInstallCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let npm = ctx.require_npm("plugin-install")?;

        eprintln!(
            "{} Installing {} npm package...",
            "→".blue(),
            self.plugin_name.cyan()
        );
        if npm
            .run(&["install", &self.plugin_name, "--save-dev"])
            .await?
            .is_interrupted()
        {
            return Ok(());
        }

        let styles_path = &ctx.paths.styles_css;
        let content = fs::read_to_string(styles_path)
            .with_context(|| format!("styles.css not found at {}", styles_path.display()))?;

        match insert_plugin_directive(&content, &self.plugin_name)
            .with_context(|| format!("Could not register the plugin in {}", styles_path.display()))?
        {
            PluginEdit::AlreadyPresent => {
                eprintln!(
                    "  {} Plugin {} is already included in styles.css",
                    "!".yellow(),
                    self.plugin_name
                );
            }
            PluginEdit::Updated(new_content) => {
                fs::write(styles_path, new_content)
                    .with_context(|| format!("Failed to write {}", styles_path.display()))?;
                eprintln!(
                    "\n{} Plugin {} has been installed and registered in styles.css\n",
                    "✓".green().bold(),
                    self.plugin_name
                );
            }
        }

        Ok(())
    }
}

/// Result of editing the stylesheet entry file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginEdit {
    /// The directive was already there; nothing to write
    AlreadyPresent,
    /// New file content with the directive inserted after the import
    Updated(String),
}

/// Insert `@plugin "<name>";` immediately after the import directive.
///
/// Idempotent: a directive that is already present is left alone. Fails
/// when the import directive cannot be found, since there is then no
/// defined place to register the plugin.
pub fn insert_plugin_directive(content: &str, plugin_name: &str) -> Result<PluginEdit> {
    let plugin_line = format!("@plugin \"{}\";", plugin_name);
    if content.contains(&plugin_line) {
        return Ok(PluginEdit::AlreadyPresent);
    }

    if !content.contains(IMPORT_DIRECTIVE) {
        bail!("Could not find {} in the stylesheet entry file", IMPORT_DIRECTIVE);
    }

    let new_content = content.replacen(
        IMPORT_DIRECTIVE,
        &format!("{}\n{}", IMPORT_DIRECTIVE, plugin_line),
        1,
    );
    Ok(PluginEdit::Updated(new_content))
}
