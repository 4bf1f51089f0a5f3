//! App scaffolding command

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use crate::config::Config;
use crate::scaffold::{self, ScaffoldOptions, TailwindVersion};

const DEFAULT_APP_NAME: &str = "theme";

/// Scaffold a new Tailwind asset app
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Initialize without user prompts
    #[arg(long)]
    pub no_input: bool,

    /// Tailwind project template to use
    #[arg(long, value_enum, default_value_t = TailwindVersion::V4)]
    pub tailwind_version: TailwindVersion,

    /// Name for the new asset app
    #[arg(long)]
    pub app_name: Option<String>,

    /// Include the daisyUI component library
    #[arg(long)]
    pub include_daisy_ui: bool,
}

impl InitCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        let config = Config::load(config_path)?;
        let opts = self.resolve_options()?;

        eprintln!(
            "{} Creating {} app '{}'...\n",
            "→".blue(),
            opts.version.display_name().cyan(),
            opts.app_name.cyan()
        );

        let created = scaffold::create_app(&config.root, &opts)
            .context("Failed to scaffold the Tailwind app")?;
        for path in &created {
            eprintln!("  {} Created {}", "✓".green(), path.display().to_string().cyan());
        }

        eprintln!(
            "\n{} Tailwind app '{}' has been successfully created!\n",
            "✓".green().bold(),
            opts.app_name
        );
        eprintln!("  Next steps, in tailbridge.toml:");
        eprintln!(
            "    {} add \"{}\" to apps under [project]",
            "→".dimmed(),
            opts.app_name
        );
        eprintln!(
            "    {} set app_name = \"{}\" under [tailwind]",
            "→".dimmed(),
            opts.app_name
        );
        eprintln!(
            "  then run {} to install Tailwind CSS dependencies.\n",
            "tailbridge install".cyan()
        );

        Ok(())
    }

    /// Turn flags (and prompts, unless suppressed) into scaffold options
    fn resolve_options(&self) -> Result<ScaffoldOptions> {
        let mut opts = ScaffoldOptions {
            app_name: self
                .app_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_APP_NAME)
                .to_string(),
            version: self.tailwind_version,
            include_daisy_ui: self.include_daisy_ui,
        };

        if !self.no_input {
            let entered: String = Input::new()
                .with_prompt("App name")
                .default(opts.app_name)
                .interact_text()
                .context("Failed to read the app name")?;
            opts.app_name = entered.trim().to_string();

            let versions = [
                TailwindVersion::V3,
                TailwindVersion::V4,
                TailwindVersion::V4Standalone,
            ];
            let default_index = versions
                .iter()
                .position(|v| *v == opts.version)
                .unwrap_or(1);
            let names: Vec<&str> = versions.iter().map(|v| v.display_name()).collect();
            let chosen = Select::new()
                .with_prompt("Tailwind version")
                .items(&names)
                .default(default_index)
                .interact()
                .context("Failed to read the Tailwind version choice")?;
            opts.version = versions[chosen];

            if opts.version == TailwindVersion::V4 {
                opts.include_daisy_ui = Confirm::new()
                    .with_prompt("Include the daisyUI component library?")
                    .default(opts.include_daisy_ui)
                    .interact()
                    .context("Failed to read the daisyUI choice")?;
            }
        }

        // daisyUI arrives through npm and the v4 @plugin directive; the
        // other variants cannot carry it.
        if opts.include_daisy_ui && opts.version != TailwindVersion::V4 {
            eprintln!(
                "  {} daisyUI requires the Tailwind v4 npm template; ignoring --include-daisy-ui",
                "!".yellow()
            );
            opts.include_daisy_ui = false;
        }

        Ok(opts)
    }
}
