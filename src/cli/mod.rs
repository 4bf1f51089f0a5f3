//! Command-line interface for tailbridge
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `init`: scaffold a new asset app
//! - `install` / `build` / `start`: dependency install and CSS builds
//! - `dev`: combined dev-server + watcher via a process supervisor
//! - `check-updates` / `update` / `plugin-install`: npm maintenance

mod build;
mod dev;
mod init;
mod install;
mod plugin;
mod start;
mod update;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use build::BuildCommand;
pub use dev::DevCommand;
pub use init::InitCommand;
pub use install::InstallCommand;
pub use plugin::PluginInstallCommand;
pub use start::StartCommand;
pub use update::{CheckUpdatesCommand, UpdateCommand};

use crate::config::{BuildTool, Config};
use crate::paths::AppPaths;
use crate::runner::Runner;
use crate::standalone;
use crate::validate::Validations;

/// Tailbridge - bridges the Tailwind CSS toolchain into a web project
#[derive(Parser, Debug)]
#[command(name = "tailbridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to tailbridge.toml config file
    #[arg(short, long, global = true, default_value = "tailbridge.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new Tailwind asset app
    Init(InitCommand),

    /// Install Tailwind CSS dependencies, then build
    Install(InstallCommand),

    /// Compile the production stylesheet
    Build(BuildCommand),

    /// Watch source files and rebuild on change
    Start(StartCommand),

    /// Run the dev server and the Tailwind watcher together
    Dev(DevCommand),

    /// List available updates for Tailwind CSS and its dependencies
    CheckUpdates(CheckUpdatesCommand),

    /// Update Tailwind CSS and its dependencies
    Update(UpdateCommand),

    /// Install a Tailwind plugin and register it in the stylesheet
    PluginInstall(PluginInstallCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        print_banner();

        // Everything except `init` operates on a registered, validated app.
        match &self.command {
            Commands::Init(cmd) => cmd.execute(&self.config).await,
            command => {
                let ctx = AppContext::resolve(&self.config)?;
                match command {
                    Commands::Init(_) => unreachable!("handled above"),
                    Commands::Install(cmd) => cmd.execute(&ctx).await,
                    Commands::Build(cmd) => cmd.execute(&ctx).await,
                    Commands::Start(cmd) => cmd.execute(&ctx).await,
                    Commands::Dev(cmd) => cmd.execute(&ctx).await,
                    Commands::CheckUpdates(cmd) => cmd.execute(&ctx).await,
                    Commands::Update(cmd) => cmd.execute(&ctx).await,
                    Commands::PluginInstall(cmd) => cmd.execute(&ctx).await,
                }
            }
        }
    }
}

/// Validated per-invocation state shared by all app-scoped commands
pub struct AppContext {
    pub config: Config,
    pub paths: AppPaths,
    pub tool: BuildTool,
}

impl AppContext {
    /// Load config, run the validator sequence, and resolve the build tool.
    pub fn resolve(config_path: &str) -> Result<Self> {
        let config = Config::load(config_path)?;
        let paths = Validations.validate_app(&config)?;
        let tool = config.resolve_build_tool(paths.has_manifest());
        Ok(Self {
            config,
            paths,
            tool,
        })
    }

    /// Runner for npm inside the app's source directory
    pub fn npm(&self) -> Runner {
        Runner::npm(&self.config, &self.paths.src_dir)
    }

    /// Runner for npm, or an error for operations npm-only commands cannot
    /// perform in standalone mode
    pub fn require_npm(&self, operation: &str) -> Result<Runner> {
        if self.tool == BuildTool::Standalone {
            anyhow::bail!(
                "'{}' is not supported in standalone mode; it needs a package manager. \
                 Set use_standalone = false in tailbridge.toml and add a package.json \
                 to use npm instead.",
                operation
            );
        }
        Ok(self.npm())
    }

    /// Runner for the standalone Tailwind CLI binary
    pub fn standalone_cli(&self) -> Runner {
        let binary = standalone::cli_binary_path(&self.paths);
        Runner::new(
            binary.display().to_string(),
            &self.paths.src_dir,
            format!(
                "The standalone Tailwind CLI was not found at {}.\n\
                 Run `tailbridge install` to download it.",
                binary.display()
            ),
        )
    }
}

/// Print the tailbridge banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "🍃".cyan(),
        "tailbridge".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
