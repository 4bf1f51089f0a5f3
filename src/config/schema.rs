//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Project metadata and app registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default)]
    pub name: Option<String>,

    /// Registered sub-applications (app labels or dotted paths)
    #[serde(default)]
    pub apps: Vec<String>,
}

/// Tailwind-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailwindConfig {
    /// The designated asset app; required for every command except `init`
    #[serde(default)]
    pub app_name: Option<String>,

    /// Compiled stylesheet path, static-relative unless absolute/external
    #[serde(default = "default_css_path")]
    pub css_path: String,

    /// Development mode flag (drives cache-busting in the tag helpers)
    #[serde(default)]
    pub dev_mode: bool,

    /// Path to the npm executable
    #[serde(default = "default_npm_bin_path")]
    pub npm_bin_path: String,

    /// URL prefix for static-relative stylesheet paths
    #[serde(default = "default_static_url")]
    pub static_url: String,

    /// Force standalone-CLI or package-manager mode; inferred from the
    /// presence of package.json when unset
    #[serde(default)]
    pub use_standalone: Option<bool>,

    /// Standalone CLI version; falls back to the TAILWIND_CLI_VERSION
    /// environment variable, then a pinned default
    #[serde(default)]
    pub standalone_version: Option<String>,

    /// Argument string for one-shot standalone builds
    #[serde(default)]
    pub standalone_build_args: Option<String>,

    /// Argument string for watch-mode standalone builds
    #[serde(default)]
    pub standalone_watch_args: Option<String>,
}

impl Default for TailwindConfig {
    fn default() -> Self {
        Self {
            app_name: None,
            css_path: default_css_path(),
            dev_mode: false,
            npm_bin_path: default_npm_bin_path(),
            static_url: default_static_url(),
            use_standalone: None,
            standalone_version: None,
            standalone_build_args: None,
            standalone_watch_args: None,
        }
    }
}

fn default_css_path() -> String {
    "css/dist/styles.css".to_string()
}

fn default_npm_bin_path() -> String {
    "npm".to_string()
}

fn default_static_url() -> String {
    "/static/".to_string()
}

/// Settings for the `dev` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Command that starts the host framework's dev server
    #[serde(default = "default_server_command")]
    pub server_command: String,

    /// Procfile-based process supervisor binary
    #[serde(default = "default_supervisor")]
    pub supervisor: String,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            server_command: default_server_command(),
            supervisor: default_supervisor(),
        }
    }
}

fn default_server_command() -> String {
    "python manage.py runserver".to_string()
}

fn default_supervisor() -> String {
    "honcho".to_string()
}
