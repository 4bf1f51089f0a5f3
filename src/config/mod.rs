//! Configuration handling for tailbridge
//!
//! Parses and manages tailbridge.toml configuration files. Settings are
//! re-read on every invocation; nothing is cached across commands.

mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use schema::*;

/// Pinned standalone CLI version used when neither the config file nor the
/// TAILWIND_CLI_VERSION environment variable specifies one.
pub const DEFAULT_STANDALONE_VERSION: &str = "4.1.3";

/// Environment variable consulted for the standalone CLI version.
pub const STANDALONE_VERSION_ENV: &str = "TAILWIND_CLI_VERSION";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown setting '{name}'")]
    UnknownSetting { name: String },

    #[error("{name} isn't set in tailbridge.toml")]
    MissingSetting { name: String },

    #[error("malformed argument string '{args}' (check the quoting)")]
    MalformedArgs { args: String },
}

/// Split an argument string the way a shell would, so quoted paths
/// containing spaces survive as single arguments.
pub fn split_args(args: &str) -> Result<Vec<String>, ConfigError> {
    shlex::split(args).ok_or_else(|| ConfigError::MalformedArgs {
        args: args.to_string(),
    })
}

/// Which toolchain drives install/build/watch operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    /// Dependencies and scripts run through npm
    Npm,
    /// A single self-contained Tailwind CLI binary, no package manager
    Standalone,
}

/// A resolved setting value, as returned by [`Config::get`]
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Str(String),
    Bool(bool),
    /// Optional settings with no inferred default (e.g. the standalone
    /// override) resolve to this when absent
    Unset,
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Str(s) => write!(f, "{}", s),
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Unset => write!(f, ""),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Project metadata and app registry
    #[serde(default)]
    pub project: ProjectConfig,

    /// Tailwind settings
    #[serde(default)]
    pub tailwind: TailwindConfig,

    /// `dev` command settings
    #[serde(default)]
    pub dev: DevConfig,

    /// Project root directory (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// A missing file is not an error: every setting has a documented
    /// default and commands that need more (the designated app name) fail
    /// through validation with a pointed message instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = if canonical_path.is_file() {
            let content = fs::read_to_string(&canonical_path).with_context(|| {
                format!("Failed to read config file: {}", canonical_path.display())
            })?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("Failed to parse {}", canonical_path.display()))?
        } else {
            Config::default()
        };

        config.root = root;
        Ok(config)
    }

    /// The designated asset app name, or a missing-setting error.
    pub fn app_name(&self) -> Result<&str, ConfigError> {
        self.tailwind
            .app_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingSetting {
                name: "TAILWIND_APP_NAME".to_string(),
            })
    }

    /// Standalone CLI version: explicit setting, else the
    /// TAILWIND_CLI_VERSION environment variable, else the pinned default.
    pub fn standalone_version(&self) -> String {
        self.tailwind
            .standalone_version
            .clone()
            .or_else(|| std::env::var(STANDALONE_VERSION_ENV).ok())
            .unwrap_or_else(|| DEFAULT_STANDALONE_VERSION.to_string())
    }

    /// Argument string for one-shot standalone builds, interpolating the
    /// configured stylesheet path when no override is set.
    pub fn standalone_build_args(&self) -> String {
        self.tailwind.standalone_build_args.clone().unwrap_or_else(|| {
            format!(
                "-i ./src/styles.css -o ../static/{} --minify",
                self.tailwind.css_path
            )
        })
    }

    /// Argument string for watch-mode standalone builds.
    pub fn standalone_watch_args(&self) -> String {
        self.tailwind.standalone_watch_args.clone().unwrap_or_else(|| {
            format!(
                "-i ./src/styles.css -o ../static/{} --watch",
                self.tailwind.css_path
            )
        })
    }

    /// Resolve the build tool: the explicit `use_standalone` override wins;
    /// otherwise standalone only when no package.json manifest exists.
    pub fn resolve_build_tool(&self, manifest_exists: bool) -> BuildTool {
        match self.tailwind.use_standalone {
            Some(true) => BuildTool::Standalone,
            Some(false) => BuildTool::Npm,
            None if manifest_exists => BuildTool::Npm,
            None => BuildTool::Standalone,
        }
    }

    /// Look up a recognized setting by name, applying defaults.
    ///
    /// Unrecognized names fail with an unknown-setting error; the app name
    /// is the only setting with no default and fails when absent.
    pub fn get(&self, name: &str) -> Result<SettingValue, ConfigError> {
        match name {
            "NPM_BIN_PATH" => Ok(SettingValue::Str(self.tailwind.npm_bin_path.clone())),
            "TAILWIND_DEV_MODE" => Ok(SettingValue::Bool(self.tailwind.dev_mode)),
            "TAILWIND_CSS_PATH" => Ok(SettingValue::Str(self.tailwind.css_path.clone())),
            "TAILWIND_APP_NAME" => self.app_name().map(|s| SettingValue::Str(s.to_string())),
            "TAILWIND_USE_STANDALONE" => Ok(self
                .tailwind
                .use_standalone
                .map(SettingValue::Bool)
                .unwrap_or(SettingValue::Unset)),
            "TAILWIND_STANDALONE_VERSION" => Ok(SettingValue::Str(self.standalone_version())),
            "TAILWIND_STANDALONE_BUILD_ARGS" => {
                Ok(SettingValue::Str(self.standalone_build_args()))
            }
            "TAILWIND_STANDALONE_WATCH_ARGS" => {
                Ok(SettingValue::Str(self.standalone_watch_args()))
            }
            _ => Err(ConfigError::UnknownSetting {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_css_path_default() {
        let config = Config::default();
        assert_eq!(
            config.get("TAILWIND_CSS_PATH").unwrap(),
            SettingValue::Str("css/dist/styles.css".to_string())
        );
    }

    #[test]
    fn test_css_path_override() {
        let config: Config = toml::from_str(
            r#"
            [tailwind]
            css_path = "build/app.css"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.get("TAILWIND_CSS_PATH").unwrap(),
            SettingValue::Str("build/app.css".to_string())
        );
    }

    #[test]
    fn test_unknown_setting_fails() {
        let config = Config::default();
        let err = config.get("TAILWIND_NO_SUCH_SETTING").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSetting { .. }));
    }

    #[test]
    fn test_missing_app_name_fails() {
        let config = Config::default();
        let err = config.get("TAILWIND_APP_NAME").unwrap_err();
        assert!(err.to_string().contains("TAILWIND_APP_NAME"));
    }

    #[test]
    fn test_standalone_args_interpolate_css_path() {
        let config: Config = toml::from_str(
            r#"
            [tailwind]
            css_path = "build/app.css"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.standalone_build_args(),
            "-i ./src/styles.css -o ../static/build/app.css --minify"
        );
        assert_eq!(
            config.standalone_watch_args(),
            "-i ./src/styles.css -o ../static/build/app.css --watch"
        );
    }

    #[test]
    fn test_standalone_args_override_verbatim() {
        let config: Config = toml::from_str(
            r#"
            [tailwind]
            standalone_build_args = "-i ./in.css -o ./out.css"
            "#,
        )
        .unwrap();
        assert_eq!(config.standalone_build_args(), "-i ./in.css -o ./out.css");
    }

    #[test]
    fn test_split_args_keeps_quoted_paths_whole() {
        assert_eq!(
            split_args(r#"-i ./src/styles.css -o "../static/my dist/styles.css" --minify"#)
                .unwrap(),
            [
                "-i",
                "./src/styles.css",
                "-o",
                "../static/my dist/styles.css",
                "--minify",
            ]
        );
    }

    #[test]
    fn test_split_args_rejects_unclosed_quote() {
        let err = split_args(r#"-o "../static/styles.css"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedArgs { .. }));
    }

    #[test]
    fn test_build_tool_inferred_from_manifest() {
        let config = Config::default();
        assert_eq!(config.resolve_build_tool(true), BuildTool::Npm);
        assert_eq!(config.resolve_build_tool(false), BuildTool::Standalone);
    }

    #[test]
    fn test_build_tool_override_wins() {
        let config: Config = toml::from_str(
            r#"
            [tailwind]
            use_standalone = true
            "#,
        )
        .unwrap();
        assert_eq!(config.resolve_build_tool(true), BuildTool::Standalone);

        let config: Config = toml::from_str(
            r#"
            [tailwind]
            use_standalone = false
            "#,
        )
        .unwrap();
        assert_eq!(config.resolve_build_tool(false), BuildTool::Npm);
    }
}
