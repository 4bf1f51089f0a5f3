//! Precondition checks for app-scoped commands
//!
//! Every command except `init` runs this sequence before doing anything
//! mutating. Checks fail fast with messages that name the offending file or
//! setting; nothing is aggregated.

use thiserror::Error;

use crate::config::Config;
use crate::paths::AppPaths;

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("TAILWIND_APP_NAME isn't set in tailbridge.toml")]
    MissingAppName,

    #[error("'{app}' is not registered under [project] apps in tailbridge.toml")]
    NotRegistered { app: String },

    #[error("'{app}' isn't a Tailwind asset app: expected {marker}")]
    NotTailwindApp { app: String, marker: String },
}

/// Precondition checks, in the order they must run
#[derive(Debug, Default)]
pub struct Validations;

impl Validations {
    /// The designated asset app is declared
    pub fn has_settings(&self, config: &Config) -> Result<(), ValidationError> {
        config
            .app_name()
            .map(|_| ())
            .map_err(|_| ValidationError::MissingAppName)
    }

    /// The designated app is registered with the project
    pub fn is_registered(&self, config: &Config, app_name: &str) -> Result<(), ValidationError> {
        if config.project.apps.iter().any(|app| app == app_name) {
            Ok(())
        } else {
            Err(ValidationError::NotRegistered {
                app: app_name.to_string(),
            })
        }
    }

    /// The app directory contains the stylesheet entry file that marks a
    /// valid target of this tool
    pub fn is_tailwind_app(&self, app_name: &str, paths: &AppPaths) -> Result<(), ValidationError> {
        if paths.styles_css.is_file() {
            Ok(())
        } else {
            Err(ValidationError::NotTailwindApp {
                app: app_name.to_string(),
                marker: paths.styles_css.display().to_string(),
            })
        }
    }

    /// Full fail-fast sequence; returns the resolved app paths on success.
    ///
    /// Label acceptance (the fourth check of the original) lives in the clap
    /// subcommand enum and fails at parse time.
    pub fn validate_app(&self, config: &Config) -> Result<AppPaths, ValidationError> {
        self.has_settings(config)?;
        let app_name = config.app_name().map_err(|_| ValidationError::MissingAppName)?;
        self.is_registered(config, app_name)?;
        let paths = AppPaths::resolve(&config.root, app_name);
        self.is_tailwind_app(app_name, &paths)?;
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn config_with_app(root: &std::path::Path, app: &str, registered: bool) -> Config {
        let mut config = Config::default();
        config.root = root.to_path_buf();
        config.tailwind.app_name = Some(app.to_string());
        if registered {
            config.project.apps.push(app.to_string());
        }
        config
    }

    #[test]
    fn test_missing_app_name() {
        let validate = Validations;
        let config = Config::default();
        let err = validate.validate_app(&config).unwrap_err();
        assert!(matches!(err, ValidationError::MissingAppName));
        assert!(err.to_string().contains("TAILWIND_APP_NAME"));
    }

    #[test]
    fn test_unregistered_app() {
        let dir = tempfile::tempdir().unwrap();
        let validate = Validations;
        let config = config_with_app(dir.path(), "theme", false);
        let err = validate.validate_app(&config).unwrap_err();
        assert!(matches!(err, ValidationError::NotRegistered { .. }));
        assert!(err.to_string().contains("theme"));
    }

    #[test]
    fn test_registered_app_without_marker() {
        let dir = tempfile::tempdir().unwrap();
        let validate = Validations;
        let config = config_with_app(dir.path(), "theme", true);
        fs::create_dir_all(dir.path().join("theme/static_src")).unwrap();
        let err = validate.validate_app(&config).unwrap_err();
        assert!(matches!(err, ValidationError::NotTailwindApp { .. }));
        assert!(err.to_string().contains("styles.css"));
    }

    #[test]
    fn test_valid_app_passes() {
        let dir = tempfile::tempdir().unwrap();
        let validate = Validations;
        let config = config_with_app(dir.path(), "theme", true);
        let src = dir.path().join("theme/static_src/src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("styles.css"), "@import \"tailwindcss\";\n").unwrap();
        let paths = validate.validate_app(&config).unwrap();
        assert!(paths.styles_css.is_file());
    }
}
