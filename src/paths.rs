//! Path derivation and filesystem inspection
//!
//! All conventional locations inside a Tailwind asset app are derived here
//! from the project root and the registered app name. Read-only.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

/// Process-definition file consumed by the `dev` supervisor
pub const PROCFILE_NAME: &str = "Procfile.tailwind";

/// Regex for a dev-server line like `runserver`, `runserver 8001` or
/// `runserver 0.0.0.0:8000`
static RUNSERVER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"runserver(?:\s+(?:(?P<host>[\w.\-]+):)?(?P<port>\d{2,5}))?").unwrap()
});

/// Conventional locations inside a registered asset app
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// The app's on-disk directory
    pub app_dir: PathBuf,
    /// Frontend source directory (`static_src`)
    pub src_dir: PathBuf,
    /// Package-manager manifest (`static_src/package.json`)
    pub package_json: PathBuf,
    /// Stylesheet entry file (`static_src/src/styles.css`)
    pub styles_css: PathBuf,
}

impl AppPaths {
    /// Derive all conventional paths for `app_name` under `project_root`.
    ///
    /// Dotted app names resolve through their final label, matching how the
    /// registry addresses apps (`myproject.theme` lives at `<root>/theme`).
    pub fn resolve(project_root: &Path, app_name: &str) -> Self {
        let app_dir = project_root.join(app_label(app_name));
        let src_dir = app_dir.join("static_src");
        let package_json = src_dir.join("package.json");
        let styles_css = src_dir.join("src").join("styles.css");
        Self {
            app_dir,
            src_dir,
            package_json,
            styles_css,
        }
    }

    /// Whether the package-manager manifest exists (drives mode inference)
    pub fn has_manifest(&self) -> bool {
        self.package_json.is_file()
    }
}

/// Final dot-segment of an app name
pub fn app_label(app_name: &str) -> &str {
    app_name.rsplit('.').next().unwrap_or(app_name)
}

/// True for absolute or external stylesheet paths (`/...` or `http...`)
pub fn is_path_absolute(path: &str) -> bool {
    path.starts_with('/') || path.starts_with("http")
}

/// Best-effort server URL out of a process-definition file.
///
/// Looks for a `runserver [host:]port` invocation; host and port default to
/// `localhost:8000` when omitted. Returns `None` when no dev-server line is
/// recognizable, in which case the caller just skips the URL hint.
pub fn extract_server_url_from_procfile(procfile_path: &Path) -> Option<String> {
    let content = fs::read_to_string(procfile_path).ok()?;
    let caps = RUNSERVER_REGEX.captures(&content)?;
    let host = caps
        .name("host")
        .map(|m| m.as_str())
        .filter(|h| *h != "0.0.0.0")
        .unwrap_or("localhost");
    let port = caps.name("port").map(|m| m.as_str()).unwrap_or("8000");
    Some(format!("http://{}:{}", host, port))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_app_paths_from_label() {
        let paths = AppPaths::resolve(Path::new("/project"), "theme");
        assert_eq!(paths.app_dir, Path::new("/project/theme"));
        assert_eq!(paths.src_dir, Path::new("/project/theme/static_src"));
        assert_eq!(
            paths.package_json,
            Path::new("/project/theme/static_src/package.json")
        );
        assert_eq!(
            paths.styles_css,
            Path::new("/project/theme/static_src/src/styles.css")
        );
    }

    #[test]
    fn test_app_paths_from_dotted_name() {
        let paths = AppPaths::resolve(Path::new("/project"), "myproject.theme");
        assert_eq!(paths.app_dir, Path::new("/project/theme"));
    }

    #[test]
    fn test_is_path_absolute() {
        assert!(is_path_absolute("/static/css/styles.css"));
        assert!(is_path_absolute("http://cdn.example.com/styles.css"));
        assert!(is_path_absolute("https://cdn.example.com/styles.css"));
        assert!(!is_path_absolute("css/dist/styles.css"));
    }

    #[test]
    fn test_extract_server_url_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let procfile = dir.path().join(PROCFILE_NAME);
        std::fs::write(
            &procfile,
            "server: python manage.py runserver\ntailwind: tailbridge start",
        )
        .unwrap();
        assert_eq!(
            extract_server_url_from_procfile(&procfile),
            Some("http://localhost:8000".to_string())
        );
    }

    #[test]
    fn test_extract_server_url_with_host_and_port() {
        let dir = tempfile::tempdir().unwrap();
        let procfile = dir.path().join(PROCFILE_NAME);
        std::fs::write(
            &procfile,
            "server: python manage.py runserver 127.0.0.1:8001\ntailwind: tailbridge start",
        )
        .unwrap();
        assert_eq!(
            extract_server_url_from_procfile(&procfile),
            Some("http://127.0.0.1:8001".to_string())
        );
    }

    #[test]
    fn test_extract_server_url_wildcard_host() {
        let dir = tempfile::tempdir().unwrap();
        let procfile = dir.path().join(PROCFILE_NAME);
        std::fs::write(&procfile, "server: python manage.py runserver 0.0.0.0:9000").unwrap();
        assert_eq!(
            extract_server_url_from_procfile(&procfile),
            Some("http://localhost:9000".to_string())
        );
    }

    #[test]
    fn test_extract_server_url_unrecognizable() {
        let dir = tempfile::tempdir().unwrap();
        let procfile = dir.path().join(PROCFILE_NAME);
        std::fs::write(&procfile, "web: gunicorn myproject.wsgi").unwrap();
        assert_eq!(extract_server_url_from_procfile(&procfile), None);
    }
}
