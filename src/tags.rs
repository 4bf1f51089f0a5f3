//! Stylesheet tag helpers
//!
//! Pure helpers computing the context a templating layer needs to emit the
//! stylesheet include and preload tags, plus minijinja renderers producing
//! the final `<link>` HTML. The only impurity is the clock read behind
//! dev-mode cache busting.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use minijinja::Environment;
use serde::Serialize;

use crate::config::Config;
use crate::paths::is_path_absolute;

const CSS_TEMPLATE: &str =
    r#"<link rel="stylesheet" href="{{ href }}{% if cache_bust %}?v={{ cache_bust }}{% endif %}">"#;

const PRELOAD_CSS_TEMPLATE: &str =
    r#"<link rel="preload" href="{{ href }}{% if cache_bust %}?v={{ cache_bust }}{% endif %}" as="style">"#;

/// Context for the primary stylesheet-include tag
#[derive(Debug, Clone, Serialize)]
pub struct CssTagContext {
    pub dev_mode: bool,
    pub v: Option<String>,
    pub tailwind_css_path: String,
    pub is_static_path: bool,
    /// Resolved href: the path verbatim when absolute/external, otherwise
    /// prefixed with the static URL
    pub href: String,
    /// Cache-busting token: the explicit `v` verbatim, else a timestamp in
    /// dev mode, else nothing
    pub cache_bust: Option<String>,
}

/// Context for the preload-hint tag
#[derive(Debug, Clone, Serialize)]
pub struct PreloadCssTagContext {
    pub v: Option<String>,
    pub tailwind_css_path: String,
    pub is_static_path: bool,
    pub href: String,
    pub cache_bust: Option<String>,
}

/// Compute the context for the stylesheet-include tag.
pub fn tailwind_css(config: &Config, v: Option<&str>) -> CssTagContext {
    let css_path = config.tailwind.css_path.clone();
    let is_static_path = !is_path_absolute(&css_path);
    let dev_mode = config.tailwind.dev_mode;

    let cache_bust = match v {
        Some(v) => Some(v.to_string()),
        None if dev_mode => Some(unix_timestamp()),
        None => None,
    };

    CssTagContext {
        dev_mode,
        v: v.map(|v| v.to_string()),
        href: resolve_href(config, &css_path, is_static_path),
        tailwind_css_path: css_path,
        is_static_path,
        cache_bust,
    }
}

/// Compute the context for the preload-hint tag. The cache-busting value is
/// a plain passthrough of the explicit version.
pub fn tailwind_preload_css(config: &Config, v: Option<&str>) -> PreloadCssTagContext {
    let css_path = config.tailwind.css_path.clone();
    let is_static_path = !is_path_absolute(&css_path);

    PreloadCssTagContext {
        v: v.map(|v| v.to_string()),
        href: resolve_href(config, &css_path, is_static_path),
        tailwind_css_path: css_path,
        is_static_path,
        cache_bust: v.map(|v| v.to_string()),
    }
}

/// Render the stylesheet-include `<link>` tag.
pub fn render_css(ctx: &CssTagContext) -> Result<String> {
    Environment::new()
        .render_str(CSS_TEMPLATE, ctx)
        .context("Failed to render the stylesheet tag")
}

/// Render the preload-hint `<link>` tag.
pub fn render_preload_css(ctx: &PreloadCssTagContext) -> Result<String> {
    Environment::new()
        .render_str(PRELOAD_CSS_TEMPLATE, ctx)
        .context("Failed to render the preload tag")
}

fn resolve_href(config: &Config, css_path: &str, is_static_path: bool) -> String {
    if is_static_path {
        format!("{}{}", config.tailwind.static_url, css_path)
    } else {
        css_path.to_string()
    }
}

fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(dev_mode: bool, css_path: Option<&str>) -> Config {
        let mut config = Config::default();
        config.tailwind.dev_mode = dev_mode;
        if let Some(path) = css_path {
            config.tailwind.css_path = path.to_string();
        }
        config
    }

    #[test]
    fn test_explicit_version_is_emitted_verbatim() {
        for dev_mode in [false, true] {
            let ctx = tailwind_css(&config(dev_mode, None), Some("123"));
            assert_eq!(ctx.cache_bust.as_deref(), Some("123"));
            let html = render_css(&ctx).unwrap();
            assert_eq!(
                html,
                r#"<link rel="stylesheet" href="/static/css/dist/styles.css?v=123">"#
            );
        }
    }

    #[test]
    fn test_dev_mode_emits_numeric_token() {
        let ctx = tailwind_css(&config(true, None), None);
        let token = ctx.cache_bust.expect("dev mode busts the cache");
        assert!(!token.is_empty());
        assert!(token.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_dev_mode_token_changes_over_time() {
        let config = config(true, None);
        let first = tailwind_css(&config, None).cache_bust.unwrap();
        // The token has one-second resolution, so sleeping past a full
        // second guarantees the clock has ticked over.
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let second = tailwind_css(&config, None).cache_bust.unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_production_without_version_has_no_token() {
        let ctx = tailwind_css(&config(false, None), None);
        assert_eq!(ctx.cache_bust, None);
        let html = render_css(&ctx).unwrap();
        assert_eq!(
            html,
            r#"<link rel="stylesheet" href="/static/css/dist/styles.css">"#
        );
    }

    #[test]
    fn test_absolute_path_is_used_verbatim() {
        let ctx = tailwind_css(
            &config(false, Some("https://cdn.example.com/styles.css")),
            None,
        );
        assert!(!ctx.is_static_path);
        assert_eq!(ctx.href, "https://cdn.example.com/styles.css");
    }

    #[test]
    fn test_preload_tag() {
        let ctx = tailwind_preload_css(&config(false, None), Some("123"));
        let html = render_preload_css(&ctx).unwrap();
        assert_eq!(
            html,
            r#"<link rel="preload" href="/static/css/dist/styles.css?v=123" as="style">"#
        );
    }

    #[test]
    fn test_preload_ignores_dev_mode() {
        let ctx = tailwind_preload_css(&config(true, None), None);
        assert_eq!(ctx.cache_bust, None);
    }
}
