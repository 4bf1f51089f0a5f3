//! App scaffolding from embedded templates
//!
//! The template variants ship inside the binary, so scaffolding needs no
//! external engine or network access. Files are rendered through minijinja
//! with the chosen app name and feature flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use minijinja::{context, Environment};

use crate::paths::app_label;

static APP_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates/app");

/// Which Tailwind project template to materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TailwindVersion {
    /// Tailwind v3 via npm, with PostCSS and a tailwind.config.js
    #[value(name = "3")]
    V3,
    /// Tailwind v4 via npm
    #[value(name = "4")]
    V4,
    /// Tailwind v4 via the standalone CLI, no package manager
    #[value(name = "4s")]
    V4Standalone,
}

impl TailwindVersion {
    fn template_dir(&self) -> &'static str {
        match self {
            TailwindVersion::V3 => "v3",
            TailwindVersion::V4 => "v4",
            TailwindVersion::V4Standalone => "v4s",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TailwindVersion::V3 => "Tailwind CSS v3 (npm)",
            TailwindVersion::V4 => "Tailwind CSS v4 (npm)",
            TailwindVersion::V4Standalone => "Tailwind CSS v4 (standalone CLI)",
        }
    }

    /// Whether this variant installs plugins through a package manager
    pub fn uses_npm(&self) -> bool {
        !matches!(self, TailwindVersion::V4Standalone)
    }
}

impl std::fmt::Display for TailwindVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Choices made during `init`
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub app_name: String,
    pub version: TailwindVersion,
    pub include_daisy_ui: bool,
}

/// Materialize a new asset app under `project_root`.
///
/// Fails if the target directory already exists. Returns the paths of the
/// files that were written, relative to `project_root`.
pub fn create_app(project_root: &Path, opts: &ScaffoldOptions) -> Result<Vec<PathBuf>> {
    let label = app_label(&opts.app_name);
    if label.is_empty() {
        bail!("App name must not be empty");
    }

    let target = project_root.join(label);
    if target.exists() {
        bail!(
            "'{}' already exists; choose another app name or remove it first",
            target.display()
        );
    }

    let variant = APP_TEMPLATES
        .get_dir(opts.version.template_dir())
        .with_context(|| format!("Malformed template variant '{}'", opts.version.template_dir()))?;

    let env = Environment::new();
    let ctx = context! {
        app_name => label,
        include_daisy_ui => opts.include_daisy_ui,
    };

    let mut created = Vec::new();
    render_dir(variant, variant.path(), &target, &env, &ctx, &mut created)?;

    Ok(created
        .into_iter()
        .map(|path| {
            path.strip_prefix(project_root)
                .map(|p| p.to_path_buf())
                .unwrap_or(path)
        })
        .collect())
}

fn render_dir(
    dir: &Dir<'_>,
    strip: &Path,
    target_root: &Path,
    env: &Environment<'_>,
    ctx: &minijinja::Value,
    created: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in dir.entries() {
        match entry {
            include_dir::DirEntry::Dir(sub) => {
                render_dir(sub, strip, target_root, env, ctx, created)?;
            }
            include_dir::DirEntry::File(file) => {
                let rel = file
                    .path()
                    .strip_prefix(strip)
                    .expect("template entries live under their variant root");
                let source = file.contents_utf8().with_context(|| {
                    format!("Template {} is not valid UTF-8", file.path().display())
                })?;
                let rendered = env.render_str(source, ctx).with_context(|| {
                    format!("Malformed template {}", file.path().display())
                })?;

                let dest = target_root.join(rel);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                fs::write(&dest, rendered)
                    .with_context(|| format!("Failed to write {}", dest.display()))?;
                created.push(dest);
            }
        }
    }
    Ok(())
}
