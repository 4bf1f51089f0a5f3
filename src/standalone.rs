//! Standalone Tailwind CLI management
//!
//! Downloads the self-contained `tailwindcss` binary for the current
//! platform from the official GitHub release, verifies it against the
//! release's published checksums, and drops it into the app's source
//! directory where the build/watch commands pick it up.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use semver::Version;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::Config;
use crate::paths::AppPaths;
use crate::runner::{interruptible, RunOutcome};

const RELEASE_BASE_URL: &str = "https://github.com/tailwindlabs/tailwindcss/releases/download";
const CHECKSUMS_FILE: &str = "sha256sums.txt";

/// Release asset name for the current OS/arch
pub fn cli_asset_name() -> Result<&'static str> {
    let asset = match (std::env::consts::OS, std::env::consts::ARCH) {
        ("linux", "x86_64") => "tailwindcss-linux-x64",
        ("linux", "aarch64") => "tailwindcss-linux-arm64",
        ("macos", "x86_64") => "tailwindcss-macos-x64",
        ("macos", "aarch64") => "tailwindcss-macos-arm64",
        ("windows", "x86_64") => "tailwindcss-windows-x64.exe",
        (os, arch) => bail!(
            "No standalone Tailwind CLI build is published for {}/{}; \
             switch to package-manager mode (use_standalone = false) instead",
            os,
            arch
        ),
    };
    Ok(asset)
}

/// Where the standalone binary lives inside the app
pub fn cli_binary_path(paths: &AppPaths) -> PathBuf {
    let name = if cfg!(windows) {
        "tailwindcss.exe"
    } else {
        "tailwindcss"
    };
    paths.src_dir.join(name)
}

/// Download and verify the standalone CLI at the configured version.
///
/// Ctrl-C while the download is in flight is the user stopping the
/// operation; it resolves to [`RunOutcome::Interrupted`] without touching
/// the filesystem.
pub async fn install(config: &Config, paths: &AppPaths) -> Result<RunOutcome> {
    let version = config.standalone_version();
    Version::parse(&version).with_context(|| {
        format!(
            "standalone_version '{}' is not a valid version string",
            version
        )
    })?;

    let asset = cli_asset_name()?;

    eprintln!(
        "{} Downloading Tailwind CLI {} ({})...",
        "→".blue(),
        format!("v{}", version).cyan(),
        asset
    );

    let client = reqwest::Client::new();
    let bytes = match interruptible(fetch_verified(&client, &version, asset)).await {
        Some(bytes) => bytes?,
        None => {
            eprintln!("\nDownload stopped");
            return Ok(RunOutcome::Interrupted);
        }
    };

    let target = cli_binary_path(paths);
    std::fs::create_dir_all(&paths.src_dir)
        .with_context(|| format!("Failed to create {}", paths.src_dir.display()))?;
    std::fs::write(&target, &bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to mark {} executable", target.display()))?;
    }

    eprintln!(
        "  {} Installed {}",
        "✓".green(),
        target.display().to_string().cyan()
    );

    Ok(RunOutcome::Completed)
}

/// Fetch a release binary and verify it against the published checksums.
async fn fetch_verified(
    client: &reqwest::Client,
    version: &str,
    asset: &str,
) -> Result<Vec<u8>> {
    let url = format!("{}/v{}/{}", RELEASE_BASE_URL, version, asset);
    let bytes = download(client, &url).await?;
    verify_checksum(client, version, asset, &bytes).await?;
    Ok(bytes)
}

/// Stream a release file, showing a progress bar when the size is known
async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    debug!("fetching {}", url);

    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()
        .with_context(|| format!("Download failed for {}", url))?;

    let progress = match response.content_length() {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::with_template("  {bar:30.cyan/dim} {bytes}/{total_bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            Some(bar)
        }
        None => None,
    };

    let mut bytes = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("Download interrupted for {}", url))?
    {
        bytes.extend_from_slice(&chunk);
        if let Some(bar) = &progress {
            bar.inc(chunk.len() as u64);
        }
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    Ok(bytes)
}

/// Check the downloaded binary against the release's sha256sums.txt
async fn verify_checksum(
    client: &reqwest::Client,
    version: &str,
    asset: &str,
    bytes: &[u8],
) -> Result<()> {
    let url = format!("{}/v{}/{}", RELEASE_BASE_URL, version, CHECKSUMS_FILE);
    let sums = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()
        .with_context(|| format!("Checksum download failed for {}", url))?
        .text()
        .await
        .context("Failed to read checksum file")?;

    let expected = expected_digest(&sums, asset).with_context(|| {
        format!(
            "No entry for {} in the release's {}",
            asset, CHECKSUMS_FILE
        )
    })?;

    let actual = hex::encode(Sha256::digest(bytes));
    if !actual.eq_ignore_ascii_case(&expected) {
        bail!(
            "Checksum mismatch for {}: expected {}, got {}",
            asset,
            expected,
            actual
        );
    }

    debug!("checksum verified for {}", asset);
    Ok(())
}

/// Find the hex digest for `asset` in a `sha256sums.txt` body
fn expected_digest(sums: &str, asset: &str) -> Option<String> {
    sums.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        let digest = parts.next()?;
        let name = parts.next()?;
        // entries are listed as "<digest>  ./<name>" or "<digest>  <name>"
        (name.trim_start_matches("./") == asset).then(|| digest.to_string())
    })
}
