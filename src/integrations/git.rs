#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Output};

/// Git client interface for branch and remote operations
pub trait GitClient {
    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Create a branch from the current HEAD and check it out
    fn create_and_checkout(&self, branch: &str) -> Result<()>;

    /// Fetch `remote`, then create `branch` from `remote/base` and check it out
    fn create_branch_from(&self, branch: &str, base: &str, remote: &str) -> Result<()>;

    /// Push a branch and set its upstream
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Default branch of the remote, without the remote prefix
    fn default_branch(&self, remote: &str) -> Result<String>;

    /// `owner/repo` slug parsed from the remote URL
    fn repo_slug(&self, remote: &str) -> Result<String>;

    /// Whether the working tree has uncommitted changes
    fn has_uncommitted_changes(&self) -> Result<bool>;
}

/// Real git implementation
#[derive(Debug, Default)]
pub struct RealGitClient;

impl RealGitClient {
    fn run(args: &[&str]) -> Result<Output> {
        let output = Command::new("git")
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }

        Ok(output)
    }

    fn stdout(args: &[&str]) -> Result<String> {
        let output = Self::run(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn succeeds(args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl GitClient for RealGitClient {
    fn current_branch(&self) -> Result<String> {
        Self::stdout(&["rev-parse", "--abbrev-ref", "HEAD"])
            .context("Failed to get current branch")
    }

    fn create_and_checkout(&self, branch: &str) -> Result<()> {
        Self::run(&["checkout", "-b", branch])
            .with_context(|| format!("Failed to create branch \"{branch}\""))?;
        Ok(())
    }

    fn create_branch_from(&self, branch: &str, base: &str, remote: &str) -> Result<()> {
        Self::run(&["fetch", remote])
            .with_context(|| format!("Failed to fetch from \"{remote}\""))?;

        let start_point = format!("{remote}/{base}");
        Self::run(&["checkout", "-b", branch, &start_point]).with_context(|| {
            format!("Failed to create branch \"{branch}\" from \"{start_point}\"")
        })?;
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        Self::run(&["push", "-u", remote, branch])
            .with_context(|| format!("Failed to push branch \"{branch}\" to \"{remote}\""))?;
        Ok(())
    }

    fn default_branch(&self, remote: &str) -> Result<String> {
        let head_ref = format!("refs/remotes/{remote}/HEAD");
        match Self::stdout(&["symbolic-ref", &head_ref, "--short"]) {
            Ok(short) => Ok(strip_remote_prefix(&short, remote).to_string()),
            Err(err) => {
                for name in ["main", "master"] {
                    if Self::succeeds(&["rev-parse", "--verify", &format!("{remote}/{name}")]) {
                        return Ok(name.to_string());
                    }
                }
                Err(err).context("Failed to determine default branch")
            }
        }
    }

    fn repo_slug(&self, remote: &str) -> Result<String> {
        let url = Self::stdout(&["remote", "get-url", remote])
            .with_context(|| format!("Failed to get \"{remote}\" remote URL"))?;
        parse_repo_slug(&url)
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let status =
            Self::stdout(&["status", "--porcelain"]).context("Failed to check git status")?;
        Ok(!status.is_empty())
    }
}

/// Top-level directory of the current repository
pub fn repo_root() -> Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "Not in a git repository. Please run gh-buddy from within a git repository.\nGit error: {}",
            stderr.trim()
        );
    }

    Ok(PathBuf::from(
        String::from_utf8_lossy(&output.stdout).trim(),
    ))
}

/// Strip a leading `remote/` from a short ref name
pub fn strip_remote_prefix<'a>(short_ref: &'a str, remote: &str) -> &'a str {
    short_ref
        .strip_prefix(remote)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(short_ref)
}

/// Parse `owner/repo` from a remote URL
///
/// Supports `git@host:owner/repo`, `ssh://git@host/owner/repo` and
/// `https://host/owner/repo` forms, with an optional `.git` suffix.
pub fn parse_repo_slug(url: &str) -> Result<String> {
    let trimmed = url.trim();
    let url = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let path = if let Some(rest) = url.strip_prefix("git@") {
        rest.split_once(':').map(|(_, path)| path)
    } else {
        ["https://", "http://", "ssh://"]
            .iter()
            .find_map(|scheme| url.strip_prefix(scheme))
            .and_then(|rest| rest.split_once('/'))
            .map(|(_, path)| path)
    };

    match path.map(|p| p.trim_matches('/')) {
        Some(slug) if !slug.is_empty() => Ok(slug.to_string()),
        _ => anyhow::bail!("Unable to parse repo slug from URL: {url}"),
    }
}
