#![allow(clippy::missing_errors_doc)]
use anyhow::{Context, Result};

use crate::color::{self, ColorMode};
use crate::config::Config;
use crate::domain::Issue;
use crate::integrations::gh::GhClient;
use crate::integrations::git::GitClient;
use crate::integrations::prompt::Prompter;

/// Options fixed for one command invocation
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Skip prompts and accept proposed values (`--yes`)
    pub assume_yes: bool,
    pub color_mode: ColorMode,
    pub config: Config,
}

/// Gateways, prompter and options shared by the command orchestrators
pub struct Session<H, G, P>
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    pub gh: H,
    pub git: G,
    pub prompter: P,
    pub options: Options,
}

impl<H, G, P> Session<H, G, P>
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    pub const fn new(gh: H, git: G, prompter: P, options: Options) -> Self {
        Self {
            gh,
            git,
            prompter,
            options,
        }
    }

    pub const fn color(&self) -> ColorMode {
        self.options.color_mode
    }

    pub const fn assume_yes(&self) -> bool {
        self.options.assume_yes
    }

    pub fn remote(&self) -> &str {
        &self.options.config.git.remote
    }

    /// `owner/repo` of the configured remote
    pub fn repo_slug(&self) -> Result<String> {
        let remote = self.remote();
        self.git
            .repo_slug(remote)
            .with_context(|| format!("Not in a git repository or no \"{remote}\" remote"))
    }

    /// Fetch an issue, showing a spinner while `gh` runs
    pub fn fetch_issue(&self, repo: &str, number: u32) -> Result<Issue> {
        color::with_spinner(
            self.color(),
            &format!("Fetching issue #{number}…"),
            || self.gh.issue(repo, number),
        )
    }

    /// Warn when the working tree is dirty; failures to check are ignored
    pub fn warn_if_dirty(&self) {
        if matches!(self.git.has_uncommitted_changes(), Ok(true)) {
            eprintln!(
                "{}",
                color::warn(self.color(), "You have uncommitted changes")
            );
        }
    }

    /// Offer `proposed` for editing, or accept it under `--yes`
    pub fn edit(&mut self, message: &str, proposed: &str) -> Result<String> {
        if self.assume_yes() {
            Ok(proposed.to_string())
        } else {
            self.prompter.input(message, proposed)
        }
    }

    /// Ask a yes/no question, or take `default` under `--yes`
    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        if self.assume_yes() {
            Ok(default)
        } else {
            self.prompter.confirm(message, default)
        }
    }

    /// Resolve the base branch: explicit value, else the remote default branch
    /// (or the configured fallback), offered for editing
    pub fn resolve_base(&mut self, explicit: Option<&str>) -> Result<String> {
        if let Some(base) = explicit {
            return Ok(base.to_string());
        }

        let proposed = self
            .git
            .default_branch(self.remote())
            .unwrap_or_else(|_| self.options.config.git.fallback_base.clone());
        self.edit("Base branch", &proposed)
    }
}
