//! Configuration schema and type definitions

use serde::{Deserialize, Serialize};

use crate::domain::IssueType;

/// Configuration for gh-buddy
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub branch: BranchConfig,
    #[serde(default, alias = "pull_request")]
    pub pr: PrConfig,
}

/// Git settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Remote used for fetching, pushing and repository detection
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Base branch used when the remote default branch cannot be determined
    #[serde(default = "default_fallback_base")]
    pub fallback_base: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            fallback_base: default_fallback_base(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_fallback_base() -> String {
    "main".to_string()
}

/// Branch creation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchConfig {
    /// Type used when no label matches and prompts are skipped
    #[serde(default)]
    pub default_type: IssueType,
    /// Default answer when asked whether to push a new branch
    #[serde(default = "default_push")]
    pub push: bool,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            default_type: IssueType::default(),
            push: default_push(),
        }
    }
}

const fn default_push() -> bool {
    true
}

/// Pull request settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrConfig {
    /// Default answer when asked whether to open a draft
    #[serde(default)]
    pub draft: bool,
    /// Labels added to every pull request
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Template for global configuration file
const TEMPLATE_GLOBAL: &str = r#"# gh-buddy global configuration
# Location: ~/.config/gh-buddy/config.toml
#
# This file contains default settings applied to all repositories.
# A .gh-buddy.toml at the repository root replaces these values.

[git]
# Remote used to fetch base branches, push new branches and detect owner/repo
remote = "origin"
# Base branch used when the remote default branch cannot be determined
fallback_base = "main"

[branch]
# Branch type used when no issue label matches and --yes skips the prompt
# One of: feature, bugfix, hotfix, release, chore, docs, refactor, test, internal
default_type = "feature"
# Default answer to "Push branch to <remote>?"
push = true

[pr]
# Default answer to "Create as draft?"
draft = false
# Labels added to every pull request (in addition to --label)
labels = [
    # "needs-review",
]
"#;

/// Template for local configuration file
const TEMPLATE_LOCAL: &str = r#"# gh-buddy project configuration
# Location: .gh-buddy.toml (repository root)
#
# When present, this file is used instead of the global configuration.
# Commit it if the settings should be shared with the team.

[git]
# remote = "origin"
# fallback_base = "main"

[branch]
# default_type = "feature"
# push = true

[pr]
# draft = false
# labels = []
"#;

impl Config {
    /// Get the global configuration template
    #[must_use]
    pub const fn template_global() -> &'static str {
        TEMPLATE_GLOBAL
    }

    /// Get the local configuration template
    #[must_use]
    pub const fn template_local() -> &'static str {
        TEMPLATE_LOCAL
    }
}
