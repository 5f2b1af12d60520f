use clap::{Args, Parser, Subcommand};
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use std::ffi::OsStr;
use std::process::Command;

use crate::domain::{parse_issue_number, IssueType};

/// Create branches and pull requests from GitHub issues
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// When to use colored output
    #[arg(long, value_name = "WHEN", global = true, ignore_case = true)]
    pub color: Option<crate::color::ColorMode>,

    /// Skip prompts and accept the proposed values
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a local branch from an issue
    ///
    /// The branch is named <type>/GH-<issue>-<slug-of-title>.
    #[command(after_help = "Examples:\n  \
        gh buddy create-branch --issue 42\n  \
        gh buddy create-branch --issue 42 --type bugfix --base develop\n  \
        gh buddy create-branch --issue 42 -y")]
    CreateBranch(CreateBranchArgs),
    /// Create a pull request from the current branch
    ///
    /// The linked issue is detected from the branch name unless --issue is given;
    /// its title and "Closes #N" pre-populate the pull request.
    #[command(after_help = "Examples:\n  \
        gh buddy create-pr\n  \
        gh buddy create-pr --issue 42 --draft\n  \
        gh buddy create-pr --base develop -l bug -l ui -y")]
    CreatePr(CreatePrArgs),
    /// Initialize configuration files (creates both global and local configs by default)
    Init {
        /// Generate only global config
        #[arg(long, conflicts_with = "local")]
        global: bool,
        /// Generate only local config
        #[arg(long, conflicts_with = "global")]
        local: bool,
        /// Overwrite existing config files
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        shell: String,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct CreateBranchArgs {
    /// Issue number to create the branch from
    #[arg(short, long, value_parser = parse_issue_arg)]
    pub issue: Option<u32>,
    /// Branch type (feature, bugfix, hotfix, release, chore, docs, refactor, test, internal)
    #[arg(short = 't', long = "type", value_name = "TYPE", add = ArgValueCompleter::new(list_issue_types))]
    pub issue_type: Option<String>,
    /// Base branch to create from (default: the remote's default branch)
    #[arg(short, long, add = ArgValueCompleter::new(list_git_branches))]
    pub base: Option<String>,
    /// Create the branch from the current HEAD without fetching
    #[arg(long, conflicts_with = "base")]
    pub from_head: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct CreatePrArgs {
    /// Issue number to link the pull request to
    #[arg(short, long, value_parser = parse_issue_arg)]
    pub issue: Option<u32>,
    /// Base branch for the pull request (default: the remote's default branch)
    #[arg(short, long, add = ArgValueCompleter::new(list_git_branches))]
    pub base: Option<String>,
    /// Pull request title (default: issue title or derived from the branch)
    #[arg(short = 'T', long)]
    pub title: Option<String>,
    /// Pull request body (default: generated from the issue)
    #[arg(long)]
    pub body: Option<String>,
    /// Create the pull request as a draft
    #[arg(short, long)]
    pub draft: bool,
    /// Label to add (repeatable)
    #[arg(short, long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,
}

fn parse_issue_arg(value: &str) -> Result<u32, String> {
    parse_issue_number(value).map_err(|err| err.to_string())
}

/// Complete `--type` with the valid issue types
#[must_use]
pub fn list_issue_types(current: &OsStr) -> Vec<CompletionCandidate> {
    let prefix = current.to_string_lossy();
    IssueType::ALL
        .iter()
        .map(|t| t.as_str())
        .filter(|name| name.starts_with(&*prefix))
        .map(CompletionCandidate::new)
        .collect()
}

/// List remote branches for completion of base-branch arguments
///
/// Returns empty Vec if git command fails (e.g., not in a git repository)
/// Remote names are stripped (`origin/main` completes as `main`)
/// Excludes symbolic refs like origin/HEAD
#[must_use]
pub fn list_git_branches(current: &OsStr) -> Vec<CompletionCandidate> {
    let output = Command::new("git")
        .args([
            "for-each-ref",
            "--format=%(refname:lstrip=3)%09%(symref)",
            "refs/remotes",
        ])
        .output();

    let Ok(output) = output else {
        return Vec::new();
    };

    if !output.status.success() {
        return Vec::new();
    }

    let prefix = current.to_string_lossy();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut names: Vec<&str> = parse_branch_refs(&stdout)
        .into_iter()
        .filter(|name| name.starts_with(&*prefix))
        .collect();
    // Several remotes may carry the same branch
    names.sort_unstable();
    names.dedup();
    names.into_iter().map(CompletionCandidate::new).collect()
}

/// Parse `for-each-ref` output of `<name>\t<symref>` lines, skipping symbolic refs
#[must_use]
pub fn parse_branch_refs(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter_map(|line| {
            let (name, symref) = line.split_once('\t').unwrap_or((line, ""));
            let name = name.trim();
            (symref.trim().is_empty() && !name.is_empty()).then_some(name)
        })
        .collect()
}
