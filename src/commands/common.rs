//! Common utility functions for command handlers
//!
//! This module contains shared helper functions used across multiple commands.

use anyhow::Result;
use std::io;

use crate::color;
use crate::domain::parse_issue_number;
use crate::integrations::gh::{issue_option, GhClient, RealGhClient};
use crate::integrations::git::{GitClient, RealGitClient};
use crate::integrations::prompt::{Prompter, TerminalPrompter};
use crate::service::{Options, Session};

pub type StdioPrompter = TerminalPrompter<io::StdinLock<'static>, io::Stderr>;
pub type RealSession = Session<RealGhClient, RealGitClient, StdioPrompter>;

/// Build a session over the real `gh`, `git` and stdin/stderr
pub fn real_session(options: Options) -> RealSession {
    Session::new(
        RealGhClient,
        RealGitClient,
        TerminalPrompter::stdio(),
        options,
    )
}

/// Fail early with install instructions when `gh` is missing
///
/// # Errors
/// Returns an error if the `gh` CLI cannot be executed
pub fn ensure_gh_available(gh: &impl GhClient) -> Result<()> {
    if !gh.is_available() {
        anyhow::bail!(
            "GitHub CLI (gh) is not installed or not available.\n\
             Please install gh from https://cli.github.com/ and run `gh auth login`."
        );
    }
    Ok(())
}

fn ask_issue_number<P: Prompter>(prompter: &mut P, message: &str) -> Result<u32> {
    let input = prompter.input(message, "")?;
    parse_issue_number(&input)
}

/// Let the user pick one of their assigned open issues
///
/// Falls back to typing a number when listing fails or nothing is assigned.
///
/// # Errors
/// Returns an error if the selection or the entered number is invalid
pub fn prompt_for_issue<H, G, P>(session: &mut Session<H, G, P>, repo: &str) -> Result<u32>
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    let color_mode = session.color();
    let listed = color::with_spinner(color_mode, "Listing assigned issues…", || {
        session.gh.assigned_issues(repo)
    });

    let issues = match listed {
        Ok(issues) => issues,
        Err(err) => {
            eprintln!(
                "{}",
                color::warn(color_mode, format!("Could not list issues: {err:#}"))
            );
            return ask_issue_number(&mut session.prompter, "Issue number");
        }
    };

    if issues.is_empty() {
        return ask_issue_number(
            &mut session.prompter,
            "No issues assigned to you. Enter issue number",
        );
    }

    if let Ok(user) = session.gh.current_user() {
        eprintln!(
            "{}",
            color::info(
                color_mode,
                format!("Open issues in {repo} assigned to @{user}")
            )
        );
    }

    let options: Vec<String> = issues
        .iter()
        .map(|issue| issue_option(issue.number, &issue.title))
        .collect();
    let index = session.prompter.select("Select an issue:", &options)?;
    Ok(issues[index].number)
}
