//! Create-pr command - Open a pull request for the current branch

use anyhow::Result;

use crate::cli::CreatePrArgs;
use crate::color;
use crate::commands::common::{ensure_gh_available, real_session};
use crate::domain::{
    compose_body, extract_issue_number, merge_labels, title_from_branch, CreatedPullRequest, Issue,
    PullRequestDraft,
};
use crate::integrations::gh::GhClient;
use crate::integrations::git::GitClient;
use crate::integrations::prompt::Prompter;
use crate::service::{Options, Session};

/// Create a pull request using the real `gh`, `git` and terminal
///
/// # Errors
/// Returns an error if:
/// - Not in a git repository with the configured remote
/// - The current branch cannot be determined
/// - `gh pr create` fails
pub fn cmd_create_pr(args: &CreatePrArgs, options: Options) -> Result<()> {
    let mut session = real_session(options);
    if let Some(pr) = run(&mut session, args)? {
        println!("{}", pr.url);
    }
    Ok(())
}

/// Fetch the linked issue; a failure only produces a warning
fn linked_issue<H, G, P>(session: &Session<H, G, P>, repo: &str, number: u32) -> Option<Issue>
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    let color_mode = session.color();
    match session.fetch_issue(repo, number) {
        Ok(issue) => {
            eprintln!(
                "{}",
                color::info(
                    color_mode,
                    format!(
                        "Linked issue {}: {}",
                        color_mode.colorize_reference(&format!("#{}", issue.number)),
                        issue.title
                    )
                )
            );
            Some(issue)
        }
        Err(err) => {
            eprintln!(
                "{}",
                color::warn(
                    color_mode,
                    format!("Could not fetch issue #{number}: {err:#}")
                )
            );
            None
        }
    }
}

/// Warn about labels the repository does not define; skipped if labels cannot be listed
fn warn_unknown_labels<H, G, P>(session: &Session<H, G, P>, repo: &str, labels: &[String])
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    if labels.is_empty() {
        return;
    }
    let Ok(known) = session.gh.labels(repo) else {
        return;
    };
    for label in labels.iter().filter(|l| !known.contains(l)) {
        eprintln!(
            "{}",
            color::warn(
                session.color(),
                format!("Label \"{label}\" does not exist in {repo}")
            )
        );
    }
}

fn resolve_body<H, G, P>(
    session: &mut Session<H, G, P>,
    explicit: Option<&str>,
    issue: Option<&Issue>,
) -> Result<String>
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    if let Some(body) = explicit {
        return Ok(body.to_string());
    }

    let body = compose_body(issue);
    if session.assume_yes() {
        return Ok(body);
    }

    let color_mode = session.color();
    eprintln!("\n{}", color::dim(color_mode, "--- PR body preview ---"));
    eprintln!("{body}");
    eprintln!("{}\n", color::dim(color_mode, "--- end preview ---"));

    if session.prompter.confirm("Use this PR body?", true)? {
        Ok(body)
    } else {
        session.prompter.input("PR body", "")
    }
}

/// Run the create-pr flow
///
/// Returns `None` when the user cancels at the final confirmation.
///
/// # Errors
/// See [`cmd_create_pr`].
pub fn run<H, G, P>(
    session: &mut Session<H, G, P>,
    args: &CreatePrArgs,
) -> Result<Option<CreatedPullRequest>>
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    let color_mode = session.color();

    let repo = session.repo_slug()?;
    ensure_gh_available(&session.gh)?;
    let head = session.git.current_branch()?;
    eprintln!(
        "{}",
        color::info(
            color_mode,
            format!("Current branch: {}", color_mode.colorize_branch(&head))
        )
    );
    session.warn_if_dirty();

    let issue = args
        .issue
        .or_else(|| extract_issue_number(&head))
        .and_then(|number| linked_issue(session, &repo, number));

    let base = session.resolve_base(args.base.as_deref())?;

    let title = match &args.title {
        Some(title) => title.clone(),
        None => {
            let proposed = issue
                .as_ref()
                .map_or_else(|| title_from_branch(&head), |issue| issue.title.clone());
            session.edit("PR title", &proposed)?
        }
    };

    let body = resolve_body(session, args.body.as_deref(), issue.as_ref())?;

    let draft = args.draft || {
        let default = session.options.config.pr.draft;
        session.confirm("Create as draft?", default)?
    };

    let labels = merge_labels([
        args.labels.as_slice(),
        session.options.config.pr.labels.as_slice(),
    ]);
    warn_unknown_labels(session, &repo, &labels);

    let pr = PullRequestDraft {
        title,
        body,
        base,
        head,
        draft,
        labels,
    };

    eprintln!();
    eprintln!(
        "{}",
        color::info(color_mode, format!("Creating PR: {}", pr.title))
    );
    eprintln!(
        "  {} → {}",
        color_mode.colorize_branch(&pr.head),
        color_mode.colorize_branch(&pr.base)
    );
    if pr.draft {
        eprintln!("  {}", color::dim(color_mode, "Draft PR"));
    }
    if !pr.labels.is_empty() {
        eprintln!(
            "  {}",
            color::dim(color_mode, format!("Labels: {}", pr.labels.join(", ")))
        );
    }

    if !session.assume_yes() && !session.prompter.confirm("Proceed?", true)? {
        eprintln!("Cancelled.");
        return Ok(None);
    }

    let remote = session.remote().to_string();
    eprintln!(
        "{}",
        color::info(color_mode, format!("Pushing branch to {remote}…"))
    );
    // The branch may already be pushed; gh reports a real problem below
    if let Err(err) = session.git.push_branch(&remote, &pr.head) {
        eprintln!(
            "{}",
            color::warn(color_mode, format!("Push warning: {err:#} (continuing anyway)"))
        );
    }

    let created = color::with_spinner(color_mode, "Creating pull request…", || {
        session.gh.create_pull_request(&repo, &pr)
    })?;

    let reference = created
        .number
        .map_or_else(String::new, |number| format!(" #{number}"));
    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!("Pull request{reference} created: {}", created.url)
        )
    );

    Ok(Some(created))
}
