//! Create-branch command - Create a conventionally named branch from an issue

use anyhow::Result;

use crate::cli::CreateBranchArgs;
use crate::color;
use crate::commands::common::{ensure_gh_available, prompt_for_issue, real_session};
use crate::domain::{generate_branch_name, infer_issue_type, IssueType};
use crate::integrations::gh::GhClient;
use crate::integrations::git::GitClient;
use crate::integrations::prompt::Prompter;
use crate::service::{Options, Session};

/// Create a branch from an issue using the real `gh`, `git` and terminal
///
/// # Errors
/// Returns an error if:
/// - The branch type is invalid
/// - Not in a git repository with the configured remote
/// - The issue cannot be fetched
/// - Branch creation or push fails
pub fn cmd_create_branch(args: &CreateBranchArgs, options: Options) -> Result<()> {
    let mut session = real_session(options);
    let branch = run(&mut session, args)?;
    println!("{branch}");
    Ok(())
}

/// Pick a branch type: explicit flag, label inference, then prompt or config default
fn resolve_type<H, G, P>(
    session: &mut Session<H, G, P>,
    explicit: Option<IssueType>,
    labels: Vec<&str>,
) -> Result<IssueType>
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    if let Some(issue_type) = explicit.or_else(|| infer_issue_type(labels)) {
        return Ok(issue_type);
    }

    if session.assume_yes() {
        return Ok(session.options.config.branch.default_type);
    }

    let options: Vec<String> = IssueType::ALL.iter().map(ToString::to_string).collect();
    let index = session.prompter.select("Select branch type:", &options)?;
    Ok(IssueType::ALL[index])
}

/// Run the create-branch flow and return the created branch name
///
/// # Errors
/// See [`cmd_create_branch`].
pub fn run<H, G, P>(session: &mut Session<H, G, P>, args: &CreateBranchArgs) -> Result<String>
where
    H: GhClient,
    G: GitClient,
    P: Prompter,
{
    let color_mode = session.color();

    // Validate before touching git or GitHub
    let explicit_type = args
        .issue_type
        .as_deref()
        .map(str::parse::<IssueType>)
        .transpose()?;

    let repo = session.repo_slug()?;
    ensure_gh_available(&session.gh)?;
    session.warn_if_dirty();

    let number = match args.issue {
        Some(number) => number,
        None if session.assume_yes() => {
            anyhow::bail!("An issue number is required with --yes (use --issue <N>)")
        }
        None => prompt_for_issue(session, &repo)?,
    };

    let issue = session.fetch_issue(&repo, number)?;
    eprintln!(
        "{}",
        color::info(
            color_mode,
            format!(
                "Issue {}: {}",
                color_mode.colorize_reference(&format!("#{}", issue.number)),
                issue.title
            )
        )
    );

    let issue_type = resolve_type(session, explicit_type, issue.label_names().collect())?;

    let base = if args.from_head {
        None
    } else {
        Some(session.resolve_base(args.base.as_deref())?)
    };

    let proposed = generate_branch_name(issue_type, Some(number), &issue.title);
    let branch = session.edit("Branch name", &proposed)?;
    let remote = session.remote().to_string();

    match &base {
        Some(base) => {
            eprintln!(
                "{}",
                color::info(
                    color_mode,
                    format!(
                        "Creating branch {} from {remote}/{base}",
                        color_mode.colorize_branch(&branch)
                    )
                )
            );
            session.git.create_branch_from(&branch, base, &remote)?;
        }
        None => {
            eprintln!(
                "{}",
                color::info(
                    color_mode,
                    format!(
                        "Creating branch {} from HEAD",
                        color_mode.colorize_branch(&branch)
                    )
                )
            );
            session.git.create_and_checkout(&branch)?;
        }
    }

    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!(
                "Branch {} created and checked out",
                color_mode.colorize_branch(&branch)
            )
        )
    );

    let push_default = session.options.config.branch.push;
    if session.confirm(&format!("Push branch to {remote}?"), push_default)? {
        session.git.push_branch(&remote, &branch)?;
        eprintln!(
            "{}",
            color::success(color_mode, format!("Branch pushed to {remote}"))
        );
    }

    Ok(branch)
}
