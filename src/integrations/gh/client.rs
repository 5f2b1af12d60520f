#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use serde::Deserialize;
use std::process::{Command, Output};

use crate::domain::{CreatedPullRequest, Issue, PullRequestDraft};

const ISSUE_FIELDS: &str = "number,title,body,labels,state,url";

/// Trait for interacting with GitHub through the `gh` CLI
pub trait GhClient {
    /// Fetch a single issue
    fn issue(&self, repo: &str, number: u32) -> Result<Issue>;

    /// List open issues assigned to the authenticated user
    fn assigned_issues(&self, repo: &str) -> Result<Vec<Issue>>;

    /// Open a pull request
    fn create_pull_request(&self, repo: &str, draft: &PullRequestDraft)
        -> Result<CreatedPullRequest>;

    /// List label names defined in the repository
    fn labels(&self, repo: &str) -> Result<Vec<String>>;

    /// Login of the authenticated user
    fn current_user(&self) -> Result<String>;

    /// Check if gh CLI is available
    fn is_available(&self) -> bool;
}

#[derive(Debug, Deserialize)]
struct LabelName {
    name: String,
}

/// Real implementation of `GhClient` using `gh` CLI
#[derive(Debug, Default)]
pub struct RealGhClient;

impl RealGhClient {
    fn run(args: &[&str], what: &str) -> Result<Output> {
        let output = Command::new("gh")
            .args(args)
            .output()
            .context("Failed to execute gh command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{what} failed: {}", stderr.trim());
        }

        Ok(output)
    }
}

/// Build the argument list for `gh pr create`
pub fn pr_create_args(repo: &str, draft: &PullRequestDraft) -> Vec<String> {
    let mut args: Vec<String> = [
        "pr",
        "create",
        "--repo",
        repo,
        "--title",
        draft.title.as_str(),
        "--body",
        draft.body.as_str(),
        "--base",
        draft.base.as_str(),
        "--head",
        draft.head.as_str(),
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    if draft.draft {
        args.push("--draft".to_string());
    }
    for label in &draft.labels {
        args.push("--label".to_string());
        args.push(label.clone());
    }
    args
}

impl GhClient for RealGhClient {
    fn issue(&self, repo: &str, number: u32) -> Result<Issue> {
        let output = Self::run(
            &[
                "issue",
                "view",
                &number.to_string(),
                "--repo",
                repo,
                "--json",
                ISSUE_FIELDS,
            ],
            "gh issue view",
        )
        .with_context(|| format!("Failed to fetch issue #{number}"))?;

        let json = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse issue #{number} JSON: {json}"))
    }

    fn assigned_issues(&self, repo: &str) -> Result<Vec<Issue>> {
        let output = Self::run(
            &[
                "issue",
                "list",
                "--repo",
                repo,
                "--assignee",
                "@me",
                "--state",
                "open",
                "--json",
                ISSUE_FIELDS,
            ],
            "gh issue list",
        )
        .context("Failed to list assigned issues")?;

        let json = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json).with_context(|| format!("Failed to parse issue list JSON: {json}"))
    }

    fn create_pull_request(
        &self,
        repo: &str,
        draft: &PullRequestDraft,
    ) -> Result<CreatedPullRequest> {
        let args = pr_create_args(repo, draft);
        let output = Command::new("gh")
            .args(&args)
            .output()
            .context("Failed to execute gh command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            anyhow::bail!(
                "Failed to create pull request: {}",
                format!("{stdout}{stderr}").trim()
            );
        }

        let url = String::from_utf8_lossy(&output.stdout);
        Ok(CreatedPullRequest::from_url(&url, &draft.title))
    }

    fn labels(&self, repo: &str) -> Result<Vec<String>> {
        let output = Self::run(
            &[
                "label", "list", "--repo", repo, "--json", "name", "--limit", "1000",
            ],
            "gh label list",
        )
        .context("Failed to list labels")?;

        let json = String::from_utf8_lossy(&output.stdout);
        let labels: Vec<LabelName> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse label list JSON: {json}"))?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    fn current_user(&self) -> Result<String> {
        let output = Self::run(&["api", "user", "--jq", ".login"], "gh api user")
            .context("Failed to get current user")?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn is_available(&self) -> bool {
        Command::new("gh")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone)]
    enum MockResult<T> {
        Ok(T),
        Err(String),
    }

    impl<T: Clone> MockResult<T> {
        fn get(&self) -> Result<T> {
            match self {
                Self::Ok(value) => Ok(value.clone()),
                Self::Err(msg) => Err(anyhow::anyhow!("{msg}")),
            }
        }
    }

    /// Mock implementation for testing
    pub struct MockGhClient {
        issues: Vec<Issue>,
        issue_error: Option<String>,
        assigned: Option<MockResult<Vec<Issue>>>,
        labels: Option<MockResult<Vec<String>>>,
        user: Option<String>,
        pr_error: Option<String>,
        available: bool,
        pub created: RefCell<Vec<(String, PullRequestDraft)>>,
    }

    impl MockGhClient {
        pub fn new() -> Self {
            Self {
                issues: Vec::new(),
                issue_error: None,
                assigned: None,
                labels: None,
                user: None,
                pr_error: None,
                available: true,
                created: RefCell::new(Vec::new()),
            }
        }

        pub fn with_issue(mut self, issue: Issue) -> Self {
            self.issues.push(issue);
            self
        }

        pub fn with_issue_error(mut self, error: &str) -> Self {
            self.issue_error = Some(error.to_string());
            self
        }

        pub fn with_assigned(mut self, issues: Vec<Issue>) -> Self {
            self.assigned = Some(MockResult::Ok(issues));
            self
        }

        pub fn with_assigned_error(mut self, error: &str) -> Self {
            self.assigned = Some(MockResult::Err(error.to_string()));
            self
        }

        pub fn with_labels(mut self, labels: &[&str]) -> Self {
            self.labels = Some(MockResult::Ok(
                labels.iter().map(ToString::to_string).collect(),
            ));
            self
        }

        pub fn with_user(mut self, user: &str) -> Self {
            self.user = Some(user.to_string());
            self
        }

        pub fn with_pr_error(mut self, error: &str) -> Self {
            self.pr_error = Some(error.to_string());
            self
        }

        pub fn unavailable(mut self) -> Self {
            self.available = false;
            self
        }
    }

    impl GhClient for MockGhClient {
        fn issue(&self, _repo: &str, number: u32) -> Result<Issue> {
            if let Some(msg) = &self.issue_error {
                anyhow::bail!("{msg}");
            }
            self.issues
                .iter()
                .find(|issue| issue.number == number)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Failed to fetch issue #{number}"))
        }

        fn assigned_issues(&self, _repo: &str) -> Result<Vec<Issue>> {
            self.assigned
                .as_ref()
                .map_or_else(|| Ok(Vec::new()), MockResult::get)
        }

        fn create_pull_request(
            &self,
            repo: &str,
            draft: &PullRequestDraft,
        ) -> Result<CreatedPullRequest> {
            if let Some(msg) = &self.pr_error {
                anyhow::bail!("{msg}");
            }
            self.created
                .borrow_mut()
                .push((repo.to_string(), draft.clone()));
            Ok(CreatedPullRequest::from_url(
                &format!("https://github.com/{repo}/pull/100"),
                &draft.title,
            ))
        }

        fn labels(&self, _repo: &str) -> Result<Vec<String>> {
            self.labels
                .as_ref()
                .map_or_else(|| Err(anyhow::anyhow!("No labels configured")), MockResult::get)
        }

        fn current_user(&self) -> Result<String> {
            self.user
                .clone()
                .ok_or_else(|| anyhow::anyhow!("Not logged in"))
        }

        fn is_available(&self) -> bool {
            self.available
        }
    }

    pub fn sample_issue(number: u32, title: &str, labels: &[&str]) -> Issue {
        Issue {
            number,
            title: title.to_string(),
            body: String::new(),
            labels: labels
                .iter()
                .map(|name| crate::domain::Label {
                    name: (*name).to_string(),
                })
                .collect(),
            state: "OPEN".to_string(),
            url: format!("https://github.com/owner/repo/issues/{number}"),
        }
    }

    fn sample_draft() -> PullRequestDraft {
        PullRequestDraft {
            title: "Add login page".to_string(),
            body: "## Description\n\nCloses #42\n".to_string(),
            base: "main".to_string(),
            head: "feature/GH-42-add-login-page".to_string(),
            draft: false,
            labels: Vec::new(),
        }
    }

    #[test]
    fn test_pr_create_args_minimal() {
        let args = pr_create_args("owner/repo", &sample_draft());
        assert_eq!(
            args,
            vec![
                "pr",
                "create",
                "--repo",
                "owner/repo",
                "--title",
                "Add login page",
                "--body",
                "## Description\n\nCloses #42\n",
                "--base",
                "main",
                "--head",
                "feature/GH-42-add-login-page",
            ]
        );
    }

    #[test]
    fn test_pr_create_args_draft_and_labels() {
        let draft = PullRequestDraft {
            draft: true,
            labels: vec!["bug".to_string(), "ui".to_string()],
            ..sample_draft()
        };
        let args = pr_create_args("owner/repo", &draft);
        let tail: Vec<&str> = args[12..].iter().map(String::as_str).collect();
        assert_eq!(tail, vec!["--draft", "--label", "bug", "--label", "ui"]);
    }

    #[test]
    fn test_mock_client_with_issue() {
        let client = MockGhClient::new().with_issue(sample_issue(123, "Test issue", &["bug"]));

        let issue = client.issue("owner/repo", 123).unwrap();
        assert_eq!(issue.number, 123);
        assert_eq!(issue.title, "Test issue");
        assert!(client.issue("owner/repo", 124).is_err());
    }

    #[test]
    fn test_mock_client_with_issue_error() {
        let client = MockGhClient::new().with_issue_error("Not found");

        let result = client.issue("owner/repo", 999);
        assert_eq!(result.unwrap_err().to_string(), "Not found");
    }

    #[test]
    fn test_mock_client_records_pull_requests() {
        let client = MockGhClient::new();
        let pr = client
            .create_pull_request("owner/repo", &sample_draft())
            .unwrap();
        assert_eq!(pr.number, Some(100));
        assert_eq!(client.created.borrow().len(), 1);
    }

    #[test]
    fn test_mock_client_unavailable() {
        let client = MockGhClient::new().unavailable();
        assert!(!client.is_available());
    }
}
