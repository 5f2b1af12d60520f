//! Pull request drafts and body composition

use std::fmt::Write as _;

use super::issue::Issue;

/// Everything needed to open a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    pub title: String,
    /// Markdown body
    pub body: String,
    pub base: String,
    pub head: String,
    pub draft: bool,
    pub labels: Vec<String>,
}

/// A pull request as reported back after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// `None` when the URL does not end in a number
    pub number: Option<u32>,
    pub url: String,
    pub title: String,
}

impl CreatedPullRequest {
    /// Build from the URL printed by `gh pr create`
    pub fn from_url(url: &str, title: &str) -> Self {
        let url = url.trim();
        let number = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok());
        Self {
            number,
            url: url.to_string(),
            title: title.to_string(),
        }
    }
}

const CHECKLIST: [&str; 3] = [
    "Tests added/updated",
    "Documentation updated",
    "Code follows project conventions",
];

/// Compose the Markdown body for a pull request
///
/// With an issue, the body always ends in `Closes #<number>` so GitHub links and
/// closes the issue on merge. Without one, a description placeholder and a
/// checklist are emitted instead.
pub fn compose_body(issue: Option<&Issue>) -> String {
    let mut body = String::from("## Description\n\n");

    match issue {
        Some(issue) => {
            if issue.body.is_empty() {
                let _ = write!(body, "Resolves #{}", issue.number);
            } else {
                body.push_str(&issue.body);
            }
            let _ = writeln!(body, "\n\nCloses #{}", issue.number);
        }
        None => {
            body.push_str("<!-- Describe your changes here -->\n\n");
            body.push_str("## Checklist\n\n");
            for item in CHECKLIST {
                let _ = writeln!(body, "- [ ] {item}");
            }
        }
    }

    body
}

/// Merge labels in order, dropping empty entries and duplicates
pub fn merge_labels<'a>(groups: impl IntoIterator<Item = &'a [String]>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for label in groups.into_iter().flatten() {
        let label = label.trim();
        if !label.is_empty() && !merged.iter().any(|existing| existing == label) {
            merged.push(label.to_string());
        }
    }
    merged
}
