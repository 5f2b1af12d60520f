// Domain module
// Pure string transformations shared by the commands; no I/O happens here

pub mod branch;
pub mod issue;
pub mod pull_request;

pub use branch::{
    extract_issue_number, generate_branch_name, parse_issue_number, slugify, title_from_branch,
};
pub use issue::{infer_issue_type, Issue, IssueType, Label};
pub use pull_request::{compose_body, merge_labels, CreatedPullRequest, PullRequestDraft};
