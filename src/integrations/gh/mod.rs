#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
mod client;

pub use client::{pr_create_args, GhClient, RealGhClient};

#[cfg(test)]
pub use client::tests::{sample_issue, MockGhClient};

/// Format an issue as a selectable option
///
/// Format: `#{number} - {title}`
pub fn issue_option(number: u32, title: &str) -> String {
    format!("#{number} - {title}")
}
