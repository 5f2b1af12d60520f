//! GitHub issue snapshot and issue-type classification

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A label attached to an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Snapshot of a GitHub issue, fetched once per command invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u32,
    pub title: String,
    /// Empty when the issue has no description (GitHub reports `null`)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub url: String,
}

impl Issue {
    /// Label names in their original order
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| label.name.as_str())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Category used as the branch-name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    #[default]
    Feature,
    Bugfix,
    Hotfix,
    Release,
    Chore,
    Docs,
    Refactor,
    Test,
    Internal,
}

impl IssueType {
    /// Every valid type, in the order offered to the user
    pub const ALL: [Self; 9] = [
        Self::Feature,
        Self::Bugfix,
        Self::Hotfix,
        Self::Release,
        Self::Chore,
        Self::Docs,
        Self::Refactor,
        Self::Test,
        Self::Internal,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bugfix => "bugfix",
            Self::Hotfix => "hotfix",
            Self::Release => "release",
            Self::Chore => "chore",
            Self::Docs => "docs",
            Self::Refactor => "refactor",
            Self::Test => "test",
            Self::Internal => "internal",
        }
    }

    /// Comma-separated list of valid type tokens, for error messages
    #[must_use]
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = anyhow::Error;

    /// Exact match against the fixed token set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid branch type \"{s}\". Valid types: {}",
                    Self::valid_list()
                )
            })
    }
}

/// Keyword rules, checked in order against each label
const LABEL_RULES: &[(&[&str], IssueType)] = &[
    (&["bug", "fix"], IssueType::Bugfix),
    (&["feature", "enhancement"], IssueType::Feature),
    (&["hotfix", "urgent", "critical"], IssueType::Hotfix),
    (&["docs", "documentation"], IssueType::Docs),
    (&["refactor"], IssueType::Refactor),
    (&["test"], IssueType::Test),
    (&["chore", "maintenance"], IssueType::Chore),
];

/// True if `label` equals `keyword`, or starts or ends with it (ASCII case-insensitive).
///
/// Not a substring search: `needs-documentation-review` does not match `documentation`.
fn matches_keyword(label: &str, keyword: &str) -> bool {
    let label = label.to_ascii_lowercase();
    label == keyword
        || (label.len() > keyword.len()
            && (label.starts_with(keyword) || label.ends_with(keyword)))
}

/// Infer the issue type from its labels.
///
/// The first label matching any rule decides; rules are only ordered within a label.
/// Returns `None` when no label matches.
pub fn infer_issue_type<I, S>(labels: I) -> Option<IssueType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels.into_iter().find_map(|label| {
        let label = label.as_ref();
        LABEL_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|kw| matches_keyword(label, kw)))
            .map(|(_, issue_type)| *issue_type)
    })
}
