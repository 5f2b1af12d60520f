//! Branch naming: slug generation and parsing issue data back out of branch names
//!
//! Branch names follow `<type>/GH-<number>-<slug>` or `<type>/<slug>`.

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

use super::issue::IssueType;

/// Maximum slug length in bytes (slugs are ASCII-only)
pub const MAX_SLUG_LEN: usize = 60;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

static ISSUE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/GH-(\d+)-").expect("issue pattern is valid"));

static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:GH-)?\d+-").expect("prefix pattern is valid"));

/// Normalize text into a lower-case, hyphen-delimited ASCII slug of at most 60 bytes
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = NON_ALPHANUMERIC.replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');

    if trimmed.len() > MAX_SLUG_LEN {
        // Only ASCII remains, so any byte index is a char boundary
        trimmed[..MAX_SLUG_LEN].trim_end_matches('-').to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build a branch name from an issue type, optional issue number and title
///
/// A number of `0` is treated the same as no number.
pub fn generate_branch_name(issue_type: IssueType, issue_number: Option<u32>, title: &str) -> String {
    let slug = slugify(title);
    match issue_number.filter(|n| *n > 0) {
        Some(number) => format!("{issue_type}/GH-{number}-{slug}"),
        None => format!("{issue_type}/{slug}"),
    }
}

/// Extract the issue number embedded as `/GH-<digits>-` in a branch name
pub fn extract_issue_number(branch: &str) -> Option<u32> {
    ISSUE_REF
        .captures(branch)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Derive a human-readable title from a branch name
///
/// `feature/GH-42-add-login-page` becomes `Add login page`.
pub fn title_from_branch(branch: &str) -> String {
    let rest = branch.split_once('/').map_or(branch, |(_, rest)| rest);
    let rest = NUMBER_PREFIX.replace(rest, "");
    let spaced = rest.replace('-', " ");

    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Parse a user-supplied issue reference such as `42` or `#42`
pub fn parse_issue_number(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    match digits.parse::<u32>() {
        Ok(number) if number > 0 => Ok(number),
        _ => anyhow::bail!("Invalid issue number: {trimmed}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_slug(slug: &str) -> bool {
        let re = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        re.is_match(slug) && slug.len() <= MAX_SLUG_LEN
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Add login page!!"), "add-login-page");
    }

    #[test]
    fn test_slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("  --Fix:  the   [parser]__now--  "), "fix-the-parser-now");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn test_slugify_non_ascii_becomes_separator() {
        assert_eq!(slugify("Café crème"), "caf-cr-me");
    }

    #[test]
    fn test_slugify_truncates_without_trailing_hyphen() {
        // Position 60 falls right after a hyphen
        let title = format!("{} tail", "a".repeat(59));
        let slug = slugify(&title);
        assert_eq!(slug, "a".repeat(59));
        assert!(is_valid_slug(&slug));

        let long = "word ".repeat(40);
        let slug = slugify(&long);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_idempotent_and_well_formed() {
        let samples = [
            "Add login page!!",
            "   leading and trailing   ",
            "UPPER_case-Mixed 123",
            "Émoji 🚀 support for the CLI",
            &"x-".repeat(50),
            "a",
            "",
        ];
        for sample in samples {
            let once = slugify(sample);
            assert_eq!(slugify(&once), once, "not idempotent for {sample:?}");
            if !once.is_empty() {
                assert!(is_valid_slug(&once), "malformed slug {once:?}");
            }
        }
    }

    #[test]
    fn test_generate_branch_name_with_issue() {
        assert_eq!(
            generate_branch_name(IssueType::Feature, Some(42), "Add login page!!"),
            "feature/GH-42-add-login-page"
        );
    }

    #[test]
    fn test_generate_branch_name_without_issue() {
        assert_eq!(
            generate_branch_name(IssueType::Chore, None, "cleanup"),
            "chore/cleanup"
        );
        assert_eq!(
            generate_branch_name(IssueType::Chore, Some(0), "cleanup"),
            "chore/cleanup"
        );
    }

    #[test]
    fn test_extract_issue_number() {
        assert_eq!(extract_issue_number("feature/GH-42-add-login-page"), Some(42));
        assert_eq!(extract_issue_number("chore/cleanup"), None);
        assert_eq!(extract_issue_number("GH-42-no-type-prefix"), None);
        assert_eq!(extract_issue_number("bugfix/GH-7-a/GH-9-b"), Some(7));
    }

    #[test]
    fn test_extract_issue_number_overflow_is_absent() {
        assert_eq!(extract_issue_number("feature/GH-99999999999-big"), None);
    }

    #[test]
    fn test_extract_round_trip() {
        for (issue_type, number, title) in [
            (IssueType::Feature, 1, "Add login page"),
            (IssueType::Docs, 1234, "README: typo"),
            (IssueType::Hotfix, 77, ""),
        ] {
            let name = generate_branch_name(issue_type, Some(number), title);
            assert_eq!(extract_issue_number(&name), Some(number), "{name}");
        }
    }

    #[test]
    fn test_title_from_branch_with_issue() {
        assert_eq!(
            title_from_branch("feature/GH-42-add-login-page"),
            "Add login page"
        );
    }

    #[test]
    fn test_title_from_branch_numeric_prefix() {
        assert_eq!(title_from_branch("bugfix/123-fix-crash"), "Fix crash");
    }

    #[test]
    fn test_title_from_branch_without_type() {
        assert_eq!(title_from_branch("quick-fix"), "Quick fix");
    }

    #[test]
    fn test_title_from_branch_keeps_rest_of_case() {
        assert_eq!(title_from_branch("chore/update-README"), "Update README");
    }

    #[test]
    fn test_title_from_branch_empty() {
        assert_eq!(title_from_branch(""), "");
        assert_eq!(title_from_branch("feature/"), "");
    }

    #[test]
    fn test_parse_issue_number() {
        assert_eq!(parse_issue_number("42").unwrap(), 42);
        assert_eq!(parse_issue_number(" #7 ").unwrap(), 7);
    }

    #[test]
    fn test_parse_issue_number_invalid() {
        for input in ["", "abc", "0", "-3", "#"] {
            let err = parse_issue_number(input).unwrap_err();
            assert!(err.to_string().starts_with("Invalid issue number"));
        }
    }
}
