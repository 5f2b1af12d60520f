// External integrations module
// This module wraps the external tools gh-buddy drives: gh, git and the terminal

pub mod git;
pub mod prompt;

// GitHub integration
pub mod gh;
