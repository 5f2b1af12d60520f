// Command handlers module
// This module contains all CLI command implementations

pub mod common;
pub mod completion;
pub mod create_branch;
pub mod create_pr;
pub mod init;
