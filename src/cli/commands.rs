//! Subcommands of the `xcresult-report` binary.

pub mod init;
pub mod report;
