//! Shared helpers for running external programs.
//!
//! Both tools in this workspace are thin drivers around other programs
//! (`aws`, `python`). This crate holds the pieces they share: running a
//! command to completion and translating how a process ended into the exit
//! code a shell would report.

pub mod command;
pub mod exit;

pub use command::{CommandError, run_command};
pub use exit::{exit_code, spawn_failure_code};

/// Filter helper for optional string fields.
/// Returns None if the string is empty or whitespace.
pub fn non_empty_string(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_string() {
        assert_eq!(non_empty_string("eu-west-1"), Some("eu-west-1".to_string()));
        assert_eq!(non_empty_string("  default  "), Some("default".to_string()));
        assert_eq!(non_empty_string(""), None);
        assert_eq!(non_empty_string("   "), None);
    }
}
