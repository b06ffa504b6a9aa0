//! Common types and utilities shared across Trivium crates.
//!
//! This crate defines the workspace-wide error type, the character-budget
//! truncation helper used when rendering digests, and the [`observability`]
//! module that centralises tracing setup for binaries and tests. It is
//! intentionally lightweight so that every crate can depend on it without
//! pulling in heavy transitive costs.

pub mod observability;

/// Error types used across the Trivium system.
#[derive(thiserror::Error, Debug)]
pub enum TriviumError {
    /// A request carried input the tool surface cannot act on. The payload
    /// is the user-facing message, rendered verbatim in the tool response.
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// An upstream collaborator failed in a way the caller did not absorb.
    #[error("source error: {0}")]
    Source(#[from] anyhow::Error),
}

/// Convenient alias for results that use [`TriviumError`].
pub type Result<T> = std::result::Result<T, TriviumError>;

/// Truncate to at most `max_chars` characters without splitting a UTF-8
/// sequence. Budgets throughout the composer are counted in characters,
/// not bytes, so byte-indexed slicing would panic on multi-byte text.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_shorter_input_is_identity() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        // Each 'é' is two bytes; a byte-based cut at 3 would panic.
        assert_eq!(truncate_chars("ééé", 2), "éé");
        assert_eq!(truncate_chars("naïve text", 5), "naïve");
    }

    #[test]
    fn truncate_exact_length_keeps_everything() {
        assert_eq!(truncate_chars("hello", 5), "hello");
    }
}
