//! Recovery events the tokenizer logs but never surfaces (§7: "the core
//! never throws"). Kept as a typed enum, matching the teacher's
//! `errors.rs` convention, for future diagnostic use.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CssParseError {
    #[error("unterminated string at offset {0}")]
    UnterminatedString(usize),
    #[error("unterminated comment at offset {0}")]
    UnterminatedComment(usize),
    #[error("unterminated url() at offset {0}")]
    UnterminatedUrl(usize),
    #[error("url() content could not be made safe at offset {0}")]
    UnsafeUrl(usize),
    #[error("mismatched closing bracket at offset {0}")]
    MismatchedBracket(usize),
    #[error("unbalanced opener synthesized a closer at offset {0}")]
    UnbalancedOpener(usize),
    #[error("invalid escape sequence at offset {0}")]
    BadEscape(usize),
}
