//! Recovery events logged but never surfaced (§7), matching the
//! teacher's `parse_error()` convention of recording without
//! interrupting the state machine.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HtmlParseError {
    #[error("unterminated comment at offset {0}")]
    UnterminatedComment(usize),
    #[error("unterminated CDATA section at offset {0}")]
    UnterminatedCdata(usize),
    #[error("unterminated directive at offset {0}")]
    UnterminatedDirective(usize),
    #[error("unterminated server code block at offset {0}")]
    UnterminatedServercode(usize),
    #[error("unterminated tag at offset {0}")]
    UnterminatedTag(usize),
    #[error("raw-text element {0:?} never closed, offset {1}")]
    UnterminatedRawtext(String, usize),
}
