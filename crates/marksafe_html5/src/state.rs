//! The lexer's state set (§4.2) — a much-reduced echo of a full HTML5
//! tokenizer's ~70 states, since this lexer does not attempt tree
//! construction, foreign content, or template handling.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Outside,
    InTag,
    InAttrName,
    AfterAttrName,
    InAttrValueUnquoted,
    InAttrValueSingle,
    InAttrValueDouble,
    InRawtext,
    InComment,
    InCdata,
    InDirective,
    InServercode,
}
