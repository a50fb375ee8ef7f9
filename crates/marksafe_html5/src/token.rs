//! `HtmlToken` (§3): a `{type, start, end}` span into the caller-owned
//! input string. The lexer never copies or mutates the input.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlTokenType {
    TagBegin,
    TagEnd,
    AttrName,
    AttrValue,
    Text,
    Cdata,
    Directive,
    Comment,
    Servercode,
    Unescaped,
}

impl fmt::Display for HtmlTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HtmlTokenType::TagBegin => "TAGBEGIN",
            HtmlTokenType::TagEnd => "TAGEND",
            HtmlTokenType::AttrName => "ATTRNAME",
            HtmlTokenType::AttrValue => "ATTRVALUE",
            HtmlTokenType::Text => "TEXT",
            HtmlTokenType::Cdata => "CDATA",
            HtmlTokenType::Directive => "DIRECTIVE",
            HtmlTokenType::Comment => "COMMENT",
            HtmlTokenType::Servercode => "SERVERCODE",
            HtmlTokenType::Unescaped => "UNESCAPED",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlToken {
    pub token_type: HtmlTokenType,
    pub start: usize,
    pub end: usize,
}

impl HtmlToken {
    #[must_use]
    pub fn new(token_type: HtmlTokenType, start: usize, end: usize) -> Self {
        Self { token_type, start, end }
    }

    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}
