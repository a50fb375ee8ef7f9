//! The closed CSS token-type taxonomy (§3) and the per-type shape
//! regexes (§8) used as the tokenizer's own conformance oracle in tests.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssTokenType {
    Ident,
    At,
    HashId,
    HashUnrestricted,
    String,
    Url,
    Function,
    Number,
    Dimension,
    Percentage,
    UnicodeRange,
    Delim,
    DotIdent,
    Match,
    Column,
    Colon,
    Semicolon,
    Comma,
    LeftCurly,
    RightCurly,
    LeftParen,
    RightParen,
    LeftSquare,
    RightSquare,
    Whitespace,
}

impl CssTokenType {
    #[must_use]
    pub fn is_opener(self) -> bool {
        matches!(
            self,
            CssTokenType::LeftCurly
                | CssTokenType::LeftParen
                | CssTokenType::LeftSquare
                | CssTokenType::Function
        )
    }

    #[must_use]
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            CssTokenType::RightCurly | CssTokenType::RightParen | CssTokenType::RightSquare
        )
    }

    /// The closer type an opener of this type expects.
    #[must_use]
    pub fn matching_closer(self) -> Option<CssTokenType> {
        match self {
            CssTokenType::LeftCurly => Some(CssTokenType::RightCurly),
            CssTokenType::LeftParen | CssTokenType::Function => Some(CssTokenType::RightParen),
            CssTokenType::LeftSquare => Some(CssTokenType::RightSquare),
            _ => None,
        }
    }
}

impl fmt::Display for CssTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CssTokenType::Ident => "IDENT",
            CssTokenType::At => "AT",
            CssTokenType::HashId => "HASH_ID",
            CssTokenType::HashUnrestricted => "HASH_UNRESTRICTED",
            CssTokenType::String => "STRING",
            CssTokenType::Url => "URL",
            CssTokenType::Function => "FUNCTION",
            CssTokenType::Number => "NUMBER",
            CssTokenType::Dimension => "DIMENSION",
            CssTokenType::Percentage => "PERCENTAGE",
            CssTokenType::UnicodeRange => "UNICODE_RANGE",
            CssTokenType::Delim => "DELIM",
            CssTokenType::DotIdent => "DOT_IDENT",
            CssTokenType::Match => "MATCH",
            CssTokenType::Column => "COLUMN",
            CssTokenType::Colon => "COLON",
            CssTokenType::Semicolon => "SEMICOLON",
            CssTokenType::Comma => "COMMA",
            CssTokenType::LeftCurly => "LEFT_CURLY",
            CssTokenType::RightCurly => "RIGHT_CURLY",
            CssTokenType::LeftParen => "LEFT_PAREN",
            CssTokenType::RightParen => "RIGHT_PAREN",
            CssTokenType::LeftSquare => "LEFT_SQUARE",
            CssTokenType::RightSquare => "RIGHT_SQUARE",
            CssTokenType::Whitespace => "WHITESPACE",
        };
        write!(f, "{name}")
    }
}
