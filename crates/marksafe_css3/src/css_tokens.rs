//! [`CssTokens`]: the product of lexing a CSS input (§3), plus the
//! backup-capable iterator required by the digit-space-unit fixup (§9).

use crate::errors::CssParseError;
use crate::token::CssTokenType;
use crate::tokenizer::{Lexer, RawToken};
use log::warn;
use marksafe_shared::is_well_known_unit;
use marksafe_shared::stream::Location;

/// `normalizedCss` / `tokenTypes` / `spans` / `brackets`, immutable once
/// built by [`CssTokens::lex`].
#[derive(Debug, Clone)]
pub struct CssTokens {
    normalized_css: String,
    token_types: Vec<CssTokenType>,
    spans: Vec<(usize, usize)>,
    /// Flat involution: `brackets[i]` is the paired bracket's index, or
    /// `-1` when token `i` is not a bracket (or, in theory, unpaired).
    brackets: Vec<i64>,
    locations: Vec<Location>,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || (c as u32) >= 0x80
}

/// Whether omitting all separation between `left` and `right`'s
/// normalized text would cause the pair to re-lex as something other
/// than themselves.
fn needs_separator(left: CssTokenType, left_text: &str, right: CssTokenType, right_text: &str) -> bool {
    if left == CssTokenType::Ident && right == CssTokenType::LeftParen {
        // "foo" "(" would fuse into a FUNCTION token.
        return true;
    }
    let last = left_text.chars().last();
    let first = right_text.chars().next();
    matches!((last, first), (Some(l), Some(r)) if is_word_char(l) && is_word_char(r))
}

fn synthetic_closer_text(opener: CssTokenType) -> (CssTokenType, &'static str) {
    match opener {
        CssTokenType::LeftCurly => (CssTokenType::RightCurly, "}"),
        CssTokenType::LeftParen | CssTokenType::Function => (CssTokenType::RightParen, ")"),
        CssTokenType::LeftSquare => (CssTokenType::RightSquare, "]"),
        _ => unreachable!("synthetic_closer_text called on a non-opener"),
    }
}

struct Builder {
    types: Vec<CssTokenType>,
    texts: Vec<String>,
    brackets: Vec<i64>,
    locations: Vec<Location>,
}

impl Builder {
    fn new() -> Self {
        Self {
            types: Vec::new(),
            texts: Vec::new(),
            brackets: Vec::new(),
            locations: Vec::new(),
        }
    }

    fn push(&mut self, kind: CssTokenType, text: String, location: Location) -> usize {
        let idx = self.types.len();
        self.types.push(kind);
        self.texts.push(text);
        self.brackets.push(-1);
        self.locations.push(location);
        idx
    }

    fn last_non_whitespace(&self) -> Option<(CssTokenType, &str)> {
        self.types
            .iter()
            .zip(self.texts.iter())
            .rev()
            .find(|(t, _)| **t != CssTokenType::Whitespace)
            .map(|(t, s)| (*t, s.as_str()))
    }
}

impl CssTokens {
    /// Lexes and normalizes `input`. Total: every input, however
    /// malformed, produces a valid `CssTokens`.
    #[must_use]
    pub fn lex(input: &str) -> Self {
        let (raw_tokens, errors) = Lexer::new(input).tokenize();
        Self::from_raw(&raw_tokens, &errors)
    }

    fn from_raw(raw_tokens: &[RawToken], _errors: &[CssParseError]) -> Self {
        let mut b = Builder::new();
        let mut bracket_stack: Vec<usize> = Vec::new();

        for raw in raw_tokens {
            if raw.had_leading_space {
                if let Some((prev_type, prev_text)) = b.last_non_whitespace() {
                    if needs_separator(prev_type, prev_text, raw.kind, &raw.text) {
                        b.push(CssTokenType::Whitespace, " ".to_string(), raw.location);
                    }
                }
            }

            if raw.kind.is_closer() {
                while let Some(&top) = bracket_stack.last() {
                    if b.types[top].matching_closer() == Some(raw.kind) {
                        break;
                    }
                    warn!(
                        "{}",
                        CssParseError::MismatchedBracket(raw.location.offset)
                    );
                    let (closer_type, closer_text) = synthetic_closer_text(b.types[top]);
                    let synth_idx = b.push(closer_type, closer_text.to_string(), raw.location);
                    b.brackets[top] = synth_idx as i64;
                    b.brackets[synth_idx] = top as i64;
                    bracket_stack.pop();
                }
                let idx = b.push(raw.kind, raw.text.clone(), raw.location);
                if let Some(top) = bracket_stack.pop() {
                    b.brackets[top] = idx as i64;
                    b.brackets[idx] = top as i64;
                }
            } else {
                let idx = b.push(raw.kind, raw.text.clone(), raw.location);
                if raw.kind.is_opener() {
                    bracket_stack.push(idx);
                }
            }
        }

        let eof_location = raw_tokens.last().map_or(Location::start(), |t| t.location);
        while let Some(top) = bracket_stack.pop() {
            warn!("{}", CssParseError::UnbalancedOpener(eof_location.offset));
            let (closer_type, closer_text) = synthetic_closer_text(b.types[top]);
            let idx = b.push(closer_type, closer_text.to_string(), eof_location);
            b.brackets[top] = idx as i64;
            b.brackets[idx] = top as i64;
        }

        let mut normalized_css = String::new();
        let mut spans = Vec::with_capacity(b.types.len());
        for text in &b.texts {
            let start = normalized_css.len();
            normalized_css.push_str(text);
            spans.push((start, normalized_css.len()));
        }

        debug_assert!(!normalized_css.contains("</style"));
        debug_assert!(!normalized_css.contains("<![CDATA["));
        debug_assert!(!normalized_css.contains("]]>"));
        debug_assert!(!normalized_css.contains('\r'));
        debug_assert!(!normalized_css.contains('\n'));

        CssTokens {
            normalized_css,
            token_types: b.types,
            spans,
            brackets: b.brackets,
            locations: b.locations,
        }
    }

    #[must_use]
    pub fn normalized_css(&self) -> &str {
        &self.normalized_css
    }

    #[must_use]
    pub fn token_types(&self) -> &[CssTokenType] {
        &self.token_types
    }

    #[must_use]
    pub fn spans(&self) -> &[(usize, usize)] {
        &self.spans
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.token_types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token_types.is_empty()
    }

    #[must_use]
    pub fn text(&self, index: usize) -> &str {
        let (start, end) = self.spans[index];
        &self.normalized_css[start..end]
    }

    /// `brackets.partner(i)`: `-1` when `i` is not a bracket.
    #[must_use]
    pub fn partner(&self, index: usize) -> i64 {
        self.brackets[index]
    }

    /// Source line/column/offset where token `index` began. Diagnostic
    /// only — §6's external contract promises byte offsets, not this.
    #[must_use]
    pub fn location(&self, index: usize) -> Location {
        self.locations[index]
    }

    /// Convenience iterator of `(text, type)` pairs over every token,
    /// matching what a consuming parser actually wants (beyond the
    /// minimal `iterator()`/`hasNext`/`next` contract).
    pub fn tokens(&self) -> impl Iterator<Item = (&str, &CssTokenType)> {
        (0..self.len()).map(move |i| (self.text(i), &self.token_types[i]))
    }

    #[must_use]
    pub fn iter(&self) -> CssTokenIter<'_> {
        CssTokenIter {
            tokens: self,
            pos: 0,
            prev_pos: None,
        }
    }
}

/// One-step-backup iterator over a [`CssTokens`] (§6, §9). Only the
/// immediately prior position is retained, matching the spec's
/// "a single prior index suffices".
pub struct CssTokenIter<'a> {
    tokens: &'a CssTokens,
    pos: usize,
    prev_pos: Option<usize>,
}

impl<'a> CssTokenIter<'a> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    #[must_use]
    pub fn peek(&self) -> Option<(&'a str, CssTokenType)> {
        if self.has_next() {
            Some((self.tokens.text(self.pos), self.tokens.token_types()[self.pos]))
        } else {
            None
        }
    }

    pub fn next(&mut self) -> Option<(&'a str, CssTokenType)> {
        let item = self.peek()?;
        self.prev_pos = Some(self.pos);
        self.pos += 1;
        Some(item)
    }

    /// Rewinds by the single most recent `next()` call. Calling it twice
    /// in a row without an intervening `next()` is a no-op, matching
    /// "retain the previous position, not a full history".
    pub fn backup(&mut self) {
        if let Some(prev) = self.prev_pos.take() {
            self.pos = prev;
        }
    }
}

/// Conformance-test helper for the documented non-idempotence (§9):
/// joins a `NUMBER WHITESPACE IDENT` triple into its `DIMENSION` form
/// whenever the identifier is a well-known unit, matching what a second
/// `lex()` pass over the normalized text would itself produce.
#[must_use]
pub fn fix_digit_space_unit(tokens: &CssTokens) -> String {
    let mut out = String::new();
    let types = tokens.token_types();
    let mut i = 0;
    while i < types.len() {
        if i + 2 < types.len()
            && types[i] == CssTokenType::Number
            && types[i + 1] == CssTokenType::Whitespace
            && types[i + 2] == CssTokenType::Ident
            && is_well_known_unit(tokens.text(i + 2))
        {
            out.push_str(tokens.text(i));
            out.push_str(tokens.text(i + 2));
            i += 3;
            continue;
        }
        out.push_str(tokens.text(i));
        i += 1;
    }
    out
}
