//! The HTML lexer state machine (§4.2): single-pass, `O(n)`, never
//! allocates into the input — every emitted token is a span.

use crate::errors::HtmlParseError;
use crate::state::State;
use crate::token::{HtmlToken, HtmlTokenType};
use lazy_static::lazy_static;
use log::{trace, warn};
use std::collections::HashSet;

lazy_static! {
    /// Elements whose body is lexed as opaque text until the matching
    /// end tag, never as nested markup.
    static ref RAWTEXT_ELEMENTS: HashSet<&'static str> = [
        "script", "style", "xmp", "iframe", "listing", "noembed", "noframes", "plaintext",
        "title", "textarea",
    ]
    .into_iter()
    .collect();
}

fn is_tag_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_attr_name_byte(b: u8) -> bool {
    !matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0C' | b'=' | b'>')
}

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0C')
}

/// `new(input)` / `hasNext()` / `next()` / `peek()` (§6).
pub struct HtmlLexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    state: State,
    rawtext_tag: Option<String>,
    /// Name of the start tag currently being scanned, so its `TAGEND`
    /// can decide whether to enter `IN_RAWTEXT`. `None` for end tags.
    current_tag_name: Option<String>,
    /// Set once an attribute name is followed by `=`: the next token
    /// produced is that attribute's `ATTRVALUE`.
    pending_attr_value: bool,
    peeked: Option<HtmlToken>,
    pub errors: Vec<HtmlParseError>,
}

impl<'a> HtmlLexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            state: State::Outside,
            rawtext_tag: None,
            current_tag_name: None,
            pending_attr_value: false,
            peeked: None,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_next(&mut self) -> bool {
        self.peek().is_some()
    }

    pub fn peek(&mut self) -> Option<HtmlToken> {
        if self.peeked.is_none() {
            self.peeked = self.advance_token();
        }
        self.peeked
    }

    pub fn next(&mut self) -> Option<HtmlToken> {
        if let Some(t) = self.peeked.take() {
            return Some(t);
        }
        self.advance_token()
    }

    fn eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    fn starts_with_ci(&self, needle: &str) -> bool {
        let end = (self.pos + needle.len()).min(self.bytes.len());
        self.input[self.pos..end].eq_ignore_ascii_case(needle)
    }

    fn advance_token(&mut self) -> Option<HtmlToken> {
        match self.state {
            State::Outside => self.lex_outside(),
            State::InRawtext => self.lex_rawtext(),
            State::InTag | State::InAttrName | State::AfterAttrName => {
                if self.pending_attr_value {
                    self.pending_attr_value = false;
                    self.consume_attr_value()
                } else {
                    self.lex_in_tag()
                }
            }
            State::InAttrValueUnquoted | State::InAttrValueSingle | State::InAttrValueDouble => {
                unreachable!("attribute values are consumed inline by lex_in_tag")
            }
            State::InComment | State::InCdata | State::InDirective | State::InServercode => {
                unreachable!("bracketed constructs are consumed inline by lex_outside")
            }
        }
    }

    /// `OUTSIDE` state: text, or the start of a tag / comment / CDATA /
    /// directive / server-code block.
    fn lex_outside(&mut self) -> Option<HtmlToken> {
        if self.eof() {
            return None;
        }
        let start = self.pos;

        if self.byte_at(0) == Some(b'<') {
            if let Some(tok) = self.try_consume_bracketed_construct(start) {
                return Some(tok);
            }
            if let Some(tok) = self.try_consume_tag_open(start) {
                return Some(tok);
            }
            // "<" followed by something that is not a recognized
            // construct (digit, whitespace, "</>"...): literal text.
        }

        // Accumulate TEXT until a '<' that starts a recognized construct.
        loop {
            match self.byte_at(0) {
                None => break,
                Some(b'<') => {
                    let save = self.pos;
                    if self.peek_is_construct_start() {
                        self.pos = save;
                        break;
                    }
                    self.pos += 1;
                }
                Some(_) => {
                    self.pos += self.next_char_len();
                }
            }
        }
        if self.pos == start {
            // A lone unrecognized '<' with nothing after it: still text.
            self.pos += 1;
        }
        Some(HtmlToken::new(HtmlTokenType::Text, start, self.pos))
    }

    fn next_char_len(&self) -> usize {
        match self.input[self.pos..].chars().next() {
            Some(c) => c.len_utf8(),
            None => 1,
        }
    }

    /// Without consuming, checks whether the `<` at the current position
    /// begins a comment/CDATA/directive/server-code/tag construct (used
    /// to decide where a running TEXT token must stop).
    fn peek_is_construct_start(&mut self) -> bool {
        let save_pos = self.pos;
        let save_state = self.state;
        let save_tag_name = self.current_tag_name.clone();
        let save_rawtext_tag = self.rawtext_tag.clone();
        let save_errors_len = self.errors.len();
        let result = self.try_consume_bracketed_construct(save_pos).is_some()
            || self.try_consume_tag_open(save_pos).is_some();
        self.pos = save_pos;
        self.state = save_state;
        self.current_tag_name = save_tag_name;
        self.rawtext_tag = save_rawtext_tag;
        self.errors.truncate(save_errors_len);
        result
    }

    fn try_consume_bracketed_construct(&mut self, start: usize) -> Option<HtmlToken> {
        if self.starts_with("<!--") {
            self.pos += 4;
            while !self.eof() && !self.starts_with("-->") {
                self.pos += self.next_char_len();
            }
            if self.eof() {
                warn!("unterminated comment");
                self.errors.push(HtmlParseError::UnterminatedComment(start));
            } else {
                self.pos += 3;
            }
            return Some(HtmlToken::new(HtmlTokenType::Comment, start, self.pos));
        }
        if self.starts_with("<![CDATA[") {
            self.pos += 9;
            while !self.eof() && !self.starts_with("]]>") {
                self.pos += self.next_char_len();
            }
            if self.eof() {
                warn!("unterminated CDATA section");
                self.errors.push(HtmlParseError::UnterminatedCdata(start));
            } else {
                self.pos += 3;
            }
            return Some(HtmlToken::new(HtmlTokenType::Cdata, start, self.pos));
        }
        if self.starts_with("<?") {
            self.pos += 2;
            while !self.eof() && !self.starts_with("?>") {
                self.pos += self.next_char_len();
            }
            if self.eof() {
                warn!("unterminated server code block");
                self.errors.push(HtmlParseError::UnterminatedServercode(start));
            } else {
                self.pos += 2;
            }
            return Some(HtmlToken::new(HtmlTokenType::Servercode, start, self.pos));
        }
        if self.starts_with("<%") {
            self.pos += 2;
            while !self.eof() && !self.starts_with("%>") {
                self.pos += self.next_char_len();
            }
            if self.eof() {
                warn!("unterminated server code block");
                self.errors.push(HtmlParseError::UnterminatedServercode(start));
            } else {
                self.pos += 2;
            }
            return Some(HtmlToken::new(HtmlTokenType::Servercode, start, self.pos));
        }
        if self.starts_with("<!") && !self.starts_with("<!--") {
            self.pos += 2;
            while !self.eof() && self.byte_at(0) != Some(b'>') {
                self.pos += self.next_char_len();
            }
            if self.eof() {
                warn!("unterminated directive");
                self.errors.push(HtmlParseError::UnterminatedDirective(start));
            } else {
                self.pos += 1;
            }
            return Some(HtmlToken::new(HtmlTokenType::Directive, start, self.pos));
        }
        None
    }

    /// `</>` is literal text (§4.2, §9 open question); any other `</X`
    /// or `<X` with `X` a letter opens a tag.
    fn try_consume_tag_open(&mut self, start: usize) -> Option<HtmlToken> {
        if self.starts_with("</") {
            if self.byte_at(2) == Some(b'>') {
                return None; // "</>" literal text
            }
            if !matches!(self.byte_at(2), Some(b) if is_tag_name_start(b)) {
                return None;
            }
            self.pos += 2;
            while matches!(self.byte_at(0), Some(b) if is_tag_name_start(b)) {
                self.pos += 1;
            }
            self.state = State::InTag;
            self.current_tag_name = None;
            return Some(HtmlToken::new(HtmlTokenType::TagBegin, start, self.pos));
        }
        if matches!(self.byte_at(1), Some(b) if is_tag_name_start(b)) {
            self.pos += 1;
            let name_start = self.pos;
            while matches!(self.byte_at(0), Some(b) if is_tag_name_start(b)) {
                self.pos += 1;
            }
            self.state = State::InTag;
            self.current_tag_name = Some(self.input[name_start..self.pos].to_ascii_lowercase());
            return Some(HtmlToken::new(HtmlTokenType::TagBegin, start, self.pos));
        }
        None
    }

    /// `IN_TAG` / `IN_ATTR_NAME` / `AFTER_ATTR_NAME`: attribute names,
    /// `=`, attribute values, and the closing `>` or `/>`.
    fn lex_in_tag(&mut self) -> Option<HtmlToken> {
        loop {
            if self.eof() {
                warn!("EOF inside open tag");
                self.errors.push(HtmlParseError::UnterminatedTag(self.pos));
                self.state = State::Outside;
                return None;
            }
            match self.byte_at(0) {
                Some(b) if is_ws(b) => {
                    self.pos += 1;
                    continue;
                }
                Some(b'/') if self.byte_at(1) == Some(b'>') => {
                    let start = self.pos;
                    self.pos += 2;
                    self.enter_post_tag_state(None);
                    return Some(HtmlToken::new(HtmlTokenType::TagEnd, start, self.pos));
                }
                Some(b'>') => {
                    let start = self.pos;
                    self.pos += 1;
                    let tag = self.current_tag_name.take();
                    self.enter_post_tag_state(tag);
                    return Some(HtmlToken::new(HtmlTokenType::TagEnd, start, self.pos));
                }
                _ => return self.consume_attr_name_or_value(),
            }
        }
    }

    fn enter_post_tag_state(&mut self, tag_name: Option<String>) {
        if let Some(name) = tag_name {
            if RAWTEXT_ELEMENTS.contains(name.to_ascii_lowercase().as_str()) {
                self.rawtext_tag = Some(name.to_ascii_lowercase());
                self.state = State::InRawtext;
                return;
            }
        }
        self.state = State::Outside;
    }

    fn consume_attr_name_or_value(&mut self) -> Option<HtmlToken> {
        let start = self.pos;
        if self.byte_at(0) == Some(b'<') {
            // Short-tag quirk: "<" inside a tag starts the next
            // attribute name rather than a nested tag (§9 open question).
            self.pos += 1;
            while matches!(self.byte_at(0), Some(b) if is_attr_name_byte(b)) {
                self.pos += self.next_char_len();
            }
            return Some(HtmlToken::new(HtmlTokenType::AttrName, start, self.pos));
        }
        while matches!(self.byte_at(0), Some(b) if is_attr_name_byte(b)) {
            self.pos += self.next_char_len();
        }
        if self.pos == start {
            // Shouldn't happen (caller already filtered ws/>//), but
            // guard against infinite loops on unexpected bytes.
            self.pos += 1;
            return Some(HtmlToken::new(HtmlTokenType::AttrName, start, self.pos));
        }
        let mut name_end = self.pos;

        let mut save = 0;
        while matches!(self.byte_at(save), Some(b) if is_ws(b)) {
            save += 1;
        }
        if self.byte_at(save) == Some(b'=') {
            self.pos += save + 1;
            // An `=` not directly preceded by an attribute name (i.e. any
            // further `=` found after skipping whitespace) attaches to the
            // previous attribute name instead of starting the value.
            loop {
                let mut probe = 0;
                while matches!(self.byte_at(probe), Some(b) if is_ws(b)) {
                    probe += 1;
                }
                if self.byte_at(probe) != Some(b'=') {
                    break;
                }
                self.pos += probe + 1;
                name_end = self.pos;
            }
            while matches!(self.byte_at(0), Some(b) if is_ws(b)) {
                self.pos += 1;
            }
            self.pending_attr_value = true;
        }
        Some(HtmlToken::new(HtmlTokenType::AttrName, start, name_end))
    }

    fn consume_attr_value(&mut self) -> Option<HtmlToken> {
        let start = self.pos;
        match self.byte_at(0) {
            Some(q @ (b'"' | b'\'')) => {
                self.pos += 1;
                while matches!(self.byte_at(0), Some(b) if b != q) {
                    self.pos += self.next_char_len();
                }
                if !self.eof() {
                    self.pos += 1;
                }
            }
            _ => {
                while matches!(self.byte_at(0), Some(b) if !is_ws(b) && b != b'>') {
                    self.pos += self.next_char_len();
                }
            }
        }
        Some(HtmlToken::new(HtmlTokenType::AttrValue, start, self.pos))
    }

    /// `IN_RAWTEXT`: opaque content up to the matching end tag.
    fn lex_rawtext(&mut self) -> Option<HtmlToken> {
        let Some(tag) = self.rawtext_tag.clone() else {
            self.state = State::Outside;
            return self.lex_outside();
        };
        let start = self.pos;
        let closer = format!("</{tag}");
        loop {
            if self.eof() {
                self.rawtext_tag = None;
                self.state = State::Outside;
                if self.pos == start {
                    return None;
                }
                warn!("raw-text element {tag:?} never closed");
                self.errors.push(HtmlParseError::UnterminatedRawtext(tag, start));
                return Some(HtmlToken::new(HtmlTokenType::Unescaped, start, self.pos));
            }
            if self.starts_with_ci(&closer) {
                let after = self.pos + closer.len();
                let terminates = matches!(self.bytes.get(after), None | Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') | Some(b'\x0C'));
                if terminates {
                    self.rawtext_tag = None;
                    self.state = State::Outside;
                    if self.pos == start {
                        return self.lex_outside();
                    }
                    return Some(HtmlToken::new(HtmlTokenType::Unescaped, start, self.pos));
                }
            }
            self.pos += self.next_char_len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(input: &str) -> Vec<(HtmlTokenType, String)> {
        let mut lexer = HtmlLexer::new(input);
        let mut out = Vec::new();
        while let Some(t) = lexer.next() {
            out.push((t.token_type, t.text(input).to_string()));
        }
        out
    }

    #[test]
    fn plain_text_is_a_single_token() {
        assert_eq!(toks("hello world"), vec![(HtmlTokenType::Text, "hello world".into())]);
    }

    #[test]
    fn rawtext_terminator_requires_a_boundary() {
        // "</scriptx" does not terminate rawtext for <script>.
        let got = toks("<script>a</scriptx b</script>");
        assert_eq!(
            got,
            vec![
                (HtmlTokenType::TagBegin, "<script".into()),
                (HtmlTokenType::TagEnd, ">".into()),
                (HtmlTokenType::Unescaped, "a</scriptx b".into()),
                (HtmlTokenType::TagBegin, "</script".into()),
                (HtmlTokenType::TagEnd, ">".into()),
            ]
        );
    }

    #[test]
    fn attribute_without_value_has_no_attrvalue_token() {
        let got = toks("<input disabled>");
        assert_eq!(
            got,
            vec![
                (HtmlTokenType::TagBegin, "<input".into()),
                (HtmlTokenType::AttrName, "disabled".into()),
                (HtmlTokenType::TagEnd, ">".into()),
            ]
        );
    }

    #[test]
    fn single_quoted_attribute_value() {
        let got = toks("<a href='/x'>");
        assert_eq!(
            got,
            vec![
                (HtmlTokenType::TagBegin, "<a".into()),
                (HtmlTokenType::AttrName, "href".into()),
                (HtmlTokenType::AttrValue, "'/x'".into()),
                (HtmlTokenType::TagEnd, ">".into()),
            ]
        );
    }

    #[test]
    fn stray_equals_attaches_to_previous_attribute_name() {
        let got = toks("<a foo= =bar>");
        assert_eq!(
            got,
            vec![
                (HtmlTokenType::TagBegin, "<a".into()),
                (HtmlTokenType::AttrName, "foo= =".into()),
                (HtmlTokenType::AttrValue, "bar".into()),
                (HtmlTokenType::TagEnd, ">".into()),
            ]
        );
    }

    #[test]
    fn peek_speculation_does_not_leak_rawtext_state() {
        // The '<' of "</script>" is scanned speculatively while still
        // accumulating the UNESCAPED body; that peek must not leave the
        // lexer thinking it has already opened a fresh tag.
        let mut lexer = HtmlLexer::new("<script>x</script>y<b>z</b>");
        let mut seen = Vec::new();
        while let Some(t) = lexer.next() {
            seen.push(t.token_type);
        }
        assert_eq!(
            seen,
            vec![
                HtmlTokenType::TagBegin,
                HtmlTokenType::TagEnd,
                HtmlTokenType::Unescaped,
                HtmlTokenType::TagBegin,
                HtmlTokenType::TagEnd,
                HtmlTokenType::Text,
                HtmlTokenType::TagBegin,
                HtmlTokenType::TagEnd,
                HtmlTokenType::Text,
                HtmlTokenType::TagBegin,
                HtmlTokenType::TagEnd,
            ]
        );
    }
}
