//! Low-level CSS consume functions (§4.1).
//!
//! Each `consume_*` function mirrors a production of the CSS Syntax
//! tokenizer: given a [`CharStream`] positioned at the start of a
//! construct, it advances the stream past that construct and returns
//! its *normalized* text directly — there is no separate raw/normalized
//! pass, normalization happens as each token is built.

use crate::errors::CssParseError;
use crate::token::CssTokenType;
use log::{trace, warn};
use marksafe_shared::stream::{CharStream, Character, Location};
use marksafe_shared::unicode::is_dangerous_control;
use marksafe_shared::units::is_well_known_unit;

/// A single lexed token: its type and the already-normalized text that
/// should be appended to `normalizedCss`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub kind: CssTokenType,
    pub text: String,
    /// Whether whitespace or a comment separated this token from the
    /// previous one in the source text.
    pub had_leading_space: bool,
    /// Where this token began in the source, for diagnostics. Not part
    /// of the external token contract (§6 promises only byte offsets
    /// into `normalizedCss`), exposed as a byproduct of `CharStream`.
    pub location: Location,
}

pub struct Lexer<'a> {
    stream: CharStream,
    errors: Vec<CssParseError>,
    _marker: std::marker::PhantomData<&'a ()>,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || (c as u32) >= 0x80
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || (c as u32) >= 0x80
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            stream: CharStream::new(input),
            errors: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<CssParseError> {
        self.errors
    }

    /// Consumes the entire input into a flat token list. Never fails.
    pub fn tokenize(mut self) -> (Vec<RawToken>, Vec<CssParseError>) {
        let mut tokens = Vec::new();
        loop {
            let had_leading_space = self.skip_whitespace_and_comments();
            if self.stream.eof() {
                break;
            }
            let mut token = self.consume_token();
            token.had_leading_space = had_leading_space;
            trace!("consumed {:?} -> {:?}", token.kind, token.text);
            tokens.push(token);
        }
        (tokens, self.errors)
    }

    /// Skips runs of ASCII whitespace and `/* ... */` comments.
    /// Returns whether anything was actually skipped.
    fn skip_whitespace_and_comments(&mut self) -> bool {
        let mut skipped = false;
        loop {
            match self.stream.current() {
                Character::Ch(c) if matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C') => {
                    self.stream.advance();
                    skipped = true;
                }
                // Dangerous control/BOM code points are dropped silently
                // rather than emitted as a zero-width DELIM token.
                Character::Ch(c) if is_dangerous_control(c) => {
                    self.stream.advance();
                }
                Character::Ch('/') if self.stream.look_ahead(1) == Character::Ch('*') => {
                    self.stream.advance_n(2);
                    let start = self.stream.pos();
                    loop {
                        match self.stream.current() {
                            Character::Eof => {
                                warn!("unterminated comment");
                                self.errors.push(CssParseError::UnterminatedComment(start));
                                break;
                            }
                            Character::Ch('*') if self.stream.look_ahead(1) == Character::Ch('/') => {
                                self.stream.advance_n(2);
                                break;
                            }
                            _ => {
                                self.stream.advance();
                            }
                        }
                    }
                    skipped = true;
                }
                _ => break,
            }
        }
        skipped
    }

    fn consume_token(&mut self) -> RawToken {
        let location = self.stream.location();
        let kind_text = match self.stream.current() {
            Character::Ch('"') | Character::Ch('\'') => self.consume_string_token(),
            Character::Ch(c) if c.is_ascii_digit() => self.consume_numeric_token(),
            Character::Ch('+') if self.stream.look_ahead(1).is_numeric() => self.consume_numeric_token(),
            Character::Ch('.')
                if matches!(self.stream.look_ahead(1), Character::Ch(c) if c.is_ascii_digit()) =>
            {
                self.consume_numeric_token()
            }
            Character::Ch('-')
                if self.stream.look_ahead(1).is_numeric()
                    || (self.stream.look_ahead(1) == Character::Ch('.')
                        && self.stream.look_ahead(2).is_numeric()) =>
            {
                self.consume_numeric_token()
            }
            Character::Ch('#') => self.consume_hash_token(),
            Character::Ch('@') => self.consume_at_token(),
            Character::Ch('.') => self.consume_dot_token(),
            Character::Ch('u') | Character::Ch('U')
                if self.stream.look_ahead(1) == Character::Ch('+')
                    && (is_hex_digit(char::from(self.stream.look_ahead(2)))
                        || self.stream.look_ahead(2) == Character::Ch('?')) =>
            {
                self.consume_unicode_range_token()
            }
            Character::Ch(c) if is_ident_start(c) || c == '\\' => self.consume_ident_like_token(),
            Character::Ch('(') => {
                self.stream.advance();
                (CssTokenType::LeftParen, "(".to_string())
            }
            Character::Ch(')') => {
                self.stream.advance();
                (CssTokenType::RightParen, ")".to_string())
            }
            Character::Ch('{') => {
                self.stream.advance();
                (CssTokenType::LeftCurly, "{".to_string())
            }
            Character::Ch('}') => {
                self.stream.advance();
                (CssTokenType::RightCurly, "}".to_string())
            }
            Character::Ch('[') => {
                self.stream.advance();
                (CssTokenType::LeftSquare, "[".to_string())
            }
            Character::Ch(']') => {
                self.stream.advance();
                (CssTokenType::RightSquare, "]".to_string())
            }
            Character::Ch(':') => {
                self.stream.advance();
                (CssTokenType::Colon, ":".to_string())
            }
            Character::Ch(';') => {
                self.stream.advance();
                (CssTokenType::Semicolon, ";".to_string())
            }
            Character::Ch(',') => {
                self.stream.advance();
                (CssTokenType::Comma, ",".to_string())
            }
            Character::Ch('|') if self.stream.look_ahead(1) == Character::Ch('|') => {
                self.stream.advance_n(2);
                (CssTokenType::Column, "||".to_string())
            }
            Character::Ch(c) if matches!(c, '~' | '|' | '^' | '$' | '*')
                && self.stream.look_ahead(1) == Character::Ch('=') =>
            {
                self.stream.advance_n(2);
                (CssTokenType::Match, format!("{c}="))
            }
            Character::Ch(c) => {
                self.stream.advance();
                (CssTokenType::Delim, c.to_string())
            }
            Character::Eof => unreachable!("tokenize() stops at eof before calling consume_token"),
        };
        RawToken {
            kind: kind_text.0,
            text: kind_text.1,
            had_leading_space: false,
            location,
        }
    }

    fn consume_dot_token(&mut self) -> (CssTokenType, String) {
        // A lone '.' already routed to consume_numeric_token when followed
        // by a digit; here it is either DOT_IDENT or a bare DELIM.
        self.stream.advance();
        if matches!(self.stream.current(), Character::Ch(c) if is_ident_start(c) || c == '\\') {
            let ident = self.consume_ident_sequence();
            (CssTokenType::DotIdent, format!(".{ident}"))
        } else {
            (CssTokenType::Delim, ".".to_string())
        }
    }

    fn consume_at_token(&mut self) -> (CssTokenType, String) {
        self.stream.advance();
        if matches!(self.stream.current(), Character::Ch(c) if is_ident_start(c) || c == '\\') {
            let ident = self.consume_ident_sequence();
            (CssTokenType::At, format!("@{}", ident.to_ascii_lowercase()))
        } else {
            (CssTokenType::Delim, "@".to_string())
        }
    }

    fn consume_hash_token(&mut self) -> (CssTokenType, String) {
        self.stream.advance();
        let is_name_start = matches!(self.stream.current(), Character::Ch(c) if is_ident_continue(c) || c == '\\');
        if !is_name_start {
            return (CssTokenType::Delim, "#".to_string());
        }
        let resume_pos = self.stream.pos();
        let resume_location = self.stream.location();
        let name = self.consume_ident_sequence();
        if name.chars().next().is_some_and(is_ident_start) {
            (CssTokenType::HashId, format!("#{name}"))
        } else if matches!(name.len(), 3 | 4 | 6 | 8) && name.chars().all(|c| is_hex_digit(c)) {
            (CssTokenType::HashUnrestricted, format!("#{name}"))
        } else {
            // Neither a valid identifier nor a restricted-length hex run
            // (e.g. "#12gg"): the '#' is a bare DELIM and the name re-lexes
            // normally from the character right after it.
            self.stream.reset(resume_pos, resume_location);
            (CssTokenType::Delim, "#".to_string())
        }
    }

    /// Consumes a name sequence (identifier body, hash body, ...),
    /// decoding escapes as it goes. Does not include a leading sigil.
    fn consume_ident_sequence(&mut self) -> String {
        let mut out = String::new();
        loop {
            match self.stream.current() {
                Character::Ch('\\') if self.is_valid_escape_start() => {
                    out.push(self.consume_escaped_code_point());
                }
                Character::Ch(c) if is_ident_continue(c) => {
                    out.push(c);
                    self.stream.advance();
                }
                _ => break,
            }
        }
        out
    }

    fn is_valid_escape_start(&self) -> bool {
        self.stream.current() == Character::Ch('\\')
            && !matches!(self.stream.look_ahead(1), Character::Ch('\n') | Character::Eof)
    }

    /// Consumes `\` plus either 1-6 hex digits (with an optional single
    /// whitespace terminator) or a single literal character.
    fn consume_escaped_code_point(&mut self) -> char {
        self.stream.advance(); // consume backslash
        match self.stream.current() {
            Character::Ch(c) if is_hex_digit(c) => {
                let mut hex = String::new();
                while hex.len() < 6 {
                    if let Character::Ch(c) = self.stream.current() {
                        if is_hex_digit(c) {
                            hex.push(c);
                            self.stream.advance();
                            continue;
                        }
                    }
                    break;
                }
                if matches!(self.stream.current(), Character::Ch(c) if c.is_whitespace()) {
                    self.stream.advance();
                }
                let code = u32::from_str_radix(&hex, 16).unwrap_or(0);
                if code == 0 || code > 0x10_FFFF || (0xD800..=0xDFFF).contains(&code) {
                    warn!("invalid escaped code point U+{code:06X}, substituting replacement character");
                    self.errors.push(CssParseError::BadEscape(self.stream.pos()));
                    '\u{FFFD}'
                } else {
                    char::from_u32(code).unwrap_or('\u{FFFD}')
                }
            }
            Character::Ch(c) => {
                self.stream.advance();
                c
            }
            Character::Eof => '\u{FFFD}',
        }
    }

    fn consume_ident_like_token(&mut self) -> (CssTokenType, String) {
        let name = self.consume_ident_sequence();
        if self.stream.current() == Character::Ch('(') {
            self.stream.advance();
            if name.eq_ignore_ascii_case("url") {
                return self.consume_url_token();
            }
            return (CssTokenType::Function, format!("{}(", name.to_ascii_lowercase()));
        }
        (CssTokenType::Ident, name.to_ascii_lowercase_preserving_nonascii())
    }

    fn consume_url_token(&mut self) -> (CssTokenType, String) {
        self.skip_whitespace_and_comments();
        let start = self.stream.pos();
        let mut content = String::new();
        let mut unterminated = false;
        let mut bad_url = false;
        loop {
            match self.stream.current() {
                Character::Eof => {
                    unterminated = true;
                    break;
                }
                Character::Ch(')') => {
                    self.stream.advance();
                    break;
                }
                Character::Ch(c) if c == '"' || c == '\'' => {
                    // quoted url(...) content: read the quoted string raw,
                    // stripping the quotes, then continue to the closer.
                    self.stream.advance();
                    loop {
                        match self.stream.current() {
                            Character::Eof => break,
                            Character::Ch(q) if q == c => {
                                self.stream.advance();
                                break;
                            }
                            Character::Ch('\\') if self.is_valid_escape_start() => {
                                content.push(self.consume_escaped_code_point());
                            }
                            Character::Ch(ch) => {
                                content.push(ch);
                                self.stream.advance();
                            }
                        }
                    }
                }
                Character::Ch('\\') if self.is_valid_escape_start() => {
                    content.push(self.consume_escaped_code_point());
                }
                Character::Ch(c) if c.is_whitespace() => {
                    self.skip_whitespace_and_comments();
                    if !matches!(self.stream.current(), Character::Ch(')') | Character::Eof) {
                        bad_url = true;
                        while !matches!(self.stream.current(), Character::Ch(')') | Character::Eof) {
                            self.stream.advance();
                        }
                    }
                }
                Character::Ch(c) => {
                    content.push(c);
                    self.stream.advance();
                }
            }
        }
        if unterminated {
            warn!("unterminated url()");
            self.errors.push(CssParseError::UnterminatedUrl(start));
        }
        if bad_url {
            warn!("url() content could not be made safe, degrading to an empty url()");
            self.errors.push(CssParseError::UnsafeUrl(start));
            return (CssTokenType::Url, "url()".to_string());
        }
        (CssTokenType::Url, format!("url({})", encode_url_content(&content)))
    }

    fn consume_string_token(&mut self) -> (CssTokenType, String) {
        let quote = char::from(self.stream.current());
        let start = self.stream.pos();
        self.stream.advance();
        let mut decoded = String::new();
        loop {
            match self.stream.current() {
                Character::Eof => {
                    warn!("unterminated string");
                    self.errors.push(CssParseError::UnterminatedString(start));
                    break;
                }
                Character::Ch(c) if c == quote => {
                    self.stream.advance();
                    break;
                }
                Character::Ch('\n') | Character::Ch('\r') => {
                    warn!("unescaped newline in string");
                    break;
                }
                Character::Ch('\\') => {
                    if matches!(self.stream.look_ahead(1), Character::Ch('\n')) {
                        self.stream.advance_n(2);
                    } else if self.is_valid_escape_start() {
                        decoded.push(self.consume_escaped_code_point());
                    } else {
                        self.stream.advance();
                    }
                }
                Character::Ch(c) => {
                    decoded.push(c);
                    self.stream.advance();
                }
            }
        }
        (CssTokenType::String, format!("'{}'", escape_string_body(&decoded)))
    }

    fn consume_numeric_token(&mut self) -> (CssTokenType, String) {
        let mut raw = String::new();
        if matches!(self.stream.current(), Character::Ch('+') | Character::Ch('-')) {
            raw.push(char::from(self.stream.current()));
            self.stream.advance();
        }
        while matches!(self.stream.current(), Character::Ch(c) if c.is_ascii_digit()) {
            raw.push(char::from(self.stream.current()));
            self.stream.advance();
        }
        if self.stream.current() == Character::Ch('.')
            && matches!(self.stream.look_ahead(1), Character::Ch(c) if c.is_ascii_digit())
        {
            raw.push('.');
            self.stream.advance();
            while matches!(self.stream.current(), Character::Ch(c) if c.is_ascii_digit()) {
                raw.push(char::from(self.stream.current()));
                self.stream.advance();
            }
        }
        if matches!(self.stream.current(), Character::Ch('e') | Character::Ch('E')) {
            let mut lookahead = 1;
            let mut exp = String::new();
            if matches!(self.stream.look_ahead(1), Character::Ch('+') | Character::Ch('-')) {
                lookahead = 2;
            }
            if matches!(self.stream.look_ahead(lookahead), Character::Ch(c) if c.is_ascii_digit()) {
                self.stream.advance(); // e/E
                if lookahead == 2 {
                    exp.push(char::from(self.stream.current()));
                    self.stream.advance();
                }
                while matches!(self.stream.current(), Character::Ch(c) if c.is_ascii_digit()) {
                    exp.push(char::from(self.stream.current()));
                    self.stream.advance();
                }
                raw.push('e');
                raw.push_str(&exp);
            }
        }
        let canonical = canonicalize_number(&raw);
        if self.stream.current() == Character::Ch('%') {
            self.stream.advance();
            return (CssTokenType::Percentage, format!("{canonical}%"));
        }
        if matches!(self.stream.current(), Character::Ch(c) if is_ident_start(c) || c == '\\') {
            let unit = self.consume_ident_sequence();
            return (CssTokenType::Dimension, format!("{canonical}{}", unit.to_ascii_lowercase()));
        }
        (CssTokenType::Number, canonical)
    }

    fn consume_unicode_range_token(&mut self) -> (CssTokenType, String) {
        self.stream.advance_n(2); // "U+"
        let mut start_digits = String::new();
        while start_digits.len() < 6
            && matches!(self.stream.current(), Character::Ch(c) if is_hex_digit(c))
        {
            start_digits.push(char::from(self.stream.current()));
            self.stream.advance();
        }
        let mut wildcards = String::new();
        while start_digits.len() + wildcards.len() < 6 && self.stream.current() == Character::Ch('?') {
            wildcards.push('?');
            self.stream.advance();
        }
        if !wildcards.is_empty() {
            return (
                CssTokenType::UnicodeRange,
                format!("U+{}{}", start_digits.to_ascii_lowercase(), wildcards),
            );
        }
        if self.stream.current() == Character::Ch('-')
            && matches!(self.stream.look_ahead(1), Character::Ch(c) if is_hex_digit(c))
        {
            self.stream.advance();
            let mut end_digits = String::new();
            while end_digits.len() < 6
                && matches!(self.stream.current(), Character::Ch(c) if is_hex_digit(c))
            {
                end_digits.push(char::from(self.stream.current()));
                self.stream.advance();
            }
            return (
                CssTokenType::UnicodeRange,
                format!("U+{}-{}", start_digits.to_ascii_lowercase(), end_digits.to_ascii_lowercase()),
            );
        }
        (CssTokenType::UnicodeRange, format!("U+{}", start_digits.to_ascii_lowercase()))
    }
}

/// Lowercases ASCII letters only; code points above U+007F pass through
/// untouched (they have no CSS-meaningful case).
trait AsciiLowerPreserve {
    fn to_ascii_lowercase_preserving_nonascii(&self) -> String;
}

impl AsciiLowerPreserve for str {
    fn to_ascii_lowercase_preserving_nonascii(&self) -> String {
        self.chars()
            .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
            .collect()
    }
}

/// Re-renders a decoded numeric literal in canonical form: no leading
/// `+`, no redundant leading zero, trimmed fractional zeros, negative
/// zero normalized to `0`, minimal exponent.
fn canonicalize_number(raw: &str) -> String {
    let negative = raw.starts_with('-');
    let unsigned = raw.trim_start_matches(['+', '-']);
    let (mantissa, exponent) = unsigned.split_once(['e', 'E']).unwrap_or((unsigned, ""));
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    let frac_trimmed = frac_part.trim_end_matches('0');

    let is_zero = int_part == "0" && frac_trimmed.is_empty();

    let mut out = String::new();
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(int_part);
    if !frac_trimmed.is_empty() {
        out.push('.');
        out.push_str(frac_trimmed);
    }
    if !exponent.is_empty() && !is_zero {
        let exp_negative = exponent.starts_with('-');
        let exp_digits = exponent.trim_start_matches(['+', '-']).trim_start_matches('0');
        let exp_digits = if exp_digits.is_empty() { "0" } else { exp_digits };
        if exp_digits != "0" {
            out.push('e');
            if exp_negative {
                out.push('-');
            }
            out.push_str(exp_digits);
        }
    }
    out
}

/// Escapes characters that are unsafe inside a single-quoted CSS string
/// re-emitted into HTML-adjacent context: the quote itself and anything
/// that could break out of the surrounding markup.
fn escape_string_body(decoded: &str) -> String {
    let mut out = String::new();
    let mut chars = decoded.chars().peekable();
    while let Some(c) = chars.next() {
        let needs_escape = matches!(c, '\'' | '<' | '>' | '&' | '"' | '\r' | '\n' | '\0')
            || is_dangerous_control(c)
            || c == '\u{FEFF}';
        if needs_escape {
            out.push_str(&format!("\\{:x}", c as u32));
            if matches!(chars.peek(), Some(next) if is_hex_digit(*next) || next.is_whitespace()) {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Percent-encodes everything outside the restricted URL character set
/// and wraps the result in a single-quoted string.
fn encode_url_content(content: &str) -> String {
    const SAFE: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_.~:/?#[]@!$&+,;=%";
    let mut out = String::from("'");
    for byte in content.as_bytes() {
        if SAFE.contains(byte) {
            out.push(*byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out.push('\'');
    out
}
