//! End-to-end and property-style conformance tests (§8).

use marksafe_css3::{fix_digit_space_unit, CssTokenType, CssTokens};

const SAMPLE_CSS: &str = r#"/* A comment */
words with-dashes #hashes .dots. -and-leading-dashes
quantities: 3px 4ex -.5pt 12.5%
punctuation: { ( } / , ;
[ url( http://example.com )
rgb(255, 127, 127)
'strings' "oh \"my" 'foo bar'
"#;

#[test]
fn end_to_end_scenario_one() {
    let tokens = CssTokens::lex(SAMPLE_CSS);
    let observed: Vec<(&str, CssTokenType)> = tokens
        .tokens()
        .filter(|(_, ty)| **ty != CssTokenType::Whitespace)
        .map(|(text, ty)| (text, *ty))
        .collect();

    let expected: Vec<(&str, CssTokenType)> = vec![
        ("words", CssTokenType::Ident),
        ("with-dashes", CssTokenType::Ident),
        ("#hashes", CssTokenType::HashId),
        (".dots", CssTokenType::DotIdent),
        (".", CssTokenType::Delim),
        ("-and-leading-dashes", CssTokenType::Ident),
        ("quantities", CssTokenType::Ident),
        (":", CssTokenType::Colon),
        ("3px", CssTokenType::Dimension),
        ("4ex", CssTokenType::Dimension),
        ("-0.5pt", CssTokenType::Dimension),
        ("12.5%", CssTokenType::Percentage),
        ("punctuation", CssTokenType::Ident),
        (":", CssTokenType::Colon),
        ("{", CssTokenType::LeftCurly),
        ("(", CssTokenType::LeftParen),
        (")", CssTokenType::RightParen),
        ("}", CssTokenType::RightCurly),
        ("/", CssTokenType::Delim),
        (",", CssTokenType::Comma),
        (";", CssTokenType::Semicolon),
        ("[", CssTokenType::LeftSquare),
        ("url('http://example.com')", CssTokenType::Url),
        ("rgb(", CssTokenType::Function),
        ("255", CssTokenType::Number),
        (",", CssTokenType::Comma),
        ("127", CssTokenType::Number),
        (",", CssTokenType::Comma),
        ("127", CssTokenType::Number),
        (")", CssTokenType::RightParen),
        ("'strings'", CssTokenType::String),
        ("'oh \\22my'", CssTokenType::String),
        ("'foo bar'", CssTokenType::String),
        ("]", CssTokenType::RightSquare),
    ];

    assert_eq!(observed, expected);
}

fn assert_no_disallowed_sequences(css: &str) {
    for bad in ["</style", "<![CDATA[", "]]>", "\r", "\n"] {
        assert!(!css.contains(bad), "normalized CSS contains disallowed sequence {bad:?}: {css:?}");
    }
}

#[test]
fn disallowed_sequences_cannot_survive_normalization() {
    let inputs = [
        "content: '</style>';",
        "content: '<![CDATA[oops]]>';",
        "content: 'line1\r\nline2';",
        "/* </style> inside a comment */ .a { color: red }",
    ];
    for input in inputs {
        assert_no_disallowed_sequences(CssTokens::lex(input).normalized_css());
    }
}

#[test]
fn bracket_table_is_an_involution_over_many_inputs() {
    let inputs = [
        "a(b[c]{d}e)f",
        "))) ((( [[[ ]]] {{{ }}}",
        "fn(",
        "} } } ( [",
        "normal { nested (very [deep {still}] fine) } end",
    ];
    for input in inputs {
        let tokens = CssTokens::lex(input);
        for i in 0..tokens.len() {
            let p = tokens.partner(i);
            if p >= 0 {
                assert_eq!(tokens.partner(p as usize), i as i64, "not an involution for input {input:?}");
            }
        }
    }
}

#[test]
fn every_token_matches_its_shape() {
    let tokens = CssTokens::lex(SAMPLE_CSS);
    for (text, ty) in tokens.tokens() {
        assert!(token_matches_shape(text, *ty), "{text:?} is not {ty}-shaped");
    }
}

/// Every `CssTokenType` variant against its §8 shape regex.
fn token_matches_shape(text: &str, ty: CssTokenType) -> bool {
    match ty {
        CssTokenType::Number => is_number_shape(text),
        CssTokenType::Dimension => {
            let (num, unit) = split_trailing_alpha(text);
            is_number_shape(num) && !unit.is_empty() && unit.chars().all(|c| c.is_ascii_lowercase())
        }
        CssTokenType::Percentage => text.ends_with('%') && is_number_shape(&text[..text.len() - 1]),
        CssTokenType::Ident => is_ident_shape(text),
        CssTokenType::At => text.strip_prefix('@').is_some_and(is_ident_shape),
        CssTokenType::HashId => text.strip_prefix('#').is_some_and(is_ident_shape),
        CssTokenType::HashUnrestricted => text
            .strip_prefix('#')
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit())),
        CssTokenType::DotIdent => text.strip_prefix('.').is_some_and(is_ident_shape),
        CssTokenType::Function => text.strip_suffix('(').is_some_and(is_ident_shape),
        CssTokenType::Match => {
            let mut chars = text.chars();
            matches!(chars.next(), Some('~' | '^' | '$' | '|' | '*')) && chars.next() == Some('=') && chars.next().is_none()
        }
        CssTokenType::Column => text == "||",
        CssTokenType::Colon => text == ":",
        CssTokenType::Semicolon => text == ";",
        CssTokenType::Comma => text == ",",
        CssTokenType::LeftCurly => text == "{",
        CssTokenType::RightCurly => text == "}",
        CssTokenType::LeftParen => text == "(",
        CssTokenType::RightParen => text == ")",
        CssTokenType::LeftSquare => text == "[",
        CssTokenType::RightSquare => text == "]",
        CssTokenType::String => text.starts_with('\'') && text.ends_with('\'') && text.len() >= 2,
        CssTokenType::Url => (text.starts_with("url('") && text.ends_with("')")) || text == "url()",
        CssTokenType::UnicodeRange => is_unicode_range_shape(text),
        CssTokenType::Delim => text.chars().count() == 1,
        CssTokenType::Whitespace => text == " ",
    }
}

fn is_number_shape(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, _exp) = s.split_once('e').unwrap_or((s, ""));
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return false;
    }
    frac_part.is_empty() || (frac_part.chars().all(|c| c.is_ascii_digit()) && !frac_part.ends_with('0'))
}

fn split_trailing_alpha(s: &str) -> (&str, &str) {
    let split_at = s.find(|c: char| c.is_ascii_alphabetic()).unwrap_or(s.len());
    s.split_at(split_at)
}

/// `[A-Za-z_-\u{10FFFF}\-][A-Za-z_-\u{10FFFF}\-0-9]*`
fn is_ident_shape(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' || (c as u32) >= 0x80 => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || (c as u32) >= 0x80)
}

/// `U\+[0-9a-f]{1,6}(?:-[0-9a-f]{1,6}|\?{0,5})?`
fn is_unicode_range_shape(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("U+") else {
        return false;
    };
    if let Some((first, second)) = rest.split_once('-') {
        is_hex_run(first, 1, 6) && is_hex_run(second, 1, 6)
    } else {
        let hex_len = rest.chars().take_while(|c| c.is_ascii_hexdigit()).count();
        if !(1..=6).contains(&hex_len) {
            return false;
        }
        let wildcards = &rest[hex_len..];
        wildcards.len() <= 5 && wildcards.chars().all(|c| c == '?')
    }
}

fn is_hex_run(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[test]
fn idempotent_modulo_digit_space_unit_fixup() {
    let inputs = [
        "words with-dashes #hashes .dots",
        "rgb(255, 127, 127)",
        "'a string' \"another\"",
        "@media screen { .a { color: red } }",
        "url(foo bar baz)",
    ];
    for input in inputs {
        let first = CssTokens::lex(input);
        let fixed = fix_digit_space_unit(&first);
        let relexed = CssTokens::lex(&fixed);
        assert_eq!(relexed.normalized_css(), fixed, "not idempotent for input {input:?}");
    }
}
