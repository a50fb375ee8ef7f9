//! HTML character-reference decoding (§4.3).
//!
//! Three reference shapes are recognized: numeric decimal (`&#NNN;`),
//! numeric hex (`&#xHH;` / `&#XHH;`), and named (`&name;` or, for the
//! legacy set, `&name` with no trailing `;`). Anything else beginning
//! with `&` — including a name with no matching entry, such as
//! `&order_id` — passes through unchanged, ampersand and all.

use crate::entities::{LEGACY, NAMED};
use log::trace;

/// Windows-1252 mappings for the C1 control range, per the HTML5
/// "numeric character reference end state" error-recovery table.
fn windows_1252_override(code: u32) -> Option<char> {
    let replacement = match code {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => return None,
    };
    Some(replacement)
}

fn numeric_char(code: u32) -> char {
    if let Some(c) = windows_1252_override(code) {
        return c;
    }
    if code == 0 || code > 0x10_FFFF || (0xD800..=0xDFFF).contains(&code) {
        return '\u{FFFD}';
    }
    char::from_u32(code).unwrap_or('\u{FFFD}')
}

/// Consumes the longest run of ASCII digits (decimal) or hex digits
/// starting at `bytes[pos]`, returning the parsed value and how many
/// bytes were consumed.
fn consume_digits(bytes: &[u8], pos: usize, hex: bool) -> (u32, usize) {
    let mut end = pos;
    while end < bytes.len() {
        let b = bytes[end];
        let is_digit = if hex {
            b.is_ascii_hexdigit()
        } else {
            b.is_ascii_digit()
        };
        if !is_digit {
            break;
        }
        end += 1;
    }
    let text = std::str::from_utf8(&bytes[pos..end]).unwrap_or("");
    let value = if hex {
        u32::from_str_radix(text, 16).unwrap_or(0)
    } else {
        text.parse().unwrap_or(0)
    };
    (value, end - pos)
}

/// Decodes every character reference in `input`, leaving anything that
/// does not parse as one (including a bare `&`) untouched.
#[must_use]
pub fn decode_html(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '&' {
            out.push(c);
            i += 1;
            continue;
        }

        if let Some((replacement, consumed)) = try_decode_at(&chars, i) {
            out.push_str(&replacement);
            i += consumed;
        } else {
            out.push('&');
            i += 1;
        }
    }
    out
}

/// Attempts to decode a single reference starting at `chars[start]`
/// (which must be `&`). Returns the decoded text and the number of
/// source characters it consumed, or `None` if `chars[start]` is not
/// the start of a recognizable reference.
fn try_decode_at(chars: &[char], start: usize) -> Option<(String, usize)> {
    debug_assert_eq!(chars[start], '&');
    let rest = &chars[start + 1..];

    if rest.first() == Some(&'#') {
        let hex = matches!(rest.get(1), Some('x') | Some('X'));
        let digits_start = if hex { 2 } else { 1 };
        let digit_bytes: String = rest[digits_start..]
            .iter()
            .take_while(|c| {
                if hex {
                    c.is_ascii_hexdigit()
                } else {
                    c.is_ascii_digit()
                }
            })
            .collect();
        if digit_bytes.is_empty() {
            return None;
        }
        let (code, _) = consume_digits(digit_bytes.as_bytes(), 0, hex);
        let mut consumed = 1 + digits_start + digit_bytes.chars().count();
        if rest.get(digits_start + digit_bytes.chars().count()) == Some(&';') {
            consumed += 1;
        }
        trace!("decoded numeric reference U+{code:04X}");
        return Some((numeric_char(code).to_string(), consumed));
    }

    let name_chars: String = rest
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name_chars.is_empty() {
        return None;
    }
    let name_len = name_chars.chars().count();
    let after_name = rest.get(name_len);

    // Longest-prefix match: a candidate followed by `;` may hit either
    // table, one followed by anything else can only hit the legacy
    // no-semicolon set.
    for len in (1..=name_len).rev() {
        let candidate: String = name_chars.chars().take(len).collect();
        let next_char = if len == name_len {
            after_name.copied()
        } else {
            name_chars.chars().nth(len)
        };

        if next_char == Some(';') {
            if let Some(value) = NAMED.get(candidate.as_str()).or_else(|| LEGACY.get(candidate.as_str())) {
                return Some(((*value).to_string(), 1 + len + 1));
            }
        } else if let Some(value) = LEGACY.get(candidate.as_str()) {
            return Some(((*value).to_string(), 1 + len));
        }
    }
    None
}
