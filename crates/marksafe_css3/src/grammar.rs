//! `CssGrammar::css_content` (§4.4): unwrap a single CSS value — one
//! layer of surrounding quotes, then CSS escape decoding.

pub struct CssGrammar;

impl CssGrammar {
    /// Strips one layer of surrounding `'`/`"` quotes (if both ends
    /// match) and decodes `\HH` / `\c` escapes in what remains. Total;
    /// a lone quote character is returned unchanged.
    #[must_use]
    pub fn css_content(input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let body: &[char] = if chars.len() >= 2
            && matches!(chars[0], '\'' | '"')
            && chars[chars.len() - 1] == chars[0]
        {
            &chars[1..chars.len() - 1]
        } else {
            &chars[..]
        };
        decode_escapes(body)
    }
}

fn decode_escapes(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '\\' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        i += 1;
        if i >= chars.len() {
            break;
        }
        if chars[i] == '\n' {
            // Escaped literal newline: a CSS line-continuation, consumed
            // without emitting anything.
            i += 1;
            continue;
        }
        if chars[i].is_ascii_hexdigit() {
            let hex_start = i;
            while i < chars.len() && i - hex_start < 6 && chars[i].is_ascii_hexdigit() {
                i += 1;
            }
            let hex: String = chars[hex_start..i].iter().collect();
            if i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let code = u32::from_str_radix(&hex, 16).unwrap_or(0);
            let decoded = if code == 0 || code > 0x10_FFFF || (0xD800..=0xDFFF).contains(&code) {
                '\u{FFFD}'
            } else {
                char::from_u32(code).unwrap_or('\u{FFFD}')
            };
            out.push(decoded);
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}
