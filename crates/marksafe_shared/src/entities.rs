//! Named HTML character reference tables.
//!
//! Split the way the HTML5 tokenizing-character-references algorithm
//! splits them: a small `LEGACY` set that is historically recognized
//! *without* a trailing `;` (and therefore needs the ambiguous-ampersand
//! handling in `decode_html`), and a larger `NAMED` set that always
//! requires the `;`.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Entities that HTML5 recognizes with or without a trailing `;`.
    pub static ref LEGACY: HashMap<&'static str, &'static str> = [
        ("amp", "&"), ("AMP", "&"),
        ("lt", "<"), ("LT", "<"),
        ("gt", ">"), ("GT", ">"),
        ("quot", "\""), ("QUOT", "\""),
        ("nbsp", "\u{00A0}"),
        ("iexcl", "\u{00A1}"), ("cent", "\u{00A2}"), ("pound", "\u{00A3}"),
        ("curren", "\u{00A4}"), ("yen", "\u{00A5}"), ("brvbar", "\u{00A6}"),
        ("sect", "\u{00A7}"), ("uml", "\u{00A8}"), ("copy", "\u{00A9}"), ("COPY", "\u{00A9}"),
        ("ordf", "\u{00AA}"), ("laquo", "\u{00AB}"), ("not", "\u{00AC}"),
        ("shy", "\u{00AD}"), ("reg", "\u{00AE}"), ("REG", "\u{00AE}"), ("macr", "\u{00AF}"),
        ("deg", "\u{00B0}"), ("plusmn", "\u{00B1}"), ("sup2", "\u{00B2}"),
        ("sup3", "\u{00B3}"), ("acute", "\u{00B4}"), ("micro", "\u{00B5}"),
        ("para", "\u{00B6}"), ("middot", "\u{00B7}"), ("cedil", "\u{00B8}"),
        ("sup1", "\u{00B9}"), ("ordm", "\u{00BA}"), ("raquo", "\u{00BB}"),
        ("frac14", "\u{00BC}"), ("frac12", "\u{00BD}"), ("frac34", "\u{00BE}"),
        ("iquest", "\u{00BF}"),
        ("Agrave", "\u{00C0}"), ("Aacute", "\u{00C1}"), ("Acirc", "\u{00C2}"),
        ("Atilde", "\u{00C3}"), ("Auml", "\u{00C4}"), ("Aring", "\u{00C5}"),
        ("AElig", "\u{00C6}"), ("Ccedil", "\u{00C7}"), ("Egrave", "\u{00C8}"),
        ("Eacute", "\u{00C9}"), ("Ecirc", "\u{00CA}"), ("Euml", "\u{00CB}"),
        ("Igrave", "\u{00CC}"), ("Iacute", "\u{00CD}"), ("Icirc", "\u{00CE}"),
        ("Iuml", "\u{00CF}"), ("ETH", "\u{00D0}"), ("Ntilde", "\u{00D1}"),
        ("Ograve", "\u{00D2}"), ("Oacute", "\u{00D3}"), ("Ocirc", "\u{00D4}"),
        ("Otilde", "\u{00D5}"), ("Ouml", "\u{00D6}"), ("times", "\u{00D7}"),
        ("Oslash", "\u{00D8}"), ("Ugrave", "\u{00D9}"), ("Uacute", "\u{00DA}"),
        ("Ucirc", "\u{00DB}"), ("Uuml", "\u{00DC}"), ("Yacute", "\u{00DD}"),
        ("THORN", "\u{00DE}"), ("szlig", "\u{00DF}"),
        ("agrave", "\u{00E0}"), ("aacute", "\u{00E1}"), ("acirc", "\u{00E2}"),
        ("atilde", "\u{00E3}"), ("auml", "\u{00E4}"), ("aring", "\u{00E5}"),
        ("aelig", "\u{00E6}"), ("ccedil", "\u{00E7}"), ("egrave", "\u{00E8}"),
        ("eacute", "\u{00E9}"), ("ecirc", "\u{00EA}"), ("euml", "\u{00EB}"),
        ("igrave", "\u{00EC}"), ("iacute", "\u{00ED}"), ("icirc", "\u{00EE}"),
        ("iuml", "\u{00EF}"), ("eth", "\u{00F0}"), ("ntilde", "\u{00F1}"),
        ("ograve", "\u{00F2}"), ("oacute", "\u{00F3}"), ("ocirc", "\u{00F4}"),
        ("otilde", "\u{00F5}"), ("ouml", "\u{00F6}"), ("divide", "\u{00F7}"),
        ("oslash", "\u{00F8}"), ("ugrave", "\u{00F9}"), ("uacute", "\u{00FA}"),
        ("ucirc", "\u{00FB}"), ("uuml", "\u{00FC}"), ("yacute", "\u{00FD}"),
        ("thorn", "\u{00FE}"), ("yuml", "\u{00FF}"),
    ]
    .into_iter()
    .collect();

    /// Entities that always require a trailing `;`.
    pub static ref NAMED: HashMap<&'static str, &'static str> = [
        ("apos", "'"), ("hellip", "\u{2026}"), ("mdash", "\u{2014}"), ("ndash", "\u{2013}"),
        ("lsquo", "\u{2018}"), ("rsquo", "\u{2019}"), ("ldquo", "\u{201C}"), ("rdquo", "\u{201D}"),
        ("sbquo", "\u{201A}"), ("bdquo", "\u{201E}"), ("trade", "\u{2122}"), ("bull", "\u{2022}"),
        ("dagger", "\u{2020}"), ("Dagger", "\u{2021}"), ("permil", "\u{2030}"),
        ("lsaquo", "\u{2039}"), ("rsaquo", "\u{203A}"), ("euro", "\u{20AC}"),
        ("larr", "\u{2190}"), ("uarr", "\u{2191}"), ("rarr", "\u{2192}"), ("darr", "\u{2193}"),
        ("harr", "\u{2194}"), ("spades", "\u{2660}"), ("clubs", "\u{2663}"),
        ("hearts", "\u{2665}"), ("diams", "\u{2666}"), ("infin", "\u{221E}"), ("ne", "\u{2260}"),
        ("le", "\u{2264}"), ("ge", "\u{2265}"), ("sum", "\u{2211}"), ("prod", "\u{220F}"),
        ("radic", "\u{221A}"), ("part", "\u{2202}"), ("nabla", "\u{2207}"), ("isin", "\u{2208}"),
        ("notin", "\u{2209}"), ("cap", "\u{2229}"), ("cup", "\u{222A}"), ("sube", "\u{2286}"),
        ("supe", "\u{2287}"), ("oplus", "\u{2295}"), ("otimes", "\u{2297}"), ("perp", "\u{22A5}"),
        ("sdot", "\u{22C5}"), ("lceil", "\u{2308}"), ("rceil", "\u{2309}"), ("lfloor", "\u{230A}"),
        ("rfloor", "\u{230B}"), ("loz", "\u{25CA}"), ("alpha", "\u{03B1}"), ("beta", "\u{03B2}"),
        ("gamma", "\u{03B3}"), ("delta", "\u{03B4}"), ("epsilon", "\u{03B5}"),
        ("pi", "\u{03C0}"), ("sigma", "\u{03C3}"), ("omega", "\u{03C9}"),
        ("zwnj", "\u{200C}"), ("zwj", "\u{200D}"), ("shy2", "\u{00AD}"),
    ]
    .into_iter()
    .collect();
}
