//! The fixed table of recognized CSS dimension suffixes (§4.1 "Well-known
//! units"), used to fuse a `NUMBER WHITESPACE IDENT` triple into a
//! `DIMENSION` on re-lex (§9 "Documented non-idempotence").

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref WELL_KNOWN_UNITS: HashSet<&'static str> = [
        "em", "ex", "ch", "rem", "vw", "vh", "vmin", "vmax", "cm", "mm", "in", "px", "pt", "pc",
        "deg", "grad", "rad", "turn", "ms", "s", "hz", "khz", "dpi", "dpcm", "dppx", "fr", "q",
    ]
    .into_iter()
    .collect();
}

/// Unit names are compared case-insensitively; pass an already-lowercased
/// string for the common case.
#[must_use]
pub fn is_well_known_unit(unit_lowercase: &str) -> bool {
    WELL_KNOWN_UNITS.contains(unit_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_units() {
        assert!(is_well_known_unit("px"));
        assert!(is_well_known_unit("rem"));
        assert!(is_well_known_unit("khz"));
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(!is_well_known_unit("banana"));
    }
}
