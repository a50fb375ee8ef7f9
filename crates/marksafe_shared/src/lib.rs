//! Primitives shared between the CSS and HTML tokenizers: the character
//! stream cursor, named code points, the well-known-unit table, and
//! HTML character-reference decoding.

pub mod entities;
pub mod entity_decode;
pub mod stream;
pub mod unicode;
pub mod units;

pub use entity_decode::decode_html;
pub use stream::{CharStream, Character, Location};
pub use unicode::UnicodeChar;
pub use units::is_well_known_unit;
