//! CSS tokenizer and normalizer: lexes arbitrary (possibly adversarial)
//! CSS text into a balanced, idempotent token stream safe to embed back
//! into HTML (§4.1).

pub mod css_tokens;
pub mod errors;
pub mod grammar;
pub mod token;
pub mod tokenizer;

pub use css_tokens::{fix_digit_space_unit, CssTokenIter, CssTokens};
pub use errors::CssParseError;
pub use grammar::CssGrammar;
pub use marksafe_shared::stream::Location;
pub use token::CssTokenType;
