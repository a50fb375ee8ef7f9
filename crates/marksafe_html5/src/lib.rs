pub mod errors;
pub mod lexer;
pub mod state;
pub mod token;

pub use errors::HtmlParseError;
pub use lexer::HtmlLexer;
pub use state::State;
pub use token::{HtmlToken, HtmlTokenType};
