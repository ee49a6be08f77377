/*!
# Rust Language Module

This Rust module provides lexical analysis of PL/0 and the single pass
translator which turns tokens straight into machine instructions.

*/

use super::{LineNumber, Limits};

#[macro_use]
mod error;
mod lex;
mod parse;
mod symbol;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::parse;
pub use symbol::{Kind, Symbol, SymbolTable};
pub use token::{parse_tokens, tokens_to_string, tokens_to_symbolic, Token};
