//! The signature reader: tokenizer plus recursive-descent parser.

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, Token, TokenKind, TokenStream};
pub use parser::{extract_name, parse, signature_name};
