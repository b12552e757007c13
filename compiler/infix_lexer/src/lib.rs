//! Infix expression lexical analyzer
//!
//! This crate converts a raw infix arithmetic expression into a stream of
//! tokens for the shunting-yard converter in `infix_eval`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod token;

// Re-export the main types for convenience
pub use lexer::{tokenize, Lexer, LogosToken};
pub use token::{Location, Token, TokenType};
