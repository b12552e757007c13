//! Lexer for infix expressions built on the `logos` crate.
//! Recognizes the four arithmetic operators, parentheses and literal runs.

use crate::token::{Location, Token, TokenType};
use logos::Logos;

/// Raw token type used by the logos lexer
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"\s+")]
pub enum LogosToken {
    // --- Operators ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // --- Delimiters ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // --- Literals ---
    // Everything else up to the next whitespace, operator or parenthesis.
    #[regex(r"[^\s()+\-*/]+")]
    Literal,
}

/// Infix expression lexer
pub struct Lexer<'source> {
    /// The source text
    source: &'source str,
    /// The logos lexer instance
    logos_lexer: logos::Lexer<'source, LogosToken>,
    /// Current line number (1-based)
    line: usize,
    /// Current column number (1-based)
    column: usize,
    /// Byte offset up to which line and column have been computed
    offset: usize,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source text
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            logos_lexer: LogosToken::lexer(source),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Convert a LogosToken to our semantic token type
    fn convert_token(logos_token: LogosToken) -> TokenType {
        match logos_token {
            LogosToken::Plus => TokenType::Plus,
            LogosToken::Minus => TokenType::Minus,
            LogosToken::Star => TokenType::Star,
            LogosToken::Slash => TokenType::Slash,
            LogosToken::LParen => TokenType::LeftParen,
            LogosToken::RParen => TokenType::RightParen,
            LogosToken::Literal => TokenType::Literal,
        }
    }

    /// Advance line and column up to the given byte offset
    fn update_position(&mut self, until: usize) {
        for c in self.source[self.offset..until].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = until;
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.logos_lexer.next()?;
        let span = self.logos_lexer.span();
        let lexeme = self.logos_lexer.slice();

        self.update_position(span.start);
        let location = Location {
            line: self.line,
            column: self.column,
            offset: self.offset,
        };

        // Unmatched input is passed through as literal text; whether it is a
        // number is the evaluator's call.
        let token_type = match logos_token {
            Ok(token) => Self::convert_token(token),
            Err(()) => TokenType::Literal,
        };

        #[cfg(feature = "logging")]
        log::trace!("lexed {token_type} {lexeme:?} at {}:{}", location.line, location.column);

        let token = Token::new(token_type, lexeme, location);
        self.update_position(span.end);
        Some(token)
    }
}

/// Tokenize a whole expression into a vector
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
