use std::fmt;

/// Represents a token's location in the source expression.
///
/// Line and column numbers are 1-based, the byte offset is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based line number
    pub line: usize,
    /// The 1-based column number, counted in characters
    pub column: usize,
    /// The 0-based byte offset from the start of the input
    pub offset: usize,
}

/// The kinds of token an infix expression is made of.
///
/// Anything that is not whitespace, one of the four operators or a
/// parenthesis belongs to a [`TokenType::Literal`] run. Whether a literal is
/// a valid number is decided later, when the postfix form is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// A run of literal characters, usually digits and decimal points
    Literal,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Plus => write!(f, "+"),
            TokenType::Minus => write!(f, "-"),
            TokenType::Star => write!(f, "*"),
            TokenType::Slash => write!(f, "/"),
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::Literal => write!(f, "literal"),
        }
    }
}

/// A single token produced by the [`Lexer`](crate::Lexer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub token_type: TokenType,
    /// The exact source text of the token
    pub lexeme: String,
    /// Where the token starts in the input
    pub location: Location,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, location: Location) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// The byte offset one past the end of this token
    pub fn end_offset(&self) -> usize {
        self.location.offset + self.lexeme.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' at {}:{}",
            self.token_type, self.lexeme, self.location.line, self.location.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn token_display_includes_position() {
        let token = Token::new(
            TokenType::Literal,
            "12.5",
            Location {
                line: 1,
                column: 4,
                offset: 3,
            },
        );
        assert_eq!(token.to_string(), "literal '12.5' at 1:4");
        assert_eq!(token.end_offset(), 7);
    }
}
