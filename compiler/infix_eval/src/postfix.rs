//! Infix to postfix conversion using the shunting-yard algorithm.

use infix_lexer::{Lexer, Token, TokenType};
use log::{debug, trace};

use crate::error::{CalcError, CalcResult};
use crate::operator::Operator;

/// Separator placed before every operator written to the output
const SEPARATOR: char = ' ';

/// An entry on the operator stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Operator(Operator),
    /// Barrier that no precedence pop may cross
    LeftParen,
}

impl Pending {
    fn symbol(self) -> char {
        match self {
            Pending::Operator(op) => op.symbol(),
            Pending::LeftParen => '(',
        }
    }
}

/// State of a single left-to-right shunting-yard scan.
///
/// Literal text is appended with no separator, so literals that follow one
/// another without an operator in between (including across a discarded
/// pair of parentheses) merge into one output literal.
#[derive(Debug, Default)]
pub struct ShuntingYard {
    stack: Vec<Pending>,
    output: String,
}

impl ShuntingYard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one token into the scan
    pub fn push_token(&mut self, token: &Token) -> CalcResult<()> {
        if let Some(op) = Operator::from_token(&token.token_type) {
            return self.push_operator(op);
        }
        match token.token_type {
            TokenType::LeftParen => {
                trace!("push ( at {}:{}", token.location.line, token.location.column);
                self.stack.push(Pending::LeftParen);
                Ok(())
            }
            TokenType::RightParen => self.close_paren(),
            _ => {
                self.output.push_str(&token.lexeme);
                Ok(())
            }
        }
    }

    fn push_operator(&mut self, op: Operator) -> CalcResult<()> {
        // Only an operator push leaves a trailing separator, so one here means
        // nothing was emitted since the previous operator.
        if self.output.ends_with(SEPARATOR) {
            if let Some(&top) = self.stack.last() {
                return Err(CalcError::AdjacentOperators {
                    previous: top.symbol(),
                    current: op.symbol(),
                });
            }
        }

        while let Some(&Pending::Operator(top)) = self.stack.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.stack.pop();
            self.emit(top);
        }

        trace!("push {op}");
        self.output.push(SEPARATOR);
        self.stack.push(Pending::Operator(op));
        Ok(())
    }

    fn close_paren(&mut self) -> CalcResult<()> {
        loop {
            match self.stack.pop() {
                Some(Pending::Operator(op)) => self.emit(op),
                Some(Pending::LeftParen) => return Ok(()),
                None => return Err(CalcError::MissingLeftParenthesis),
            }
        }
    }

    fn emit(&mut self, op: Operator) {
        trace!("emit {op}");
        self.output.push(SEPARATOR);
        self.output.push(op.symbol());
    }

    /// Drains the operator stack and returns the postfix expression
    pub fn finish(mut self) -> CalcResult<String> {
        while let Some(pending) = self.stack.pop() {
            match pending {
                Pending::Operator(op) => self.emit(op),
                Pending::LeftParen => return Err(CalcError::MissingRightParenthesis),
            }
        }
        Ok(self.output)
    }
}

/// Converts an infix expression to postfix notation.
///
/// Whitespace is ignored. Tokens in the result are separated by single
/// spaces, and literal boundaries are kept exactly as scanned.
///
/// # Errors
///
/// - [`CalcError::EmptyExpression`] for empty or whitespace-only input
/// - [`CalcError::AdjacentOperators`] when two operators have no operand between them
/// - [`CalcError::MissingLeftParenthesis`] / [`CalcError::MissingRightParenthesis`]
///   for unbalanced parentheses
pub fn to_postfix(infix: &str) -> CalcResult<String> {
    if infix.trim().is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let mut yard = ShuntingYard::new();
    for token in Lexer::new(infix) {
        yard.push_token(&token)?;
    }
    let postfix = yard.finish()?;

    debug!("to_postfix({infix:?}) = {postfix:?}");
    Ok(postfix)
}
