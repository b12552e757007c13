use thiserror::Error;

/// Errors that can occur while converting or evaluating an expression
///
/// Every variant is terminal for the call that produced it. The display text
/// is what the command-line front end shows after `Invalid expression: `.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalcError {
    /// The input was empty or whitespace only
    #[error("Expression is empty.")]
    EmptyExpression,

    /// Two operators appeared with no operand between them
    #[error("Operators {previous} and {current} are adjacent.")]
    AdjacentOperators {
        /// The entry on top of the operator stack
        previous: char,
        /// The operator being pushed
        current: char,
    },

    /// A `)` had no matching `(`
    #[error("Missing ( parenthesis.")]
    MissingLeftParenthesis,

    /// A `(` was never closed
    #[error("Missing ) parenthesis.")]
    MissingRightParenthesis,

    /// An operator was applied with fewer than two pending operands
    #[error("Too many operators.")]
    TooManyOperators,

    /// A postfix atom is neither an operator nor a decimal number
    #[error("{0} is not a valid number.")]
    InvalidNumber(String),

    /// An operator symbol outside `+ - * /`
    #[error("{0} is an unsupported operator.")]
    UnsupportedOperator(char),

    /// Division with a right operand of zero
    #[error("Attempted to divide by zero.")]
    DivideByZero,

    /// The result does not fit the decimal range
    #[error("Value was either too large or too small for a Decimal.")]
    NumericOverflow,
}

/// Result type for conversion and evaluation
pub type CalcResult<T> = Result<T, CalcError>;
