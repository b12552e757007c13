//! Infix arithmetic evaluation.
//!
//! Evaluation runs in two stages: [`to_postfix`] turns an infix expression
//! into postfix (reverse Polish) notation with the shunting-yard algorithm,
//! and [`evaluate_postfix`] reduces the postfix form on a value stack using
//! exact decimal arithmetic. [`evaluate`] composes the two.
//!
//! ```
//! use infix_eval::{evaluate, to_postfix};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(to_postfix("5 * (2 + 2)").unwrap(), "5 2 2 + *");
//! assert_eq!(evaluate("5 * (2 + 2)").unwrap(), Decimal::from(20));
//! ```

pub mod error;
pub mod evaluator;
pub mod operator;
pub mod postfix;

pub use error::{CalcError, CalcResult};
pub use evaluator::evaluate_postfix;
pub use operator::Operator;
pub use postfix::{to_postfix, ShuntingYard};
pub use rust_decimal::Decimal;

/// Evaluates an infix expression.
///
/// Equivalent to `evaluate_postfix(&to_postfix(infix)?)`; errors from either
/// stage are returned unchanged.
pub fn evaluate(infix: &str) -> CalcResult<Decimal> {
    let postfix = to_postfix(infix)?;
    evaluate_postfix(&postfix)
}
