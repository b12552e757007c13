//! Stack machine for postfix expressions.

use std::str::FromStr;

use log::{debug, trace};
use rust_decimal::Decimal;

use crate::error::{CalcError, CalcResult};
use crate::operator::Operator;

/// Evaluates a whitespace-separated postfix expression.
///
/// A one-character atom that is an operator symbol pops two values (the
/// first pop is the right operand) and pushes the result. Every other atom
/// must parse as a decimal number.
///
/// The value on top of the stack is returned once all atoms are consumed.
/// Operands left below it are not reported as an error.
pub fn evaluate_postfix(postfix: &str) -> CalcResult<Decimal> {
    if postfix.trim().is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let mut stack: Vec<Decimal> = Vec::new();
    for atom in postfix.split_whitespace() {
        match operator_symbol(atom) {
            Some(symbol) => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(CalcError::TooManyOperators);
                };
                let value = Operator::try_from(symbol)?.apply(lhs, rhs)?;
                trace!("{lhs} {symbol} {rhs} = {value}");
                stack.push(value);
            }
            None => stack.push(parse_operand(atom)?),
        }
    }

    if stack.len() > 1 {
        debug!(
            "{} operand(s) left unreduced in {postfix:?}, returning the top",
            stack.len() - 1
        );
    }
    stack.pop().ok_or(CalcError::EmptyExpression)
}

fn operator_symbol(atom: &str) -> Option<char> {
    let mut chars = atom.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if Operator::from_symbol(c).is_some() => Some(c),
        _ => None,
    }
}

fn parse_operand(atom: &str) -> CalcResult<Decimal> {
    // rust_decimal also takes exponents and `_` separators, which are not numbers here
    if !is_decimal_syntax(atom) {
        return Err(CalcError::InvalidNumber(atom.to_string()));
    }
    // Well-formed digits only fail to parse when they do not fit
    Decimal::from_str(atom).map_err(|_| CalcError::NumericOverflow)
}

/// Optional sign, digits, at most one decimal point, at least one digit.
fn is_decimal_syntax(atom: &str) -> bool {
    let digits = atom.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(atom);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}
