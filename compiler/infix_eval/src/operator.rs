//! The closed set of binary operators and their precedence table.

use std::fmt;

use infix_lexer::TokenType;
use rust_decimal::Decimal;

use crate::error::{CalcError, CalcResult};

/// A binary arithmetic operator.
///
/// Precedence is strictly ordered `-` < `+` < `/` < `*`. Operators of equal
/// or higher precedence are resolved first, so each tier associates left to
/// right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Sub,
    Add,
    Div,
    Mul,
}

impl Operator {
    /// Binding strength; larger binds tighter
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Sub => 1,
            Operator::Add => 2,
            Operator::Div => 3,
            Operator::Mul => 4,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Operator::Sub => '-',
            Operator::Add => '+',
            Operator::Div => '/',
            Operator::Mul => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Operator> {
        match symbol {
            '-' => Some(Operator::Sub),
            '+' => Some(Operator::Add),
            '/' => Some(Operator::Div),
            '*' => Some(Operator::Mul),
            _ => None,
        }
    }

    pub fn from_token(token_type: &TokenType) -> Option<Operator> {
        match token_type {
            TokenType::Minus => Some(Operator::Sub),
            TokenType::Plus => Some(Operator::Add),
            TokenType::Slash => Some(Operator::Div),
            TokenType::Star => Some(Operator::Mul),
            _ => None,
        }
    }

    /// Applies `lhs <op> rhs` with checked decimal arithmetic.
    pub fn apply(self, lhs: Decimal, rhs: Decimal) -> CalcResult<Decimal> {
        let result = match self {
            Operator::Sub => lhs.checked_sub(rhs),
            Operator::Add => lhs.checked_add(rhs),
            Operator::Div => {
                if rhs.is_zero() {
                    return Err(CalcError::DivideByZero);
                }
                lhs.checked_div(rhs)
            }
            Operator::Mul => lhs.checked_mul(rhs),
        };
        result.ok_or(CalcError::NumericOverflow)
    }
}

impl TryFrom<char> for Operator {
    type Error = CalcError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Operator::from_symbol(symbol).ok_or(CalcError::UnsupportedOperator(symbol))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const LOWEST_FIRST: [Operator; 4] = [Operator::Sub, Operator::Add, Operator::Div, Operator::Mul];

    #[test]
    fn precedence_is_strictly_increasing() {
        let precedences: Vec<u8> = LOWEST_FIRST.iter().map(|op| op.precedence()).collect();
        assert_eq!(precedences, vec![1, 2, 3, 4]);
    }

    #[test]
    fn symbols_round_trip() {
        for op in LOWEST_FIRST {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
            assert_eq!(Operator::try_from(op.symbol()), Ok(op));
        }
    }

    #[test]
    fn tokens_map_to_operators() {
        assert_eq!(Operator::from_token(&TokenType::Minus), Some(Operator::Sub));
        assert_eq!(Operator::from_token(&TokenType::Star), Some(Operator::Mul));
        assert_eq!(Operator::from_token(&TokenType::LeftParen), None);
        assert_eq!(Operator::from_token(&TokenType::Literal), None);
    }

    #[test]
    fn unknown_symbol_is_unsupported() {
        assert_eq!(
            Operator::try_from('^'),
            Err(CalcError::UnsupportedOperator('^'))
        );
    }

    #[test]
    fn apply_respects_operand_order() {
        assert_eq!(Operator::Sub.apply(dec!(10), dec!(4)), Ok(dec!(6)));
        assert_eq!(Operator::Div.apply(dec!(8), dec!(-2)), Ok(dec!(-4)));
        assert_eq!(Operator::Mul.apply(dec!(2), dec!(12.1)), Ok(dec!(24.2)));
        assert_eq!(Operator::Add.apply(dec!(2.0), dec!(2)), Ok(dec!(4.0)));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(
            Operator::Div.apply(dec!(2), Decimal::ZERO),
            Err(CalcError::DivideByZero)
        );
        assert_eq!(
            Operator::Div.apply(dec!(2), dec!(0.000)),
            Err(CalcError::DivideByZero)
        );
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            Operator::Add.apply(Decimal::MAX, Decimal::ONE),
            Err(CalcError::NumericOverflow)
        );
        assert_eq!(
            Operator::Sub.apply(Decimal::MIN, Decimal::ONE),
            Err(CalcError::NumericOverflow)
        );
        assert_eq!(
            Operator::Mul.apply(Decimal::MAX, dec!(2)),
            Err(CalcError::NumericOverflow)
        );
        assert_eq!(
            Operator::Div.apply(Decimal::MAX, dec!(0.5)),
            Err(CalcError::NumericOverflow)
        );
    }
}
