//! Expression tree and evaluation.

use super::{ExprError, Number};
use std::fmt::Display;

/// The binary operators the evaluator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Xor,
}

/// Symbol table used by the lexer. Longer symbols come first so `**` wins
/// over `*`.
pub(crate) static OPERATORS: &[(&str, BinaryOp)] = &[
    ("**", BinaryOp::Pow),
    ("+", BinaryOp::Add),
    ("-", BinaryOp::Sub),
    ("*", BinaryOp::Mul),
    ("/", BinaryOp::Div),
    ("^", BinaryOp::Xor),
];

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        OPERATORS
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(symbol, _)| *symbol)
            .unwrap_or("?")
    }

    pub(crate) fn apply(self, lhs: Number, rhs: Number) -> Result<Number, ExprError> {
        use Number::{Float, Int};

        let result = match (self, lhs, rhs) {
            (BinaryOp::Add, Int(a), Int(b)) => a
                .checked_add(b)
                .map_or(Float(a as f64 + b as f64), Int),
            (BinaryOp::Sub, Int(a), Int(b)) => a
                .checked_sub(b)
                .map_or(Float(a as f64 - b as f64), Int),
            (BinaryOp::Mul, Int(a), Int(b)) => a
                .checked_mul(b)
                .map_or(Float(a as f64 * b as f64), Int),
            (BinaryOp::Add, a, b) => Float(a.as_f64() + b.as_f64()),
            (BinaryOp::Sub, a, b) => Float(a.as_f64() - b.as_f64()),
            (BinaryOp::Mul, a, b) => Float(a.as_f64() * b.as_f64()),
            (BinaryOp::Div, a, b) => {
                if b.as_f64() == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                Float(a.as_f64() / b.as_f64())
            }
            (BinaryOp::Pow, Int(a), Int(b)) if b >= 0 => u32::try_from(b)
                .ok()
                .and_then(|e| a.checked_pow(e))
                .map_or_else(|| Float((a as f64).powf(b as f64)), Int),
            (BinaryOp::Pow, a, b) => power(a.as_f64(), b.as_f64())?,
            (BinaryOp::Xor, Int(a), Int(b)) => Int(a ^ b),
            (BinaryOp::Xor, _, _) => return Err(ExprError::IntegerOperands(self)),
        };

        finite(result)
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

fn power(base: f64, exponent: f64) -> Result<Number, ExprError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ExprError::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(ExprError::NotReal);
    }
    Ok(Number::Float(base.powf(exponent)))
}

fn finite(n: Number) -> Result<Number, ExprError> {
    match n {
        Number::Float(f) if !f.is_finite() => Err(ExprError::NonFinite),
        n => Ok(n),
    }
}

/// A parsed expression. Leaves are always literals.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Number),
    Negate(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub(crate) fn evaluate(&self) -> Result<Number, ExprError> {
        match self {
            Expr::Literal(n) => Ok(*n),
            Expr::Negate(inner) => match inner.evaluate()? {
                Number::Int(i) => Ok(i.checked_neg().map_or(Number::Float(-(i as f64)), Number::Int)),
                Number::Float(f) => Ok(Number::Float(-f)),
            },
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.evaluate()?, rhs.evaluate()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i64) -> Box<Expr> {
        Box::new(Expr::Literal(Number::Int(i)))
    }

    #[test]
    fn test_symbols_round_trip_through_table() {
        for (symbol, op) in OPERATORS {
            assert_eq!(op.symbol(), *symbol);
        }
    }

    #[test]
    fn test_evaluate_tree() {
        // (2 + 3) * -4
        let tree = Expr::Binary(
            BinaryOp::Mul,
            Box::new(Expr::Binary(BinaryOp::Add, lit(2), lit(3))),
            Box::new(Expr::Negate(lit(4))),
        );
        assert_eq!(tree.evaluate(), Ok(Number::Int(-20)));
    }

    #[test]
    fn test_negating_min_int_promotes() {
        let tree = Expr::Negate(Box::new(Expr::Literal(Number::Int(i64::MIN))));
        assert_eq!(tree.evaluate(), Ok(Number::Float(9_223_372_036_854_775_808.0)));
    }

    #[test]
    fn test_mixed_operands_become_float() {
        assert_eq!(
            BinaryOp::Add.apply(Number::Int(1), Number::Float(0.5)),
            Ok(Number::Float(1.5))
        );
        assert_eq!(
            BinaryOp::Pow.apply(Number::Float(2.0), Number::Int(3)),
            Ok(Number::Float(8.0))
        );
    }

    #[test]
    fn test_float_overflow_is_not_finite() {
        assert_eq!(
            BinaryOp::Mul.apply(Number::Float(1e308), Number::Int(10)),
            Err(ExprError::NonFinite)
        );
    }

    #[test]
    fn test_xor_display() {
        assert_eq!(
            ExprError::IntegerOperands(BinaryOp::Xor).to_string(),
            "`^` needs integer operands"
        );
    }
}
