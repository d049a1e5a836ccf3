//! # Restricted Arithmetic
//!
//! Turns the text typed at a numeric prompt into a [`Number`]. Users can type
//! either a plain literal (`42`, `-3.5`, `1e3`) or a small arithmetic
//! expression (`6*7`, `(1+2)**2`, `7/2`).
//!
//! The evaluator is deliberately tiny: the text is tokenized, parsed by a
//! recursive-descent parser into an explicit tree, and that tree is
//! evaluated. Only number literals, parentheses, unary `-` and the binary
//! operators `+ - * / ** ^` exist. Names, calls, strings, comparisons and
//! every other operator are rejected with an [`ExprError`].
//!
//! ## Grammar
//!
//! ```text
//! expr    := xor
//! xor     := sum ( "^" sum )*
//! sum     := product ( ("+" | "-") product )*
//! product := unary ( ("*" | "/") unary )*
//! unary   := "-" unary | power
//! power   := primary ( "**" unary )?
//! primary := NUMBER | "(" expr ")"
//! ```
//!
//! `^` is bitwise xor and only accepts integers, `/` always yields a float,
//! and `**` binds tighter than unary minus on its left (`-2**2 == -4`).
//!
//! ## Example
//!
//! ```rust
//! use inputplus::expr::{Number, convert};
//!
//! assert_eq!(convert("42").unwrap(), Number::Int(42));
//! assert_eq!(convert("6*7").unwrap(), Number::Int(42));
//! assert_eq!(convert("7/2").unwrap(), Number::Float(3.5));
//! assert!(convert("import os").is_err());
//! ```

mod ast;
mod lexer;
mod parser;

use std::fmt::Display;
use thiserror::Error;

pub use ast::BinaryOp;

/// Deepest nesting of parentheses and unary operators the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Longest expression, in tokens, the parser accepts.
pub const MAX_TOKENS: usize = 1024;

/// A numeric value produced by conversion.
///
/// Integer literals stay integers through `+ - * ** ^` and unary `-`; any
/// integer overflow falls back to a float. `/` always produces a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Converts to `i64` if the value is integral and in range.
    pub fn to_i64(self) -> Option<i64> {
        // 2^63, exactly representable
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;

        match self {
            Number::Int(i) => Some(i),
            Number::Float(f) if f.is_finite() && f.fract() == 0.0 && f >= -LIMIT && f < LIMIT => {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Why a piece of text could not be turned into a [`Number`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character `{ch}` at {at}")]
    UnexpectedChar { ch: char, at: usize },
    #[error("names are not allowed: `{0}`")]
    Name(String),
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    #[error("unexpected `{found}` at {at}")]
    UnexpectedToken { found: String, at: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expression nests deeper than {} levels", MAX_DEPTH)]
    TooDeep,
    #[error("expression is longer than {} tokens", MAX_TOKENS)]
    TooLong,
    #[error("division by zero")]
    DivisionByZero,
    #[error("`{0}` needs integer operands")]
    IntegerOperands(BinaryOp),
    #[error("result is not a real number")]
    NotReal,
    #[error("result is not finite")]
    NonFinite,
}

/// Converts raw text into a [`Number`].
///
/// A plain decimal literal is tried first; anything else goes through the
/// restricted expression evaluator.
pub fn convert(text: &str) -> Result<Number, ExprError> {
    let text = text.trim();

    match parse_literal(text) {
        Some(n) => Ok(n),
        None => evaluate(text),
    }
}

/// Parses and evaluates `text` with the restricted grammar.
pub fn evaluate(text: &str) -> Result<Number, ExprError> {
    let tokens = lexer::tokenize(text)?;
    let tree = parser::parse(tokens)?;
    tree.evaluate()
}

fn parse_literal(text: &str) -> Option<Number> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::Int(i));
    }

    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(Number::Float(f)),
        _ => None,
    }
}
