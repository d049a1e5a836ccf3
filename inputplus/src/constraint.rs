//! # Constraints
//!
//! This module provides the closed set of validation rules that the prompt
//! loop applies to user input. A [`Constraint`] wraps one parameter and knows
//! two things: whether a value passes, and the message to print when it
//! doesn't. Constraints run in order and short-circuit on the first failure,
//! so the order only decides *which* message the user sees.
//!
//! ## Features
//! - Exclusive bounds with [`Constraint::GreaterThan`] / [`Constraint::LessThan`]
//! - Inclusive bounds with [`Constraint::AtLeast`] / [`Constraint::AtMost`]
//! - Divisibility with [`Constraint::DivisibleBy`] / [`Constraint::NotDivisibleBy`]
//! - Length bounds on text with [`Constraint::MinLength`] / [`Constraint::MaxLength`]
//! - Integrality with [`Constraint::IsInteger`]
//!
//! ## Examples
//!
//! ### Check a value directly
//! ```rust
//! use inputplus::Constraint;
//!
//! let positive = Constraint::greater_than(0);
//! assert!(positive.satisfies(5.0));
//! assert!(!positive.satisfies(-1.0));
//! assert_eq!(positive.error_message(), "Input must be greater than 0");
//! ```
//!
//! ### Use them with a prompt
//! ```rust,no_run
//! use inputplus::{Constraint, input_string};
//!
//! let name = input_string(
//!     "What's your name?",
//!     &[Constraint::MinLength(2), Constraint::MaxLength(35)],
//! )?;
//! # Ok::<(), inputplus::PromptError>(())
//! ```
use std::fmt::Display;
use thiserror::Error;

/// A single validation rule over one value.
///
/// Numeric rules compare against an `f64`; length rules count the
/// characters (Unicode scalar values) of a string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// `value > min`
    GreaterThan(f64),
    /// `value < max`
    LessThan(f64),
    /// `value >= min`
    AtLeast(f64),
    /// `value <= max`
    AtMost(f64),
    DivisibleBy(f64),
    NotDivisibleBy(f64),
    MinLength(usize),
    MaxLength(usize),
    IsInteger,
}

/// The kind of value a [`Constraint`] can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Text,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A value handed to [`Constraint::satisfies`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Number(f64),
    Text(&'a str),
}

impl Value<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value<'_> {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Text(value)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::Text(value.as_str())
    }
}

/// Returned when a value fails a [`Constraint`].
///
/// Its `Display` output is exactly the constraint's error message, which is
/// what the prompt loop prints.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .0.error_message())]
pub struct Violation(Constraint);

impl Violation {
    /// The rule that was broken.
    pub fn constraint(&self) -> &Constraint {
        &self.0
    }
}

/// A constraint that can never be checked meaningfully for a given prompt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("constraint {constraint:?} cannot be applied to {found} input")]
    WrongKind {
        constraint: Constraint,
        found: ValueKind,
    },
    #[error("constraint {constraint:?} uses a zero divisor")]
    ZeroDivisor { constraint: Constraint },
    #[error("constraint {constraint:?} has a non-finite parameter")]
    NonFinite { constraint: Constraint },
}

impl Constraint {
    pub fn greater_than(min: impl Into<f64>) -> Self {
        Constraint::GreaterThan(min.into())
    }

    pub fn less_than(max: impl Into<f64>) -> Self {
        Constraint::LessThan(max.into())
    }

    pub fn at_least(min: impl Into<f64>) -> Self {
        Constraint::AtLeast(min.into())
    }

    pub fn at_most(max: impl Into<f64>) -> Self {
        Constraint::AtMost(max.into())
    }

    pub fn divisible_by(quotient: impl Into<f64>) -> Self {
        Constraint::DivisibleBy(quotient.into())
    }

    pub fn not_divisible_by(quotient: impl Into<f64>) -> Self {
        Constraint::NotDivisibleBy(quotient.into())
    }

    /// The kind of value this rule is defined over.
    pub fn kind(&self) -> ValueKind {
        match self {
            Constraint::MinLength(_) | Constraint::MaxLength(_) => ValueKind::Text,
            _ => ValueKind::Number,
        }
    }

    /// Returns `true` if `value` passes this rule.
    ///
    /// Pure and total: a value of the wrong [`ValueKind`] never passes, and
    /// nothing here panics.
    pub fn satisfies<'a>(&self, value: impl Into<Value<'a>>) -> bool {
        match (self, value.into()) {
            (Constraint::GreaterThan(min), Value::Number(v)) => v > *min,
            (Constraint::LessThan(max), Value::Number(v)) => v < *max,
            (Constraint::AtLeast(min), Value::Number(v)) => v >= *min,
            (Constraint::AtMost(max), Value::Number(v)) => v <= *max,
            (Constraint::DivisibleBy(q), Value::Number(v)) => v % *q == 0.0,
            (Constraint::NotDivisibleBy(q), Value::Number(v)) => v % *q != 0.0,
            (Constraint::IsInteger, Value::Number(v)) => v % 1.0 == 0.0,
            (Constraint::MinLength(n), Value::Text(s)) => s.chars().count() >= *n,
            (Constraint::MaxLength(n), Value::Text(s)) => s.chars().count() <= *n,
            _ => false,
        }
    }

    /// The message printed when this rule rejects a value.
    pub fn error_message(&self) -> String {
        match self {
            Constraint::GreaterThan(min) => format!("Input must be greater than {}", min),
            Constraint::LessThan(max) => format!("Input must be less than {}", max),
            Constraint::AtLeast(min) => format!("Input must be at least {}", min),
            Constraint::AtMost(max) => format!("Input must be at most {}", max),
            Constraint::DivisibleBy(q) => format!("Input must be divisible by {}", q),
            Constraint::NotDivisibleBy(q) => format!("Input must not be divisible by {}", q),
            Constraint::MinLength(n) => format!("Input must have at least {} characters", n),
            Constraint::MaxLength(n) => format!("Input must have at most {} characters", n),
            Constraint::IsInteger => "Input must be an integer".to_string(),
        }
    }

    /// Like [`Constraint::satisfies`], but returns the [`Violation`] on failure.
    pub fn validate<'a>(&self, value: impl Into<Value<'a>>) -> Result<(), Violation> {
        if self.satisfies(value) {
            Ok(())
        } else {
            Err(Violation(self.clone()))
        }
    }

    /// Checks the rule itself: divisors must be non-zero and numeric
    /// parameters finite.
    pub fn check(&self) -> Result<(), ConstraintError> {
        let parameter = match self {
            Constraint::GreaterThan(p)
            | Constraint::LessThan(p)
            | Constraint::AtLeast(p)
            | Constraint::AtMost(p)
            | Constraint::DivisibleBy(p)
            | Constraint::NotDivisibleBy(p) => *p,
            Constraint::MinLength(_) | Constraint::MaxLength(_) | Constraint::IsInteger => {
                return Ok(());
            }
        };

        if !parameter.is_finite() {
            return Err(ConstraintError::NonFinite {
                constraint: self.clone(),
            });
        }

        match self {
            Constraint::DivisibleBy(q) | Constraint::NotDivisibleBy(q) if *q == 0.0 => {
                Err(ConstraintError::ZeroDivisor {
                    constraint: self.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Runs `constraints` in order against `value` and returns the first
/// [`Violation`], if any.
pub fn first_violation<'a>(
    value: impl Into<Value<'a>>,
    constraints: &[Constraint],
) -> Option<Violation> {
    let value = value.into();

    for constraint in constraints {
        match constraint.validate(value) {
            Ok(_) => continue,
            Err(e) => return Some(e),
        }
    }
    None
}

/// Verifies that every constraint is well formed and applies to `kind`.
pub(crate) fn check_all(constraints: &[Constraint], kind: ValueKind) -> Result<(), ConstraintError> {
    for constraint in constraints {
        constraint.check()?;
        if constraint.kind() != kind {
            return Err(ConstraintError::WrongKind {
                constraint: constraint.clone(),
                found: kind,
            });
        }
    }
    Ok(())
}
