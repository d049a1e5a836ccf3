#![cfg_attr(docsrs, feature(doc_cfg))]
//! # inputplus
//!
//! Interactive console prompts for text, integer and floating-point values.
//! Every prompt re-asks until the answer satisfies an ordered list of
//! [`Constraint`]s, and numeric prompts also accept small arithmetic
//! expressions, so a user can type either `42` or `6*7`.
//!
//! ## Features
//!
//! - **Composable constraints** - bounds (inclusive and exclusive), divisibility,
//!   length limits and integrality, checked in order with the first failure reported
//! - **Safe arithmetic input** - literals, `+ - * / ** ^`, unary minus and
//!   parentheses through a small recursive-descent parser; nothing else is evaluated
//! - **Scriptable terminal** - the prompt loop runs on any [`utils::LineReader`],
//!   so it can be driven from a buffer as easily as from stdin
//!
//! ## Feature Flags
//!
//! - `line-editor` - the free functions read through `rustyline`, giving
//!   cursor movement and in-session history
//! - `serde` - `Serialize`/`Deserialize` for [`Constraint`]
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! inputplus = "0.1"
//! ```
//!
//! With line editing:
//!
//! ```toml
//! [dependencies]
//! inputplus = { version = "0.1", features = ["line-editor"] }
//! ```
//!
//! ## Usage Examples
//!
//! ### Text with length limits
//!
//! ```rust,no_run
//! use inputplus::{Constraint, input_string};
//!
//! let name = input_string(
//!     "What's your name?",
//!     &[Constraint::MinLength(2), Constraint::MaxLength(35)],
//! )?;
//! # Ok::<(), inputplus::PromptError>(())
//! ```
//!
//! ### Integers and expressions
//!
//! ```rust,no_run
//! use inputplus::{Constraint, input_int};
//!
//! // "3.5" is rejected with "Input must be an integer", "2**4" is accepted as 16
//! let count = input_int("How many?", &[Constraint::at_least(0)])?;
//! # Ok::<(), inputplus::PromptError>(())
//! ```
//!
//! ## Error Handling
//!
//! Bad input never reaches the caller: it is reported and the user is asked
//! again. Only a closed or failing input stream, an interrupt, or a
//! constraint that cannot apply to the prompt end the loop:
//!
//! ```rust,no_run
//! use inputplus::{PromptError, input_float};
//!
//! match input_float("Temperature?", &[]) {
//!     Ok(t) => println!("{t}"),
//!     Err(PromptError::Closed) => eprintln!("no more input"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Diagnostics
//!
//! Rejected attempts are emitted as `tracing` debug events, including the
//! precise reason an expression failed to parse. The library never installs
//! a subscriber.

pub mod constraint;
pub use constraint::{Constraint, ConstraintError, Value, ValueKind, Violation, first_violation};

pub mod expr;

pub mod utils;
pub use utils::{PromptError, Terminal, input_float, input_int, input_string};
