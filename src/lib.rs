//! # Command-line calculator with history
//!
//! The crate has two parts:
//!
//! * [`Calculator`] - a stateful engine that performs one operation per
//!   call, appends a formatted description of it to an in-memory history,
//!   and remembers the last result
//! * [`Interpreter`] - a text command interpreter that turns a single line
//!   of free-form input into an engine call and a reply string
//!
//! Recognized input, tried in order (first match wins):
//! * session commands: `quit`/`exit`, `help`, `history`, `clear`, `last`
//! * `20% of 150` - percentage
//! * `5!` - factorial
//! * `sqrt(25)` - square root
//! * `log(100, 10)` and `ln(2.718)` - logarithms
//! * `sin(90)`, `cos(0)`, `tan(45)` - trigonometry, in degrees
//! * `2 ** 3` - power
//! * `a <op> b` for a single `+`, `-`, `*`, or `/`
//! * anything else falls back to a full arithmetic expression evaluator
//!   with standard precedence and parentheses, e.g. `(2 + 3) * 4`
//!
//! Input is case-insensitive and whitespace around the line and around
//! operands is ignored. Engine errors (division by zero, negative square
//! root, bad factorial or logarithm arguments) are rendered as single
//! `Error: ...` lines, never panics.

#[macro_use]
extern crate pest_derive;

pub mod engine;
pub mod errors;
pub mod expr;
pub mod interp;
pub mod stack;
pub mod value;

pub use engine::Calculator;
pub use errors::{CalcError, CalcResult};
pub use interp::Interpreter;
