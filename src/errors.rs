use std::error;
use std::fmt;

use crate::value::format_f64;

/// All the ways a calculation can fail. The first group are domain errors
/// raised by engine operations, the second group comes from the fallback
/// expression evaluator.
#[derive(Clone, PartialEq)]
pub enum CalcError {
    DividedByZero,
    NegativeSquareRoot(f64),
    InvalidFactorial(f64),
    NonPositiveLogarithm(f64),
    InvalidLogBase(f64),

    ParseFailed(String),
    EmptyExpression,
    EmptyValue,
    InvalidOp(String),
    TooManyOps,
    InsufficientOps,
    ClosingBracketMismatch,

    Unreachable,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::DividedByZero => write!(f, "Cannot divide by zero"),
            CalcError::NegativeSquareRoot(v) => {
                write!(f, "Cannot calculate square root of negative number {}", format_f64(*v))
            }
            CalcError::InvalidFactorial(v) => {
                write!(f, "Factorial is only defined for non-negative integers, got {}", format_f64(*v))
            }
            CalcError::NonPositiveLogarithm(v) => {
                write!(f, "Logarithm is only defined for positive numbers, got {}", format_f64(*v))
            }
            CalcError::InvalidLogBase(v) => {
                write!(f, "Logarithm base must be positive and not equal to 1, got {}", format_f64(*v))
            }

            CalcError::ParseFailed(s) => write!(f, "Failed to parse expression: {}", s),
            CalcError::EmptyExpression => write!(f, "Nothing to calculate"),
            CalcError::EmptyValue => write!(f, "Nor value neither operator found"),
            CalcError::InvalidOp(s) => write!(f, "Invalid operator '{}'", s),
            CalcError::TooManyOps => write!(f, "Too many operators"),
            CalcError::InsufficientOps => write!(f, "Too many numbers"),
            CalcError::ClosingBracketMismatch => write!(f, "Mismatched closing bracket"),

            CalcError::Unreachable => write!(f, "unreachable"),
        }
    }
}

impl fmt::Debug for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl error::Error for CalcError {}

/// Calculation result: either a number or an error
pub type CalcResult = Result<f64, CalcError>;
pub(crate) type CalcErrorResult = Result<(), CalcError>;
