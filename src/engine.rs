use crate::errors::*;
use crate::value::{f64_equal, format_f64};

/// The calculator engine: performs one operation per call, records a
/// human-readable description of it, and keeps the last numeric result.
///
/// The history grows without bound within a session and is only emptied
/// by `clear_history`. The engine never prints or logs - presentation is
/// the caller's job.
pub struct Calculator {
    history: Vec<String>,
    last_result: f64,
}

impl Default for Calculator {
    fn default() -> Calculator {
        Calculator {
            history: Vec::new(),
            last_result: 0.0,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Default::default()
    }

    fn record(&mut self, entry: String, result: f64) -> f64 {
        self.history.push(entry);
        self.last_result = result;
        result
    }

    pub fn add(&mut self, a: f64, b: f64) -> f64 {
        let result = a + b;
        self.record(
            format!("{} + {} = {}", format_f64(a), format_f64(b), format_f64(result)),
            result,
        )
    }

    pub fn subtract(&mut self, a: f64, b: f64) -> f64 {
        let result = a - b;
        self.record(
            format!("{} - {} = {}", format_f64(a), format_f64(b), format_f64(result)),
            result,
        )
    }

    pub fn multiply(&mut self, a: f64, b: f64) -> f64 {
        let result = a * b;
        self.record(
            format!("{} × {} = {}", format_f64(a), format_f64(b), format_f64(result)),
            result,
        )
    }

    /// Divides `a` by `b`. Division by zero is an error, not an infinity.
    pub fn divide(&mut self, a: f64, b: f64) -> CalcResult {
        if b == 0.0 {
            return Err(CalcError::DividedByZero);
        }

        let result = a / b;
        Ok(self.record(
            format!("{} ÷ {} = {}", format_f64(a), format_f64(b), format_f64(result)),
            result,
        ))
    }

    /// Raises `base` to `exponent` with `f64::powf` semantics: domain
    /// violations (e.g. a negative base with a fractional exponent)
    /// produce NaN rather than an error.
    pub fn power(&mut self, base: f64, exponent: f64) -> f64 {
        let result = base.powf(exponent);
        self.record(
            format!("{} ^ {} = {}", format_f64(base), format_f64(exponent), format_f64(result)),
            result,
        )
    }

    pub fn square_root(&mut self, number: f64) -> CalcResult {
        if number < 0.0 {
            return Err(CalcError::NegativeSquareRoot(number));
        }

        let result = number.sqrt();
        Ok(self.record(format!("√{} = {}", format_f64(number), format_f64(result)), result))
    }

    /// Returns `percent` percent of `number`.
    pub fn percentage(&mut self, number: f64, percent: f64) -> f64 {
        let result = number * percent / 100.0;
        self.record(
            format!("{}% of {} = {}", format_f64(percent), format_f64(number), format_f64(result)),
            result,
        )
    }

    /// Factorial of a non-negative integral number. Values above `170!`
    /// overflow f64 and come back as infinity.
    pub fn factorial(&mut self, n: f64) -> CalcResult {
        if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
            return Err(CalcError::InvalidFactorial(n));
        }

        let mut result = 1.0f64;
        let mut i = 2.0f64;
        while i <= n {
            result *= i;
            // saturated - the remaining factors cannot change the result,
            // and for huge n the f64 counter could not even advance
            if result.is_infinite() {
                break;
            }
            i += 1.0;
        }
        Ok(self.record(format!("{}! = {}", format_f64(n), format_f64(result)), result))
    }

    /// Logarithm of `number` with the given base; `None` means the
    /// natural logarithm.
    pub fn logarithm(&mut self, number: f64, base: Option<f64>) -> CalcResult {
        if number <= 0.0 {
            return Err(CalcError::NonPositiveLogarithm(number));
        }

        match base {
            None => {
                let result = number.ln();
                Ok(self.record(format!("ln({}) = {}", format_f64(number), format_f64(result)), result))
            }
            Some(b) => {
                if b <= 0.0 || f64_equal(b, 1.0) {
                    return Err(CalcError::InvalidLogBase(b));
                }
                let result = number.ln() / b.ln();
                Ok(self.record(
                    format!("log_{}({}) = {}", format_f64(b), format_f64(number), format_f64(result)),
                    result,
                ))
            }
        }
    }

    pub fn sine(&mut self, angle: f64, degrees: bool) -> f64 {
        self.trig("sin", f64::sin, angle, degrees)
    }

    pub fn cosine(&mut self, angle: f64, degrees: bool) -> f64 {
        self.trig("cos", f64::cos, angle, degrees)
    }

    pub fn tangent(&mut self, angle: f64, degrees: bool) -> f64 {
        self.trig("tan", f64::tan, angle, degrees)
    }

    fn trig(&mut self, name: &str, f: fn(f64) -> f64, angle: f64, degrees: bool) -> f64 {
        let (rad, unit) = if degrees {
            (angle.to_radians(), "°")
        } else {
            (angle, " rad")
        };
        let result = f(rad);
        self.record(
            format!("{}({}{}) = {}", name, format_f64(angle), unit, format_f64(result)),
            result,
        )
    }

    /// Returns a copy of the history; mutating it does not affect the engine.
    pub fn history(&self) -> Vec<String> {
        self.history.clone()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn last_result(&self) -> f64 {
        self.last_result
    }
}
