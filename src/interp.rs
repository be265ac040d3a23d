use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::engine::Calculator;
use crate::errors::*;
use crate::expr;
use crate::value::format_f64;

const NUM: &str = r"\d+(?:\.\d+)?";

lazy_static! {
    // The patterns are anchored at the start only: trailing text after a
    // recognized command prefix is ignored, as in the original tool.
    static ref PERCENT_RE: Regex = Regex::new(&format!(r"^({})%\s+of\s+({})", NUM, NUM)).unwrap();
    static ref FACTORIAL_RE: Regex = Regex::new(r"^(\d+)!").unwrap();
    static ref SQRT_RE: Regex = Regex::new(&format!(r"^sqrt\(({})\)", NUM)).unwrap();
    static ref LOG_RE: Regex = Regex::new(&format!(r"^log\(({}),\s*({})\)", NUM, NUM)).unwrap();
    static ref LN_RE: Regex = Regex::new(&format!(r"^ln\(({})\)", NUM)).unwrap();
    static ref TRIG_RE: Regex = Regex::new(&format!(r"^(sin|cos|tan)\(({})\)", NUM)).unwrap();
    static ref POWER_RE: Regex = Regex::new(&format!(r"^({})\s*\*\*\s*({})", NUM, NUM)).unwrap();
}

const HELP_TEXT: &str = "\
CALCULATOR HELP
------------------------------
Basic Operations:
  2 + 3        -> Addition
  10 - 4       -> Subtraction
  5 * 6        -> Multiplication
  15 / 3       -> Division
  2 ** 3       -> Power (2^3)

Advanced Operations:
  sqrt(25)     -> Square root
  20% of 150   -> Percentage
  5!           -> Factorial
  log(100, 10) -> Logarithm base 10
  ln(2.718)    -> Natural logarithm

Trigonometric (degrees):
  sin(90)      -> Sine
  cos(0)       -> Cosine
  tan(45)      -> Tangent

Special Commands:
  history      -> Show calculation history
  clear        -> Clear history
  last         -> Show last result
  quit/exit    -> Exit calculator
------------------------------";

/// Outcome of a single matcher: either a reply for the user or a signal
/// to try the next pattern.
enum Dispatch {
    Reply(String),
    NoMatch,
}

type Matcher = fn(&mut Interpreter, &str) -> Result<Dispatch, CalcError>;

// Tried in order, first match wins. The order is significant and mirrors
// the original dispatcher, including its quirks.
const MATCHERS: &[Matcher] = &[
    Interpreter::match_command,
    Interpreter::match_percentage,
    Interpreter::match_factorial,
    Interpreter::match_sqrt,
    Interpreter::match_log,
    Interpreter::match_ln,
    Interpreter::match_trig,
    Interpreter::match_power,
    Interpreter::match_binary_op,
    Interpreter::match_fallback,
];

/// Translates one line of free-form text into a call against the
/// calculator engine and formats the reply. Owns the engine and the
/// session `running` flag; `interpret` never panics and never propagates
/// an error to the caller.
pub struct Interpreter {
    calc: Calculator,
    running: bool,
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter {
            calc: Calculator::new(),
            running: true,
        }
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Default::default()
    }

    /// True until a quit/exit command is interpreted.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    /// Interprets a single input line and returns the reply text. An empty
    /// reply means there is nothing to print.
    pub fn interpret(&mut self, line: &str) -> String {
        let line = line.trim().to_lowercase();
        if line.is_empty() {
            return String::new();
        }

        for matcher in MATCHERS {
            match matcher(self, &line) {
                Ok(Dispatch::Reply(reply)) => {
                    debug!(input = %line, "dispatched");
                    return reply;
                }
                Ok(Dispatch::NoMatch) => {}
                Err(e) => {
                    debug!(input = %line, error = %e, "dispatch failed");
                    return format!("Error: {}", e);
                }
            }
        }

        "Invalid expression. Type 'help' for usage examples.".to_string()
    }

    fn match_command(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        let reply = match line {
            "quit" | "exit" => {
                self.running = false;
                "Goodbye!".to_string()
            }
            "help" => HELP_TEXT.to_string(),
            "history" => {
                let history = self.calc.history();
                if history.is_empty() {
                    "No calculations in history".to_string()
                } else {
                    let start = history.len().saturating_sub(10);
                    let mut out = String::from("History:");
                    for (i, entry) in history[start..].iter().enumerate() {
                        out.push_str(&format!("\n  {}. {}", i + 1, entry));
                    }
                    out
                }
            }
            "clear" => {
                self.calc.clear_history();
                "History cleared".to_string()
            }
            "last" => format!("Last result: {}", format_f64(self.calc.last_result())),
            _ => return Ok(Dispatch::NoMatch),
        };
        Ok(Dispatch::Reply(reply))
    }

    fn match_percentage(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        let caps = match PERCENT_RE.captures(line) {
            Some(c) => c,
            None => return Ok(Dispatch::NoMatch),
        };
        let percent: f64 = caps[1].parse().unwrap_or(0.0);
        let number: f64 = caps[2].parse().unwrap_or(0.0);
        let result = self.calc.percentage(number, percent);
        Ok(Dispatch::Reply(format!(
            "{}% of {} = {}",
            format_f64(percent),
            format_f64(number),
            format_f64(result)
        )))
    }

    fn match_factorial(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        let caps = match FACTORIAL_RE.captures(line) {
            Some(c) => c,
            None => return Ok(Dispatch::NoMatch),
        };
        let n: f64 = caps[1].parse().unwrap_or(0.0);
        let result = self.calc.factorial(n)?;
        Ok(Dispatch::Reply(format!("{}! = {}", format_f64(n), format_f64(result))))
    }

    fn match_sqrt(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        let caps = match SQRT_RE.captures(line) {
            Some(c) => c,
            None => return Ok(Dispatch::NoMatch),
        };
        let number: f64 = caps[1].parse().unwrap_or(0.0);
        let result = self.calc.square_root(number)?;
        Ok(Dispatch::Reply(format!("√{} = {}", format_f64(number), format_f64(result))))
    }

    fn match_log(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        let caps = match LOG_RE.captures(line) {
            Some(c) => c,
            None => return Ok(Dispatch::NoMatch),
        };
        let number: f64 = caps[1].parse().unwrap_or(0.0);
        let base: f64 = caps[2].parse().unwrap_or(0.0);
        let result = self.calc.logarithm(number, Some(base))?;
        Ok(Dispatch::Reply(format!(
            "log_{}({}) = {}",
            format_f64(base),
            format_f64(number),
            format_f64(result)
        )))
    }

    fn match_ln(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        let caps = match LN_RE.captures(line) {
            Some(c) => c,
            None => return Ok(Dispatch::NoMatch),
        };
        let number: f64 = caps[1].parse().unwrap_or(0.0);
        let result = self.calc.logarithm(number, None)?;
        Ok(Dispatch::Reply(format!("ln({}) = {}", format_f64(number), format_f64(result))))
    }

    fn match_trig(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        let caps = match TRIG_RE.captures(line) {
            Some(c) => c,
            None => return Ok(Dispatch::NoMatch),
        };
        let angle: f64 = caps[2].parse().unwrap_or(0.0);
        // CLI trig input is always degrees
        let result = match &caps[1] {
            "sin" => self.calc.sine(angle, true),
            "cos" => self.calc.cosine(angle, true),
            _ => self.calc.tangent(angle, true),
        };
        Ok(Dispatch::Reply(format!(
            "{}({}°) = {}",
            &caps[1],
            format_f64(angle),
            format_f64(result)
        )))
    }

    fn match_power(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        if !line.contains("**") {
            return Ok(Dispatch::NoMatch);
        }
        let caps = match POWER_RE.captures(line) {
            Some(c) => c,
            None => return Ok(Dispatch::NoMatch),
        };
        let base: f64 = caps[1].parse().unwrap_or(0.0);
        let exponent: f64 = caps[2].parse().unwrap_or(0.0);
        let result = self.calc.power(base, exponent);
        Ok(Dispatch::Reply(format!(
            "{}^{} = {}",
            format_f64(base),
            format_f64(exponent),
            format_f64(result)
        )))
    }

    // The first operator whose symbol splits the line into exactly two
    // parseable numbers wins. Known limitation kept from the original:
    // signed operands and chains of operators do not match here and fall
    // through to the expression evaluator.
    fn match_binary_op(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        for op in ['+', '-', '*', '/'] {
            if !line.contains(op) {
                continue;
            }
            let parts: Vec<&str> = line.split(op).collect();
            if parts.len() != 2 {
                continue;
            }
            let a: f64 = match parts[0].trim().parse() {
                Ok(v) => v,
                Err(..) => continue,
            };
            let b: f64 = match parts[1].trim().parse() {
                Ok(v) => v,
                Err(..) => continue,
            };
            let result = match op {
                '+' => self.calc.add(a, b),
                '-' => self.calc.subtract(a, b),
                '*' => self.calc.multiply(a, b),
                _ => self.calc.divide(a, b)?,
            };
            return Ok(Dispatch::Reply(format!(
                "{} {} {} = {}",
                format_f64(a),
                op,
                format_f64(b),
                format_f64(result)
            )));
        }
        Ok(Dispatch::NoMatch)
    }

    // Catch-all: evaluate the whole line as an arithmetic expression.
    // Results are reported but not recorded in the engine history, the
    // same as the original's sandboxed fallback.
    fn match_fallback(&mut self, line: &str) -> Result<Dispatch, CalcError> {
        match expr::eval(line) {
            Ok(v) => Ok(Dispatch::Reply(format!("{} = {}", line, format_f64(v)))),
            Err(CalcError::DividedByZero) => Err(CalcError::DividedByZero),
            Err(..) => Ok(Dispatch::NoMatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("2 + 3"), "2 + 3 = 5");
        assert_eq!(interp.interpret("10 - 4"), "10 - 4 = 6");
        assert_eq!(interp.interpret("5 * 6"), "5 * 6 = 30");
        assert_eq!(interp.interpret("15 / 3"), "15 / 3 = 5");
    }

    #[test]
    fn test_power() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("2 ** 3"), "2^3 = 8");
    }

    #[test]
    fn test_sqrt() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("sqrt(25)"), "√25 = 5");
    }

    #[test]
    fn test_percentage() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("20% of 150"), "20% of 150 = 30");
    }

    #[test]
    fn test_factorial() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("5!"), "5! = 120");
    }

    #[test]
    fn test_logarithms() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("log(100, 10)"), "log_10(100) = 2");
        let reply = interp.interpret("ln(2.718)");
        assert!(reply.starts_with("ln(2.718) = 0.999"));
    }

    #[test]
    fn test_trig() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("sin(90)"), "sin(90°) = 1");
        assert_eq!(interp.interpret("cos(0)"), "cos(0°) = 1");
        let reply = interp.interpret("tan(45)");
        assert!(reply.starts_with("tan(45°) = "));
    }

    #[test]
    fn test_quit_and_exit() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("quit"), "Goodbye!");
        assert!(!interp.is_running());

        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("EXIT"), "Goodbye!");
        assert!(!interp.is_running());
    }

    #[test]
    fn test_history_window() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("history"), "No calculations in history");

        for i in 1..=12 {
            interp.interpret(&format!("{} + 0", i));
        }
        let reply = interp.interpret("history");
        // only the last 10 entries, renumbered from 1
        assert!(reply.starts_with("History:\n  1. 3 + 0 = 3"));
        assert!(reply.ends_with("10. 12 + 0 = 12"));
        assert_eq!(reply.lines().count(), 11);
    }

    #[test]
    fn test_clear_and_last() {
        let mut interp = Interpreter::new();
        interp.interpret("2 + 3");
        assert_eq!(interp.interpret("last"), "Last result: 5");
        assert_eq!(interp.interpret("clear"), "History cleared");
        assert!(interp.calculator().history().is_empty());
        // last result survives a history clear
        assert_eq!(interp.interpret("last"), "Last result: 5");
    }

    #[test]
    fn test_error_lines() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("5 / 0"), "Error: Cannot divide by zero");
        assert_eq!(
            interp.interpret("log(0, 10)"),
            "Error: Logarithm is only defined for positive numbers, got 0"
        );
        assert_eq!(
            interp.interpret("log(100, 1)"),
            "Error: Logarithm base must be positive and not equal to 1, got 1"
        );
    }

    #[test]
    fn test_invalid_expression() {
        let mut interp = Interpreter::new();
        assert_eq!(
            interp.interpret("bananas"),
            "Invalid expression. Type 'help' for usage examples."
        );
    }

    #[test]
    fn test_case_and_whitespace() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("  SQRT(16)  "), "√16 = 4");
        assert_eq!(interp.interpret("SIN(90)"), "sin(90°) = 1");
        assert_eq!(interp.interpret("   2   +   3   "), "2 + 3 = 5");
    }

    #[test]
    fn test_trailing_text_after_prefix() {
        let mut interp = Interpreter::new();
        // patterns are start-anchored only, so text after a recognized
        // prefix is ignored rather than failing the match
        assert_eq!(interp.interpret("2 ** 3 + 1"), "2^3 = 8");
        assert_eq!(interp.interpret("sqrt(25)x"), "√25 = 5");
        assert_eq!(interp.interpret("5! and more"), "5! = 120");
        assert_eq!(interp.interpret("20% of 150 please"), "20% of 150 = 30");
    }

    #[test]
    fn test_empty_input() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret(""), "");
        assert_eq!(interp.interpret("   "), "");
    }

    #[test]
    fn test_multiple_operators_fall_through() {
        let mut interp = Interpreter::new();
        // more than one '+' does not match the binary-operator step;
        // the expression evaluator picks it up instead
        assert_eq!(interp.interpret("1 + 2 + 3"), "1 + 2 + 3 = 6");
        assert!(interp.calculator().history().is_empty());
    }

    #[test]
    fn test_fallback_expressions() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.interpret("(2 + 3) * 4"), "(2 + 3) * 4 = 20");
        assert_eq!(interp.interpret("(5) / (4 - 4)"), "Error: Cannot divide by zero");
    }

    #[test]
    fn test_signed_operand_dispatch() {
        let mut interp = Interpreter::new();
        // '-5 * -3' splits into three parts on '-' and is skipped there,
        // but the '*' split yields two signed parseable operands, so it
        // dispatches multiply through the engine
        assert_eq!(interp.interpret("-5 * -3"), "-5 * -3 = 15");
        assert_eq!(interp.calculator().history().len(), 1);
    }

    #[test]
    fn test_help() {
        let mut interp = Interpreter::new();
        let reply = interp.interpret("help");
        assert!(reply.contains("sqrt(25)"));
        assert!(reply.contains("quit/exit"));
    }

    #[test]
    fn test_round_trip() {
        let mut interp = Interpreter::new();
        let checks: &[(&str, f64)] = &[
            ("2 + 3", 5.0),
            ("sqrt(25)", 5.0),
            ("20% of 150", 30.0),
            ("5!", 120.0),
            ("2 ** 10", 1024.0),
        ];
        for (i, (input, expected)) in checks.iter().enumerate() {
            let reply = interp.interpret(input);
            assert!(reply.contains(&format_f64(*expected)), "{} -> {}", input, reply);
            assert_eq!(interp.calculator().history().len(), i + 1);
            assert_eq!(interp.calculator().last_result(), *expected);
        }
    }
}
