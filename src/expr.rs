use pest::Parser;

use crate::errors::*;
use crate::stack::{Stack, UNARY_MINUS};

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct ExprParser;

/// Evaluates a plain arithmetic expression (`+`, `-`, `*`, `/`, `**`,
/// parentheses, numeric literals) and returns either the result or an error.
///
/// This is the catch-all used when no structured command pattern matches
/// the input line. Two numbers in a row, or a number followed by an open
/// bracket, imply multiplication: `(3+2)(4-9)` is `-25`.
pub fn eval(expr: &str) -> CalcResult {
    let pairs = match ExprParser::parse(Rule::expr, expr) {
        Ok(p) => p,
        Err(..) => return Err(CalcError::ParseFailed("invalid expression".to_string())),
    };

    let mut is_last_value = false;
    let mut stk = Stack::new();
    for pair in pairs {
        let rule = pair.as_rule();
        let val = pair.as_span().as_str();
        match rule {
            Rule::int | Rule::float => {
                if is_last_value {
                    stk.push("*", None)?;
                }
                let v: f64 = val
                    .parse()
                    .map_err(|_| CalcError::ParseFailed(val.to_string()))?;
                stk.push("", Some(v))?;
                is_last_value = true;
            }
            Rule::open_b => {
                if is_last_value {
                    stk.push("*", None)?;
                }
                stk.push("(", None)?;
                is_last_value = false;
            }
            Rule::close_b => {
                stk.push(")", None)?;
                is_last_value = true;
            }
            Rule::operator => {
                if val == "+" && !is_last_value {
                    // unary plus is a no-op
                } else if val == "-" && !is_last_value {
                    stk.push(UNARY_MINUS, None)?;
                } else {
                    stk.push(val, None)?;
                    is_last_value = false;
                }
            }
            Rule::EOI => {}
            _ => return Err(CalcError::Unreachable),
        }
    }
    stk.calculate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr() {
        assert_eq!(eval("2+3"), Ok(5.0));
        assert_eq!(eval("2 + 3 * 2 + 5"), Ok(13.0));
        assert_eq!(eval("(3+2)(4-9)"), Ok(-25.0));
        assert_eq!(eval("2 ** 3 ** 2"), Ok(512.0));
        assert_eq!(eval("2**-3"), Ok(0.125));
        assert_eq!(eval("-(2+3)*4"), Ok(-20.0));
        assert_eq!(eval("2+++++3"), Ok(5.0));
        assert_eq!(eval("1.5e2 / 3"), Ok(50.0));
        assert_eq!(eval(".5 * 8"), Ok(4.0));
    }

    #[test]
    fn test_expr_errors() {
        assert_eq!(
            eval("bananas"),
            Err(CalcError::ParseFailed("invalid expression".to_string()))
        );
        assert_eq!(
            eval("2 + 3 bananas"),
            Err(CalcError::ParseFailed("invalid expression".to_string()))
        );
        assert_eq!(eval("(5)/(4-4)"), Err(CalcError::DividedByZero));
        assert_eq!(eval(""), Err(CalcError::ParseFailed("invalid expression".to_string())));
        assert_eq!(eval("2 +"), Err(CalcError::TooManyOps));
    }
}
