use std::str;

const F64_BUF_LEN: usize = 48;

/// Formats a number for display: integral values are printed without a
/// fractional part (`5`, not `5.0`), everything else goes through dtoa
/// to get the shortest exact representation.
pub fn format_f64(g: f64) -> String {
    if !g.is_finite() {
        return format!("{}", g);
    }
    if g.fract() == 0.0 && g.abs() < 1e15 {
        return format!("{}", g as i64);
    }
    let mut buf = [b'\0'; F64_BUF_LEN];
    match dtoa::write(&mut buf[..], g) {
        Ok(len) => match str::from_utf8(&buf[..len]) {
            Ok(s) => s.to_string(),
            Err(..) => format!("{}", g),
        },
        Err(..) => format!("{}", g),
    }
}

pub(crate) fn f64_equal(f1: f64, f2: f64) -> bool {
    (f1 - f2).abs() <= f64::EPSILON
}
