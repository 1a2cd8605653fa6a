//! printf-style formatting for template fragments.
//!
//! Supports the subset gnuplot templates use:
//! `%[index$][flags][width][.precision]conversion` with flags `-`, `0`, `+`
//! and conversions `f`, `e`, `d`, `s`, `n`, `%`. Explicit `index$` arguments
//! are 1-based and do not advance the ordinary argument counter.

use crate::IoError;

/// One positional argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    /// Consumed by `%f`, `%e` and `%s`.
    Float(f64),
    /// Consumed by `%d` and `%s`.
    Int(i64),
    /// Consumed by `%s`.
    Str(&'a str),
}

/// Expand every conversion in `format` with `args`.
///
/// # Errors
///
/// Returns [`IoError::Format`] for an unknown or malformed conversion, a
/// missing argument, or an argument of the wrong kind.
pub fn sprintf(format: &str, args: &[FormatArg<'_>]) -> Result<String, IoError> {
    let fail = |reason: String| IoError::Format {
        format: format.to_string(),
        reason,
    };

    let mut out = String::with_capacity(format.len());
    let mut next_arg = 0usize;
    let mut rest = format;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let (directive, consumed) = Directive::parse(&rest[pos + 1..]).map_err(fail)?;
        rest = &rest[pos + 1 + consumed..];

        match directive.conversion {
            '%' => out.push('%'),
            'n' => out.push('\n'),
            _ => {
                let position = match directive.index {
                    Some(index) => index - 1,
                    None => {
                        next_arg += 1;
                        next_arg - 1
                    }
                };
                let arg = args
                    .get(position)
                    .ok_or_else(|| fail(format!("missing argument {}", position + 1)))?;
                out.push_str(&directive.render(arg).map_err(fail)?);
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

#[derive(Debug, Default)]
struct Directive {
    index: Option<usize>,
    left: bool,
    zero: bool,
    plus: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

impl Directive {
    /// Parse the specifier following a `%`. Returns it with the number of bytes consumed.
    fn parse(s: &str) -> Result<(Self, usize), String> {
        let bytes = s.as_bytes();
        let digits_at = |from: usize| {
            bytes[from..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
        };
        let number = |text: &str| {
            text.parse::<usize>()
                .map_err(|_| format!("number out of range: {text}"))
        };

        let mut directive = Self::default();
        let mut i = 0;

        let n = digits_at(0);
        if n > 0 && bytes.get(n) == Some(&b'$') {
            let index = number(&s[..n])?;
            if index == 0 {
                return Err("argument index must be at least 1".to_string());
            }
            directive.index = Some(index);
            i = n + 1;
        }

        while let Some(&b) = bytes.get(i) {
            match b {
                b'-' => directive.left = true,
                b'0' => directive.zero = true,
                b'+' => directive.plus = true,
                _ => break,
            }
            i += 1;
        }

        let n = digits_at(i);
        if n > 0 {
            directive.width = Some(number(&s[i..i + n])?);
            i += n;
        }

        if bytes.get(i) == Some(&b'.') {
            let n = digits_at(i + 1);
            if n == 0 {
                return Err("precision expected after '.'".to_string());
            }
            directive.precision = Some(number(&s[i + 1..i + 1 + n])?);
            i += 1 + n;
        }

        directive.conversion = s[i..]
            .chars()
            .next()
            .ok_or_else(|| "incomplete conversion at end of format".to_string())?;
        i += directive.conversion.len_utf8();

        if (directive.left || directive.zero) && directive.width.is_none() {
            return Err(format!("flag requires a width in %{}", directive.conversion));
        }
        if directive.left && directive.zero {
            return Err("flags '-' and '0' cannot be combined".to_string());
        }
        Ok((directive, i))
    }

    fn render(&self, arg: &FormatArg<'_>) -> Result<String, String> {
        match (self.conversion, *arg) {
            ('f', FormatArg::Float(v)) => Ok(self.float(v, |m, p| format!("{m:.p$}"))),
            ('e', FormatArg::Float(v)) => Ok(self.float(v, scientific)),
            ('d', FormatArg::Int(v)) => {
                if self.precision.is_some() {
                    return Err("precision is not allowed with %d".to_string());
                }
                Ok(self.pad_number(v < 0, &v.unsigned_abs().to_string()))
            }
            ('s', arg) => {
                if self.zero || self.plus {
                    return Err("flags '0' and '+' are not allowed with %s".to_string());
                }
                let text = match arg {
                    FormatArg::Str(s) => s.to_string(),
                    FormatArg::Int(v) => v.to_string(),
                    FormatArg::Float(v) => v.to_string(),
                };
                let text = match self.precision {
                    Some(p) => text.chars().take(p).collect(),
                    None => text,
                };
                Ok(self.pad_text(&text))
            }
            ('f' | 'e' | 'd', other) => {
                Err(format!("%{} cannot format {other:?}", self.conversion))
            }
            (c, _) => Err(format!("unknown conversion %{c}")),
        }
    }

    fn float(&self, v: f64, digits: impl Fn(f64, usize) -> String) -> String {
        if v.is_nan() {
            return self.pad_text("NaN");
        }
        if v.is_infinite() {
            return self.pad_text(if v < 0.0 { "-Infinity" } else { "Infinity" });
        }
        let magnitude = digits(v.abs(), self.precision.unwrap_or(6));
        self.pad_number(v.is_sign_negative(), &magnitude)
    }

    fn pad_number(&self, negative: bool, magnitude: &str) -> String {
        let sign = if negative {
            "-"
        } else if self.plus {
            "+"
        } else {
            ""
        };
        let fill = self
            .width
            .unwrap_or(0)
            .saturating_sub(sign.len() + magnitude.chars().count());
        if self.left {
            format!("{sign}{magnitude}{}", " ".repeat(fill))
        } else if self.zero {
            format!("{sign}{}{magnitude}", "0".repeat(fill))
        } else {
            format!("{}{sign}{magnitude}", " ".repeat(fill))
        }
    }

    fn pad_text(&self, text: &str) -> String {
        let fill = self.width.unwrap_or(0).saturating_sub(text.chars().count());
        if self.left {
            format!("{text}{}", " ".repeat(fill))
        } else {
            format!("{}{text}", " ".repeat(fill))
        }
    }
}

/// Mantissa with `precision` digits and a signed exponent of at least two digits.
fn scientific(magnitude: f64, precision: usize) -> String {
    let raw = format!("{magnitude:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        }
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(v: f64) -> FormatArg<'static> {
        FormatArg::Float(v)
    }

    #[test]
    fn arrow_line() {
        let out = sprintf(
            "set arrow from %f,%f to %f,%f nohead\n",
            &[f(1.5), f(2.0), f(3.25), f(-4.0)],
        )
        .unwrap();
        assert_eq!(out, "set arrow from 1.500000,2.000000 to 3.250000,-4.000000 nohead\n");
    }

    #[test]
    fn explicit_indices() {
        let args = [FormatArg::Str("a"), FormatArg::Str("b")];
        assert_eq!(sprintf("%2$s vs %1$s", &args).unwrap(), "b vs a");
        // Explicit indices leave the ordinary counter alone.
        assert_eq!(sprintf("%2$s %s", &args).unwrap(), "b a");
    }

    #[test]
    fn width_precision_and_flags() {
        assert_eq!(sprintf("%8.3f", &[f(3.14159)]).unwrap(), "   3.142");
        assert_eq!(sprintf("%-6d|", &[FormatArg::Int(42)]).unwrap(), "42    |");
        assert_eq!(sprintf("%05d", &[FormatArg::Int(-42)]).unwrap(), "-0042");
        assert_eq!(sprintf("%+.1f", &[f(2.0)]).unwrap(), "+2.0");
        assert_eq!(sprintf("%.0f", &[f(7.0)]).unwrap(), "7");
        let pair = [FormatArg::Str("ab"), FormatArg::Str("cd")];
        assert_eq!(sprintf("%5s|%-5s|", &pair).unwrap(), "   ab|cd   |");
        assert_eq!(sprintf("%.3s", &[FormatArg::Str("abcdef")]).unwrap(), "abc");
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(sprintf("%.2e", &[f(12345.678)]).unwrap(), "1.23e+04");
        assert_eq!(sprintf("%e", &[f(0.000123)]).unwrap(), "1.230000e-04");
        assert_eq!(sprintf("%e", &[f(0.0)]).unwrap(), "0.000000e+00");
        assert_eq!(sprintf("%.1e", &[f(-2.5e-10)]).unwrap(), "-2.5e-10");
    }

    #[test]
    fn literals_and_newline() {
        assert_eq!(sprintf("100%% done%n", &[]).unwrap(), "100% done\n");
        assert_eq!(sprintf("no conversions", &[]).unwrap(), "no conversions");
    }

    #[test]
    fn string_conversion_accepts_numbers() {
        assert_eq!(sprintf("%s-%s", &[FormatArg::Int(3), f(0.5)]).unwrap(), "3-0.5");
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(sprintf("%f", &[f(f64::NAN)]).unwrap(), "NaN");
        assert_eq!(sprintf("%f", &[f(f64::NEG_INFINITY)]).unwrap(), "-Infinity");
    }

    #[test]
    fn errors() {
        let cases: Vec<(&str, Vec<FormatArg<'_>>)> = vec![
            ("%q", vec![f(1.0)]),
            ("%d", vec![f(1.0)]),
            ("%f", vec![FormatArg::Str("x")]),
            ("%f %f", vec![f(1.0)]),
            ("%3$s", vec![FormatArg::Str("a")]),
            ("%0$s", vec![FormatArg::Str("a")]),
            ("%-f", vec![f(1.0)]),
            ("%-05f", vec![f(1.0)]),
            ("%.f", vec![f(1.0)]),
            ("%.2d", vec![FormatArg::Int(1)]),
            ("%05s", vec![FormatArg::Str("a")]),
            ("trailing %", vec![]),
        ];
        for (format, args) in cases {
            assert!(
                matches!(sprintf(format, &args), Err(IoError::Format { .. })),
                "{format} should fail"
            );
        }
    }
}
