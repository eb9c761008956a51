//! Answer parsing and display formatting
//!
//! Parsing is deliberately lenient (students type `$1,250` or `12.5%`),
//! formatting follows the unit of the problem.

use std::borrow::Cow;

use crate::problem::{Problem, Unit};

/// Parse a free-text answer into a finite number
///
/// Surrounding whitespace and a leading `$` are ignored, `,` is accepted only as
/// a thousands separator (`1,250`), and the longest numeric prefix is used
/// (`12.5%` parses as 12.5, `12,5` as 12). Returns `None` when no number can be
/// read or the result is not finite.
pub fn parse_answer(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();

    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    let rest = strip_grouping(rest);

    let len = numeric_prefix_len(&rest);
    if len == 0 {
        return None;
    }

    let value: f64 = format!("{sign}{}", &rest[..len]).parse().ok()?;
    value.is_finite().then_some(value)
}

/// Remove `,` separators from a leading `d{1,3}(,ddd)+` integer part
///
/// Anything else is returned unchanged, so a stray comma ends the number.
fn strip_grouping(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let lead = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if !(1..=3).contains(&lead) {
        return Cow::Borrowed(s);
    }

    let mut end = lead;
    while bytes.get(end) == Some(&b',')
        && bytes.len() >= end + 4
        && bytes[end + 1..end + 4].iter().all(u8::is_ascii_digit)
        && !bytes.get(end + 4).is_some_and(u8::is_ascii_digit)
    {
        end += 4;
    }
    if end == lead {
        return Cow::Borrowed(s);
    }

    let mut out: String = s[..end].chars().filter(|c| *c != ',').collect();
    out.push_str(&s[end..]);
    Cow::Owned(out)
}

/// Length of the longest prefix of `s` that reads as an unsigned decimal number
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut mantissa_digits = 0;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
            mantissa_digits += 1;
        }
        if mantissa_digits > 0 {
            i = j;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    // Exponent only counts if at least one digit follows
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// Format a problem's correct answer for display
pub fn format_answer(problem: &Problem) -> String {
    format_value(problem.correct_answer, problem.unit)
}

/// Format a value in the given unit
///
/// Plain values are unit-less ratios or counts and are intentionally shown
/// without the `$` prefix or the `million` abbreviation.
pub fn format_value(value: f64, unit: Unit) -> String {
    match unit {
        Unit::Percent => format!("{value:.2}%"),
        Unit::Bps => format!("{value:.0} basis points"),
        Unit::Currency if value.abs() >= 1_000_000.0 => {
            let sign = if value < 0.0 { "-" } else { "" };
            format!("{sign}${:.2} million", value.abs() / 1_000_000.0)
        }
        Unit::Currency => {
            let (sign, digits) = grouped(value);
            format!("{sign}${digits}")
        }
        Unit::Plain => {
            let (sign, digits) = grouped(value);
            format!("{sign}{digits}")
        }
    }
}

/// Two-decimal magnitude with `,` thousands separators, plus its sign
fn grouped(value: f64) -> (&'static str, String) {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('.');
    out.push_str(frac_part);

    // Values that round to zero never show a minus sign
    let nonzero = fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if value < 0.0 && nonzero { "-" } else { "" };
    (sign, out)
}
