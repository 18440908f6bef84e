//! Permissive numeric token parsing.
//!
//! Reads the longest leading base-10 floating point number from a token, the
//! way C `strtod` does: leading whitespace is skipped and anything after the
//! number is ignored. A token with no numeric prefix is a normal outcome and
//! is reported through [`NumericValue::consumed`], never as an error.

/// Result of parsing one token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericValue {
    /// Parsed value, `0.0` when nothing was consumed
    pub value: f64,
    /// Whether any numeric prefix was consumed
    pub consumed: bool,
}

impl NumericValue {
    const INVALID: Self = Self {
        value: 0.0,
        consumed: false,
    };

    fn valid(value: f64) -> Self {
        Self {
            value,
            consumed: true,
        }
    }

    /// The value, if the token carried a number
    pub fn get(self) -> Option<f64> {
        self.consumed.then_some(self.value)
    }
}

/// Parse the leading number of a raw token
///
/// Grammar: optional sign, digits, optional `.` and digits (at least one
/// mantissa digit overall), optional exponent. An exponent without digits is
/// left unconsumed, so `"2e"` parses as `2.0`. `inf`/`nan` spellings are not
/// numbers here, and neither is a literal that overflows `f64`.
pub fn parse_leading(token: &[u8]) -> NumericValue {
    let start = token
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(token.len());
    let rest = &token[start..];

    let len = numeric_prefix_len(rest);
    if len == 0 {
        return NumericValue::INVALID;
    }

    // The prefix is pure ASCII by construction
    match std::str::from_utf8(&rest[..len])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|value| value.is_finite())
    {
        Some(value) => NumericValue::valid(value),
        None => NumericValue::INVALID,
    }
}

/// Parse a standalone token, returning `None` for non-numeric input
pub fn parse_numeric(token: &str) -> Option<f64> {
    parse_leading(token.as_bytes()).get()
}

/// Length of the numeric prefix of `bytes`, 0 when there is none
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits + frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    i
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
