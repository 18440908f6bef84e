//! Prefix-labelled field extraction for line-oriented formats.

use crate::constants::MSP_NAME_PREFIX;

/// Return the text after `prefix` up to the line boundary
///
/// The prefix must match byte for byte at the very start of `line`. Both
/// `\n` and `\r` end the field, so CRLF input gives clean values. A
/// non-matching line yields `None`; that is the common case when scanning a
/// whole file.
pub fn extract_label<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(prefix)?;
    let end = rest
        .bytes()
        .position(|b| b == b'\n' || b == b'\r')
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Compound name of an MSP `Name: ` line
pub fn extract_name(line: &str) -> Option<&str> {
    extract_label(line, MSP_NAME_PREFIX)
}
