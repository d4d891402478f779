//! Pure helpers for frequency text: thousands-separator formatting and the
//! inverse probe used when reading values back off a display.

use crate::error::{Error, Result};

/// Strip every non-digit character and render the remainder with `,`
/// thousands separators.
///
/// Fails when no digits survive the filter or the digit string does not
/// fit an integer.
pub fn format_with_separator(text: &str) -> Result<String> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(Error::MalformedBookmark {
            reason: format!("no digits in frequency {text:?}"),
        });
    }
    let value: u64 = digits.parse().map_err(|_| Error::MalformedBookmark {
        reason: format!("frequency {digits:?} out of range"),
    })?;
    Ok(group_thousands(value))
}

/// Remove `,` separators; `None` when a non-digit remains.
///
/// Meant for probing form input and display rows, so an invalid string is
/// an absent result, not an error. The empty string passes through.
pub fn strip_separator(text: &str) -> Option<String> {
    let stripped: String = text.chars().filter(|c| *c != ',').collect();
    if stripped.chars().all(|c| c.is_ascii_digit()) {
        Some(stripped)
    } else {
        None
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
