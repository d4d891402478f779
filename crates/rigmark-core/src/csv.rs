//! Line-oriented delimited file I/O for the bookmark format.
//!
//! The format is small on purpose: no header row, one record per line,
//! minimal quoting. A `"`-quoted field may carry the delimiter; quotes
//! inside a quoted field are doubled. The reader is strictly
//! line-oriented, so fields cannot span lines.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// Read every row of `path`, splitting fields on `delimiter`.
///
/// Blank lines are skipped. A missing file is reported as
/// [`Error::PathNotFound`] so callers can treat it as "no data yet".
pub fn read_rows(path: &Path, delimiter: char) -> Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::PathNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    Ok(text
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| split_line(line, delimiter))
        .collect())
}

/// Write `rows` to `path` with `delimiter`, replacing any existing
/// content. An empty row list writes an empty file.
pub fn write_rows(path: &Path, delimiter: char, rows: &[Vec<String>]) -> Result<()> {
    let mut out = String::new();
    for row in rows {
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                out.push(delimiter);
            }
            push_field(&mut out, field, delimiter);
        }
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}

fn push_field(out: &mut String, field: &str, delimiter: char) {
    if field.contains(delimiter) || field.contains('"') {
        out.push('"');
        for c in field.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);
    fields
}
