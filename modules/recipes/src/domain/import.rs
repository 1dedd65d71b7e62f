//! Two-column ingredient CSV: `name,measurement_unit`.
//!
//! Fields may be wrapped in double quotes (with `""` as an escaped quote) so names can
//! contain commas. Blank lines are skipped; there is no header row.

use crate::contract::model::NewIngredient;
use crate::domain::error::DomainError;

pub fn parse_ingredients_csv(input: &str) -> Result<Vec<NewIngredient>, DomainError> {
    let mut out = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_record(line).ok_or_else(|| {
            DomainError::validation(format!("line {line_no}"), "unterminated quoted field")
        })?;
        match fields.as_slice() {
            [name, unit] => out.push(NewIngredient {
                name: name.trim().to_string(),
                measurement_unit: unit.trim().to_string(),
            }),
            other => {
                return Err(DomainError::validation(
                    format!("line {line_no}"),
                    format!("expected 2 fields, found {}", other.len()),
                ))
            }
        }
    }
    Ok(out)
}

/// `None` if a quoted field is left open.
fn split_record(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(current);
    Some(fields)
}
