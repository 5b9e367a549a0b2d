//! Token helpers shared by the `.obj` and `.mtl` decoders.

use std::num;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TextError {
    #[error("Index {index} is out of range for {len} elements.")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("Failed to parse index.")]
    ParseInt(#[from] num::ParseIntError),
}

/// Splits on a literal delimiter, keeping empty fields (`"1//3"` yields `["1", "", "3"]`).
pub fn split<'a>(value: &'a str, delimiter: &str) -> Vec<&'a str> {
    value.split(delimiter).collect()
}

/// Space separated fields with empty ones dropped, so doubled spaces are tolerated.
pub fn fields(value: &str) -> Vec<&str> {
    split(value, " ")
        .into_iter()
        .filter(|field| !field.is_empty())
        .collect()
}

/// Leading whitespace-delimited token, or `""` for a blank line.
pub fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

/// Everything after the first token and the whitespace following it.
pub fn tail(line: &str) -> &str {
    let line = line.trim();
    match line.find(char::is_whitespace) {
        Some(end) => line[end..].trim(),
        None => "",
    }
}

/// Resolves an `.obj` style reference: `n` selects the n-th element (1-based),
/// `-k` selects the k-th element counted from the end.
pub fn resolve_index<'a, T>(elements: &'a [T], token: &str) -> Result<&'a T, TextError> {
    let index: i64 = token.parse()?;
    let len = elements.len();

    let position = if index < 0 {
        len as i64 + index
    } else {
        index - 1
    };

    if position < 0 || position >= len as i64 {
        return Err(TextError::IndexOutOfRange { index, len });
    }

    Ok(&elements[position as usize])
}
