//! Keyword scanner for compact `key=value` strings.
//!
//! `RobotPose` events pack the pose into one attribute such as
//! `x=1.2, y=3.4, angle=90`. The producer's format is fixed, so the
//! boundary sets below must stay exactly as they are.

use super::error::{ParseError, Result};

/// Characters allowed immediately before a key (start of string also counts).
const KEY_BOUNDARY: &[char] = &[':', ' ', '(', '[', '{', '/', '|', '\\', ','];

/// Characters allowed immediately after a key (end of string also counts).
const KEY_FOLLOWER: &[char] = &[' ', '=', ':', '('];

/// Characters skipped before a value starts.
const VALUE_STARTER: &[char] = &[' ', '=', ':', '('];

/// Characters that end a value.
const VALUE_TERMINATOR: &[char] = &[' ', ',', ';', '\n', ')', ':'];

/// Find `key` in `text` and return everything after it.
///
/// The key must start at a boundary and end before a follower. When a
/// partial match fails, the failing character is not retried as a key
/// start.
///
/// # Example
/// ```
/// use drishti_log::parser::scanner::find_var;
///
/// assert_eq!(find_var("x=1, y=2", "y"), Some("=2"));
/// assert_eq!(find_var("xy=1", "y"), None);
/// ```
pub fn find_var<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let key: Vec<char> = key.chars().collect();
    if key.is_empty() {
        return None;
    }

    let mut matched = 0;
    let mut prev: Option<char> = None;
    for (i, c) in text.char_indices() {
        let may_start = prev.map_or(true, |p| KEY_BOUNDARY.contains(&p));
        if c == key[matched] && (matched > 0 || may_start) {
            matched += 1;
            if matched == key.len() {
                let rest = &text[i + c.len_utf8()..];
                match rest.chars().next() {
                    None => return Some(rest),
                    Some(next) if KEY_FOLLOWER.contains(&next) => return Some(rest),
                    Some(_) => matched = 0,
                }
            }
        } else {
            matched = 0;
        }
        prev = Some(c);
    }
    None
}

/// Scanner state while extracting a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Searching,
    Recording { start: usize },
}

/// Extract the value following `key` in `text`.
pub fn scan_value<'a>(text: &'a str, key: &str) -> Result<&'a str> {
    let rest = find_var(text, key).ok_or_else(|| ParseError::VariableNotFound {
        key: key.to_string(),
        text: text.to_string(),
    })?;

    let mut state = ScanState::Searching;
    let mut end = rest.len();
    for (i, c) in rest.char_indices() {
        match state {
            ScanState::Searching if VALUE_STARTER.contains(&c) => {}
            ScanState::Searching => state = ScanState::Recording { start: i },
            ScanState::Recording { .. } if VALUE_TERMINATOR.contains(&c) => {
                end = i;
                break;
            }
            ScanState::Recording { .. } => {}
        }
    }

    match state {
        ScanState::Recording { start } => Ok(&rest[start..end]),
        ScanState::Searching => Err(ParseError::EmptyValue {
            key: key.to_string(),
            text: text.to_string(),
        }),
    }
}

/// Extract several values in key order.
pub fn scan_vars<'a>(text: &'a str, keys: &[&str]) -> Result<Vec<&'a str>> {
    keys.iter().map(|key| scan_value(text, key)).collect()
}
