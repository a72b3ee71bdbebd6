//! Parse YAML frontmatter blocks at the top of markdown files.
//!
//! A frontmatter block starts with a `---` marker on the very first line and
//! ends at the next line consisting only of `---`.

use std::ops::Range;

use serde_yaml::Value;

/// Frontmatter marker line
pub const MARKER: &str = "---";

/// Byte range of the frontmatter block contents (between the two marker lines).
///
/// The range starts right after the opening marker's line break and ends at the
/// first byte of the closing marker line. Returns `None` when the content does not
/// start with a marker or the closing marker is missing.
pub fn frontmatter_span(content: &str) -> Option<Range<usize>> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != MARKER || !first.ends_with('\n') {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == MARKER {
            return Some(start..offset);
        }
        offset += line.len();
    }
    None
}

/// Parse content into YAML frontmatter and body.
///
/// Returns `None` if there is no valid frontmatter (missing delimiters, or a block
/// that is not a YAML mapping).
pub fn parse_frontmatter_and_body(content: &str) -> Option<(Value, String)> {
    let span = frontmatter_span(content)?;
    let value: Value = serde_yaml::from_str(&content[span.clone()]).ok()?;
    if value.as_mapping().is_none() && !value.is_null() {
        return None;
    }

    let rest = &content[span.end..];
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    Some((value, body.to_string()))
}

/// Get a string value from a frontmatter Value by key (top-level).
pub fn get_str(value: &Value, key: &str) -> Option<String> {
    scalar_to_string(value.as_mapping()?.get(key)?)
}

/// Get a string value from a nested path, e.g. `["metadata", "version"]`.
pub fn get_nested_str(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.as_mapping()?.get(*key)?;
    }
    scalar_to_string(current)
}

/// Get a list of strings by key. Accepts a YAML sequence or a comma separated string.
pub fn get_str_list(value: &Value, key: &str) -> Vec<String> {
    let Some(entry) = value.as_mapping().and_then(|m| m.get(key)) else {
        return Vec::new();
    };
    match entry {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
