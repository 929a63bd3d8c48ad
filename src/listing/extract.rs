//! Response extraction
//!
//! Pulls the record array and the continuation token out of a JSON
//! response body.

use crate::error::{Error, Result};
use crate::pagination::{ContinuationToken, RawRecord};
use serde_json::Value;

/// Move the records of a page out of the response body.
///
/// Paths containing wildcards go through JSONPath and leave the body
/// untouched; everything else is a dot path with optional `[index]`
/// segments whose value is replaced by `null`. A missing or `null` value
/// yields no records.
pub fn take_records(body: &mut Value, path: Option<&str>) -> Result<Vec<RawRecord>> {
    let found = match path {
        Some(path) if path.contains('*') => return extract_with_jsonpath(body, path),
        Some(path) => match pointer(body, path) {
            Some(ptr) => body.pointer_mut(&ptr).map(std::mem::take),
            None => None,
        },
        None => Some(std::mem::take(body)),
    };

    Ok(match found {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(records)) => records,
        Some(record) => vec![record],
    })
}

/// Extract the continuation token; `null`, missing and `""` all mean the
/// listing is complete
pub fn extract_token(body: &Value, path: &str) -> Option<ContinuationToken> {
    match lookup(body, path)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        token => Some(ContinuationToken::new(token.clone())),
    }
}

/// Render a token as a query-string value
pub fn token_to_param(token: &ContinuationToken) -> String {
    value_to_param(token.as_value())
}

/// Render any JSON value as a query-string value
pub(crate) fn value_to_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Follow a dot path such as `$.data.items` or `Reservations[0].Instances`
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    value.pointer(&pointer(value, path)?)
}

/// Resolve a dot path against `value` into a JSON pointer
fn pointer(value: &Value, path: &str) -> Option<String> {
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);
    let mut ptr = String::new();
    if path.is_empty() {
        return Some(ptr);
    }

    let mut current = value;
    for part in path.split('.') {
        let Some(bracket) = part.find('[') else {
            current = current.get(part)?;
            push_segment(&mut ptr, part);
            continue;
        };

        let name = &part[..bracket];
        if !name.is_empty() {
            current = current.get(name)?;
            push_segment(&mut ptr, name);
        }

        let index: i64 = part[bracket + 1..].strip_suffix(']')?.parse().ok()?;
        let items = current.as_array()?;
        let index = if index < 0 {
            items.len().checked_sub(index.unsigned_abs() as usize)?
        } else {
            index as usize
        };
        current = items.get(index)?;
        push_segment(&mut ptr, &index.to_string());
    }

    Some(ptr)
}

fn push_segment(ptr: &mut String, segment: &str) {
    ptr.push('/');
    ptr.push_str(&segment.replace('~', "~0").replace('/', "~1"));
}

/// Extract records using jsonpath-rust
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<RawRecord>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path)
        .map_err(|e| Error::json_path(format!("Invalid JSONPath '{path}': {e}")))?;

    match jp.find(value) {
        Value::Array(records) => Ok(records),
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![other]),
    }
}
