//! Rule configuration parsing.
//!
//! A filter is constructed from a flat mapping of predicate name → value.
//! The values are deliberately loose: numeric bounds may arrive as native
//! numbers or as digit strings, unbounded maxima as the literal `"inf"`,
//! and id lists may mix integers, digit strings, and display names.
//!
//! All of that looseness is resolved here and in `aliases`, once, at
//! construction time. A type-mismatched value is a `ConfigError` the host
//! must surface before the filter enters service; evaluation itself never
//! fails. Unrecognized keys (e.g. `custom_dts` blocks consumed by the
//! downstream formatter) are ignored.

use serde_json::{Map, Value};

/// Flat predicate-name → value mapping, as handed over by the host's
/// rule loader.
pub type RuleMap = Map<String, Value>;

/// Errors raised while building a filter from a [`RuleMap`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`{key}`: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },
    /// Strict-mode only: a display name missing from the namespace table.
    #[error("unknown {namespace} name {name:?}")]
    UnknownName {
        namespace: &'static str,
        name: String,
    },
    #[error("{namespace} token {token} is neither an integer id nor a name")]
    InvalidToken {
        namespace: &'static str,
        token: String,
    },
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(s) => format!("the string {s:?}"),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

fn mismatch(key: &str, expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: describe(value),
    }
}

/// Optional real-valued bound (distance windows). Accepts numbers, numeric
/// strings, and the literal `"inf"` (any case) for an unbounded maximum.
pub fn opt_bound(map: &RuleMap, key: &str) -> Result<Option<f64>, ConfigError> {
    let Some(value) = map.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| mismatch(key, "a number or \"inf\"", value)),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("inf") {
                Ok(Some(f64::INFINITY))
            } else {
                s.parse::<f64>()
                    .map(Some)
                    .map_err(|_| mismatch(key, "a number or \"inf\"", value))
            }
        }
        _ => Err(mismatch(key, "a number or \"inf\"", value)),
    }
}

/// Optional signed seconds value (time-left windows). Accepts integers and
/// integer strings.
pub fn opt_i64(map: &RuleMap, key: &str) -> Result<Option<i64>, ConfigError> {
    let Some(value) = map.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| mismatch(key, "an integer", value)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| mismatch(key, "an integer", value)),
        _ => Err(mismatch(key, "an integer", value)),
    }
}

/// Optional unsigned count (CP windows). `"inf"` reads as unset — the
/// predicate is unbounded above either way.
pub fn opt_u32(map: &RuleMap, key: &str) -> Result<Option<u32>, ConfigError> {
    let Some(value) = map.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| mismatch(key, "a non-negative integer", value)),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("inf") {
                Ok(None)
            } else {
                s.parse::<u32>()
                    .map(Some)
                    .map_err(|_| mismatch(key, "a non-negative integer", value))
            }
        }
        _ => Err(mismatch(key, "a non-negative integer", value)),
    }
}

/// Optional tier level (1-5 in practice). Accepts integers and digit
/// strings.
pub fn opt_level(map: &RuleMap, key: &str) -> Result<Option<u8>, ConfigError> {
    let Some(value) = map.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| mismatch(key, "a level (small integer)", value)),
        Value::String(s) => s
            .trim()
            .parse::<u8>()
            .map(Some)
            .map_err(|_| mismatch(key, "a level (small integer)", value)),
        _ => Err(mismatch(key, "a level (small integer)", value)),
    }
}

/// Optional boolean flag. Booleans only — "yes"/1 coercions are not part
/// of the contract.
pub fn opt_bool(map: &RuleMap, key: &str) -> Result<Option<bool>, ConfigError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(mismatch(key, "a boolean", other)),
    }
}

/// Optional list of substrings (name/park filters).
pub fn opt_string_list(map: &RuleMap, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
    let Some(value) = map.get(key) else {
        return Ok(None);
    };
    let Value::Array(items) = value else {
        return Err(mismatch(key, "a list of strings", value));
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => out.push(s.clone()),
            other => return Err(mismatch(key, "a list of strings", other)),
        }
    }
    Ok(Some(out))
}

/// Optional list of raw alias tokens; the caller resolves them through an
/// `AliasTable`.
pub fn opt_token_list<'a>(map: &'a RuleMap, key: &str) -> Result<Option<&'a [Value]>, ConfigError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(mismatch(key, "a list of ids or names", other)),
    }
}
