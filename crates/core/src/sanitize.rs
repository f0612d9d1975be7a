//! Response sanitizer: turns an untrusted freeform text blob from the
//! generative backend into a validated [`SanitizedRecord`] or a typed
//! [`SanitizeError`].
//!
//! The function is total over its input space: every possible text yields
//! either a record or one of the defined error kinds, never a panic. The
//! backend routinely wraps its JSON in markdown fences and surrounds it
//! with commentary, so extraction scans for the first balanced `{...}`
//! substring instead of trusting the text to be clean JSON.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::job::JobErrorKind;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lower bound for every integer field (levels, height, weight, age).
pub const NUMERIC_MIN: i64 = 0;

/// Upper bound for every integer field.
pub const NUMERIC_MAX: i64 = 1000;

// ---------------------------------------------------------------------------
// Schema types
// ---------------------------------------------------------------------------

/// Primitive type expected for a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// One field in an expected record schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Required fields must be present with the expected type; optional
    /// fields fall back to [`FieldValue::Unknown`] when absent.
    pub required: bool,
}

/// A validated field value. Missing optional fields are an explicit
/// `Unknown`, never silently dropped or defaulted to a guessed value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Unknown,
}

/// A validated record produced by [`sanitize`]. Never constructed from raw
/// text directly.
#[derive(Debug, Clone)]
pub struct SanitizedRecord {
    values: BTreeMap<&'static str, FieldValue>,
    clamped: Vec<&'static str>,
}

impl SanitizedRecord {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// The field's text value, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// The field's integer value, if present and numeric.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(FieldValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn is_unknown(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FieldValue::Unknown))
    }

    /// Fields whose values were out of `[NUMERIC_MIN, NUMERIC_MAX]` and
    /// were clamped rather than rejected.
    pub fn clamped_fields(&self) -> &[&'static str] {
        &self.clamped
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Typed failure from [`sanitize`].
#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    /// The text contains no JSON object at all.
    #[error("no JSON object found in backend response")]
    NoJsonFound,

    /// A candidate object was found but did not parse as JSON. The raw
    /// text is retained for operator diagnostics; callers must log it,
    /// never store it as trusted structured data.
    #[error("malformed JSON in backend response: {source}")]
    MalformedJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// The parsed object does not match the expected record schema.
    #[error("record schema violation on `{field}`: {reason}")]
    SchemaViolation { field: &'static str, reason: String },
}

impl SanitizeError {
    /// The job-level error kind this failure maps to.
    pub fn kind(&self) -> JobErrorKind {
        match self {
            SanitizeError::NoJsonFound => JobErrorKind::NoJsonFound,
            SanitizeError::MalformedJson { .. } => JobErrorKind::MalformedJson,
            SanitizeError::SchemaViolation { .. } => JobErrorKind::SchemaViolation,
        }
    }
}

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

/// Sanitize a raw backend response against an expected field schema.
///
/// Steps:
/// 1. Strip markdown code-fence markers.
/// 2. Locate the first balanced `{...}` substring.
/// 3. Parse it as JSON.
/// 4. Validate field presence and primitive types; unexpected extra fields
///    are ignored, missing optional fields become [`FieldValue::Unknown`].
/// 5. Clamp integer fields into `[NUMERIC_MIN, NUMERIC_MAX]`, recording the
///    clamped names -- a single out-of-range value never fails the record.
pub fn sanitize(raw: &str, schema: &[FieldSpec]) -> Result<SanitizedRecord, SanitizeError> {
    let cleaned = strip_code_fences(raw);

    let candidate = extract_json_object(&cleaned).ok_or(SanitizeError::NoJsonFound)?;

    let parsed: serde_json::Value =
        serde_json::from_str(candidate).map_err(|source| SanitizeError::MalformedJson {
            raw: raw.to_string(),
            source,
        })?;

    // Extraction starts at `{`, so a successful parse is always an object.
    let object = parsed.as_object().ok_or(SanitizeError::NoJsonFound)?;

    let mut values = BTreeMap::new();
    let mut clamped = Vec::new();

    for spec in schema {
        let value = match object.get(spec.name) {
            None | Some(serde_json::Value::Null) => {
                if spec.required {
                    return Err(SanitizeError::SchemaViolation {
                        field: spec.name,
                        reason: "required field is missing".into(),
                    });
                }
                FieldValue::Unknown
            }
            Some(v) => match spec.kind {
                FieldKind::Text => match v.as_str() {
                    Some(s) => FieldValue::Text(s.to_string()),
                    None => {
                        return Err(SanitizeError::SchemaViolation {
                            field: spec.name,
                            reason: format!("expected string, got {}", type_name(v)),
                        });
                    }
                },
                FieldKind::Integer => match v.as_i64() {
                    Some(n) => {
                        let bounded = n.clamp(NUMERIC_MIN, NUMERIC_MAX);
                        if bounded != n {
                            clamped.push(spec.name);
                        }
                        FieldValue::Integer(bounded)
                    }
                    None => {
                        return Err(SanitizeError::SchemaViolation {
                            field: spec.name,
                            reason: format!("expected integer, got {}", type_name(v)),
                        });
                    }
                },
            },
        };
        values.insert(spec.name, value);
    }

    Ok(SanitizedRecord { values, clamped })
}

/// Remove markdown code-fence markers (``` with an optional language tag).
pub fn strip_code_fences(raw: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| Regex::new(r"```[A-Za-z0-9_-]*").unwrap());
    fence.replace_all(raw, "").trim().to_string()
}

/// Locate the first balanced `{...}` substring, honoring JSON string
/// literals and backslash escapes so braces inside strings do not count.
///
/// Returns `None` when the text contains no `{` at all. An opening brace
/// that never balances yields the remainder of the text, which the JSON
/// parser then rejects as malformed.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + idx + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    // Unterminated object: hand back the tail for a MalformedJson parse error.
    Some(&text[start..])
}

/// Human-readable JSON type name for schema violation messages.
fn type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
