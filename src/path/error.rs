//! Errors raised while applying a compiled path.

use serde_json::Value;
use thiserror::Error;

/// Result alias used throughout the path compiler.
pub type PathResult<T> = Result<T, PathError>;

/// Failure to apply a compiled path to a value.
///
/// The shape errors are raised by the strategies at the segment where the
/// value does not match the path. A missing intermediate key surfaces as
/// [`NotAnObject`](Self::NotAnObject) with `found: "null"` at the next
/// segment, because the missing value is read as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A record step met something that is not an object.
    #[error("segment `{key}` expected an object, found {found}")]
    NotAnObject {
        /// The key the step was about to read.
        key: String,
        /// JSON kind of the value actually found.
        found: &'static str,
    },

    /// An array step met something that is not an array.
    #[error("segment `{key}[]` expected an array, found {found}")]
    NotAnArray {
        /// The key of the array segment.
        key: String,
        /// JSON kind of the value actually found.
        found: &'static str,
    },

    /// A fallible transform rejected a focused value.
    #[error("transform failed: {message}")]
    Transform {
        /// Message supplied by the transform.
        message: String,
    },
}

impl PathError {
    /// Creates a [`PathError::Transform`] for use in fallible transforms.
    #[must_use]
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform {
            message: message.into(),
        }
    }

    /// The segment key the error is attached to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::NotAnObject { key, .. } | Self::NotAnArray { key, .. } => Some(key),
            Self::Transform { .. } => None,
        }
    }

    pub(crate) fn not_an_object(key: &str, found: &Value) -> Self {
        Self::NotAnObject {
            key: key.to_owned(),
            found: kind_of(found),
        }
    }

    pub(crate) fn not_an_array(key: &str, found: &Value) -> Self {
        Self::NotAnArray {
            key: key.to_owned(),
            found: kind_of(found),
        }
    }
}

/// Name of the JSON kind of `value`, as used in error messages.
pub(crate) const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), "null")]
    #[case(json!(true), "boolean")]
    #[case(json!(1.5), "number")]
    #[case(json!("text"), "string")]
    #[case(json!([1]), "array")]
    #[case(json!({"k": 1}), "object")]
    fn kind_of_names_json_kinds(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(kind_of(&value), expected);
    }

    #[rstest]
    fn display_mentions_key_and_kind() {
        let error = PathError::not_an_array("rows", &json!({"k": 1}));
        assert_eq!(
            error.to_string(),
            "segment `rows[]` expected an array, found object"
        );

        let error = PathError::not_an_object("c", &Value::Null);
        assert_eq!(
            error.to_string(),
            "segment `c` expected an object, found null"
        );
        assert_eq!(error.key(), Some("c"));
    }

    #[rstest]
    fn transform_error_has_no_key() {
        let error = PathError::transform("negative price");
        assert_eq!(error.to_string(), "transform failed: negative price");
        assert_eq!(error.key(), None);
    }
}
