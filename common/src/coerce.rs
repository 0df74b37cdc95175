use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};

/// A command-line argument interpreted against its field's type.
///
/// Only booleans are parsed here; every other type is passed on verbatim and
/// interpreted by the EIP-712 encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Raw(String),
}

pub fn coerce(raw: &str, field_type: &str) -> Result<FieldValue> {
    if field_type != "bool" {
        return Ok(FieldValue::Raw(raw.to_owned()));
    }
    match raw {
        "false" | "False" | "0" => Ok(FieldValue::Bool(false)),
        "true" | "True" | "1" => Ok(FieldValue::Bool(true)),
        other => Err(Error::InvalidBooleanLiteral(other.to_owned())),
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Raw(s) => Value::String(s),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_literals() {
        for raw in ["false", "False", "0"] {
            assert_eq!(coerce(raw, "bool").unwrap(), FieldValue::Bool(false));
        }
        for raw in ["true", "True", "1"] {
            assert_eq!(coerce(raw, "bool").unwrap(), FieldValue::Bool(true));
        }
    }

    #[test]
    fn true_spellings_render_the_same() {
        let rendered: Vec<String> = ["true", "True", "1"]
            .into_iter()
            .map(|raw| coerce(raw, "bool").unwrap().to_string())
            .collect();
        assert_eq!(rendered, ["true", "true", "true"]);
    }

    #[test]
    fn invalid_boolean_names_literal() {
        let err = coerce("yes", "bool").unwrap_err();
        assert!(matches!(err, Error::InvalidBooleanLiteral(ref lit) if lit == "yes"));
        assert!(err.to_string().contains("\"yes\""));
        assert!(coerce("TRUE", "bool").is_err());
    }

    #[test]
    fn other_types_pass_through() {
        assert_eq!(
            coerce("0xabc", "address").unwrap(),
            FieldValue::Raw("0xabc".to_owned())
        );
        assert_eq!(coerce("yes", "string").unwrap(), FieldValue::Raw("yes".to_owned()));
        assert_eq!(Value::from(FieldValue::Raw("1".into())), Value::String("1".into()));
        assert_eq!(Value::from(FieldValue::Bool(true)), Value::Bool(true));
    }
}
