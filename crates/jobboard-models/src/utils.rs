//! Serde helpers and validation glue shared by the model types.

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{ModelError, ModelResult};

/// Deserialize an identifier the backend may send as a number or a string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Uint(n) => n.to_string(),
    })
}

/// Deserialize `null` as the type's default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Run `validator` checks on a form and flatten the first failure into a
/// user-facing message.
pub fn validate_form<T: Validate>(form: &T) -> ModelResult<()> {
    form.validate()
        .map_err(|errors| ModelError::validation(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    // Sort by field name so the reported message is deterministic.
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(err) = list.first() {
                    return err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field));
                }
            }
            ValidationErrorsKind::Struct(inner) => return first_message(inner),
            ValidationErrorsKind::List(map) => {
                if let Some(inner) = map.values().next() {
                    return first_message(inner);
                }
            }
        }
    }

    "Invalid input".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    }

    #[test]
    fn test_string_or_number_accepts_both() {
        let a: Holder = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        let b: Holder = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(a.id, "42");
        assert_eq!(b.id, "abc");
    }
}
