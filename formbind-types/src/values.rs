use std::collections::HashMap;

use crate::FieldValue;

/// Error type for typed access into [`FieldValues`].
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("Missing value for field: {0}")]
    Missing(String),

    #[error("Type mismatch for field '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The result of a successful extraction: field name to domain value.
///
/// Disabled fields never appear here. Blank fields are present with
/// [`FieldValue::Blank`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    values: HashMap<String, FieldValue>,
}

impl FieldValues {
    /// Create a new empty value map.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert a value for the given field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style insert, handy for expected values in tests.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get the value for a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Check if a value exists for a field.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove the value of a field.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    /// Iterate over all name-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over field names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // === Convenience accessors ===

    /// Get a text value. Blank values are reported as missing.
    pub fn get_text(&self, name: &str) -> Result<&str, ValueError> {
        match self.get(name) {
            Some(FieldValue::Text(s)) => Ok(s),
            Some(FieldValue::Blank) | None => Err(ValueError::Missing(name.to_string())),
            Some(other) => Err(ValueError::TypeMismatch {
                name: name.to_string(),
                expected: "Text",
                actual: other.type_name(),
            }),
        }
    }

    /// Get an optional text value: `Ok(None)` for blank or absent fields.
    pub fn get_optional_text(&self, name: &str) -> Result<Option<&str>, ValueError> {
        match self.get(name) {
            Some(FieldValue::Text(s)) => Ok(Some(s)),
            Some(FieldValue::Blank) | None => Ok(None),
            Some(other) => Err(ValueError::TypeMismatch {
                name: name.to_string(),
                expected: "Text",
                actual: other.type_name(),
            }),
        }
    }

    /// Get a boolean value.
    pub fn get_bool(&self, name: &str) -> Result<bool, ValueError> {
        match self.get(name) {
            Some(FieldValue::Bool(b)) => Ok(*b),
            Some(FieldValue::Blank) | None => Err(ValueError::Missing(name.to_string())),
            Some(other) => Err(ValueError::TypeMismatch {
                name: name.to_string(),
                expected: "Bool",
                actual: other.type_name(),
            }),
        }
    }

    /// Get an integer value.
    pub fn get_int(&self, name: &str) -> Result<i64, ValueError> {
        match self.get(name) {
            Some(FieldValue::Int(i)) => Ok(*i),
            Some(FieldValue::Blank) | None => Err(ValueError::Missing(name.to_string())),
            Some(other) => Err(ValueError::TypeMismatch {
                name: name.to_string(),
                expected: "Int",
                actual: other.type_name(),
            }),
        }
    }

    /// Get a float value. Integers are widened.
    pub fn get_float(&self, name: &str) -> Result<f64, ValueError> {
        match self.get(name) {
            Some(value @ (FieldValue::Float(_) | FieldValue::Int(_))) => {
                Ok(value.as_float().unwrap_or_default())
            }
            Some(FieldValue::Blank) | None => Err(ValueError::Missing(name.to_string())),
            Some(other) => Err(ValueError::TypeMismatch {
                name: name.to_string(),
                expected: "Float",
                actual: other.type_name(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for FieldValues {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldValues {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = std::collections::hash_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut values = FieldValues::new();
        values.insert("name", "Alice");
        values.insert("age", FieldValue::Int(30));

        assert_eq!(values.get_text("name").unwrap(), "Alice");
        assert_eq!(values.get_int("age").unwrap(), 30);
        assert_eq!(values.get_float("age").unwrap(), 30.0);
    }

    #[test]
    fn blank_is_missing_for_required_access() {
        let values = FieldValues::new().with("notes", FieldValue::Blank);

        assert!(matches!(
            values.get_text("notes"),
            Err(ValueError::Missing(_))
        ));
        assert_eq!(values.get_optional_text("notes").unwrap(), None);
    }

    #[test]
    fn type_mismatch_error() {
        let values = FieldValues::new().with("age", 30);

        let result = values.get_text("age");
        assert!(matches!(result, Err(ValueError::TypeMismatch { .. })));
    }
}
