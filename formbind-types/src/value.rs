use std::fmt;

/// A single value held by a form field.
///
/// This is what controls emit, what validators and converters receive, and
/// what ends up in the extracted [`FieldValues`](crate::FieldValues).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value at all (never entered, or cleared by a converter).
    #[default]
    Blank,

    /// A textual value (text inputs, select and radio keys).
    Text(String),

    /// A boolean value (checkboxes).
    Bool(bool),

    /// An integer value.
    Int(i64),

    /// A floating-point value.
    Float(f64),
}

impl FieldValue {
    /// Check whether this value counts as "nothing entered".
    ///
    /// `Blank` and whitespace-only text are blank. `Bool(false)` is not.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Blank => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Render the value the way a text control shows it. `Blank` is empty.
    pub fn to_text(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Blank => "Blank",
            Self::Text(_) => "Text",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Blank, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(FieldValue::Blank.is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::from("").is_blank());
        assert!(!FieldValue::from("x").is_blank());
        assert!(!FieldValue::Bool(false).is_blank());
        assert!(!FieldValue::Int(0).is_blank());
    }

    #[test]
    fn option_conversion() {
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Blank);
        assert_eq!(
            FieldValue::from(Some("notes")),
            FieldValue::Text("notes".into())
        );
    }

    #[test]
    fn text_rendering() {
        assert_eq!(FieldValue::Blank.to_text(), "");
        assert_eq!(FieldValue::Int(42).to_string(), "42");
        assert_eq!(FieldValue::Bool(true).to_text(), "true");
    }
}
