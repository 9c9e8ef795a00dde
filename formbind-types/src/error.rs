use crate::FieldErrors;

/// Configuration and usage errors of a form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Two descriptors in one list share a name.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// A select or radio field without any option.
    #[error("Field '{0}' has no options to choose from")]
    MissingOptions(String),

    /// A change was reported for a name not in the current descriptor list.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A change was reported for a disabled field.
    #[error("Field '{0}' is disabled")]
    DisabledField(String),
}

/// Failure of a submission, as reported by the persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The server rejected individual fields.
    #[error("Submission rejected {} field(s)", .0.len())]
    Fields(FieldErrors),

    /// A message for the whole form.
    #[error("{0}")]
    Global(String),

    /// Anything else (transport failures, unexpected payloads).
    #[error("Unknown submission failure: {0}")]
    Unknown(#[from] anyhow::Error),
}

impl SubmitError {
    /// Create a field error for a single field.
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fields(FieldErrors::new().with(name, message))
    }

    pub fn global(message: impl Into<String>) -> Self {
        Self::Global(message.into())
    }

    /// Create an unknown error from any error type.
    pub fn unknown(err: impl Into<anyhow::Error>) -> Self {
        Self::Unknown(err.into())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl From<FieldErrors> for SubmitError {
    fn from(errors: FieldErrors) -> Self {
        Self::Fields(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            FormError::DuplicateField("name".into()).to_string(),
            "Duplicate field name: name"
        );
        assert_eq!(SubmitError::global("Server is down").to_string(), "Server is down");
        assert_eq!(
            SubmitError::field("name", "already taken").to_string(),
            "Submission rejected 1 field(s)"
        );
    }

    #[test]
    fn unknown_wraps_any_error() {
        let err = SubmitError::unknown(std::io::Error::other("connection reset"));
        assert!(err.is_unknown());
        assert!(err.to_string().contains("connection reset"));
    }
}
