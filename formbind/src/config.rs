/// Presentation settings of a modal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    title: String,
    submit_label: String,
    cancel_label: Option<String>,
    unknown_error_message: String,
}

impl ModalConfig {
    pub const DEFAULT_SUBMIT_LABEL: &'static str = "Save";
    pub const DEFAULT_UNKNOWN_ERROR: &'static str = "Unknown error";

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Show a cancel button next to the submit button.
    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    /// The banner text shown for failures that carry no user-facing message.
    pub fn with_unknown_error_message(mut self, message: impl Into<String>) -> Self {
        self.unknown_error_message = message.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn cancel_label(&self) -> Option<&str> {
        self.cancel_label.as_deref()
    }

    pub fn unknown_error_message(&self) -> &str {
        &self.unknown_error_message
    }
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            title: "Form".to_string(),
            submit_label: Self::DEFAULT_SUBMIT_LABEL.to_string(),
            cancel_label: None,
            unknown_error_message: Self::DEFAULT_UNKNOWN_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ModalConfig::new("New subject");
        assert_eq!(config.title(), "New subject");
        assert_eq!(config.submit_label(), "Save");
        assert_eq!(config.cancel_label(), None);
        assert_eq!(config.unknown_error_message(), "Unknown error");
    }

    #[test]
    fn builders() {
        let config = ModalConfig::default()
            .with_submit_label("Create")
            .with_cancel_label("Close");
        assert_eq!(config.submit_label(), "Create");
        assert_eq!(config.cancel_label(), Some("Close"));
    }
}
