use std::fmt;
use std::sync::Arc;

use crate::{FieldValue, Options};

/// Field-level validator. Only called for non-blank values.
pub type Validator = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// One-directional value transform (`convert_in` or `convert_out`).
pub type Converter = Arc<dyn Fn(&FieldValue) -> FieldValue + Send + Sync>;

/// Side-effect hook fired on every accepted change of a field.
pub type InputHandler = Arc<dyn Fn(&FieldValue) + Send + Sync>;

/// A single field of a flat form.
///
/// Descriptors are immutable and supplied by the host on every update.
/// The engine identifies "the same field" across updates by `name` only.
#[derive(Clone)]
pub struct FieldDescriptor {
    /// Unique key within one descriptor list.
    name: String,

    /// The label shown next to the control.
    label: String,

    /// The kind of control (determines interaction and options).
    kind: FieldKind,

    /// Raw default value, passed through `convert_in` before display.
    value: FieldValue,

    disabled: bool,

    required: Required,

    validator: Option<Validator>,

    convert_in: Option<Converter>,

    convert_out: Option<Converter>,

    on_input: Option<InputHandler>,

    /// Render hints, opaque to validation.
    extra: RenderHints,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            value: FieldValue::Blank,
            disabled: false,
            required: Required::No,
            validator: None,
            convert_in: None,
            convert_out: None,
            on_input: None,
            extra: RenderHints::default(),
        }
    }

    /// Single-line text input.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Checkbox holding a boolean.
    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    /// Drop-down selection over `options`.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: impl Into<Options>,
    ) -> Self {
        Self::new(name, label, FieldKind::Select(options.into()))
    }

    /// Radio group over `options`.
    pub fn radio(
        name: impl Into<String>,
        label: impl Into<String>,
        options: impl Into<Options>,
    ) -> Self {
        Self::new(name, label, FieldKind::Radio(options.into()))
    }

    // === Builder ===

    /// Set the raw default value.
    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    /// Blank values fail with [`Required::DEFAULT_MESSAGE`].
    pub fn required(mut self) -> Self {
        self.required = Required::Yes;
        self
    }

    /// Blank values fail with a custom message.
    pub fn required_with(mut self, message: impl Into<String>) -> Self {
        self.required = Required::WithMessage(message.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Attach a validator for non-blank values.
    pub fn validate(
        mut self,
        f: impl Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(f));
        self
    }

    /// Transform the raw default into the displayed value.
    pub fn convert_in(
        mut self,
        f: impl Fn(&FieldValue) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.convert_in = Some(Arc::new(f));
        self
    }

    /// Transform the entered value into the domain value.
    pub fn convert_out(
        mut self,
        f: impl Fn(&FieldValue) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.convert_out = Some(Arc::new(f));
        self
    }

    /// Observe every accepted change of this field.
    pub fn on_input(mut self, f: impl Fn(&FieldValue) + Send + Sync + 'static) -> Self {
        self.on_input = Some(Arc::new(f));
        self
    }

    pub fn multiline(mut self) -> Self {
        self.extra.multiline = true;
        self
    }

    pub fn masked(mut self) -> Self {
        self.extra.masked = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.extra.placeholder = Some(placeholder.into());
        self
    }

    pub fn hints(mut self, extra: RenderHints) -> Self {
        self.extra = extra;
        self
    }

    // === Accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The raw default value (before `convert_in`).
    pub fn default_value(&self) -> &FieldValue {
        &self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_required(&self) -> bool {
        !matches!(self.required, Required::No)
    }

    pub fn requirement(&self) -> &Required {
        &self.required
    }

    pub fn extra(&self) -> &RenderHints {
        &self.extra
    }

    // === Field functions ===

    /// Validate a value: the required check for blank values, the custom
    /// validator otherwise.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        if value.is_blank() {
            return self.required.message().map(str::to_string);
        }

        self.validator.as_ref().and_then(|validate| validate(value))
    }

    /// Apply `convert_in` to a raw value. Blank values stay blank.
    pub fn convert_in_value(&self, raw: &FieldValue) -> FieldValue {
        if raw.is_blank() {
            return FieldValue::Blank;
        }

        match &self.convert_in {
            Some(convert) => convert(raw),
            None => raw.clone(),
        }
    }

    /// Apply `convert_out` to an entered value. Blank values stay blank.
    pub fn convert_out_value(&self, value: &FieldValue) -> FieldValue {
        if value.is_blank() {
            return FieldValue::Blank;
        }

        match &self.convert_out {
            Some(convert) => convert(value),
            None => value.clone(),
        }
    }

    /// The value displayed for a field nobody has touched yet.
    pub fn initial_value(&self) -> FieldValue {
        self.convert_in_value(&self.value)
    }

    /// Fire the `on_input` hook, if any.
    pub fn notify_input(&self, value: &FieldValue) {
        if let Some(handler) = &self.on_input {
            handler(value);
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("disabled", &self.disabled)
            .field("required", &self.required)
            .field("validator", &self.validator.is_some())
            .field("convert_in", &self.convert_in.is_some())
            .field("convert_out", &self.convert_out.is_some())
            .field("on_input", &self.on_input.is_some())
            .field("extra", &self.extra)
            .finish()
    }
}

/// The kind of control a field is rendered as.
///
/// Enumerations carry their options, so a `Select` or `Radio` without
/// options cannot be described at all.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text input.
    Text,

    /// Pick one option from a drop-down.
    Select(Options),

    /// On/off toggle.
    Checkbox,

    /// Pick one option from a visible group.
    Radio(Options),
}

impl FieldKind {
    /// Options of enumeration kinds.
    pub fn options(&self) -> Option<&Options> {
        match self {
            Self::Select(options) | Self::Radio(options) => Some(options),
            Self::Text | Self::Checkbox => None,
        }
    }

    /// Short lowercase tag, e.g. for logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Select(_) => "select",
            Self::Checkbox => "checkbox",
            Self::Radio(_) => "radio",
        }
    }
}

/// Whether a blank value is acceptable, and what to say if it is not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Required {
    #[default]
    No,

    /// Required, reported with [`Required::DEFAULT_MESSAGE`].
    Yes,

    /// Required, reported with a custom message.
    WithMessage(String),
}

impl Required {
    pub const DEFAULT_MESSAGE: &'static str = "It's required!";

    /// The message to report for a blank value, `None` if blank is fine.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::No => None,
            Self::Yes => Some(Self::DEFAULT_MESSAGE),
            Self::WithMessage(message) => Some(message),
        }
    }
}

impl From<bool> for Required {
    fn from(required: bool) -> Self {
        if required { Self::Yes } else { Self::No }
    }
}

/// Presentation hints. Never consulted by validation or extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderHints {
    pub multiline: bool,
    pub masked: bool,
    pub placeholder: Option<String>,
}
