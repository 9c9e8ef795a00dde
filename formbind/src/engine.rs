//! The form engine: live per-field state, validation and extraction.
//!
//! The engine never decides when to submit. It publishes a [`FormEvent::Ready`]
//! once, after which the host may call [`FormEngine::extract`] whenever it
//! wants a result.
//!
//! Every host interaction is one update cycle with two phases:
//! 1. apply: field changes, external errors, descriptor reconciliation and
//!    the `fresh` reset mutate the input state,
//! 2. post-commit: queued tasks (validity notifications) run against the
//!    committed state.
//!
//! Validity is therefore never computed against stale field membership.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use formbind_types::{
    Control, ControlInput, FieldDescriptor, FieldErrors, FieldKind, FieldValue, FieldValues,
    FormError, Options, RenderHints,
};
use tracing::{trace, warn};

/// Validator over the whole value map, run after every field passed.
pub type CrossValidator = Arc<dyn Fn(&FieldValues) -> FieldErrors + Send + Sync>;

/// Notifications published by the engine, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// Extraction is available. Published exactly once per engine.
    Ready,

    /// A field received a change from the user.
    Touched,

    /// Whether any enabled field currently carries an error.
    Validity { invalid: bool },
}

/// Host-side changes applied in one update cycle.
///
/// Unset parts are left as they are.
#[derive(Debug, Clone, Default)]
pub struct FormUpdate {
    descriptors: Option<Vec<FieldDescriptor>>,
    errors: Option<FieldErrors>,
    fresh: Option<bool>,
}

impl FormUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the descriptor list.
    pub fn descriptors(mut self, descriptors: Vec<FieldDescriptor>) -> Self {
        self.descriptors = Some(descriptors);
        self
    }

    /// Merge externally supplied errors (first error per field wins).
    pub fn errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Set the `fresh` signal. A false-to-true transition clears all input.
    pub fn fresh(mut self, fresh: bool) -> Self {
        self.fresh = Some(fresh);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct FieldInput {
    /// `None` until the user enters something; the converted default shows.
    value: Option<FieldValue>,
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PostCommit {
    ReportValidity,
}

/// What a control needs to render one field.
#[derive(Debug, Clone)]
pub struct FieldView<'a> {
    descriptor: &'a FieldDescriptor,
    value: FieldValue,
    error: Option<&'a str>,
}

impl<'a> FieldView<'a> {
    pub fn descriptor(&self) -> &'a FieldDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'a str {
        self.descriptor.name()
    }

    pub fn label(&self) -> &'a str {
        self.descriptor.label()
    }

    pub fn kind(&self) -> &'a FieldKind {
        self.descriptor.kind()
    }

    pub fn hints(&self) -> &'a RenderHints {
        self.descriptor.extra()
    }

    pub fn is_disabled(&self) -> bool {
        self.descriptor.is_disabled()
    }

    pub fn is_required(&self) -> bool {
        self.descriptor.is_required()
    }

    /// The value as the control shows it (normalised for the field kind).
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// The current error. Disabled fields never have one.
    pub fn error(&self) -> Option<&'a str> {
        self.error
    }
}

/// Owns the input state of one form.
pub struct FormEngine {
    descriptors: Vec<FieldDescriptor>,
    inputs: HashMap<String, FieldInput>,
    cross_validator: Option<CrossValidator>,
    /// Last seen value of the `fresh` signal. Absent signals count as `true`.
    fresh: bool,
    post_commit: Vec<PostCommit>,
    events: Vec<FormEvent>,
}

impl FormEngine {
    /// Create an engine for a descriptor list.
    ///
    /// Fails on duplicate names and on enumerations without options.
    pub fn new(descriptors: Vec<FieldDescriptor>) -> Result<Self, FormError> {
        check_descriptors(&descriptors)?;

        Ok(Self {
            descriptors,
            inputs: HashMap::new(),
            cross_validator: None,
            fresh: true,
            post_commit: Vec::new(),
            events: vec![FormEvent::Ready],
        })
    }

    /// Install a cross-field validator.
    pub fn with_cross_validator(
        mut self,
        validator: impl Fn(&FieldValues) -> FieldErrors + Send + Sync + 'static,
    ) -> Self {
        self.cross_validator = Some(Arc::new(validator));
        self
    }

    pub fn set_cross_validator(&mut self, validator: Option<CrossValidator>) {
        self.cross_validator = validator;
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        find(&self.descriptors, name)
    }

    /// One view per descriptor, in descriptor order.
    pub fn views(&self) -> Vec<FieldView<'_>> {
        self.descriptors.iter().map(|d| self.view_of(d)).collect()
    }

    pub fn view(&self, name: &str) -> Option<FieldView<'_>> {
        self.descriptor(name).map(|d| self.view_of(d))
    }

    /// The effective value of a field: what was entered, or the converted default.
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.descriptor(name)
            .map(|d| effective_value(d, &self.inputs))
    }

    /// The current error of a field. Disabled and unknown fields have none.
    pub fn error(&self, name: &str) -> Option<&str> {
        enabled(&self.descriptors, name).ok()?;
        self.inputs.get(name).and_then(|input| input.error.as_deref())
    }

    /// Whether any enabled field of the current list carries an error.
    pub fn is_invalid(&self) -> bool {
        self.inputs.iter().any(|(name, input)| {
            input.error.is_some() && enabled(&self.descriptors, name).is_ok()
        })
    }

    /// Whether the user entered anything since the last reset.
    pub fn is_pristine(&self) -> bool {
        self.inputs.values().all(|input| input.value.is_none())
    }

    /// Record a raw value emitted by a field's control.
    ///
    /// Validates it, stores value and error, fires the field's `on_input`
    /// hook and publishes [`FormEvent::Touched`]. The validity notification
    /// is queued until the end of the current update cycle.
    pub fn change(&mut self, name: &str, raw: impl Into<FieldValue>) -> Result<(), FormError> {
        let raw = raw.into();
        let descriptor = enabled(&self.descriptors, name)?;

        let error = descriptor.check(&raw);
        let emitted = if error.is_some() {
            raw.clone()
        } else {
            descriptor.convert_out_value(&raw)
        };
        descriptor.notify_input(&emitted);

        self.inputs.insert(
            name.to_string(),
            FieldInput {
                value: Some(raw),
                error,
            },
        );
        self.events.push(FormEvent::Touched);
        self.schedule(PostCommit::ReportValidity);
        Ok(())
    }

    /// Route a control interaction through the field kind, then [`change`](Self::change).
    ///
    /// Returns `false` when the interaction does not apply to the field.
    pub fn input(&mut self, name: &str, input: &ControlInput) -> Result<bool, FormError> {
        let descriptor = enabled(&self.descriptors, name)?;
        let current = effective_value(descriptor, &self.inputs);

        let Some(next) = descriptor.kind().apply(&current, input) else {
            return Ok(false);
        };

        self.change(name, next)?;
        Ok(true)
    }

    /// Run one update cycle with host-side changes.
    ///
    /// A descriptor list that fails validation is rejected before anything
    /// is applied.
    pub fn update(&mut self, update: FormUpdate) -> Result<(), FormError> {
        let FormUpdate {
            descriptors,
            errors,
            fresh,
        } = update;

        if let Some(descriptors) = &descriptors {
            check_descriptors(descriptors)?;
        }

        if let Some(descriptors) = descriptors {
            self.descriptors = descriptors;
            self.reconcile();
        }

        if let Some(fresh) = fresh {
            let previous = std::mem::replace(&mut self.fresh, fresh);
            if fresh && !previous {
                self.reset();
            }
        }

        if let Some(errors) = errors {
            self.merge_errors(errors);
        }

        self.run_post_commit();
        Ok(())
    }

    /// Run one update cycle that only merges external errors.
    ///
    /// Same filtering as [`FormUpdate::errors`]: disabled fields are skipped,
    /// unknown names are logged and dropped, existing errors are kept.
    pub fn assign_errors(&mut self, errors: FieldErrors) {
        self.merge_errors(errors);
        self.run_post_commit();
    }

    /// End the current update cycle without host-side changes.
    pub fn commit(&mut self) {
        self.run_post_commit();
    }

    /// Drop all input state. A validity notification follows on the next commit.
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.schedule(PostCommit::ReportValidity);
    }

    /// Try to extract the result.
    ///
    /// Every enabled field is validated first. Only when all pass is the
    /// value map built and handed to the cross-field validator. Any error
    /// from either pass is written back (never replacing an existing error)
    /// and the form is reported invalid.
    pub fn extract(&mut self) -> Option<FieldValues> {
        let mut errors = validate_all(&self.descriptors, &self.inputs);
        let mut result = None;

        if errors.is_empty() {
            let values = collect_values(&self.descriptors, &self.inputs);

            if let Some(cross_validate) = &self.cross_validator {
                errors = cross_validate(&values);
                errors.retain(|name| match find(&self.descriptors, name) {
                    Some(descriptor) => !descriptor.is_disabled(),
                    None => {
                        warn!(field = name, "cross-field validator reported an unknown field");
                        false
                    }
                });
            }

            result = Some(values);
        }

        if errors.is_empty() {
            return result;
        }

        for (name, message) in errors {
            merge_error(&mut self.inputs, name, message);
        }
        self.events.push(FormEvent::Validity { invalid: true });

        None
    }

    /// Take all published events.
    pub fn drain_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }

    fn view_of<'a>(&'a self, descriptor: &'a FieldDescriptor) -> FieldView<'a> {
        let value = descriptor
            .kind()
            .display(&effective_value(descriptor, &self.inputs));
        let error = if descriptor.is_disabled() {
            None
        } else {
            self.inputs
                .get(descriptor.name())
                .and_then(|input| input.error.as_deref())
        };

        FieldView {
            descriptor,
            value,
            error,
        }
    }

    fn schedule(&mut self, task: PostCommit) {
        self.post_commit.push(task);
    }

    fn run_post_commit(&mut self) {
        let mut tasks = std::mem::take(&mut self.post_commit);
        tasks.dedup();

        for task in tasks {
            match task {
                PostCommit::ReportValidity => {
                    let invalid = self.is_invalid();
                    self.events.push(FormEvent::Validity { invalid });
                }
            }
        }
    }

    /// Prune state of lost fields and of fields that just became disabled.
    fn reconcile(&mut self) {
        let descriptors = &self.descriptors;
        self.inputs.retain(|name, _| {
            let keep = enabled(descriptors, name).is_ok();
            if !keep {
                trace!(field = %name, "dropping input state of lost or disabled field");
            }
            keep
        });
        self.schedule(PostCommit::ReportValidity);
    }

    fn merge_errors(&mut self, mut errors: FieldErrors) {
        let descriptors = &self.descriptors;
        errors.retain(|name| match find(descriptors, name) {
            Some(descriptor) => !descriptor.is_disabled(),
            None => {
                warn!(field = name, "ignoring error for a field that is not part of the form");
                false
            }
        });

        for (name, message) in errors {
            merge_error(&mut self.inputs, name, message);
        }
        self.schedule(PostCommit::ReportValidity);
    }
}

fn find<'a>(descriptors: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    descriptors.iter().find(|d| d.name() == name)
}

fn enabled<'a>(
    descriptors: &'a [FieldDescriptor],
    name: &str,
) -> Result<&'a FieldDescriptor, FormError> {
    let descriptor =
        find(descriptors, name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;

    if descriptor.is_disabled() {
        return Err(FormError::DisabledField(name.to_string()));
    }

    Ok(descriptor)
}

fn check_descriptors(descriptors: &[FieldDescriptor]) -> Result<(), FormError> {
    let mut seen = HashSet::new();

    for descriptor in descriptors {
        if !seen.insert(descriptor.name()) {
            return Err(FormError::DuplicateField(descriptor.name().to_string()));
        }
        if descriptor.kind().options().is_some_and(Options::is_empty) {
            return Err(FormError::MissingOptions(descriptor.name().to_string()));
        }
    }

    Ok(())
}

fn effective_value(descriptor: &FieldDescriptor, inputs: &HashMap<String, FieldInput>) -> FieldValue {
    inputs
        .get(descriptor.name())
        .and_then(|input| input.value.clone())
        .unwrap_or_else(|| descriptor.initial_value())
}

/// First error wins: an existing message is never replaced.
fn merge_error(inputs: &mut HashMap<String, FieldInput>, name: String, message: String) {
    let input = inputs.entry(name).or_default();
    if input.error.is_none() {
        input.error = Some(message);
    }
}

fn validate_all(
    descriptors: &[FieldDescriptor],
    inputs: &HashMap<String, FieldInput>,
) -> FieldErrors {
    descriptors
        .iter()
        .filter(|d| !d.is_disabled())
        .filter_map(|d| {
            d.check(&effective_value(d, inputs))
                .map(|message| (d.name().to_string(), message))
        })
        .collect()
}

fn collect_values(
    descriptors: &[FieldDescriptor],
    inputs: &HashMap<String, FieldInput>,
) -> FieldValues {
    descriptors
        .iter()
        .filter(|d| !d.is_disabled())
        .map(|d| {
            let value = d.convert_out_value(&effective_value(d, inputs));
            (d.name().to_string(), value)
        })
        .collect()
}
