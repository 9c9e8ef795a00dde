//! A form inside a modal, wired to a persistence boundary.
//!
//! [`ModalForm`] connects a [`FormEngine`] to a [`ModalShell`]: engine events
//! drive the submit button, submissions pull the extraction, and submission
//! failures are routed back into the form or the banner.

use formbind_types::{
    ControlInput, FieldDescriptor, FieldErrors, FieldValue, FieldValues, FormError, SubmitError,
};
use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::config::ModalConfig;
use crate::engine::{FieldView, FormEngine, FormEvent, FormUpdate};
use crate::shell::{HandleOutcome, ModalShell, Settlement, ShellState};
use crate::trigger::Flight;

/// The pending result of a submission.
pub type SubmitFuture = LocalBoxFuture<'static, Result<(), SubmitError>>;

/// The persistence boundary: receives the extracted values.
pub type SubmitHandler = Box<dyn FnMut(FieldValues) -> SubmitFuture>;

type Hook = Box<dyn FnMut()>;

/// Transient state of one modal lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterState {
    /// Field errors returned by the last failed submission.
    pub field_errors: FieldErrors,

    /// Message for the whole form from the last failed submission.
    pub global_message: Option<String>,

    /// The user changed at least one field since opening.
    pub touched: bool,

    /// The engine last reported an invalid form.
    pub failed: bool,
}

pub struct ModalForm {
    shell: ModalShell,
    engine: FormEngine,
    on_submit: SubmitHandler,
    on_open: Option<Hook>,
    on_touch: Option<Hook>,
    state: AdapterState,
    ready: bool,
}

impl ModalForm {
    pub fn new(
        config: ModalConfig,
        descriptors: Vec<FieldDescriptor>,
        on_submit: SubmitHandler,
    ) -> Result<Self, FormError> {
        let mut form = Self {
            shell: ModalShell::new(config),
            engine: FormEngine::new(descriptors)?,
            on_submit,
            on_open: None,
            on_touch: None,
            state: AdapterState::default(),
            ready: false,
        };
        form.pump_events();
        Ok(form)
    }

    /// Install a cross-field validator on the engine.
    pub fn with_cross_validator(
        mut self,
        validator: impl Fn(&FieldValues) -> FieldErrors + Send + Sync + 'static,
    ) -> Self {
        self.engine = self.engine.with_cross_validator(validator);
        self
    }

    /// Called every time the modal opens, before it becomes interactive.
    pub fn with_on_open(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_open = Some(Box::new(hook));
        self
    }

    /// Called on every field change.
    pub fn with_on_touch(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_touch = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &ModalConfig {
        self.shell.config()
    }

    /// Replace the configured title, e.g. when one dialog serves create and edit.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.shell.set_title(title);
    }

    pub fn shell(&self) -> &ModalShell {
        &self.shell
    }

    pub fn engine(&self) -> &FormEngine {
        &self.engine
    }

    pub fn state(&self) -> &AdapterState {
        &self.state
    }

    pub fn views(&self) -> Vec<FieldView<'_>> {
        self.engine.views()
    }

    pub fn is_open(&self) -> bool {
        self.shell.is_open()
    }

    pub fn is_submitting(&self) -> bool {
        self.shell.state() == ShellState::Submitting
    }

    /// The error banner: a global or unknown submission failure.
    pub fn banner(&self) -> Option<&str> {
        self.shell.banner()
    }

    /// Submit is enabled only for a touched, valid form with no submission
    /// in flight.
    pub fn submit_enabled(&self) -> bool {
        self.ready && self.state.touched && !self.state.failed && self.shell.can_submit()
    }

    /// Open the modal with a clean form.
    pub fn open(&mut self) {
        self.state = AdapterState::default();
        self.engine.reset();
        self.engine.commit();

        self.shell.open(|| {
            if let Some(hook) = self.on_open.as_mut() {
                hook();
            }
        });
        self.pump_events();
    }

    /// Close without submitting.
    pub fn cancel(&mut self) {
        self.shell.close();
    }

    /// Record a raw value for a field and commit.
    pub fn change(&mut self, name: &str, raw: impl Into<FieldValue>) -> Result<(), FormError> {
        self.engine.change(name, raw)?;
        self.engine.commit();
        self.pump_events();
        Ok(())
    }

    /// Route a control interaction to a field and commit.
    pub fn input(&mut self, name: &str, input: &ControlInput) -> Result<bool, FormError> {
        let changed = self.engine.input(name, input)?;
        self.engine.commit();
        self.pump_events();
        Ok(changed)
    }

    /// Apply host-side changes (descriptors, external errors, `fresh`).
    pub fn update(&mut self, update: FormUpdate) -> Result<(), FormError> {
        let result = self.engine.update(update);
        self.pump_events();
        result
    }

    /// Start a submission.
    ///
    /// Returns `None` when submit is disabled. The returned flight must be
    /// driven to completion and handed to [`settle`](Self::settle).
    pub fn submit(&mut self) -> Option<Flight<Settlement>> {
        if !self.submit_enabled() {
            return None;
        }

        self.state.global_message = None;
        self.shell.set_banner(None);

        let flight = self.shell.submit(|| match self.engine.extract() {
            None => async { Ok(HandleOutcome::Keep) }.boxed_local(),
            Some(values) => {
                let submission = (self.on_submit)(values);
                async move { submission.await.map(|()| HandleOutcome::Close) }.boxed_local()
            }
        });

        self.pump_events();
        flight
    }

    /// Apply a finished submission. Returns `false` if it was stale.
    pub fn settle(&mut self, settlement: Settlement) -> bool {
        if !self.shell.is_current(settlement.ticket)
            || self.shell.state() != ShellState::Submitting
        {
            return self.shell.settle(settlement);
        }

        let Settlement { ticket, result } = settlement;
        let result = match result {
            Ok(HandleOutcome::Close) => {
                self.clear_transient();
                Ok(HandleOutcome::Close)
            }
            Ok(HandleOutcome::Keep) => Ok(HandleOutcome::Keep),
            Err(SubmitError::Fields(errors)) => {
                self.state.field_errors = errors.clone();
                self.engine.assign_errors(errors);
                Ok(HandleOutcome::Keep)
            }
            Err(SubmitError::Global(message)) => {
                self.state.global_message = Some(message.clone());
                Err(SubmitError::Global(message))
            }
            Err(err) => {
                self.state.global_message =
                    Some(self.shell.config().unknown_error_message().to_string());
                Err(err)
            }
        };

        let applied = self.shell.settle(Settlement { ticket, result });
        self.pump_events();
        applied
    }

    fn clear_transient(&mut self) {
        self.state = AdapterState::default();
        self.engine.reset();
        self.engine.commit();
    }

    fn pump_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                FormEvent::Ready => self.ready = true,
                FormEvent::Touched => {
                    self.state.touched = true;
                    self.state.global_message = None;
                    self.shell.set_banner(None);
                    if let Some(hook) = self.on_touch.as_mut() {
                        hook();
                    }
                }
                FormEvent::Validity { invalid } => self.state.failed = invalid,
            }
        }

        self.shell
            .set_submit_disabled(!self.state.touched || self.state.failed);
    }
}
