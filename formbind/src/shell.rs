//! The modal shell: open/close lifecycle, error banner, submit button state.

use formbind_types::SubmitError;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tracing::{debug, error};

use crate::config::ModalConfig;
use crate::trigger::{Flight, SingleFlight};

/// Lifecycle of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    #[default]
    Closed,

    /// The open hook is running; the modal is not interactive yet.
    Opening,

    Open,

    /// A submission is in flight.
    Submitting,
}

/// What the modal does after a successful submit handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Stay open (e.g. the form refused to extract).
    Keep,
    Close,
}

pub type HandleResult = Result<HandleOutcome, SubmitError>;

/// Identifies the lifecycle a submission was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    lifecycle: u64,
}

/// The outcome of a submission, to be handed back to [`ModalShell::settle`].
#[derive(Debug)]
pub struct Settlement {
    pub ticket: Ticket,
    pub result: HandleResult,
}

/// Generic modal around a submit handler.
#[derive(Debug)]
pub struct ModalShell {
    config: ModalConfig,
    state: ShellState,
    banner: Option<String>,
    trigger: SingleFlight,
    lifecycle: u64,
    submit_disabled: bool,
}

impl ModalShell {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            state: ShellState::Closed,
            banner: None,
            trigger: SingleFlight::new(),
            lifecycle: 0,
            submit_disabled: false,
        }
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config = std::mem::take(&mut self.config).with_title(title);
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Open or submitting.
    pub fn is_open(&self) -> bool {
        matches!(self.state, ShellState::Open | ShellState::Submitting)
    }

    /// Whether a submission is outstanding, possibly from an earlier lifecycle.
    pub fn is_busy(&self) -> bool {
        self.trigger.is_busy()
    }

    /// The error banner, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn set_banner(&mut self, message: Option<String>) {
        self.banner = message;
    }

    /// Controlled by the content: e.g. untouched or invalid forms.
    pub fn set_submit_disabled(&mut self, disabled: bool) {
        self.submit_disabled = disabled;
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.submit_disabled
    }

    /// Whether the submit button is shown as enabled.
    pub fn can_submit(&self) -> bool {
        self.state == ShellState::Open && !self.submit_disabled && !self.is_busy()
    }

    /// Whether a ticket belongs to the current lifecycle.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.lifecycle == self.lifecycle
    }

    /// Open the modal. `on_open` runs before the modal becomes interactive.
    pub fn open(&mut self, on_open: impl FnOnce()) {
        self.lifecycle += 1;
        self.state = ShellState::Opening;
        self.banner = None;
        on_open();
        self.state = ShellState::Open;
    }

    /// Close the modal. An outstanding submission is not cancelled; its
    /// settlement will be ignored.
    pub fn close(&mut self) {
        if self.state == ShellState::Submitting {
            debug!("closing while a submission is in flight");
        }
        self.state = ShellState::Closed;
    }

    /// Start the submit handler through the single-flight trigger.
    ///
    /// Returns `None` if the modal is not open or a submission is already
    /// in flight.
    pub fn submit(
        &mut self,
        handle: impl FnOnce() -> LocalBoxFuture<'static, HandleResult>,
    ) -> Option<Flight<Settlement>> {
        if self.state != ShellState::Open {
            debug!(state = ?self.state, "ignoring submit outside of the open state");
            return None;
        }

        let ticket = Ticket {
            lifecycle: self.lifecycle,
        };
        let flight = self.trigger.trigger(move || {
            let pending = handle();
            async move {
                Settlement {
                    ticket,
                    result: pending.await,
                }
            }
            .boxed_local()
        })?;

        self.state = ShellState::Submitting;
        self.banner = None;
        Some(flight)
    }

    /// Apply a finished submission. Returns `false` if it was stale.
    pub fn settle(&mut self, settlement: Settlement) -> bool {
        if !self.is_current(settlement.ticket) || self.state != ShellState::Submitting {
            debug!(state = ?self.state, "ignoring stale settlement");
            return false;
        }

        self.state = match settlement.result {
            Ok(HandleOutcome::Keep) => ShellState::Open,
            Ok(HandleOutcome::Close) => ShellState::Closed,
            Err(SubmitError::Global(message)) => {
                self.banner = Some(message);
                ShellState::Open
            }
            Err(err) => {
                error!(error = ?err, "submission failed");
                self.banner = Some(self.config.unknown_error_message().to_string());
                ShellState::Open
            }
        };

        true
    }
}
