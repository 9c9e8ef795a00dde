//! Terminal run loop for a [`ModalForm`].
//!
//! Key events and the pending submission are handled in turns: the loop
//! polls the terminal for at most `poll_interval`, then polls the in-flight
//! submission once. Repeated submit presses while a submission is pending
//! hit the form's single-flight guard.

use std::io::{self, Stdout};
use std::task::{Context, Poll};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use formbind::{Flight, ModalForm, Settlement};
use futures::FutureExt;
use futures::task::noop_waker_ref;
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use thiserror::Error;
use tracing::debug;

use crate::draw::draw_modal;
use crate::view::{KeyAction, ModalView};

/// Error type for the Ratatui modal backend.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// User cancelled the dialog (e.g., pressed Esc).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Color theme for the TUI modal.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Runs a modal form in the terminal until it closes.
#[derive(Debug, Clone)]
pub struct RatatuiModalBackend {
    /// Overrides the form's configured title when set.
    title: Option<String>,
    theme: Theme,
    poll_interval: Duration,
}

impl Default for RatatuiModalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiModalBackend {
    pub fn new() -> Self {
        Self {
            title: None,
            theme: Theme::default(),
            poll_interval: Duration::from_millis(50),
        }
    }

    /// Set the title shown at the top of the modal.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// How long to wait for a key before checking the pending submission.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Open the form (if needed) and drive it until it closes.
    ///
    /// Returns `Ok(())` once a submission succeeded and the modal closed,
    /// [`RatatuiFormError::Cancelled`] if the user cancelled.
    pub fn run(&self, form: &mut ModalForm) -> Result<(), RatatuiFormError> {
        if let Some(title) = &self.title {
            form.set_title(title.clone());
        }
        if !form.is_open() {
            form.open();
        }

        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, form);
        self.restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        form: &mut ModalForm,
    ) -> Result<(), RatatuiFormError> {
        let mut view = ModalView::new();
        view.reset(form);
        let mut pending: Option<Flight<Settlement>> = None;

        loop {
            terminal.draw(|frame| draw_modal(frame, form, &view, &self.theme))?;

            if let Some(settlement) = poll_pending(&mut pending) {
                form.settle(settlement);
            }
            if !form.is_open() {
                return Ok(());
            }

            if !event::poll(self.poll_interval)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match view.handle_key(form, key) {
                KeyAction::Submit => match form.submit() {
                    Some(flight) => pending = Some(flight),
                    None => debug!("submit ignored"),
                },
                KeyAction::Cancel => {
                    form.cancel();
                    return Err(RatatuiFormError::Cancelled);
                }
                KeyAction::None => {}
            }
        }
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFormError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiFormError> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Poll the pending submission once. Clears it when finished.
fn poll_pending(pending: &mut Option<Flight<Settlement>>) -> Option<Settlement> {
    let flight = pending.as_mut()?;
    let mut cx = Context::from_waker(noop_waker_ref());

    match flight.poll_unpin(&mut cx) {
        Poll::Ready(settlement) => {
            *pending = None;
            Some(settlement)
        }
        Poll::Pending => None,
    }
}
