//! A modal that asks before running an action. There is no form inside:
//! the shell's submit button confirms, its banner shows failures.

use futures::FutureExt;

use crate::adapter::SubmitFuture;
use crate::config::ModalConfig;
use crate::shell::{HandleOutcome, ModalShell, Settlement, ShellState};
use crate::trigger::Flight;

/// The confirmed action.
pub type ConfirmHandler = Box<dyn FnMut() -> SubmitFuture>;

pub struct Confirmation {
    shell: ModalShell,
    message: String,
    on_confirm: ConfirmHandler,
}

impl Confirmation {
    pub fn new(config: ModalConfig, message: impl Into<String>, on_confirm: ConfirmHandler) -> Self {
        Self {
            shell: ModalShell::new(config),
            message: message.into(),
            on_confirm,
        }
    }

    pub fn config(&self) -> &ModalConfig {
        self.shell.config()
    }

    pub fn shell(&self) -> &ModalShell {
        &self.shell
    }

    /// The question shown to the user.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_open(&self) -> bool {
        self.shell.is_open()
    }

    pub fn is_confirming(&self) -> bool {
        self.shell.state() == ShellState::Submitting
    }

    pub fn banner(&self) -> Option<&str> {
        self.shell.banner()
    }

    pub fn open(&mut self) {
        self.shell.open(|| {});
    }

    pub fn cancel(&mut self) {
        self.shell.close();
    }

    /// Run the action. `None` while it is already running or the modal is closed.
    pub fn confirm(&mut self) -> Option<Flight<Settlement>> {
        self.shell.submit(|| {
            let pending = (self.on_confirm)();
            async move { pending.await.map(|()| HandleOutcome::Close) }.boxed_local()
        })
    }

    /// Apply a finished action. Returns `false` if it was stale.
    pub fn settle(&mut self, settlement: Settlement) -> bool {
        self.shell.settle(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind_types::SubmitError;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    fn confirmation(result: Result<(), SubmitError>) -> (Confirmation, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut result = Some(result);

        let dialog = Confirmation::new(
            ModalConfig::new("Remove").with_submit_label("Proceed"),
            "Really?",
            Box::new(move || {
                counter.set(counter.get() + 1);
                let result = result.take().unwrap_or(Ok(()));
                async move { result }.boxed_local()
            }),
        );
        (dialog, calls)
    }

    #[test]
    fn success_closes() {
        let (mut dialog, calls) = confirmation(Ok(()));
        dialog.open();

        let settlement = block_on(dialog.confirm().unwrap());
        assert!(dialog.settle(settlement));

        assert!(!dialog.is_open());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn global_error_stays_open_with_banner() {
        let (mut dialog, _) = confirmation(Err(SubmitError::global("Still referenced")));
        dialog.open();

        let settlement = block_on(dialog.confirm().unwrap());
        dialog.settle(settlement);

        assert!(dialog.is_open());
        assert_eq!(dialog.banner(), Some("Still referenced"));

        // retrying hides the old message while the action runs
        let flight = dialog.confirm().unwrap();
        assert_eq!(dialog.banner(), None);
        dialog.settle(block_on(flight));
        assert!(!dialog.is_open());
    }

    #[test]
    fn confirm_is_single_flight() {
        let (tx, rx) = oneshot::channel::<Result<(), SubmitError>>();
        let mut rx = Some(rx);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let mut dialog = Confirmation::new(
            ModalConfig::default(),
            "Really?",
            Box::new(move || {
                counter.set(counter.get() + 1);
                let rx = rx.take();
                async move {
                    match rx {
                        Some(rx) => rx.await.unwrap_or(Ok(())),
                        None => Ok(()),
                    }
                }
                .boxed_local()
            }),
        );
        dialog.open();

        let flight = dialog.confirm().unwrap();
        assert!(dialog.is_confirming());
        assert!(dialog.confirm().is_none());

        tx.send(Ok(())).unwrap();
        assert!(dialog.settle(block_on(flight)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn closed_dialog_does_not_confirm() {
        let (mut dialog, calls) = confirmation(Ok(()));
        assert!(dialog.confirm().is_none());
        assert_eq!(calls.get(), 0);
    }
}
