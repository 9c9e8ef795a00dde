//! Scripted persistence boundary for testing dialogs without a store.
//!
//! `ScriptedSubmitter` hands out queued results to submissions and records
//! every value map it was called with.
//!
//! # Example
//!
//! ```rust
//! use formbind::{FieldDescriptor, ModalConfig, ModalForm, ScriptedSubmitter, SubmitError};
//! use futures::executor::block_on;
//!
//! let submitter = ScriptedSubmitter::new()
//!     .with_error(SubmitError::field("name", "already taken"))
//!     .with_ok();
//!
//! let mut form = ModalForm::new(
//!     ModalConfig::new("New subject"),
//!     vec![FieldDescriptor::text("name", "Name").required()],
//!     submitter.handler(),
//! )
//! .unwrap();
//!
//! form.open();
//! form.change("name", "Ada").unwrap();
//! let settlement = block_on(form.submit().unwrap());
//! form.settle(settlement);
//!
//! assert_eq!(form.engine().error("name"), Some("already taken"));
//! assert_eq!(submitter.call_count(), 1);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use formbind_types::{FieldValues, SubmitError};
use futures::FutureExt;
use futures::channel::oneshot;

use crate::adapter::SubmitHandler;

/// A submission result that can be completed later.
pub type Deferred = oneshot::Sender<Result<(), SubmitError>>;

enum Reply {
    Now(Result<(), SubmitError>),
    Later(oneshot::Receiver<Result<(), SubmitError>>),
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    calls: Vec<FieldValues>,
}

/// A submit handler returning pre-configured results.
///
/// Clones share the same script. Once the queue runs dry every submission
/// succeeds.
#[derive(Clone, Default)]
pub struct ScriptedSubmitter {
    script: Rc<RefCell<Script>>,
}

impl ScriptedSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful submission.
    pub fn with_ok(self) -> Self {
        self.push(Reply::Now(Ok(())));
        self
    }

    /// Queue a failed submission.
    pub fn with_error(self, error: SubmitError) -> Self {
        self.push(Reply::Now(Err(error)));
        self
    }

    /// Queue a submission that stays pending until the returned sender fires.
    ///
    /// Dropping the sender fails the submission as unknown.
    pub fn defer(&self) -> Deferred {
        let (tx, rx) = oneshot::channel();
        self.push(Reply::Later(rx));
        tx
    }

    /// All value maps submitted so far.
    pub fn calls(&self) -> Vec<FieldValues> {
        self.script.borrow().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.borrow().calls.len()
    }

    pub fn last_call(&self) -> Option<FieldValues> {
        self.script.borrow().calls.last().cloned()
    }

    /// A submit handler for [`ModalForm`](crate::ModalForm).
    pub fn handler(&self) -> SubmitHandler {
        let script = Rc::clone(&self.script);

        Box::new(move |values| {
            let reply = {
                let mut script = script.borrow_mut();
                script.calls.push(values);
                script.replies.pop_front()
            };

            match reply {
                None => async { Ok(()) }.boxed_local(),
                Some(Reply::Now(result)) => async move { result }.boxed_local(),
                Some(Reply::Later(rx)) => async move {
                    match rx.await {
                        Ok(result) => result,
                        Err(canceled) => Err(SubmitError::unknown(canceled)),
                    }
                }
                .boxed_local(),
            }
        })
    }

    fn push(&self, reply: Reply) {
        self.script.borrow_mut().replies.push_back(reply);
    }
}
