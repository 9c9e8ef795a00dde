//! In-memory subject store behind the dialogs' persistence boundary.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use formbind::{ConfirmHandler, FieldValues, SubmitError, SubmitFuture, SubmitHandler};
use futures::FutureExt;
use futures::channel::oneshot;
use tracing::info;

use crate::subject::{Subject, SubjectDraft};

#[derive(Default)]
struct StoreState {
    subjects: Vec<Subject>,
    next_id: u64,
    latency: Option<Duration>,
    fail_next: Option<SubmitError>,
}

/// Subjects kept in memory. Clones share the same store.
///
/// Replies can be delayed with [`with_latency`](Self::with_latency) so a
/// terminal dialog shows its in-flight state.
#[derive(Clone, Default)]
pub struct SubjectStore {
    state: Rc<RefCell<StoreState>>,
}

impl SubjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.state.borrow_mut().latency = Some(latency);
        self
    }

    /// Make the next write fail with `error`.
    pub fn fail_next(&self, error: SubmitError) {
        self.state.borrow_mut().fail_next = Some(error);
    }

    pub fn subjects(&self) -> Vec<Subject> {
        self.state.borrow().subjects.clone()
    }

    pub fn get(&self, id: u64) -> Option<Subject> {
        self.state
            .borrow()
            .subjects
            .iter()
            .find(|subject| subject.id == id)
            .cloned()
    }

    pub fn create(&self, draft: SubjectDraft) -> Result<Subject, SubmitError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        check_unique_name(&state.subjects, &draft.name, None)?;

        state.next_id += 1;
        let subject = Subject {
            id: state.next_id,
            name: draft.name,
            notes: draft.notes,
            opinion: draft.opinion,
            created_at: Utc::now(),
        };
        info!(id = subject.id, name = %subject.name, "subject created");
        state.subjects.push(subject.clone());

        Ok(subject)
    }

    pub fn update(&self, id: u64, draft: SubjectDraft) -> Result<Subject, SubmitError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        check_unique_name(&state.subjects, &draft.name, Some(id))?;

        let subject = state
            .subjects
            .iter_mut()
            .find(|subject| subject.id == id)
            .ok_or_else(|| SubmitError::global("This subject no longer exists"))?;

        subject.name = draft.name;
        subject.notes = draft.notes;
        subject.opinion = draft.opinion;
        info!(id, "subject updated");

        Ok(subject.clone())
    }

    pub fn remove(&self, id: u64) -> Result<Subject, SubmitError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }

        let index = state
            .subjects
            .iter()
            .position(|subject| subject.id == id)
            .ok_or_else(|| SubmitError::global("This subject no longer exists"))?;
        let subject = state.subjects.remove(index);
        info!(id, "subject removed");

        Ok(subject)
    }

    /// Submit handler for the create dialog.
    pub fn create_handler(&self) -> SubmitHandler {
        let store = self.clone();
        Box::new(move |values: FieldValues| {
            let result = SubjectDraft::from_values(&values)
                .and_then(|draft| store.create(draft))
                .map(|_| ());
            store.reply(result)
        })
    }

    /// Submit handler for the edit dialog of subject `id`.
    pub fn update_handler(&self, id: u64) -> SubmitHandler {
        let store = self.clone();
        Box::new(move |values: FieldValues| {
            let result = SubjectDraft::from_values(&values)
                .and_then(|draft| store.update(id, draft))
                .map(|_| ());
            store.reply(result)
        })
    }

    /// Confirm handler for the delete dialog of subject `id`.
    pub fn remove_handler(&self, id: u64) -> ConfirmHandler {
        let store = self.clone();
        Box::new(move || {
            let result = store.remove(id).map(|_| ());
            store.reply(result)
        })
    }

    fn reply(&self, result: Result<(), SubmitError>) -> SubmitFuture {
        let Some(latency) = self.state.borrow().latency else {
            return async move { result }.boxed_local();
        };

        let (tx, rx) = oneshot::channel();
        thread::spawn(move || {
            thread::sleep(latency);
            let _ = tx.send(result);
        });

        async move {
            match rx.await {
                Ok(result) => result,
                Err(canceled) => Err(SubmitError::unknown(canceled)),
            }
        }
        .boxed_local()
    }
}

fn check_unique_name(subjects: &[Subject], name: &str, except: Option<u64>) -> Result<(), SubmitError> {
    let taken = subjects
        .iter()
        .filter(|subject| Some(subject.id) != except)
        .any(|subject| subject.name.eq_ignore_ascii_case(name));

    if taken {
        return Err(SubmitError::field("name", "already taken"));
    }
    Ok(())
}
