//! # formbind
//!
//! Declarative flat forms for admin dialogs. Rendering-agnostic.
//!
//! A host describes a form as a list of [`FieldDescriptor`]s. The
//! [`FormEngine`] keeps per-field input state, validates on every change,
//! prunes state of fields that disappear or become disabled, and produces a
//! value map on demand. [`ModalForm`] wraps the engine in a modal with a
//! single-flight submit button wired to an asynchronous persistence
//! boundary.
//!
//! ## Usage
//!
//! ```rust
//! use formbind::{FieldDescriptor, FieldValues, ModalConfig, ModalForm, SubmitFuture};
//! use futures::FutureExt;
//! use futures::executor::block_on;
//!
//! let fields = vec![
//!     FieldDescriptor::text("name", "Name").required(),
//!     FieldDescriptor::select("opinion", "Opinion", [("GOOD", "Good"), ("BAD", "Bad")])
//!         .required(),
//! ];
//!
//! let save = |values: FieldValues| -> SubmitFuture {
//!     async move {
//!         assert_eq!(values.get_text("opinion").ok(), Some("GOOD"));
//!         Ok(())
//!     }
//!     .boxed_local()
//! };
//!
//! let mut form = ModalForm::new(ModalConfig::new("New subject"), fields, Box::new(save)).unwrap();
//! form.open();
//! form.change("name", "Ada").unwrap();
//! form.change("opinion", "GOOD").unwrap();
//!
//! let settlement = block_on(form.submit().unwrap());
//! form.settle(settlement);
//! assert!(!form.is_open());
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Input state, validation, reconciliation and extraction
//! - [`trigger`] - Single-flight execution of asynchronous actions
//! - [`shell`] - Modal lifecycle, error banner and submit button state
//! - [`adapter`] - The form inside the modal
//! - [`confirm`] - A modal that only asks before running an action
//! - [`validators`] / [`converters`] - Reusable field functions

pub use formbind_types::*;

pub mod adapter;
pub mod confirm;
pub mod converters;
pub mod engine;
pub mod shell;
pub mod trigger;
pub mod validators;

mod config;
pub use config::ModalConfig;

pub use adapter::{AdapterState, ModalForm, SubmitFuture, SubmitHandler};
pub use confirm::{ConfirmHandler, Confirmation};
pub use engine::{CrossValidator, FieldView, FormEngine, FormEvent, FormUpdate};
pub use shell::{HandleOutcome, HandleResult, ModalShell, Settlement, ShellState, Ticket};
pub use trigger::{Flight, SingleFlight};

// Scripted persistence boundary for testing dialogs without a store
mod scripted;
pub use scripted::{Deferred, ScriptedSubmitter};
