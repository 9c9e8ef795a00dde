//! Create a few subjects in a terminal dialog.
//!
//! Logs go to `subject_dialog.log`; set `RUST_LOG=debug` to see ignored
//! submit presses while a (slow) save is in flight.

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use example_forms::{SubjectStore, create_descriptors};
use formbind::{ModalConfig, ModalForm};
use formbind_ratatui::{RatatuiFormError, RatatuiModalBackend};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let log = File::create("subject_dialog.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let store = SubjectStore::new().with_latency(Duration::from_millis(800));
    let mut form = ModalForm::new(
        ModalConfig::new("Subject - Create").with_cancel_label("Close"),
        create_descriptors(),
        store.create_handler(),
    )?;
    let backend = RatatuiModalBackend::new();

    loop {
        match backend.run(&mut form) {
            Ok(()) => continue,
            Err(RatatuiFormError::Cancelled) => break,
            Err(err) => return Err(err.into()),
        }
    }

    for subject in store.subjects() {
        println!("{}", subject.summary());
    }
    Ok(())
}
