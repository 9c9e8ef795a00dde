//! Integration tests for formbind

use std::io;
use std::sync::{Arc, Mutex};

use formbind::converters::{to_money, to_number};
use formbind::validators::check_money;
use formbind::{
    AdapterState, FieldDescriptor, FieldErrors, FieldValue, FieldValues, FormUpdate, ModalConfig,
    ModalForm, ScriptedSubmitter, SubmitError,
};
use futures::executor::block_on;
use pretty_assertions::assert_eq;

fn opinions() -> [(&'static str, &'static str); 2] {
    [("GOOD", "Good"), ("BAD", "Bad")]
}

fn subject_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "Name").required(),
        FieldDescriptor::text("notes", "Notes").multiline(),
        FieldDescriptor::select("opinion", "Opinion", opinions()).required(),
    ]
}

fn open_form(fields: Vec<FieldDescriptor>, submitter: &ScriptedSubmitter) -> ModalForm {
    let mut form = ModalForm::new(ModalConfig::new("Subject"), fields, submitter.handler()).unwrap();
    form.open();
    form
}

/// Submit and settle in one go. Returns whether the settlement was applied.
fn submit_and_settle(form: &mut ModalForm) -> bool {
    let flight = form.submit().expect("submit should be enabled");
    let settlement = block_on(flight);
    form.settle(settlement)
}

#[test]
fn test_required_name_blocks_submission() {
    let submitter = ScriptedSubmitter::new();
    let mut form = open_form(subject_fields(), &submitter);

    form.change("opinion", "GOOD").unwrap();
    assert!(submit_and_settle(&mut form));

    assert_eq!(submitter.call_count(), 0);
    assert!(form.is_open());
    assert_eq!(form.engine().error("name"), Some("It's required!"));
    assert!(form.state().failed);
    assert!(!form.submit_enabled());
}

#[test]
fn test_selected_opinion_is_submitted() {
    let submitter = ScriptedSubmitter::new();
    let mut form = open_form(
        vec![FieldDescriptor::select("opinion", "Opinion", opinions()).required()],
        &submitter,
    );

    form.change("opinion", "GOOD").unwrap();
    assert!(submit_and_settle(&mut form));

    assert_eq!(
        submitter.last_call(),
        Some(FieldValues::new().with("opinion", "GOOD"))
    );
    assert!(!form.is_open());
}

#[test]
fn test_field_error_then_corrected_resubmission() {
    let submitter = ScriptedSubmitter::new()
        .with_error(SubmitError::field("name", "already taken"))
        .with_ok();
    let mut form = open_form(subject_fields(), &submitter);

    form.change("name", "Ada").unwrap();
    form.change("opinion", "BAD").unwrap();
    assert!(submit_and_settle(&mut form));

    assert!(form.is_open());
    assert_eq!(form.engine().error("name"), Some("already taken"));
    assert_eq!(
        form.state().field_errors,
        FieldErrors::new().with("name", "already taken")
    );
    assert!(!form.submit_enabled());

    form.change("name", "Grace").unwrap();
    assert_eq!(form.engine().error("name"), None);
    assert!(form.submit_enabled());
    assert!(submit_and_settle(&mut form));

    assert!(!form.is_open());
    assert_eq!(form.state(), &AdapterState::default());
    assert_eq!(submitter.call_count(), 2);
    assert_eq!(
        submitter.last_call(),
        Some(
            FieldValues::new()
                .with("name", "Grace")
                .with("notes", FieldValue::Blank)
                .with("opinion", "BAD")
        )
    );
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_unknown_failure_is_shown_generically_and_logged() {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::new("formbind=error"))
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let submitter = ScriptedSubmitter::new()
            .with_error(SubmitError::unknown(anyhow::anyhow!("connection reset by peer")));
        let mut form = open_form(subject_fields(), &submitter);

        form.change("name", "Ada").unwrap();
        form.change("opinion", "GOOD").unwrap();
        assert!(submit_and_settle(&mut form));

        assert!(form.is_open());
        assert_eq!(form.banner(), Some("Unknown error"));
        assert_eq!(form.state().global_message.as_deref(), Some("Unknown error"));
    });

    let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("connection reset by peer"), "log was: {logged}");
}

#[test]
fn test_global_error_banner_clears_on_touch() {
    let submitter = ScriptedSubmitter::new().with_error(SubmitError::global("Store is read-only"));
    let mut form = open_form(subject_fields(), &submitter);

    form.change("name", "Ada").unwrap();
    form.change("opinion", "GOOD").unwrap();
    submit_and_settle(&mut form);
    assert_eq!(form.banner(), Some("Store is read-only"));

    form.change("notes", "second try").unwrap();
    assert_eq!(form.banner(), None);
    assert_eq!(form.state().global_message, None);
}

#[test]
fn test_single_flight_submission() {
    let submitter = ScriptedSubmitter::new();
    let reply = submitter.defer();
    let mut form = open_form(subject_fields(), &submitter);

    form.change("name", "Ada").unwrap();
    form.change("opinion", "GOOD").unwrap();

    let first = form.submit().unwrap();
    assert!(form.is_submitting());
    assert!(!form.submit_enabled());
    assert!(form.submit().is_none());
    assert_eq!(submitter.call_count(), 1);

    reply.send(Ok(())).unwrap();
    let settlement = block_on(first);
    assert!(form.settle(settlement));

    assert_eq!(submitter.call_count(), 1);
    assert!(!form.is_open());
}

#[test]
fn test_late_result_after_reopen_is_ignored() {
    let submitter = ScriptedSubmitter::new();
    let reply = submitter.defer();
    let mut form = open_form(subject_fields(), &submitter);

    form.change("name", "Ada").unwrap();
    form.change("opinion", "GOOD").unwrap();
    let flight = form.submit().unwrap();

    form.cancel();
    form.open();

    reply
        .send(Err(SubmitError::field("name", "already taken")))
        .unwrap();
    let settlement = block_on(flight);

    assert!(!form.settle(settlement));
    assert!(form.is_open());
    assert_eq!(form.engine().error("name"), None);
    assert_eq!(form.state(), &AdapterState::default());
}

#[test]
fn test_cross_field_errors_block_submission() {
    let submitter = ScriptedSubmitter::new();
    let fields = vec![
        FieldDescriptor::text("min", "Minimum"),
        FieldDescriptor::text("max", "Maximum"),
    ];
    let mut form = ModalForm::new(ModalConfig::default(), fields, submitter.handler())
        .unwrap()
        .with_cross_validator(|values| {
            let min = values.get("min").and_then(FieldValue::as_str).unwrap_or_default();
            let max = values.get("max").and_then(FieldValue::as_str).unwrap_or_default();
            let mut errors = FieldErrors::new();
            if min > max {
                errors.insert("max", "must not be below the minimum");
            }
            errors
        });
    form.open();

    form.change("min", "5").unwrap();
    form.change("max", "3").unwrap();
    submit_and_settle(&mut form);

    assert_eq!(submitter.call_count(), 0);
    assert_eq!(form.engine().error("max"), Some("must not be below the minimum"));
}

#[test]
fn test_disabling_a_failing_field_reenables_submit() {
    let submitter = ScriptedSubmitter::new();
    let discount = || FieldDescriptor::text("discount", "Discount").validate(check_money);
    let mut form = open_form(
        vec![FieldDescriptor::text("name", "Name"), discount()],
        &submitter,
    );

    form.change("discount", "ten").unwrap();
    assert!(!form.submit_enabled());

    form.update(
        FormUpdate::new().descriptors(vec![
            FieldDescriptor::text("name", "Name"),
            discount().disabled(true),
        ]),
    )
    .unwrap();

    assert!(!form.state().failed);
    assert!(form.submit_enabled());
    assert!(submit_and_settle(&mut form));
    assert_eq!(
        submitter.last_call(),
        Some(FieldValues::new().with("name", FieldValue::Blank))
    );
}

#[test]
fn test_untouched_default_is_submitted_converted() {
    let submitter = ScriptedSubmitter::new();
    let mut form = open_form(
        vec![
            FieldDescriptor::text("title", "Title").value("Dune"),
            FieldDescriptor::text("price", "Price")
                .value(FieldValue::Float(9.5))
                .validate(check_money)
                .convert_in(to_money)
                .convert_out(to_number),
        ],
        &submitter,
    );

    assert_eq!(form.engine().value("price"), Some(FieldValue::from("9.50")));

    form.change("title", "Dune Messiah").unwrap();
    assert!(submit_and_settle(&mut form));

    assert_eq!(
        submitter.last_call(),
        Some(
            FieldValues::new()
                .with("title", "Dune Messiah")
                .with("price", FieldValue::Float(9.5))
        )
    );
}

#[test]
fn test_fresh_signal_clears_entered_values() {
    let submitter = ScriptedSubmitter::new();
    let mut form = open_form(subject_fields(), &submitter);

    form.update(FormUpdate::new().fresh(false)).unwrap();
    form.change("name", "Ada").unwrap();
    form.update(FormUpdate::new().fresh(true)).unwrap();

    assert_eq!(form.engine().value("name"), Some(FieldValue::Blank));
    assert!(!form.state().failed);
}
