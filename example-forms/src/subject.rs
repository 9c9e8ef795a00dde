use chrono::{DateTime, Utc};
use formbind::{
    ConfirmHandler, Confirmation, FieldDescriptor, FieldValues, ModalConfig, Options, SubmitError,
};

use crate::human_case;

/// What the team thinks of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opinion {
    Excellent,
    Good,
    SoSo,
    Bad,
}

impl Opinion {
    pub const ALL: [Opinion; 4] = [Self::Excellent, Self::Good, Self::SoSo, Self::Bad];

    /// The key stored and submitted, e.g. `SO_SO`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::SoSo => "SO_SO",
            Self::Bad => "BAD",
        }
    }

    /// The label shown in the select control.
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::SoSo => "So-so",
            Self::Bad => "Bad",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|opinion| opinion.key() == key)
    }

    /// All opinions in display order, as select options.
    pub fn options() -> Options {
        Self::ALL
            .into_iter()
            .map(|opinion| (opinion.key(), opinion.label()))
            .collect()
    }
}

/// A stored subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: u64,
    pub name: String,
    pub notes: Option<String>,
    pub opinion: Opinion,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// One line for listings, e.g. `Rust (So so)`.
    pub fn summary(&self) -> String {
        format!("{} ({})", self.name, human_case(self.opinion.key()))
    }

    /// Creation day as shown in listings, e.g. `01/03/2024`.
    pub fn created_on(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

/// The persistable part of a subject, as entered in a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDraft {
    pub name: String,
    pub notes: Option<String>,
    pub opinion: Opinion,
}

impl SubjectDraft {
    /// Read a draft from the values of a subject dialog.
    pub fn from_values(values: &FieldValues) -> Result<Self, SubmitError> {
        let name = values.get_text("name").map_err(SubmitError::unknown)?;
        let notes = values
            .get_optional_text("notes")
            .map_err(SubmitError::unknown)?;
        let opinion = values.get_text("opinion").map_err(SubmitError::unknown)?;

        let opinion = Opinion::from_key(opinion)
            .ok_or_else(|| SubmitError::field("opinion", "Unknown opinion"))?;

        Ok(Self {
            name: name.trim().to_string(),
            notes: notes.map(str::to_string),
            opinion,
        })
    }
}

/// Fields of the "Subject - Create" dialog.
pub fn create_descriptors() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "Name").required(),
        FieldDescriptor::text("notes", "Notes").multiline(),
        FieldDescriptor::select("opinion", "Opinion", Opinion::options()).required(),
    ]
}

/// Fields of the "Subject - Update" dialog, prefilled from `subject`.
pub fn edit_descriptors(subject: &Subject) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("name", "Name")
            .required()
            .value(subject.name.as_str()),
        FieldDescriptor::text("notes", "Notes")
            .multiline()
            .value(subject.notes.clone()),
        FieldDescriptor::select("opinion", "Opinion", Opinion::options())
            .required()
            .value(subject.opinion.key()),
    ]
}

/// The "Subject - Delete" dialog. `on_confirm` performs the removal.
pub fn delete_confirmation(subject: &Subject, on_confirm: ConfirmHandler) -> Confirmation {
    Confirmation::new(
        ModalConfig::new("Subject - Delete")
            .with_submit_label("Proceed")
            .with_cancel_label("Cancel"),
        format!(
            "You are about to delete \"{}\". Do you want to proceed?",
            subject.name
        ),
        on_confirm,
    )
}
