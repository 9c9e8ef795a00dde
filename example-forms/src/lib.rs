//! Subject admin dialogs built on formbind.
//!
//! The create, edit and delete dialogs of a small admin screen, an
//! in-memory store that acts as their persistence boundary, and formatting
//! helpers for enumeration keys.

pub mod store;
pub mod subject;

// Re-export store types
pub use store::SubjectStore;

// Re-export subject types
pub use subject::{
    Opinion, Subject, SubjectDraft, create_descriptors, delete_confirmation, edit_descriptors,
};

/// Turn an all-caps key into words, e.g. `SO_SO` into `So so`.
pub fn human_case(key: &str) -> String {
    let words = key
        .split('_')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
