// Lemma (dictionary headword) and etymology records.

use serde::{Deserialize, Serialize};

use crate::sense::Sense;

/// Etymology of a lemma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Etymology {
    description: String,
    #[serde(default)]
    reference: Option<String>,
}

impl Etymology {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            reference: None,
        }
    }

    /// Attach a reference to another lemma by its key.
    pub fn with_reference(mut self, key: impl Into<String>) -> Self {
        self.reference = Some(key.into());
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// A dictionary entry.
///
/// `key` identifies the entry for exact lookup but is not required to be
/// unique: several sources may contribute entries under the same key.
/// `form` is the orthographic form that gets segmented and indexed for
/// approximate search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lemma {
    key: String,
    form: String,
    #[serde(default)]
    senses: Vec<Sense>,
    #[serde(default)]
    notes: Vec<String>,
    #[serde(default)]
    etymology: Option<Etymology>,
}

impl Lemma {
    /// Create a lemma with no notes and no etymology.
    pub fn new(key: impl Into<String>, form: impl Into<String>, senses: Vec<Sense>) -> Self {
        Self {
            key: key.into(),
            form: form.into(),
            senses,
            notes: Vec::new(),
            etymology: None,
        }
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_etymology(mut self, etymology: Etymology) -> Self {
        self.etymology = Some(etymology);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn senses(&self) -> &[Sense] {
        &self.senses
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn etymology(&self) -> Option<&Etymology> {
        self.etymology.as_ref()
    }
}
