// Lemma senses: a tree of descriptions with optional labels and references.

use serde::{Deserialize, Serialize};

/// A sense (meaning) of a lemma.
///
/// Senses form a tree: every sense exclusively owns its subsenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    description: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    subsenses: Vec<Sense>,
}

impl Sense {
    /// Create a sense with the given description and no label, reference
    /// or subsenses.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            label: None,
            reference: None,
            subsenses: Vec::new(),
        }
    }

    /// Attach a numbering label such as `"1."` or `"b"`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a reference to another lemma by its key.
    pub fn with_reference(mut self, key: impl Into<String>) -> Self {
        self.reference = Some(key.into());
        self
    }

    /// Replace the subsenses.
    pub fn with_subsenses(mut self, subsenses: Vec<Sense>) -> Self {
        self.subsenses = subsenses;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Key of the referenced lemma, if any.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn subsenses(&self) -> &[Sense] {
        &self.subsenses
    }

    /// Number of senses in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.subsenses.iter().map(Sense::count).sum::<usize>()
    }
}
