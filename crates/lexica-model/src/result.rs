// Result of a lexicon query.

use crate::lemma::Lemma;

/// A lemma found by a lexicon query, with its generalized edit distance
/// from the queried form (0 for an exact match).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LemmaResult<'a> {
    pub lemma: &'a Lemma,
    pub distance: f64,
}

impl<'a> LemmaResult<'a> {
    pub fn new(lemma: &'a Lemma, distance: f64) -> Self {
        Self { lemma, distance }
    }

    /// Shorthand for `self.lemma.key()`.
    pub fn key(&self) -> &'a str {
        self.lemma.key()
    }
}
