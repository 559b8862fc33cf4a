// The lexicon entity: lemmata indexed by form and by key.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use lexica_index::{SyllabicIndex, best_matches};
use lexica_model::{Lemma, LemmaResult};

use crate::error::{LexiconError, Result};
use crate::language::LanguageProvider;
use crate::segmentation::SegmenterCosts;

/// Position of a lemma in the lexicon's arena.
type LemmaId = usize;

/// A dictionary bound to one language.
///
/// Lemmata are reachable two ways: by form, through a syllabic index over
/// the language's segmentation of each form, and by key, through an exact
/// key map. [`add`](Self::add) updates both in one `&mut self` call.
pub struct Lexicon {
    language: Arc<LanguageProvider>,
    name: String,
    description: String,
    lemmata: Vec<Lemma>,
    index: SyllabicIndex<String, LemmaId>,
    by_key: HashMap<String, Vec<LemmaId>>,
}

impl Lexicon {
    pub fn new(
        language: Arc<LanguageProvider>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            language,
            name: name.into(),
            description: description.into(),
            lemmata: Vec::new(),
            index: SyllabicIndex::new(),
            by_key: HashMap::new(),
        }
    }

    /// Every lemma whose form lies within `max_edit_distance` of `form`,
    /// nearest first.
    ///
    /// Results at equal distance keep the index traversal order, and lemmata
    /// sharing a form keep the order they were added in.
    pub fn get_lemmata(&self, form: &str, max_edit_distance: f64) -> Result<Vec<LemmaResult<'_>>> {
        check_budget(max_edit_distance)?;
        let mut results = self.search(form, max_edit_distance, false);
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(results)
    }

    /// Only the nearest lemmata: every match tying at the smallest distance
    /// found within `max_edit_distance`.
    pub fn get_best_lemmata(
        &self,
        form: &str,
        max_edit_distance: f64,
    ) -> Result<Vec<LemmaResult<'_>>> {
        check_budget(max_edit_distance)?;
        Ok(self.search(form, max_edit_distance, true))
    }

    /// Lemmata filed under exactly `key`, in the order they were added.
    pub fn lemmata_by_key<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Lemma> + 'a {
        self.by_key
            .get(key)
            .into_iter()
            .flatten()
            .map(|&id| &self.lemmata[id])
    }

    /// Index a lemma by form and by key.
    ///
    /// Any string is a valid key or form, the empty string included.
    pub(crate) fn add(&mut self, lemma: Lemma) {
        let id = self.lemmata.len();
        let units = self.language.segmenter().segment(lemma.form());
        self.index.insert(&units, id);
        self.by_key
            .entry(lemma.key().to_string())
            .or_default()
            .push(id);
        self.lemmata.push(lemma);
    }

    fn search(&self, form: &str, max_edit_distance: f64, best_only: bool) -> Vec<LemmaResult<'_>> {
        let segmenter = self.language.segmenter();
        let query = segmenter.segment(form);
        let costs = SegmenterCosts::new(segmenter);

        let mut matches = self
            .index
            .approximate_search(&query, max_edit_distance, &costs);
        if best_only {
            matches = best_matches(&matches);
        }

        matches
            .iter()
            .flat_map(|m| {
                self.index
                    .payload(m.node)
                    .iter()
                    .map(move |&id| LemmaResult::new(&self.lemmata[id], m.distance))
            })
            .collect()
    }

    pub fn language(&self) -> &Arc<LanguageProvider> {
        &self.language
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of lemmata added.
    pub fn len(&self) -> usize {
        self.lemmata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmata.is_empty()
    }

    /// All lemmata in the order they were added.
    pub fn lemmata(&self) -> &[Lemma] {
        &self.lemmata
    }
}

impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexicon")
            .field("language", &self.language.key())
            .field("name", &self.name)
            .field("lemmata", &self.lemmata.len())
            .field("index", &self.index)
            .finish()
    }
}

fn check_budget(max_edit_distance: f64) -> Result<()> {
    if max_edit_distance.is_finite() && max_edit_distance >= 0.0 {
        Ok(())
    } else {
        Err(LexiconError::InvalidArgument(format!(
            "edit distance budget must be finite and non-negative, got {max_edit_distance}"
        )))
    }
}
