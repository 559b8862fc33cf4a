// Segmentation contract: splitting forms into units and pricing unit edits.
//
// A language's segmenter decides the granularity of the syllabic index
// (characters, syllables, ...) and supplies the substitution, insertion and
// deletion costs the approximate search charges.

use std::sync::Arc;

use lexica_index::{DEFAULT_INDEL_COST, EditCosts};
use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

/// Splits word forms into ordered units and prices edits between units.
///
/// Implementations must be deterministic: the same form always yields the
/// same units, since lookups depend on matching what was indexed.
pub trait Segmenter: Send + Sync {
    /// Split a form into its ordered units.
    fn segment(&self, form: &str) -> Vec<String>;

    /// Cost of replacing query unit `from` with indexed unit `to`.
    ///
    /// May be asymmetric. Only called for units that differ.
    fn substitution_cost(&self, from: &str, to: &str) -> f64;

    /// Cost of an indexed unit missing from the query.
    fn insertion_cost(&self, _unit: &str) -> f64 {
        DEFAULT_INDEL_COST
    }

    /// Cost of a query unit missing from the indexed form.
    fn deletion_cost(&self, _unit: &str) -> f64 {
        DEFAULT_INDEL_COST
    }
}

/// Exposes a [`Segmenter`] as the cost model of the approximate search.
pub struct SegmenterCosts<'a> {
    segmenter: &'a dyn Segmenter,
}

impl<'a> SegmenterCosts<'a> {
    pub fn new(segmenter: &'a dyn Segmenter) -> Self {
        Self { segmenter }
    }
}

impl EditCosts<String> for SegmenterCosts<'_> {
    fn substitution(&self, from: &String, to: &String) -> f64 {
        self.segmenter.substitution_cost(from, to)
    }

    fn insertion(&self, unit: &String) -> f64 {
        self.segmenter.insertion_cost(unit)
    }

    fn deletion(&self, unit: &String) -> f64 {
        self.segmenter.deletion_cost(unit)
    }
}

// ---------------------------------------------------------------------------
// Character segmenter
// ---------------------------------------------------------------------------

/// One unit per character, with uniform costs.
///
/// With the default settings the distance is the plain Levenshtein distance
/// over lowercased characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharSegmenter {
    /// Lowercase forms before splitting.
    pub lowercase: bool,
    pub substitution_cost: f64,
    /// Insertion and deletion cost.
    pub indel_cost: f64,
}

impl Default for CharSegmenter {
    fn default() -> Self {
        Self {
            lowercase: true,
            substitution_cost: 1.0,
            indel_cost: DEFAULT_INDEL_COST,
        }
    }
}

impl Segmenter for CharSegmenter {
    fn segment(&self, form: &str) -> Vec<String> {
        if self.lowercase {
            form.chars()
                .flat_map(char::to_lowercase)
                .map(String::from)
                .collect()
        } else {
            form.chars().map(String::from).collect()
        }
    }

    fn substitution_cost(&self, from: &str, to: &str) -> f64 {
        if from == to { 0.0 } else { self.substitution_cost }
    }

    fn insertion_cost(&self, _unit: &str) -> f64 {
        self.indel_cost
    }

    fn deletion_cost(&self, _unit: &str) -> f64 {
        self.indel_cost
    }
}

// ---------------------------------------------------------------------------
// Syllable segmenter
// ---------------------------------------------------------------------------

/// Vowels recognized by default: Latin (with common diacritics) and Greek.
const DEFAULT_VOWELS: &str = "aeiouyäöåáéíóúýàèìòùâêîôûāēīōūαεηιουωάέήίόύώϊϋΐΰ";

/// Rule-based syllabizer built around vowel nuclei.
///
/// A syllable break is placed before a consonant that is followed by a
/// vowel, provided the syllable being closed already contains a vowel
/// (`kissa` → `kis`·`sa`, `koira` → `koi`·`ra`). Every character that is not
/// listed in `vowels` counts as a consonant.
///
/// Substitution between syllables costs `vowel_substitution_cost` when they
/// share their consonant skeleton and differ only in vowels (`ko` → `ku`),
/// and `consonant_substitution_cost` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyllableSegmenter {
    pub vowels: String,
    pub lowercase: bool,
    pub vowel_substitution_cost: f64,
    pub consonant_substitution_cost: f64,
    /// Insertion and deletion cost of a whole syllable.
    pub indel_cost: f64,
}

impl Default for SyllableSegmenter {
    fn default() -> Self {
        Self {
            vowels: DEFAULT_VOWELS.to_string(),
            lowercase: true,
            vowel_substitution_cost: 0.5,
            consonant_substitution_cost: 1.0,
            indel_cost: DEFAULT_INDEL_COST,
        }
    }
}

impl SyllableSegmenter {
    fn is_vowel(&self, c: char) -> bool {
        self.vowels.contains(c)
    }

    /// The consonants of a syllable, in order.
    fn skeleton<'a>(&'a self, syllable: &'a str) -> impl Iterator<Item = char> + 'a {
        syllable.chars().filter(|&c| !self.is_vowel(c))
    }
}

impl Segmenter for SyllableSegmenter {
    fn segment(&self, form: &str) -> Vec<String> {
        let chars: Vec<char> = if self.lowercase {
            form.chars().flat_map(char::to_lowercase).collect()
        } else {
            form.chars().collect()
        };

        let mut syllables = Vec::new();
        let mut current = String::new();
        let mut has_vowel = false;

        for (i, &c) in chars.iter().enumerate() {
            let vowel = self.is_vowel(c);
            let opens_syllable = !vowel
                && has_vowel
                && chars.get(i + 1).is_some_and(|&next| self.is_vowel(next));
            if opens_syllable {
                syllables.push(std::mem::take(&mut current));
                has_vowel = false;
            }
            current.push(c);
            has_vowel |= vowel;
        }
        if !current.is_empty() {
            syllables.push(current);
        }

        syllables
    }

    fn substitution_cost(&self, from: &str, to: &str) -> f64 {
        if from == to {
            0.0
        } else if self.skeleton(from).eq(self.skeleton(to)) {
            self.vowel_substitution_cost
        } else {
            self.consonant_substitution_cost
        }
    }

    fn insertion_cost(&self, _unit: &str) -> f64 {
        self.indel_cost
    }

    fn deletion_cost(&self, _unit: &str) -> f64 {
        self.indel_cost
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Declarative choice of segmenter, as found in a setup file.
///
/// ```json
/// { "kind": "syllables", "vowel_substitution_cost": 0.3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmenterSpec {
    Characters(CharSegmenter),
    Syllables(SyllableSegmenter),
}

impl SegmenterSpec {
    /// Check that every cost is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let costs: &[(&str, f64)] = match self {
            SegmenterSpec::Characters(s) => &[
                ("substitution_cost", s.substitution_cost),
                ("indel_cost", s.indel_cost),
            ],
            SegmenterSpec::Syllables(s) => &[
                ("vowel_substitution_cost", s.vowel_substitution_cost),
                ("consonant_substitution_cost", s.consonant_substitution_cost),
                ("indel_cost", s.indel_cost),
            ],
        };
        for &(name, value) in costs {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LexiconError::Configuration(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Arc<dyn Segmenter> {
        match self {
            SegmenterSpec::Characters(segmenter) => Arc::new(segmenter.clone()),
            SegmenterSpec::Syllables(segmenter) => Arc::new(segmenter.clone()),
        }
    }
}

impl Default for SegmenterSpec {
    fn default() -> Self {
        SegmenterSpec::Characters(CharSegmenter::default())
    }
}
