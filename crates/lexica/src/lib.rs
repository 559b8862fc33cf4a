//! Fuzzy lexicon lookup.
//!
//! A [`Lexicon`] holds dictionary entries ([`Lemma`]) of one language and
//! answers two kinds of query: approximate lookup by form, ranked by a
//! language-aware edit distance over syllables, and exact lookup by key.
//!
//! # Architecture
//!
//! - [`segmentation`] -- Splitting forms into units and pricing unit edits
//! - [`language`] -- Language providers and their registry
//! - [`lexicon`] -- The lexicon and its query API
//! - [`sources`] -- Data sources lemmata are imported from
//! - [`assembly`] -- Building a lexicon from an ordered list of sources
//! - [`snapshot`] -- Binary snapshot format and file I/O
//! - [`collection`] -- Shared, swappable set of loaded lexica
//! - [`setup`] -- Declarative configuration (JSON)
//! - [`environment`] -- Load/import orchestration over a setup
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexica::{
//!     CharSegmenter, LanguageProvider, Lemma, LexiconSource, MemorySource, import_lexicon,
//! };
//!
//! let english = Arc::new(LanguageProvider::new(
//!     "en",
//!     "English",
//!     Arc::new(CharSegmenter::default()),
//! ));
//! let source = MemorySource::new(
//!     "animals",
//!     vec![
//!         Lemma::new("K1", "cat", Vec::new()),
//!         Lemma::new("K2", "cot", Vec::new()),
//!         Lemma::new("K3", "dog", Vec::new()),
//!     ],
//! );
//! let sources: Vec<Box<dyn LexiconSource>> = vec![Box::new(source)];
//! let lexicon = import_lexicon(english, "animals", "", sources)?;
//!
//! let keys: Vec<&str> = lexicon
//!     .get_lemmata("cat", 1.0)?
//!     .iter()
//!     .map(|r| r.key())
//!     .collect();
//! assert_eq!(keys, ["K1", "K2"]);
//! # Ok::<(), lexica::LexiconError>(())
//! ```

pub mod assembly;
pub mod collection;
pub mod environment;
pub mod error;
pub mod language;
pub mod lexicon;
pub mod segmentation;
pub mod setup;
pub mod snapshot;
pub mod sources;

pub use assembly::{import_lexicon, spawn_import};
pub use collection::LexiconCollection;
pub use environment::LexicaEnvironment;
pub use error::{LexiconError, Result};
pub use language::{LanguageProvider, LanguageProviders};
pub use lexica_model::{Etymology, Lemma, LemmaResult, Sense};
pub use lexicon::Lexicon;
pub use segmentation::{CharSegmenter, Segmenter, SegmenterSpec, SyllableSegmenter};
pub use setup::{LanguageSpec, LexicaSetup, LexiconProviderSpec, SourceSetSpec};
pub use snapshot::{SnapshotError, load_lexicon, save_lexicon, spawn_load, spawn_save};
pub use sources::{JsonLinesSource, LexiconSource, MemorySource, SourceSpec};
