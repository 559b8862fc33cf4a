//! Dictionary records shared by the lexica crates.
//!
//! - [`lemma`] -- headword entries and their etymologies
//! - [`sense`] -- the tree of meanings attached to a lemma
//! - [`result`] -- a lemma paired with its distance from a queried form
//!
//! All records are immutable once built: the builder-style `with_*` methods
//! consume `self`, so a lemma can only be shaped before it is handed to a
//! lexicon.

pub mod lemma;
pub mod result;
pub mod sense;

pub use lemma::{Etymology, Lemma};
pub use result::LemmaResult;
pub use sense::Sense;
