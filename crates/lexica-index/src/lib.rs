//! Syllabic approximate-search index.
//!
//! This crate provides a branch-compressed tree (radix tree) keyed by
//! sequences of language units, typically syllables, and a bounded
//! approximate search over it using a pluggable, asymmetric cost model.
//!
//! # Architecture
//!
//! - [`cost`] -- The edit-cost contract (substitution, insertion, deletion)
//! - [`tree`] -- Arena-backed radix tree: insertion and exact search
//! - [`search`] -- Branch-and-bound approximate search over the tree
//!
//! # Example
//!
//! ```
//! use lexica_index::{SyllabicIndex, UniformCosts};
//!
//! let mut index = SyllabicIndex::new();
//! index.insert(&['c', 'a', 't'], "cat");
//! index.insert(&['c', 'o', 't'], "cot");
//! index.insert(&['d', 'o', 'g'], "dog");
//!
//! let matches = index.approximate_search(&['c', 'a', 't'], 1.0, &UniformCosts::default());
//! let mut found: Vec<(&str, f64)> = matches
//!     .iter()
//!     .flat_map(|m| index.payload(m.node).iter().map(move |w| (*w, m.distance)))
//!     .collect();
//! found.sort_by(|a, b| a.1.total_cmp(&b.1));
//! assert_eq!(found, [("cat", 0.0), ("cot", 1.0)]);
//! ```

pub mod cost;
pub mod search;
pub mod tree;

pub use cost::{DEFAULT_INDEL_COST, EditCosts, FnCosts, UniformCosts};
pub use search::{Match, best_matches};
pub use tree::{NodeId, SyllabicIndex};
