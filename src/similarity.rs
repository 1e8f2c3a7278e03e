//! Fuzzy lookup over normalized vocabularies.
//!
//! A [`BkTree`] answers "every word within edit distance `n` of a query"
//! exactly, pruning subtrees with the triangle inequality. Vocabularies come
//! either from an in-memory pool or from shards on disk via
//! [`load_vocabulary`].

pub mod bktree;
pub mod loader;

pub use bktree::{BkTree, SimilarityHit, rank_hits};
pub use loader::{LoadOptions, load_vocabulary};
