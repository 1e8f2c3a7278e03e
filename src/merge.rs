//! Merge scopes for canonical word entities.
//!
//! A pool owns exactly one [`Word`](crate::lexicon::Word) per normalized form
//! within each of its buckets. Adding a word whose form is already present
//! folds its sources and tags into the existing entity.

pub mod filter;
pub mod pool;

pub use filter::WordFilter;
pub use pool::{LanguagePool, SynthesisPool};
