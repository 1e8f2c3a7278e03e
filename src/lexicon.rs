//! Word, provenance and shard data model.
//!
//! A [`Word`] is the canonical entity for one normalized form within a merge
//! scope. It accumulates [`WordSource`] records as evidence and derives its
//! category, language and tag sets from them. A [`Shard`] is the persisted
//! collection of words for one output bucket.

pub mod shard;
pub mod source;
pub mod word;

pub use shard::{SHARD_SCHEMA_VERSION, Shard};
pub use source::WordSource;
pub use word::{Word, word_type_label};
