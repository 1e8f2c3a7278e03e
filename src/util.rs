//! Shared utility modules used across Polyglex components.

pub mod cancel;
pub mod levenshtein;
