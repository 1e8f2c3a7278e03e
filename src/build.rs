//! Turning merge pools into persisted shards.
//!
//! Both builders share one shape: a single-threaded planning phase that
//! buckets words, accumulates statistics and produces a list of independent
//! [`ShardJob`]s, followed by a write phase that runs those jobs either on
//! the calling thread or across a bounded set of writer threads.

pub mod config;
pub mod dictionary;
pub mod shard_writer;
pub mod stats;
pub mod synthesis;

pub use config::{ParallelBuildConfig, SynthesisConfig};
pub use dictionary::DictionaryBuilder;
pub use shard_writer::{ShardJob, write_parallel, write_sequential};
pub use stats::{BuildStats, SynthesisStats};
pub use synthesis::{SYNTHESIS_DIR, SYNTHESIS_METADATA_FILE, SynthesisBuilder};
