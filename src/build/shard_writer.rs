//! Execution of shard write jobs.
//!
//! Jobs are independent: each owns the shard it writes. The only state the
//! writer threads share is the list of paths written so far.

use std::path::PathBuf;
use std::thread;

use crossbeam_channel::bounded;
use parking_lot::Mutex;

use crate::error::Result;
use crate::lexicon::Shard;
use crate::util::cancel::CancellationToken;

/// One shard and the path it is written to.
#[derive(Debug, Clone)]
pub struct ShardJob {
    pub path: PathBuf,
    pub shard: Shard,
}

impl ShardJob {
    pub fn new(path: impl Into<PathBuf>, shard: Shard) -> Self {
        ShardJob {
            path: path.into(),
            shard,
        }
    }

    /// Write the shard. A failure is logged and reported as `None`.
    pub(crate) fn run(self) -> Option<PathBuf> {
        match self.shard.save(&self.path) {
            Ok(()) => Some(self.path),
            Err(e) => {
                log::warn!("Failed to write shard {}: {e}", self.path.display());
                None
            }
        }
    }
}

/// Run every job on the calling thread, in order.
pub fn write_sequential(jobs: Vec<ShardJob>) -> Vec<PathBuf> {
    jobs.into_iter().filter_map(ShardJob::run).collect()
}

/// Run jobs across up to `workers` writer threads.
///
/// `cancel` is polled before the first job and before each further job is
/// handed to a writer. Once it is set no new job starts; jobs already handed
/// off finish writing. Returns the paths written, sorted.
pub fn write_parallel(
    jobs: Vec<ShardJob>,
    workers: usize,
    cancel: &CancellationToken,
) -> Result<Vec<PathBuf>> {
    if cancel.is_cancelled() {
        log::debug!("Cancelled before dispatching {} shard jobs", jobs.len());
        return Ok(Vec::new());
    }

    let workers = workers.max(1).min(jobs.len());
    if workers == 0 {
        return Ok(Vec::new());
    }

    let total = jobs.len();
    let written = Mutex::new(Vec::with_capacity(total));

    thread::scope(|scope| -> Result<()> {
        // Zero capacity: a send completes only when a writer takes the job.
        let (sender, receiver) = bounded::<ShardJob>(0);

        for worker_id in 0..workers {
            let receiver = receiver.clone();
            let written = &written;
            thread::Builder::new()
                .name(format!("shard-writer-{worker_id}"))
                .spawn_scoped(scope, move || {
                    for job in receiver.iter() {
                        if let Some(path) = job.run() {
                            written.lock().push(path);
                        }
                    }
                })?;
        }
        drop(receiver);

        for (dispatched, job) in jobs.into_iter().enumerate() {
            if cancel.is_cancelled() {
                log::info!("Shard writing cancelled after {dispatched} of {total} jobs");
                break;
            }
            if sender.send(job).is_err() {
                break;
            }
        }

        Ok(())
    })?;

    let mut written = written.into_inner();
    written.sort();
    Ok(written)
}
