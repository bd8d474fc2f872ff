//! The reader thread: pumps a [`DataSource`] into a [`BenchSink`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::sink::BenchSink;

use super::DataSource;

/// Handle to a running reader thread.
pub struct ReaderHandle {
    stop: Arc<AtomicBool>,
    samples: Arc<AtomicU64>,
    join: Option<std::thread::JoinHandle<()>>,
}

impl ReaderHandle {
    /// Total samples forwarded so far.
    pub fn sample_count(&self) -> u64 {
        self.samples.load(Ordering::Relaxed)
    }

    /// Ask the thread to stop and wait for it.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map(|j| j.is_finished()).unwrap_or(true)
    }
}

/// Spawn a thread that reads batches from `source` and forwards them through
/// `sink` until the source fails, the UI hangs up, or `stop()` is called.
pub fn spawn_reader(mut source: Box<dyn DataSource>, sink: BenchSink) -> ReaderHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let samples = Arc::new(AtomicU64::new(0));
    let thread_stop = Arc::clone(&stop);
    let thread_samples = Arc::clone(&samples);

    let join = std::thread::spawn(move || {
        let name = source.name();
        info!(source = %name, "acquisition started");
        let mut consecutive_errors = 0u32;
        loop {
            if thread_stop.load(Ordering::Relaxed) {
                break;
            }
            match source.read_batch() {
                Ok(batch) => {
                    consecutive_errors = 0;
                    if batch.is_empty() {
                        continue;
                    }
                    thread_samples.fetch_add(batch.len() as u64, Ordering::Relaxed);
                    if sink.send_batch(batch).is_err() {
                        debug!(source = %name, "sink hung up, stopping reader");
                        break;
                    }
                }
                Err(e) => {
                    consecutive_errors += 1;
                    error!(source = %name, error = %e, "read failed");
                    if consecutive_errors >= 5 {
                        error!(source = %name, "giving up after repeated read failures");
                        break;
                    }
                    std::thread::sleep(Duration::from_millis(200));
                }
            }
        }
        info!(source = %name, "acquisition stopped");
    });

    ReaderHandle {
        stop,
        samples,
        join: Some(join),
    }
}
