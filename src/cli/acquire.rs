use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use scibench::acquire::{spawn_reader, SourceSpec};
use scibench::sink::channel_feed;

/// Reads samples from a device without a UI, logging throughput.
/// Useful to verify an instrument connection before opening the dashboard.
#[derive(Debug, Parser)]
pub struct AcquireSubcommand {
    /// Device to read from: `sim:<profile>`, `tcp:<addr>`, or a path
    /// that is tail-read as it grows.
    #[clap(long)]
    pub device: String,

    /// Seconds between throughput reports.
    #[clap(long, default_value_t = 2)]
    pub report_every: u64,

    /// Stop after this many samples (runs until interrupted by default).
    #[clap(long)]
    pub limit: Option<u64>,
}

impl AcquireSubcommand {
    pub fn run(&self) -> Result<()> {
        let spec: SourceSpec = self
            .device
            .parse()
            .with_context(|| format!("Invalid device spec '{}'", self.device))?;
        let source = spec
            .open()
            .with_context(|| format!("Failed to open device '{}'", self.device))?;

        let (sink, rx) = channel_feed();
        let handle = spawn_reader(source, sink);
        info!("Acquiring from {} (Ctrl-C to stop)", self.device);

        let mut last_reported = 0u64;
        loop {
            std::thread::sleep(Duration::from_secs(self.report_every));
            // drain and discard; headless mode only measures
            while rx.try_recv().is_ok() {}

            let total = handle.sample_count();
            let rate = (total - last_reported) as f64 / self.report_every as f64;
            info!("{total} samples ({rate:.1}/s)");
            last_reported = total;

            if handle.is_finished() {
                info!("Source ended after {total} samples");
                return Ok(());
            }
            if let Some(limit) = self.limit {
                if total >= limit {
                    info!("Reached sample limit ({limit}), stopping");
                    handle.stop();
                    return Ok(());
                }
            }
        }
    }
}
