use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use scibench::acquire::{spawn_reader, SourceSpec};
use scibench::persistence;
use scibench::sink::channel_feed;
use scibench::{run_bench_with_state, BenchConfig, ColorTheme};

/// Launches the visualization dashboard, optionally attached to a live device.
#[derive(Debug, Parser)]
pub struct VisualizeSubcommand {
    /// Device to stream from while the dashboard runs. Without this, the
    /// dashboard waits for data injected by scripts or the console.
    #[clap(long)]
    pub device: Option<String>,

    /// Restore a previously saved dashboard state (JSON).
    #[clap(long)]
    pub state: Option<PathBuf>,

    /// Use the light theme.
    #[clap(long)]
    pub light: bool,

    /// Rolling time window in seconds.
    #[clap(long, default_value_t = 10.0)]
    pub window: f64,
}

impl VisualizeSubcommand {
    pub fn run(&self) -> Result<()> {
        let (sink, rx) = channel_feed();

        let _reader = match &self.device {
            Some(device) => {
                let spec: SourceSpec = device
                    .parse()
                    .with_context(|| format!("Invalid device spec '{device}'"))?;
                let source = spec
                    .open()
                    .with_context(|| format!("Failed to open device '{device}'"))?;
                info!("Streaming from {device}");
                Some(spawn_reader(source, sink.clone()))
            }
            None => None,
        };

        let state = match &self.state {
            Some(path) => Some(
                persistence::load_state_from_path(path)
                    .with_context(|| format!("Failed to load state from {}", path.display()))?,
            ),
            // fall back to the layout saved from the dashboard, if any
            None => match scibench::paths::state_file() {
                Ok(path) if path.exists() => {
                    info!("Restoring layout from {}", path.display());
                    persistence::load_state_from_path(&path).ok()
                }
                _ => None,
            },
        };

        let mut cfg = BenchConfig::default();
        cfg.time_window_secs = self.window;
        cfg.theme = if self.light {
            ColorTheme::Light
        } else {
            ColorTheme::Dark
        };

        run_bench_with_state(rx, sink, cfg, state)
            .map_err(|e| anyhow!("dashboard exited with an error: {e}"))
    }
}
