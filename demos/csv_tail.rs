//! Demo: follow a growing sample log, like `tail -f` into the dashboard.
//!
//! ```bash
//! cargo run --example csv_tail -- [--from-start] [path/to/live_data.csv]
//! ```
//!
//! Line format: `trace,timestamp,value` (float seconds), `trace value`, or a
//! bare `value` per line.

use std::path::PathBuf;

use scibench::acquire::{file::FileTailSource, spawn_reader};
use scibench::sink::channel_feed;
use scibench::{run_bench, BenchConfig};

fn main() -> eframe::Result<()> {
    let mut from_start = false;
    let mut csv_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        if arg == "--from-start" {
            from_start = true;
        } else if csv_path.is_none() {
            csv_path = Some(PathBuf::from(arg));
        }
    }
    let csv_path = csv_path.unwrap_or_else(|| PathBuf::from("live_data.csv"));

    let (sink, rx) = channel_feed();
    let source = match FileTailSource::open(&csv_path, from_start) {
        Ok(src) => src,
        Err(e) => {
            eprintln!("cannot open {}: {e}", csv_path.display());
            std::process::exit(1);
        }
    };
    let _reader = spawn_reader(Box::new(source), sink.clone());

    let mut cfg = BenchConfig::default();
    cfg.title = format!("scibench - {}", csv_path.display());
    run_bench(rx, sink, cfg)
}
