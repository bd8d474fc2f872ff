//! Demo: continuous sine/cosine producer feeding the dashboard.
//!
//! ```bash
//! cargo run --example sine
//! ```

use std::time::Duration;

use scibench::sink::{channel_feed, Sample};
use scibench::{run_bench, BenchConfig};

fn main() -> eframe::Result<()> {
    let (sink, rx) = channel_feed();
    let feed = sink.clone();
    let _ = feed.register_trace("sine", Some("1 Hz test signal"));
    let _ = feed.register_trace("cosine", Some("quarter-phase"));

    // Producer: 500 Hz sample rate, 1 Hz waveforms
    std::thread::spawn(move || {
        const FS_HZ: f64 = 500.0;
        let dt = Duration::from_millis(2);
        let mut n: u64 = 0;
        loop {
            let phase = 2.0 * std::f64::consts::PI * (n as f64 / FS_HZ);
            let batch = vec![
                Sample::now("sine", phase.sin()),
                Sample::now("cosine", phase.cos()),
            ];
            if feed.send_batch(batch).is_err() {
                break; // UI closed
            }
            n = n.wrapping_add(1);
            std::thread::sleep(dt);
        }
    });

    let mut cfg = BenchConfig::default();
    cfg.title = "scibench - sine demo".to_string();
    run_bench(rx, sink, cfg)
}
