//! Demo: a script hook post-processing the live stream.
//!
//! Writes a small shell script that computes the mean of each incoming batch
//! and injects it back as a `mean` trace, registers it on a 5-batch trigger,
//! and starts the simulator dashboard.
//!
//! ```bash
//! cargo run --example script_hook
//! ```

#[cfg(unix)]
fn main() -> eframe::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    use scibench::acquire::{spawn_reader, SourceSpec};
    use scibench::script::{HookTrigger, ScriptRegistry};
    use scibench::sink::channel_feed;
    use scibench::{run_bench, BenchConfig};

    // Keep registry and script inside a scratch config dir so the demo does
    // not touch the real one.
    let dir = std::env::temp_dir().join("scibench_script_hook_demo");
    std::fs::create_dir_all(&dir).expect("create demo dir");
    std::env::set_var("SCIBENCH_CONFIG_DIR", &dir);

    let script_path = dir.join("batch_mean.sh");
    std::fs::write(
        &script_path,
        r#"#!/bin/sh
# stdin: trace,timestamp,value  -> one mean sample per batch
awk -F, 'NR > 1 { sum += $3; t = $2; n += 1 }
         END { if (n > 0) printf "point mean %s %s\n", t, sum / n }'
"#,
    )
    .expect("write demo script");
    let mut perms = std::fs::metadata(&script_path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&script_path, perms).unwrap();

    let mut registry = ScriptRegistry::default();
    registry
        .add(&script_path, None, HookTrigger::OnBatch { every: 5 })
        .expect("register demo script");
    registry.save_default().expect("save demo registry");

    let (sink, rx) = channel_feed();
    let source = SourceSpec::Sim {
        profile: scibench::acquire::SimProfile::Sine,
    }
    .open()
    .expect("open simulator");
    let _reader = spawn_reader(source, sink.clone());

    let mut cfg = BenchConfig::default();
    cfg.title = "scibench - script hook demo".to_string();
    run_bench(rx, sink, cfg)
}

#[cfg(not(unix))]
fn main() {
    eprintln!("this demo uses a shell script hook and only runs on unix");
}
