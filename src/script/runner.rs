//! Subprocess execution of script hooks.
//!
//! Each run spawns the script, pipes the pending sample batch to its stdin as
//! CSV, and parses stdout directives (see [`super::hook`]). A watchdog kills
//! scripts that outlive the timeout so a stuck hook cannot stall acquisition.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{BenchError, BenchResult};
use crate::sink::{BenchSink, Sample};

use super::hook::{parse_directive, Directive};
use super::registry::ScriptEntry;

/// Default wall-clock limit for one hook run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What a hook run produced.
#[derive(Debug, Default)]
pub struct HookOutcome {
    /// Point/clear directives forwarded to the sink.
    pub applied: usize,
    /// `log` directive payloads, for the console scrollback.
    pub logs: Vec<String>,
    /// Malformed directive complaints.
    pub errors: Vec<String>,
    /// Whether the script exited with status zero.
    pub exit_ok: bool,
}

/// Serialize a batch the same way figure CSV export does.
pub fn batch_to_csv(batch: &[Sample]) -> String {
    let mut out = String::from("trace,timestamp,value\n");
    for s in batch {
        out.push_str(&format!(
            "{},{:.9},{}\n",
            s.trace,
            s.timestamp_micros as f64 * 1e-6,
            s.value
        ));
    }
    out
}

/// Run one hook to completion, applying directives through `sink`.
pub fn run_hook(
    entry: &ScriptEntry,
    batch: &[Sample],
    sink: &BenchSink,
    timeout: Duration,
) -> BenchResult<HookOutcome> {
    debug!(script = %entry.name, batch = batch.len(), "running hook");

    let mut child = Command::new(&entry.path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BenchError::ScriptNotFound(entry.path.clone()),
            _ => BenchError::Io(e),
        })?;

    // Feed stdin from its own thread; a script may interleave reads and writes.
    let stdin = child.stdin.take();
    let csv = batch_to_csv(batch);
    let feeder = std::thread::spawn(move || {
        if let Some(mut stdin) = stdin {
            // The script may exit without draining stdin; that's its business.
            let _ = stdin.write_all(csv.as_bytes());
        }
    });

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| BenchError::ScriptOutput(entry.name.clone()))?;

    // Watchdog: kill the child if it outlives the timeout.
    let child = Arc::new(Mutex::new(child));
    let done = Arc::new(AtomicBool::new(false));
    let wd_child = Arc::clone(&child);
    let wd_done = Arc::clone(&done);
    let wd_name = entry.name.clone();
    let watchdog = std::thread::spawn(move || {
        let deadline = std::time::Instant::now() + timeout;
        while std::time::Instant::now() < deadline {
            if wd_done.load(Ordering::Relaxed) {
                return false;
            }
            std::thread::sleep(Duration::from_millis(25));
        }
        warn!(script = %wd_name, "hook timed out, killing");
        let _ = wd_child.lock().unwrap().kill();
        true
    });

    let mut outcome = HookOutcome::default();
    for line in BufReader::new(stdout).lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        match parse_directive(&line) {
            Ok(Some(Directive::Point { trace, x, y })) => {
                let _ = sink.send(Sample {
                    trace,
                    timestamp_micros: (x * 1e6) as i64,
                    value: y,
                });
                outcome.applied += 1;
            }
            Ok(Some(Directive::Clear { trace })) => {
                let _ = sink.clear_trace(trace);
                outcome.applied += 1;
            }
            Ok(Some(Directive::Log(msg))) => {
                debug!(script = %entry.name, "{msg}");
                outcome.logs.push(msg);
            }
            Ok(None) => {}
            Err(e) => outcome.errors.push(e),
        }
    }

    done.store(true, Ordering::Relaxed);
    let _ = feeder.join();
    let status = child.lock().unwrap().wait()?;
    let timed_out = watchdog.join().unwrap_or(false);
    if timed_out {
        return Err(BenchError::ScriptTimeout(timeout.as_secs()));
    }
    outcome.exit_ok = status.success();
    if !outcome.exit_ok {
        warn!(script = %entry.name, ?status, "hook exited with failure");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_csv_matches_export_shape() {
        let csv = batch_to_csv(&[Sample {
            trace: "ch1".into(),
            timestamp_micros: 1_500_000,
            value: 2.0,
        }]);
        assert_eq!(csv, "trace,timestamp,value\nch1,1.500000000,2\n");
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use crate::script::hook::HookTrigger;
        use crate::script::registry::ScriptRegistry;
        use crate::sink::{channel_feed, FeedCommand};
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();
            path
        }

        fn entry_for(path: &Path) -> ScriptEntry {
            let mut reg = ScriptRegistry::default();
            reg.add(path, None, HookTrigger::Manual).unwrap();
            let entry = reg.iter().next().unwrap().clone();
            entry
        }

        #[test]
        fn directives_flow_back_into_the_sink() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(
                dir.path(),
                "emit.sh",
                "cat > /dev/null\necho 'point mean 1.0 5.0'\necho 'log done'",
            );
            let (sink, rx) = channel_feed();
            let outcome =
                run_hook(&entry_for(&script), &[], &sink, DEFAULT_TIMEOUT).unwrap();

            assert!(outcome.exit_ok);
            assert_eq!(outcome.applied, 1);
            assert_eq!(outcome.logs, vec!["done".to_string()]);
            match rx.try_recv().unwrap() {
                FeedCommand::Sample(s) => {
                    assert_eq!(s.trace, "mean");
                    assert_eq!(s.value, 5.0);
                }
                _ => panic!("expected injected sample"),
            }
        }

        #[test]
        fn script_sees_the_batch_on_stdin() {
            let dir = tempfile::tempdir().unwrap();
            // echo back the number of data rows as a log directive
            let script = write_script(
                dir.path(),
                "count.sh",
                "n=$(tail -n +2 | wc -l)\necho \"log rows=$n\"",
            );
            let (sink, _rx) = channel_feed();
            let batch = vec![
                Sample::now("a", 1.0),
                Sample::now("a", 2.0),
                Sample::now("b", 3.0),
            ];
            let outcome =
                run_hook(&entry_for(&script), &batch, &sink, DEFAULT_TIMEOUT).unwrap();
            assert_eq!(outcome.logs, vec!["rows=3".to_string()]);
        }

        #[test]
        fn malformed_directives_are_collected_not_fatal() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(
                dir.path(),
                "bad.sh",
                "cat > /dev/null\necho 'shout loud'\necho 'log ok'",
            );
            let (sink, _rx) = channel_feed();
            let outcome =
                run_hook(&entry_for(&script), &[], &sink, DEFAULT_TIMEOUT).unwrap();
            assert_eq!(outcome.errors.len(), 1);
            assert_eq!(outcome.logs, vec!["ok".to_string()]);
        }

        #[test]
        fn runaway_scripts_are_killed() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "hang.sh", "cat > /dev/null\nsleep 60");
            let (sink, _rx) = channel_feed();
            let err = run_hook(
                &entry_for(&script),
                &[],
                &sink,
                Duration::from_millis(300),
            )
            .unwrap_err();
            assert!(matches!(err, BenchError::ScriptTimeout(_)));
        }

        #[test]
        fn missing_script_is_reported() {
            let entry = ScriptEntry {
                name: "ghost".into(),
                path: "/no/such/hook.sh".into(),
                trigger: HookTrigger::Manual,
                enabled: true,
            };
            let (sink, _rx) = channel_feed();
            assert!(matches!(
                run_hook(&entry, &[], &sink, DEFAULT_TIMEOUT),
                Err(BenchError::ScriptNotFound(_))
            ));
        }
    }
}
