//! Tail-reading file source.
//!
//! Follows a growing file the way `tail -f` does: start at the end (or the
//! beginning with `from_start`), poll for appended bytes, carry partial lines
//! across polls, and treat truncation as a log rotation by rewinding to the
//! start.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BenchError, BenchResult};
use crate::sink::Sample;

use super::line;
use super::DataSource;

#[derive(Debug)]
pub struct FileTailSource {
    path: PathBuf,
    file: File,
    pos: u64,
    /// Partial last line carried to the next poll.
    carry: String,
    poll: Duration,
    default_trace: String,
    parse_errors: u64,
}

impl FileTailSource {
    pub fn open(path: &Path, from_start: bool) -> BenchResult<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BenchError::DeviceNotFound(path.to_path_buf()),
            _ => BenchError::Io(e),
        })?;
        let pos = if from_start {
            0
        } else {
            file.metadata().map(|m| m.len()).unwrap_or(0)
        };
        let default_trace = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("data")
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            file,
            pos,
            carry: String::new(),
            poll: Duration::from_millis(20),
            default_trace,
            parse_errors: 0,
        })
    }

    /// Total number of unparseable lines seen so far.
    pub fn parse_errors(&self) -> u64 {
        self.parse_errors
    }

    /// Read newly appended bytes and parse complete lines.
    /// Split out from `read_batch` so tests can drive it without sleeping.
    pub fn poll_once(&mut self, now_micros: i64) -> BenchResult<Vec<Sample>> {
        let len = self.file.metadata()?.len();
        if len < self.pos {
            // Truncated or rotated: start over.
            tracing::debug!(path = %self.path.display(), "file shrank, rewinding");
            self.pos = 0;
            self.carry.clear();
        }
        if len == self.pos {
            return Ok(Vec::new());
        }

        self.file.seek(SeekFrom::Start(self.pos))?;
        let mut buf = String::new();
        let read = self
            .file
            .by_ref()
            .take(len - self.pos)
            .read_to_string(&mut buf)?;
        self.pos += read as u64;

        self.carry.push_str(&buf);
        let complete = match self.carry.rfind('\n') {
            Some(idx) => {
                let rest = self.carry.split_off(idx + 1);
                std::mem::replace(&mut self.carry, rest)
            }
            None => return Ok(Vec::new()),
        };

        let mut out = Vec::new();
        let errors = line::parse_chunk(&complete, &self.default_trace, now_micros, &mut out);
        if errors > 0 {
            self.parse_errors += errors as u64;
            tracing::warn!(
                path = %self.path.display(),
                errors,
                "skipped unparseable sample lines"
            );
        }
        Ok(out)
    }
}

impl DataSource for FileTailSource {
    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn read_batch(&mut self) -> BenchResult<Vec<Sample>> {
        std::thread::sleep(self.poll);
        self.poll_once(chrono::Utc::now().timestamp_micros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn tails_appended_lines_and_carries_partials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.log");
        std::fs::write(&path, "old,1.0,1.0\n").unwrap();

        let mut src = FileTailSource::open(&path, false).unwrap();
        // opened at end: existing content is not replayed
        assert!(src.poll_once(0).unwrap().is_empty());

        let mut f = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        write!(f, "ch1,2.0,5.0\nch1,3.0").unwrap();
        f.flush().unwrap();

        let batch = src.poll_once(0).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].trace, "ch1");

        // completing the carried partial line yields the sample
        write!(f, ",6.0\n").unwrap();
        f.flush().unwrap();
        let batch = src.poll_once(0).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].value, 6.0);
    }

    #[test]
    fn from_start_replays_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.log");
        std::fs::write(&path, "a,1.0,1.0\na,2.0,2.0\n").unwrap();

        let mut src = FileTailSource::open(&path, true).unwrap();
        assert_eq!(src.poll_once(0).unwrap().len(), 2);
    }

    #[test]
    fn default_trace_comes_from_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thermo.log");
        std::fs::write(&path, "").unwrap();

        let mut src = FileTailSource::open(&path, true).unwrap();
        let mut f = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(f, "21.5").unwrap();
        let batch = src.poll_once(7).unwrap();
        assert_eq!(batch[0].trace, "thermo");
        assert_eq!(batch[0].timestamp_micros, 7);
    }

    #[test]
    fn missing_file_is_a_device_error() {
        let err = FileTailSource::open(Path::new("/no/such/device"), false).unwrap_err();
        assert!(matches!(err, BenchError::DeviceNotFound(_)));
    }
}
