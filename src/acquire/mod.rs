//! Live acquisition: device specs, data sources and the reader thread.
//!
//! A device is described by a one-line spec string (the CLI `--device`
//! argument):
//!
//! - `sim:<profile>`: built-in signal generator (`sine`, `noise`, `ramp`)
//! - `tcp:<addr>`: line-oriented TCP stream (`tcp:127.0.0.1:9000`)
//! - anything else: a filesystem path that is tail-read as it grows
//!   (character devices and CSV logs both behave this way)
//!
//! All sources speak the same line protocol, see [`line`].

pub mod file;
pub mod line;
pub mod reader;
pub mod sim;
pub mod tcp;

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{BenchError, BenchResult};
use crate::sink::Sample;

pub use reader::{spawn_reader, ReaderHandle};
pub use sim::SimProfile;

/// A parsed `--device` specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Sim { profile: sim::SimProfile },
    Tcp { addr: String },
    File { path: PathBuf, from_start: bool },
}

impl FromStr for SourceSpec {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BenchError::InvalidDeviceSpec(s.to_string()));
        }
        if let Some(profile) = s.strip_prefix("sim:") {
            return Ok(SourceSpec::Sim {
                profile: profile.parse()?,
            });
        }
        if s == "sim" {
            return Ok(SourceSpec::Sim {
                profile: sim::SimProfile::Sine,
            });
        }
        if let Some(addr) = s.strip_prefix("tcp:") {
            if addr.is_empty() {
                return Err(BenchError::InvalidDeviceSpec(s.to_string()));
            }
            return Ok(SourceSpec::Tcp {
                addr: addr.to_string(),
            });
        }
        Ok(SourceSpec::File {
            path: PathBuf::from(s),
            from_start: false,
        })
    }
}

impl SourceSpec {
    /// Open the described device as a ready-to-read source.
    pub fn open(&self) -> BenchResult<Box<dyn DataSource>> {
        match self {
            SourceSpec::Sim { profile } => Ok(Box::new(sim::SimSource::new(*profile))),
            SourceSpec::Tcp { addr } => Ok(Box::new(tcp::TcpSource::connect(addr)?)),
            SourceSpec::File { path, from_start } => {
                Ok(Box::new(file::FileTailSource::open(path, *from_start)?))
            }
        }
    }
}

/// A blocking stream of instrument samples.
///
/// `read_batch` blocks briefly (one poll interval) and returns whatever
/// samples arrived in the meantime; an empty batch is not an error. Sources
/// run on a dedicated reader thread, see [`spawn_reader`].
pub trait DataSource: Send {
    /// Human-readable identification, used in logs and trace info strings.
    fn name(&self) -> String;

    /// Read the next batch of samples.
    fn read_batch(&mut self) -> BenchResult<Vec<Sample>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_parses_all_forms() {
        assert_eq!(
            "sim:noise".parse::<SourceSpec>().unwrap(),
            SourceSpec::Sim {
                profile: SimProfile::Noise
            }
        );
        assert_eq!(
            "sim".parse::<SourceSpec>().unwrap(),
            SourceSpec::Sim {
                profile: SimProfile::Sine
            }
        );
        assert_eq!(
            "tcp:127.0.0.1:9000".parse::<SourceSpec>().unwrap(),
            SourceSpec::Tcp {
                addr: "127.0.0.1:9000".to_string()
            }
        );
        assert_eq!(
            "/dev/ttyUSB0".parse::<SourceSpec>().unwrap(),
            SourceSpec::File {
                path: PathBuf::from("/dev/ttyUSB0"),
                from_start: false
            }
        );
    }

    #[test]
    fn spec_rejects_empty_and_bad_profiles() {
        assert!("".parse::<SourceSpec>().is_err());
        assert!("tcp:".parse::<SourceSpec>().is_err());
        assert!("sim:square".parse::<SourceSpec>().is_err());
    }
}
