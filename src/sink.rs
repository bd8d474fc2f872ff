//! Data feed types and channels for pushing instrument samples into the dashboard.
//!
//! Acquisition sources, script hooks and user code all talk to the UI through a
//! [`BenchSink`]: a cheap clone-able sender producing [`FeedCommand`]s. The UI
//! thread drains the matching receiver once per frame with `try_recv`.

use std::sync::mpsc::{Receiver, SendError, Sender};

/// A single timestamped reading from an instrument channel.
///
/// `timestamp_micros` is microseconds since the UNIX epoch; the plot layer
/// converts to seconds for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Name of the trace this reading belongs to (e.g. `"ch1"`, `"photodiode"`).
    pub trace: String,
    pub timestamp_micros: i64,
    pub value: f64,
}

impl Sample {
    /// Convenience constructor stamping the sample with the current wall clock.
    pub fn now<S: Into<String>>(trace: S, value: f64) -> Self {
        Self {
            trace: trace.into(),
            timestamp_micros: chrono::Utc::now().timestamp_micros(),
            value,
        }
    }

    /// The sample as an `[x, y]` plot point (x in seconds since epoch).
    pub fn as_point(&self) -> [f64; 2] {
        [self.timestamp_micros as f64 * 1e-6, self.value]
    }
}

/// Messages sent over the feed channel to drive the dashboard.
pub enum FeedCommand {
    /// Announce a trace before data arrives, with an optional info string
    /// shown in the figure legend / info readout.
    RegisterTrace { name: String, info: Option<String> },
    /// Append a single sample to its trace.
    Sample(Sample),
    /// Append a chunk of samples (more efficient than one-by-one).
    Samples(Vec<Sample>),
    /// Replace a trace's data wholesale with pre-built plot points.
    SetData { trace: String, points: Vec<[f64; 2]> },
    /// Remove all data points for the given trace.
    ClearTrace { trace: String },
    /// Remove all data points for every trace.
    ClearAll,
}

/// Convenience sender for feeding samples into the dashboard.
#[derive(Clone)]
pub struct BenchSink {
    tx: Sender<FeedCommand>,
}

impl BenchSink {
    /// Announce a trace with an optional info string.
    pub fn register_trace<S: Into<String>>(
        &self,
        name: S,
        info: Option<S>,
    ) -> Result<(), SendError<FeedCommand>> {
        self.tx.send(FeedCommand::RegisterTrace {
            name: name.into(),
            info: info.map(|s| s.into()),
        })
    }

    /// Send a single sample.
    pub fn send(&self, sample: Sample) -> Result<(), SendError<FeedCommand>> {
        self.tx.send(FeedCommand::Sample(sample))
    }

    /// Send a chunk of samples.
    pub fn send_batch<I>(&self, samples: I) -> Result<(), SendError<FeedCommand>>
    where
        I: Into<Vec<Sample>>,
    {
        self.tx.send(FeedCommand::Samples(samples.into()))
    }

    /// Replace the entire data vector for `trace` with the provided points.
    pub fn set_data<S, I>(&self, trace: S, points: I) -> Result<(), SendError<FeedCommand>>
    where
        S: Into<String>,
        I: Into<Vec<[f64; 2]>>,
    {
        self.tx.send(FeedCommand::SetData {
            trace: trace.into(),
            points: points.into(),
        })
    }

    /// Remove all data points for `trace`.
    #[inline]
    pub fn clear_trace<S: Into<String>>(&self, trace: S) -> Result<(), SendError<FeedCommand>> {
        self.tx.send(FeedCommand::ClearTrace {
            trace: trace.into(),
        })
    }

    /// Remove all data points for every trace.
    #[inline]
    pub fn clear_all(&self) -> Result<(), SendError<FeedCommand>> {
        self.tx.send(FeedCommand::ClearAll)
    }
}

/// Create a new feed channel pair: `(BenchSink, Receiver<FeedCommand>)`.
pub fn channel_feed() -> (BenchSink, Receiver<FeedCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (BenchSink { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_arrive_in_order() {
        let (sink, rx) = channel_feed();
        sink.send(Sample {
            trace: "ch1".into(),
            timestamp_micros: 1_000_000,
            value: 0.5,
        })
        .unwrap();
        sink.clear_all().unwrap();

        match rx.try_recv().unwrap() {
            FeedCommand::Sample(s) => {
                assert_eq!(s.trace, "ch1");
                assert_eq!(s.as_point(), [1.0, 0.5]);
            }
            _ => panic!("expected Sample first"),
        }
        assert!(matches!(rx.try_recv().unwrap(), FeedCommand::ClearAll));
    }
}
