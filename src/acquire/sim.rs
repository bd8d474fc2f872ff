//! Built-in signal generator, handy for demos and for exercising the
//! dashboard without hardware on the bench.

use std::str::FromStr;
use std::time::Duration;

use crate::error::BenchError;
use crate::sink::Sample;

use super::DataSource;

/// Waveform produced by [`SimSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimProfile {
    /// 1 Hz sine on `sine`, plus a quarter-phase cosine on `cosine`.
    Sine,
    /// Deterministic pseudo-noise on `noise`.
    Noise,
    /// Sawtooth ramp over 10 s on `ramp`.
    Ramp,
}

impl FromStr for SimProfile {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(SimProfile::Sine),
            "noise" => Ok(SimProfile::Noise),
            "ramp" => Ok(SimProfile::Ramp),
            other => Err(BenchError::InvalidDeviceSpec(format!("sim:{other}"))),
        }
    }
}

/// Generates batches at a fixed sample rate, sleeping one poll interval per
/// `read_batch` call.
pub struct SimSource {
    profile: SimProfile,
    sample_rate_hz: f64,
    poll: Duration,
    /// Running sample index, drives both phase and the noise generator.
    n: u64,
}

impl SimSource {
    pub fn new(profile: SimProfile) -> Self {
        Self {
            profile,
            sample_rate_hz: 500.0,
            poll: Duration::from_millis(20),
            n: 0,
        }
    }

    /// Generate the batch for one poll interval ending at `now_micros`.
    /// Split out from `read_batch` so tests can drive it without sleeping.
    pub fn generate(&mut self, now_micros: i64) -> Vec<Sample> {
        let count = (self.sample_rate_hz * self.poll.as_secs_f64()).round() as usize;
        let step_micros = (1e6 / self.sample_rate_hz) as i64;
        let mut out = Vec::with_capacity(count * 2);
        for i in 0..count {
            let ts = now_micros - ((count - 1 - i) as i64) * step_micros;
            let t = self.n as f64 / self.sample_rate_hz;
            match self.profile {
                SimProfile::Sine => {
                    let phase = 2.0 * std::f64::consts::PI * t;
                    out.push(Sample {
                        trace: "sine".into(),
                        timestamp_micros: ts,
                        value: phase.sin(),
                    });
                    out.push(Sample {
                        trace: "cosine".into(),
                        timestamp_micros: ts,
                        value: phase.cos(),
                    });
                }
                SimProfile::Noise => {
                    out.push(Sample {
                        trace: "noise".into(),
                        timestamp_micros: ts,
                        value: pseudo_noise(self.n),
                    });
                }
                SimProfile::Ramp => {
                    out.push(Sample {
                        trace: "ramp".into(),
                        timestamp_micros: ts,
                        value: (t % 10.0) / 10.0,
                    });
                }
            }
            self.n = self.n.wrapping_add(1);
        }
        out
    }
}

/// Deterministic noise in [-1, 1] from a splitmix64-style bit mix.
fn pseudo_noise(n: u64) -> f64 {
    let mut z = n.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z as f64 / u64::MAX as f64) * 2.0 - 1.0
}

impl DataSource for SimSource {
    fn name(&self) -> String {
        format!("sim:{:?}", self.profile).to_lowercase()
    }

    fn read_batch(&mut self) -> crate::error::BenchResult<Vec<Sample>> {
        std::thread::sleep(self.poll);
        Ok(self.generate(chrono::Utc::now().timestamp_micros()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_profile_emits_paired_traces() {
        let mut src = SimSource::new(SimProfile::Sine);
        let batch = src.generate(1_000_000);
        assert!(!batch.is_empty());
        assert_eq!(batch.len() % 2, 0);
        assert_eq!(batch[0].trace, "sine");
        assert_eq!(batch[1].trace, "cosine");
        // first sample of a fresh generator is phase zero
        assert!((batch[0].value - 0.0).abs() < 1e-12);
        assert!((batch[1].value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn timestamps_are_monotonic_within_batch() {
        let mut src = SimSource::new(SimProfile::Noise);
        let batch = src.generate(1_000_000);
        for w in batch.windows(2) {
            assert!(w[0].timestamp_micros <= w[1].timestamp_micros);
        }
        assert_eq!(batch.last().unwrap().timestamp_micros, 1_000_000);
    }

    #[test]
    fn noise_is_deterministic_and_bounded() {
        let mut a = SimSource::new(SimProfile::Noise);
        let mut b = SimSource::new(SimProfile::Noise);
        let ba = a.generate(0);
        let bb = b.generate(0);
        assert_eq!(ba, bb);
        assert!(ba.iter().all(|s| s.value >= -1.0 && s.value <= 1.0));
    }
}
