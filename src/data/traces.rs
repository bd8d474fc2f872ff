use std::collections::VecDeque;

use crate::data::trace_look::TraceLook;

/// Data and presentation state for one trace within a figure.
#[derive(Default)]
pub struct TraceData {
    pub name: String,
    pub look: TraceLook,
    /// Constant Y offset applied at draw and export time.
    pub offset: f64,
    /// Live rolling buffer, continuously filled while acquisition runs.
    pub live: VecDeque<[f64; 2]>,
    /// Snapshot of `live` taken at pause time; displayed while paused.
    pub snap: Option<VecDeque<[f64; 2]>>,
    /// Free-form info string supplied by the data source.
    pub info: String,
}

impl TraceData {
    pub fn new(name: String, index: usize) -> Self {
        Self {
            name,
            look: TraceLook::new(index),
            ..Default::default()
        }
    }

    /// The points currently on display: the snapshot while paused, live otherwise.
    pub fn display(&self, paused: bool) -> &VecDeque<[f64; 2]> {
        if paused {
            if let Some(snap) = &self.snap {
                return snap;
            }
        }
        &self.live
    }

    pub fn push(&mut self, point: [f64; 2], max_points: usize) {
        self.live.push_back(point);
        while self.live.len() > max_points {
            self.live.pop_front();
        }
    }

    pub fn prune_by_points(&mut self, max_points: usize) {
        while self.live.len() > max_points {
            self.live.pop_front();
        }
    }

    /// Drop points older than `cutoff` (seconds since epoch) from the live buffer.
    pub fn prune_before(&mut self, cutoff: f64) {
        while let Some(&[t, _]) = self.live.front() {
            if t < cutoff {
                self.live.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.live.clear();
        self.snap = None;
    }

    pub fn take_snapshot(&mut self) {
        self.snap = Some(self.live.clone());
    }

    pub fn clear_snapshot(&mut self) {
        self.snap = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_enforces_point_cap() {
        let mut tr = TraceData::new("ch1".into(), 0);
        for i in 0..20 {
            tr.push([i as f64, 0.0], 10);
        }
        assert_eq!(tr.live.len(), 10);
        assert_eq!(tr.live.front().unwrap()[0], 10.0);
    }

    #[test]
    fn display_prefers_snapshot_while_paused() {
        let mut tr = TraceData::new("ch1".into(), 0);
        tr.push([1.0, 1.0], 100);
        tr.take_snapshot();
        tr.push([2.0, 2.0], 100);

        assert_eq!(tr.display(true).len(), 1);
        assert_eq!(tr.display(false).len(), 2);
        tr.clear_snapshot();
        assert_eq!(tr.display(true).len(), 2);
    }

    #[test]
    fn prune_before_drops_old_points() {
        let mut tr = TraceData::new("ch1".into(), 0);
        for i in 0..10 {
            tr.push([i as f64, 0.0], 100);
        }
        tr.prune_before(5.0);
        assert_eq!(tr.live.front().unwrap()[0], 5.0);
    }
}
