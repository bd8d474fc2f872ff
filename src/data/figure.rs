use std::collections::HashMap;

use crate::data::traces::TraceData;
use crate::sink::Sample;

/// Per-axis display settings.
pub struct AxisSettings {
    pub unit: Option<String>,
    pub log_scale: bool,
    pub name: Option<String>,
    pub bounds: (f64, f64),
    pub auto_fit: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            unit: None,
            log_scale: false,
            name: None,
            bounds: (0.0, 1.0),
            auto_fit: false,
        }
    }
}

/// One figure: a set of traces sharing an X/Y axis pair and a rolling time window.
pub struct FigureData {
    pub number: usize,
    pub title: String,
    pub x_axis: AxisSettings,
    pub y_axis: AxisSettings,
    pub max_points: usize,
    /// Rolling time window in seconds.
    pub time_window: f64,
    pub paused: bool,
    pub show_legend: bool,
    pub show_info_in_legend: bool,
    pub traces: HashMap<String, TraceData>,
    pub trace_order: Vec<String>,
}

impl FigureData {
    pub fn new(number: usize) -> Self {
        let mut x_axis = AxisSettings::default();
        x_axis.name = Some("Time".to_string());
        x_axis.unit = Some("s".to_string());
        Self {
            number,
            title: format!("Figure {}", number),
            x_axis,
            y_axis: AxisSettings::default(),
            max_points: 10_000,
            time_window: 10.0,
            paused: false,
            show_legend: true,
            show_info_in_legend: false,
            traces: HashMap::new(),
            trace_order: Vec::new(),
        }
    }

    /// Look up or create the trace `name`, keeping insertion order for legends.
    pub fn ensure_trace(&mut self, name: &str) -> &mut TraceData {
        if !self.traces.contains_key(name) {
            self.trace_order.push(name.to_string());
            let index = self.trace_order.len() - 1;
            self.traces
                .insert(name.to_string(), TraceData::new(name.to_string(), index));
        }
        self.traces.get_mut(name).unwrap()
    }

    /// Append one sample to its trace, creating the trace on first sight.
    pub fn ingest(&mut self, sample: &Sample) {
        let max_points = self.max_points;
        let entry = self.ensure_trace(&sample.trace);
        entry.push(sample.as_point(), max_points);
    }

    pub fn set_trace_data(&mut self, name: &str, points: Vec<[f64; 2]>) {
        let entry = self.ensure_trace(name);
        entry.live = points.into();
        entry.snap = None;
    }

    pub fn clear_trace(&mut self, name: &str) -> bool {
        match self.traces.get_mut(name) {
            Some(tr) => {
                tr.clear_all();
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        for tr in self.traces.values_mut() {
            tr.clear_all();
        }
    }

    /// Per-frame housekeeping: prune buffers, advance the rolling window,
    /// auto-fit the axes that request it.
    pub fn update(&mut self) {
        for tr in self.traces.values_mut() {
            tr.prune_by_points(self.max_points);
        }

        // Keep only the rolling window plus 15% slack so pans near the left
        // edge don't show a gap. Paused figures keep everything.
        if !self.paused {
            let latest = self
                .traces
                .values()
                .filter_map(|tr| tr.live.back().map(|p| p[0]))
                .fold(f64::NEG_INFINITY, f64::max);
            if latest.is_finite() {
                let cutoff = latest - self.time_window * 1.15;
                for tr in self.traces.values_mut() {
                    tr.prune_before(cutoff);
                }
            }
        }

        if self.x_axis.auto_fit {
            self.fit_x_bounds();
        }
        self.advance_window();
        if self.y_axis.auto_fit {
            self.fit_y_bounds();
        }
    }

    /// While live, keep the X bounds pinned to the trailing `time_window`
    /// behind the newest sample. While paused, only re-center to the window
    /// width so a resumed figure doesn't jump.
    fn advance_window(&mut self) {
        if !self.paused {
            let now = self
                .traces
                .values()
                .filter_map(|tr| tr.live.back().map(|p| p[0]))
                .fold(f64::NEG_INFINITY, f64::max);
            let now = if now.is_finite() { now } else { self.time_window };
            self.x_axis.bounds = (now - self.time_window, now);
        }
    }

    pub fn fit_x_bounds(&mut self) {
        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        for tr in self.traces.values() {
            for p in tr.display(self.paused).iter() {
                if p[0] < min_x {
                    min_x = p[0];
                }
                if p[0] > max_x {
                    max_x = p[0];
                }
            }
        }
        if min_x < max_x {
            self.x_axis.bounds = (min_x, max_x);
            self.time_window = max_x - min_x;
        }
    }

    pub fn fit_y_bounds(&mut self) {
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;
        let x_bounds = self.x_axis.bounds;
        for tr in self.traces.values() {
            for p in tr.display(self.paused).iter() {
                if p[0] < x_bounds.0 || p[0] > x_bounds.1 {
                    continue;
                }
                let y = p[1] + tr.offset;
                if y < min_y {
                    min_y = y;
                }
                if y > max_y {
                    max_y = y;
                }
            }
        }
        if min_y < max_y {
            self.y_axis.bounds = (min_y, max_y);
        }
    }

    pub fn fit_bounds(&mut self) {
        self.fit_x_bounds();
        self.fit_y_bounds();
    }

    pub fn pause(&mut self) {
        self.paused = true;
        for tr in self.traces.values_mut() {
            tr.take_snapshot();
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
        for tr in self.traces.values_mut() {
            tr.clear_snapshot();
        }
    }

    pub fn point_count(&self) -> usize {
        self.traces.values().map(|tr| tr.live.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(trace: &str, t: f64, v: f64) -> Sample {
        Sample {
            trace: trace.into(),
            timestamp_micros: (t * 1e6) as i64,
            value: v,
        }
    }

    #[test]
    fn ingest_creates_traces_in_order() {
        let mut fig = FigureData::new(1);
        fig.ingest(&sample("b", 0.0, 1.0));
        fig.ingest(&sample("a", 0.1, 2.0));
        fig.ingest(&sample("b", 0.2, 3.0));
        assert_eq!(fig.trace_order, vec!["b".to_string(), "a".to_string()]);
        assert_eq!(fig.traces["b"].live.len(), 2);
    }

    #[test]
    fn window_tracks_latest_sample() {
        let mut fig = FigureData::new(1);
        fig.time_window = 5.0;
        fig.ingest(&sample("ch1", 100.0, 0.0));
        fig.update();
        assert_eq!(fig.x_axis.bounds, (95.0, 100.0));
    }

    #[test]
    fn fit_y_respects_offset_and_x_bounds() {
        let mut fig = FigureData::new(1);
        fig.ingest(&sample("ch1", 1.0, 1.0));
        fig.ingest(&sample("ch1", 2.0, 5.0));
        fig.ingest(&sample("ch1", 50.0, 100.0));
        fig.traces.get_mut("ch1").unwrap().offset = 1.0;
        fig.x_axis.bounds = (0.0, 10.0);
        fig.fit_y_bounds();
        assert_eq!(fig.y_axis.bounds, (2.0, 6.0));
    }
}
