//! Figure registry: the bookkeeping behind the Figure Manager panel.
//!
//! Figures are numbered from 1 and never forget their data: closing a figure
//! marks it closed (it can still be inspected and saved) but keeps its traces.
//! Exactly one open figure may be *active*; incoming feed commands and console
//! trace operations are applied to the active figure, mirroring how a plotting
//! session has a "current figure".

use std::collections::BTreeMap;

use crate::data::figure::FigureData;
use crate::sink::FeedCommand;

/// Settings stamped onto every newly created figure.
#[derive(Debug, Clone)]
pub struct FigureDefaults {
    pub time_window: f64,
    pub max_points: usize,
    pub y_unit: Option<String>,
    pub y_log: bool,
    pub y_auto_fit: bool,
}

impl Default for FigureDefaults {
    fn default() -> Self {
        Self {
            time_window: 10.0,
            max_points: 10_000,
            y_unit: None,
            y_log: false,
            y_auto_fit: true,
        }
    }
}

/// Result of a selection in the figure list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The figure became the active target.
    Activated(usize),
    /// The figure is closed; the active marker was cleared instead.
    ClosedSelected(usize),
    /// No such figure.
    Unknown(usize),
}

pub struct FigureRegistry {
    figures: BTreeMap<usize, FigureEntry>,
    active: Option<usize>,
    next_number: usize,
    defaults: FigureDefaults,
}

struct FigureEntry {
    data: FigureData,
    closed: bool,
}

impl Default for FigureRegistry {
    fn default() -> Self {
        Self {
            figures: BTreeMap::new(),
            active: None,
            next_number: 1,
            defaults: FigureDefaults::default(),
        }
    }
}

impl FigureRegistry {
    pub fn with_defaults(defaults: FigureDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn set_defaults(&mut self, defaults: FigureDefaults) {
        self.defaults = defaults;
    }

    fn make_figure(number: usize, defaults: &FigureDefaults) -> FigureData {
        let mut fig = FigureData::new(number);
        fig.time_window = defaults.time_window;
        fig.max_points = defaults.max_points;
        fig.y_axis.unit = defaults.y_unit.clone();
        fig.y_axis.log_scale = defaults.y_log;
        fig.y_axis.auto_fit = defaults.y_auto_fit;
        fig
    }

    /// Create a fresh figure, make it active, and return its number.
    pub fn new_figure(&mut self) -> usize {
        let number = self.next_number;
        self.next_number += 1;
        self.figures.insert(
            number,
            FigureEntry {
                data: Self::make_figure(number, &self.defaults),
                closed: false,
            },
        );
        self.active = Some(number);
        number
    }

    /// Look up or create figure `number`. An existing figure is returned
    /// unchanged, closed or not.
    pub fn ensure_figure(&mut self, number: usize) -> &mut FigureData {
        let defaults = &self.defaults;
        let entry = self.figures.entry(number).or_insert_with(|| FigureEntry {
            data: Self::make_figure(number, defaults),
            closed: false,
        });
        if number >= self.next_number {
            self.next_number = number + 1;
        }
        &mut entry.data
    }

    pub fn has_figure(&self, number: usize) -> bool {
        self.figures.contains_key(&number)
    }

    pub fn is_closed(&self, number: usize) -> bool {
        self.figures.get(&number).map(|e| e.closed).unwrap_or(false)
    }

    pub fn figure(&self, number: usize) -> Option<&FigureData> {
        self.figures.get(&number).map(|e| &e.data)
    }

    pub fn figure_mut(&mut self, number: usize) -> Option<&mut FigureData> {
        self.figures.get_mut(&number).map(|e| &mut e.data)
    }

    /// Numbers in ascending order (the Figure Manager list order).
    pub fn numbers(&self) -> Vec<usize> {
        self.figures.keys().copied().collect()
    }

    pub fn active_number(&self) -> Option<usize> {
        self.active
    }

    /// The figure that feed commands and trace operations target. Creates
    /// figure 1 on first use so data never lands nowhere.
    pub fn active_mut(&mut self) -> &mut FigureData {
        let number = match self.active {
            Some(n) if self.figures.contains_key(&n) && !self.is_closed(n) => n,
            _ => self.new_figure(),
        };
        self.active = Some(number);
        &mut self.figures.get_mut(&number).unwrap().data
    }

    /// Select a figure from the list. Open figures become active; selecting a
    /// closed figure clears the active marker (there is no current figure to
    /// draw into), matching the manager's click behavior.
    pub fn select(&mut self, number: usize) -> SelectOutcome {
        match self.figures.get(&number) {
            None => SelectOutcome::Unknown(number),
            Some(entry) if entry.closed => {
                self.active = None;
                SelectOutcome::ClosedSelected(number)
            }
            Some(_) => {
                self.active = Some(number);
                SelectOutcome::Activated(number)
            }
        }
    }

    /// Mark a figure closed, keeping its data. Clears the active marker if it
    /// pointed at this figure.
    pub fn mark_closed(&mut self, number: usize) -> bool {
        match self.figures.get_mut(&number) {
            Some(entry) => {
                entry.closed = true;
                if self.active == Some(number) {
                    self.active = None;
                }
                true
            }
            None => false,
        }
    }

    /// Re-open a closed figure and make it active.
    pub fn reopen(&mut self, number: usize) -> bool {
        match self.figures.get_mut(&number) {
            Some(entry) => {
                entry.closed = false;
                self.active = Some(number);
                true
            }
            None => false,
        }
    }

    /// The list label for a figure: `Figure N`, `Figure N (Closed)`, with an
    /// asterisk marking the active one.
    pub fn label(&self, number: usize) -> String {
        let mut text = format!("Figure {}", number);
        if self.is_closed(number) {
            text.push_str(" (Closed)");
        } else if self.active == Some(number) {
            text.push_str(" *");
        }
        text
    }

    /// The info readout for a selected figure.
    pub fn info_text(&self, number: usize) -> Option<String> {
        self.figures.get(&number).map(|e| {
            format!(
                "Figure {}\nTraces: {}\nPoints: {}\nClosed: {}",
                number,
                e.data.trace_order.len(),
                e.data.point_count(),
                e.closed
            )
        })
    }

    /// Route one feed command to the active figure.
    pub fn apply(&mut self, cmd: FeedCommand) {
        match cmd {
            FeedCommand::RegisterTrace { name, info } => {
                let fig = self.active_mut();
                let tr = fig.ensure_trace(&name);
                if let Some(info) = info {
                    tr.info = info;
                }
            }
            FeedCommand::Sample(sample) => {
                self.active_mut().ingest(&sample);
            }
            FeedCommand::Samples(samples) => {
                let fig = self.active_mut();
                for sample in &samples {
                    fig.ingest(sample);
                }
            }
            FeedCommand::SetData { trace, points } => {
                self.active_mut().set_trace_data(&trace, points);
            }
            FeedCommand::ClearTrace { trace } => {
                self.active_mut().clear_trace(&trace);
            }
            FeedCommand::ClearAll => {
                self.active_mut().clear_all();
            }
        }
    }

    /// Per-frame housekeeping for all open figures.
    pub fn update_all(&mut self) {
        for entry in self.figures.values_mut() {
            if !entry.closed {
                entry.data.update();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Sample;

    #[test]
    fn numbering_starts_at_one_and_increments() {
        let mut reg = FigureRegistry::default();
        assert_eq!(reg.new_figure(), 1);
        assert_eq!(reg.new_figure(), 2);
        reg.ensure_figure(5);
        assert_eq!(reg.new_figure(), 6);
    }

    #[test]
    fn selecting_closed_figure_clears_active() {
        let mut reg = FigureRegistry::default();
        let n = reg.new_figure();
        assert_eq!(reg.select(n), SelectOutcome::Activated(n));
        reg.mark_closed(n);
        assert_eq!(reg.select(n), SelectOutcome::ClosedSelected(n));
        assert_eq!(reg.active_number(), None);
    }

    #[test]
    fn closed_figure_keeps_data() {
        let mut reg = FigureRegistry::default();
        let n = reg.new_figure();
        reg.apply(FeedCommand::Sample(Sample {
            trace: "ch1".into(),
            timestamp_micros: 0,
            value: 1.0,
        }));
        reg.mark_closed(n);
        assert_eq!(reg.figure(n).unwrap().point_count(), 1);
        assert!(reg.label(n).contains("(Closed)"));
    }

    #[test]
    fn feed_goes_to_fresh_figure_when_active_closed() {
        let mut reg = FigureRegistry::default();
        let n = reg.new_figure();
        reg.mark_closed(n);
        reg.apply(FeedCommand::Sample(Sample {
            trace: "ch1".into(),
            timestamp_micros: 0,
            value: 1.0,
        }));
        // a new figure was created rather than reviving the closed one
        assert_eq!(reg.active_number(), Some(n + 1));
        assert_eq!(reg.figure(n).unwrap().point_count(), 0);
        assert_eq!(reg.figure(n + 1).unwrap().point_count(), 1);
    }

    #[test]
    fn active_label_carries_star() {
        let mut reg = FigureRegistry::default();
        let a = reg.new_figure();
        let b = reg.new_figure();
        assert_eq!(reg.label(a), "Figure 1");
        assert_eq!(reg.label(b), "Figure 2 *");
    }
}
