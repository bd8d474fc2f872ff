use scibench::data::figures::{FigureRegistry, SelectOutcome};
use scibench::sink::{FeedCommand, Sample};

fn sample(trace: &str, secs: f64, value: f64) -> Sample {
    Sample {
        trace: trace.into(),
        timestamp_micros: (secs * 1e6) as i64,
        value,
    }
}

#[test]
fn feed_creates_figure_one_lazily() {
    let mut reg = FigureRegistry::default();
    assert!(reg.numbers().is_empty());

    reg.apply(FeedCommand::Sample(sample("ch1", 1.0, 2.0)));
    assert_eq!(reg.numbers(), vec![1]);
    assert_eq!(reg.active_number(), Some(1));
    assert_eq!(reg.figure(1).unwrap().point_count(), 1);
}

#[test]
fn register_trace_sets_info_without_points() {
    let mut reg = FigureRegistry::default();
    reg.apply(FeedCommand::RegisterTrace {
        name: "pd".into(),
        info: Some("photodiode".into()),
    });
    let fig = reg.figure(1).unwrap();
    assert_eq!(fig.trace_order, vec!["pd".to_string()]);
    assert_eq!(fig.traces["pd"].info, "photodiode");
    assert_eq!(fig.point_count(), 0);
}

#[test]
fn switching_figures_routes_subsequent_feed() {
    let mut reg = FigureRegistry::default();
    reg.apply(FeedCommand::Sample(sample("ch1", 1.0, 1.0)));
    let second = reg.new_figure();
    reg.apply(FeedCommand::Sample(sample("ch2", 2.0, 2.0)));

    assert_eq!(reg.figure(1).unwrap().point_count(), 1);
    assert_eq!(reg.figure(second).unwrap().point_count(), 1);
    assert!(reg.figure(second).unwrap().traces.contains_key("ch2"));

    assert_eq!(reg.select(1), SelectOutcome::Activated(1));
    reg.apply(FeedCommand::Sample(sample("ch1", 3.0, 3.0)));
    assert_eq!(reg.figure(1).unwrap().point_count(), 2);
}

#[test]
fn set_data_replaces_wholesale() {
    let mut reg = FigureRegistry::default();
    reg.apply(FeedCommand::Sample(sample("ch1", 1.0, 1.0)));
    reg.apply(FeedCommand::SetData {
        trace: "ch1".into(),
        points: vec![[10.0, 1.0], [11.0, 2.0]],
    });
    let fig = reg.figure(1).unwrap();
    assert_eq!(fig.traces["ch1"].live.len(), 2);
    assert_eq!(fig.traces["ch1"].live[0], [10.0, 1.0]);
}

#[test]
fn clear_commands_target_the_active_figure() {
    let mut reg = FigureRegistry::default();
    reg.apply(FeedCommand::Samples(vec![
        sample("a", 1.0, 1.0),
        sample("b", 1.0, 2.0),
    ]));
    reg.apply(FeedCommand::ClearTrace { trace: "a".into() });
    let fig = reg.figure(1).unwrap();
    assert_eq!(fig.traces["a"].live.len(), 0);
    assert_eq!(fig.traces["b"].live.len(), 1);

    reg.apply(FeedCommand::ClearAll);
    assert_eq!(reg.figure(1).unwrap().point_count(), 0);
}

#[test]
fn info_text_reports_closed_state() {
    let mut reg = FigureRegistry::default();
    reg.apply(FeedCommand::Sample(sample("ch1", 1.0, 1.0)));
    reg.mark_closed(1);
    let info = reg.info_text(1).unwrap();
    assert!(info.contains("Figure 1"));
    assert!(info.contains("Closed: true"));

    assert!(reg.info_text(99).is_none());
}

#[test]
fn reopen_restores_the_active_marker() {
    let mut reg = FigureRegistry::default();
    let n = reg.new_figure();
    reg.mark_closed(n);
    assert_eq!(reg.active_number(), None);
    assert!(reg.reopen(n));
    assert_eq!(reg.active_number(), Some(n));
    assert_eq!(reg.label(n), format!("Figure {n} *"));
}

#[test]
fn paused_figure_displays_snapshot_but_keeps_ingesting() {
    let mut reg = FigureRegistry::default();
    reg.apply(FeedCommand::Sample(sample("ch1", 1.0, 1.0)));
    reg.active_mut().pause();
    reg.apply(FeedCommand::Sample(sample("ch1", 2.0, 2.0)));

    let fig = reg.figure(1).unwrap();
    // live buffer keeps growing so no data is lost while frozen
    assert_eq!(fig.traces["ch1"].live.len(), 2);
    assert_eq!(fig.traces["ch1"].display(true).len(), 1);
}
