use scibench::data::figures::FigureRegistry;
use scibench::persistence::{
    load_state_from_path, save_state_to_path, state_from_json, state_to_json, AppStateSerde,
};
use scibench::sink::{FeedCommand, Sample};

fn registry_with_styles() -> FigureRegistry {
    let mut reg = FigureRegistry::default();
    reg.apply(FeedCommand::Sample(Sample {
        trace: "ch1".into(),
        timestamp_micros: 1_000_000,
        value: 2.0,
    }));
    let fig = reg.active_mut();
    fig.title = "Beam current".to_string();
    fig.y_axis.unit = Some("A".to_string());
    fig.time_window = 30.0;
    let tr = fig.traces.get_mut("ch1").unwrap();
    tr.offset = 0.5;
    tr.look.width = 3.0;
    tr.look.visible = false;

    let second = reg.new_figure();
    reg.mark_closed(second);
    reg.select(1);
    reg
}

#[test]
fn figure_state_round_trips_through_json() {
    let reg = registry_with_styles();
    let mut state = AppStateSerde::default();
    state.capture_figures(&reg);

    let json = state_to_json(&state).unwrap();
    let restored_state = state_from_json(&json).unwrap();

    let mut restored = FigureRegistry::default();
    restored_state.restore_figures(&mut restored);

    assert_eq!(restored.numbers(), vec![1, 2]);
    assert_eq!(restored.active_number(), Some(1));
    assert!(restored.is_closed(2));

    let fig = restored.figure(1).unwrap();
    assert_eq!(fig.title, "Beam current");
    assert_eq!(fig.y_axis.unit.as_deref(), Some("A"));
    assert_eq!(fig.time_window, 30.0);

    // styles come back, data does not
    let tr = &fig.traces["ch1"];
    assert_eq!(tr.offset, 0.5);
    assert_eq!(tr.look.width, 3.0);
    assert!(!tr.look.visible);
    assert_eq!(tr.live.len(), 0);
}

#[test]
fn state_files_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let reg = registry_with_styles();
    let mut state = AppStateSerde::default();
    state.capture_figures(&reg);
    state.window_size = Some([1400.0, 900.0]);

    save_state_to_path(&state, &path).unwrap();
    let loaded = load_state_from_path(&path).unwrap();
    assert_eq!(loaded.window_size, Some([1400.0, 900.0]));
    assert_eq!(loaded.figures.len(), 2);
    assert_eq!(loaded.active_figure, Some(1));
}

#[test]
fn missing_state_file_is_an_io_error() {
    let err = load_state_from_path(std::path::Path::new("/no/such/state.json")).unwrap_err();
    assert!(matches!(err, scibench::BenchError::Io(_)));
}
