use scibench::console::{dispatch, parse_command, ConsoleCommand, ConsoleState, LineKind};
use scibench::data::figures::FigureRegistry;
use scibench::script::ScriptRegistry;
use scibench::sink::{channel_feed, FeedCommand, Sample};

fn feed(reg: &mut FigureRegistry, trace: &str, secs: f64, value: f64) {
    reg.apply(FeedCommand::Sample(Sample {
        trace: trace.into(),
        timestamp_micros: (secs * 1e6) as i64,
        value,
    }));
}

#[test]
fn figures_listing_matches_manager_labels() {
    let mut figures = FigureRegistry::default();
    let scripts = ScriptRegistry::default();
    let (sink, _rx) = channel_feed();

    feed(&mut figures, "ch1", 1.0, 1.0);
    let n = figures.new_figure();
    figures.mark_closed(n);
    figures.select(1);

    let out = dispatch(ConsoleCommand::Figures, &mut figures, &scripts, &sink);
    let texts: Vec<&str> = out.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Figure 1 *", "Figure 2 (Closed)"]);
}

#[test]
fn pause_resume_clear_drive_the_active_figure() {
    let mut figures = FigureRegistry::default();
    let scripts = ScriptRegistry::default();
    let (sink, _rx) = channel_feed();

    feed(&mut figures, "ch1", 1.0, 1.0);
    dispatch(ConsoleCommand::Pause, &mut figures, &scripts, &sink);
    assert!(figures.figure(1).unwrap().paused);
    dispatch(ConsoleCommand::Resume, &mut figures, &scripts, &sink);
    assert!(!figures.figure(1).unwrap().paused);

    let out = dispatch(
        ConsoleCommand::Clear(Some("nope".into())),
        &mut figures,
        &scripts,
        &sink,
    );
    assert_eq!(out[0].kind, LineKind::Error);

    dispatch(
        ConsoleCommand::Clear(Some("ch1".into())),
        &mut figures,
        &scripts,
        &sink,
    );
    assert_eq!(figures.figure(1).unwrap().point_count(), 0);
}

#[test]
fn save_writes_csv_through_the_console() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fig.csv");

    let mut figures = FigureRegistry::default();
    let scripts = ScriptRegistry::default();
    let (sink, _rx) = channel_feed();
    feed(&mut figures, "ch1", 1.5, 4.0);

    let out = dispatch(
        ConsoleCommand::Save {
            figure: 1,
            path: path.clone(),
        },
        &mut figures,
        &scripts,
        &sink,
    );
    assert_eq!(out[0].kind, LineKind::System, "got: {}", out[0].text);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "trace,timestamp,value\nch1,1.500000000,4\n");
}

#[test]
fn save_unknown_figure_and_bad_extension_error() {
    let mut figures = FigureRegistry::default();
    let scripts = ScriptRegistry::default();
    let (sink, _rx) = channel_feed();
    feed(&mut figures, "ch1", 1.0, 1.0);

    let out = dispatch(
        ConsoleCommand::Save {
            figure: 7,
            path: "/tmp/x.csv".into(),
        },
        &mut figures,
        &scripts,
        &sink,
    );
    assert_eq!(out[0].kind, LineKind::Error);

    let out = dispatch(
        ConsoleCommand::Save {
            figure: 1,
            path: "/tmp/x.pdf".into(),
        },
        &mut figures,
        &scripts,
        &sink,
    );
    assert_eq!(out[0].kind, LineKind::Error);
    assert!(out[0].text.contains("pdf"), "got: {}", out[0].text);
}

#[test]
fn full_session_through_submit() {
    let mut console = ConsoleState::default();
    let mut figures = FigureRegistry::default();
    let scripts = ScriptRegistry::default();
    let (sink, _rx) = channel_feed();

    feed(&mut figures, "ch1", 1.0, 1.0);

    for cmd in ["figure new", "figures", "figure 1", "traces", "fit"] {
        console.input = cmd.to_string();
        console.submit(&mut figures, &scripts, &sink);
    }

    assert_eq!(
        console.history.entries(),
        ["figure new", "figures", "figure 1", "traces", "fit"]
    );
    // no errors anywhere in that session
    assert!(
        !console.scrollback.iter().any(|l| l.kind == LineKind::Error),
        "unexpected error lines: {:?}",
        console
            .scrollback
            .iter()
            .filter(|l| l.kind == LineKind::Error)
            .map(|l| &l.text)
            .collect::<Vec<_>>()
    );
    // the switch to figure 1 was reported
    assert!(console
        .scrollback
        .iter()
        .any(|l| l.text.contains("switched to figure 1")));
}

#[test]
fn parse_command_covers_script_forms() {
    assert_eq!(
        parse_command("script list").unwrap(),
        ConsoleCommand::ScriptList
    );
    assert!(parse_command("script").unwrap_err().starts_with("usage:"));
    assert!(parse_command("script run").unwrap_err().starts_with("usage:"));
}
