use std::str::FromStr;

use scibench::data::hotkeys::{Hotkey, Hotkeys, Modifier};

#[test]
fn hotkey_display_round_trips_through_fromstr() {
    for text in ["P", "Ctrl+X", "Ctrl+Shift+M", "Space", "Alt+Shift+3"] {
        let hk = Hotkey::from_str(text).unwrap();
        assert_eq!(hk.to_string(), text, "round trip failed for {text}");
    }
}

#[test]
fn fromstr_normalizes_case_and_spacing() {
    let hk = Hotkey::from_str(" ctrl + x ").unwrap();
    assert_eq!(hk.modifier, Modifier::Ctrl);
    assert_eq!(hk.key, 'X');

    let hk = Hotkey::from_str("shift+ctrl+m").unwrap();
    assert_eq!(hk.modifier, Modifier::CtrlShift);
}

#[test]
fn fromstr_rejects_junk() {
    assert!(Hotkey::from_str("").is_err());
    assert!(Hotkey::from_str("Hyper+X").is_err());
}

#[test]
fn defaults_include_the_core_bindings() {
    let hk = Hotkeys::default();
    assert_eq!(hk.pause, Some(Hotkey::new(Modifier::None, 'P')));
    assert_eq!(hk.clear_all, Some(Hotkey::new(Modifier::Ctrl, 'X')));
    assert!(hk.console.is_some());
    assert!(hk.figures.is_some());
}

#[test]
fn yaml_round_trip_preserves_custom_bindings() {
    let mut hk = Hotkeys::default();
    hk.pause = Some(Hotkey::new(Modifier::Alt, 'Q'));
    hk.save_png = None;

    let yaml = serde_yaml::to_string(&hk).unwrap();
    let restored: Hotkeys = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(restored.pause, Some(Hotkey::new(Modifier::Alt, 'Q')));
    assert_eq!(restored.save_png, None);
}

#[test]
fn partial_yaml_fills_in_defaults() {
    let restored: Hotkeys = serde_yaml::from_str("pause:\n  modifier: Alt\n  key: Z\n").unwrap();
    assert_eq!(restored.pause, Some(Hotkey::new(Modifier::Alt, 'Z')));
    // unspecified fields fall back to the defaults
    assert_eq!(restored.fit_view, Hotkeys::default().fit_view);
}
