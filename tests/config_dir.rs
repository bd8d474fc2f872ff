//! Default-path persistence via the SCIBENCH_CONFIG_DIR override.
//!
//! Kept as a single test: the override is process-global, so the individual
//! steps must not run concurrently.

use std::path::Path;

use scibench::data::hotkeys::{Hotkey, Hotkeys, Modifier};
use scibench::script::{HookTrigger, ScriptRegistry};

#[test]
fn registry_and_hotkeys_persist_under_the_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("SCIBENCH_CONFIG_DIR", dir.path());

    assert_eq!(scibench::paths::config_dir().unwrap(), dir.path());

    // script registry: empty before any save, round-trips after
    let reg = ScriptRegistry::load_or_default().unwrap();
    assert!(reg.is_empty());

    let mut reg = ScriptRegistry::default();
    reg.add(
        Path::new("/opt/hooks/baseline.sh"),
        None,
        HookTrigger::OnStart,
    )
    .unwrap();
    reg.save_default().unwrap();
    assert!(dir.path().join("scripts.yaml").exists());

    let loaded = ScriptRegistry::load_or_default().unwrap();
    assert_eq!(loaded.get("baseline").unwrap().trigger, HookTrigger::OnStart);

    // hotkeys land next to it
    let mut hk = Hotkeys::default();
    hk.pause = Some(Hotkey::new(Modifier::Ctrl, 'P'));
    hk.save_to_default_path().unwrap();
    assert!(dir.path().join("hotkeys.yaml").exists());

    let loaded = Hotkeys::load_from_default_path().unwrap();
    assert_eq!(loaded.pause, Some(Hotkey::new(Modifier::Ctrl, 'P')));

    std::env::remove_var("SCIBENCH_CONFIG_DIR");
}
