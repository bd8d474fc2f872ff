pub mod axis_format;
pub mod export;
pub mod figure;
pub mod figures;
pub mod hotkeys;
pub mod trace_look;
pub mod traces;
