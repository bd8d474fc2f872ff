use std::process::exit;

use clap::Parser;
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::Args;

fn main() {
    let tracing_env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
        // keep the GPU/windowing stack quiet under RUST_LOG=debug
        .add_directive("wgpu_core=warn".parse().unwrap())
        .add_directive("wgpu_hal=warn".parse().unwrap())
        .add_directive("naga=warn".parse().unwrap())
        .add_directive("winit=info".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_env_filter)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = Args::parse().run() {
        // tracing keeps error output consistent with messages logged
        // while the program is running
        error!("{e:?}");
        exit(1);
    }
}
