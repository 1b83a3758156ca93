//! Terminal logging for the downloader.
//!
//! Nothing is written to disk; the app keeps no state between runs.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode};

fn level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // iced and wgpu are chatty at debug level
        .add_filter_allow_str(env!("CARGO_CRATE_NAME"))
        .build()
}

/// Install the global logger. Safe to call more than once.
pub fn initialize() {
    let _ = TermLogger::init(
        level(),
        build_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
