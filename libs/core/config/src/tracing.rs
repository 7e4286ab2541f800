use crate::Environment;
use tracing_subscriber::{prelude::*, EnvFilter, Layer};

/// Install color-eyre panic and error report hooks.
///
/// Call once at the top of main(), before anything fallible. Repeated
/// calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the tracing subscriber.
///
/// Production gets JSON lines for log aggregation at `info`; development
/// gets pretty output at `debug`. `RUST_LOG` overrides either default. An
/// `ErrorLayer` is always installed so spans end up in error reports.
///
/// Calling this twice (common in tests) is a silent no-op.
pub fn init_tracing(environment: &Environment) {
    let default_level = if environment.is_production() {
        "info"
    } else {
        "debug"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = if environment.is_production() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .pretty()
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .try_init();
}
