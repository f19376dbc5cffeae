//! Tracing subscriber setup. `forecast-core` only emits events.
//!
//! `-v` → info, `-vv` → debug, `-vvv` → trace, `-q` → error, default warn.
//! `RUST_LOG` overrides all of the above if set.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let level = derive_level(verbose, quiet);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("forecast={level},forecast_core={level}")));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn derive_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(derive_level(0, false), "warn");
        assert_eq!(derive_level(1, false), "info");
        assert_eq!(derive_level(2, false), "debug");
        assert_eq!(derive_level(3, false), "trace");
        assert_eq!(derive_level(10, false), "trace");
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(3, true), "error");
    }
}
