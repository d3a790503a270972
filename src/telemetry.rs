//! Opt-in tracing setup.
//!
//! The crate itself only emits `tracing` events (dock transitions, table
//! degradation, stale searches); nothing is installed unless the host asks.
//! Hosts with their own subscriber wire it up themselves and ignore this
//! module entirely.

/// Installs a compact stderr subscriber, honouring `RUST_LOG` and falling
/// back to `info`. Compiled in only with the `telemetry` feature.
///
/// Returns `false` when the feature is off or another global subscriber won
/// the race, so embedding hosts can call it unconditionally.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
