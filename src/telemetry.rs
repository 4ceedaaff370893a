//! Telemetry helpers for hosts embedding `linechart-rs`.
//!
//! Render passes, reconciliation counts and transition scheduling are all
//! reported through `tracing`. Nothing is installed implicitly; hosts either
//! call [`init_default_tracing`] or bring their own subscriber.

/// Default filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "linechart_rs=info";

/// Installs a compact `fmt` subscriber when the `telemetry` feature is enabled.
///
/// `RUST_LOG` wins over [`DEFAULT_FILTER`]. Returns `false` when the feature is
/// disabled or the host already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
