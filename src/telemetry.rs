//! Telemetry helpers for hosts embedding `chart-submit`.
//!
//! Tracing setup stays explicit and opt-in. Library code only emits events;
//! the CLI (or the host application) decides whether a subscriber exists.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// `default_filter` is used when `RUST_LOG` is not set.
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_tracing_with_filter(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

/// Same as [`init_tracing_with_filter`] with an `info` default.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}
