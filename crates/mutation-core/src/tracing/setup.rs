//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Filter used when `MUTATION_ANALYSIS_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "mutation_core=info,mutation_analysis=info,mutation_cli=info";

/// Initialize the tracing/logging system.
///
/// Reads the `MUTATION_ANALYSIS_LOG` environment variable for per-subsystem
/// log levels, e.g. `MUTATION_ANALYSIS_LOG=mutation_analysis::report=debug`.
///
/// Idempotent: calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
