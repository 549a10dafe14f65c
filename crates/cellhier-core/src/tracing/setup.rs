//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the cellhier tracing/logging system.
///
/// Reads the `CELLHIER_LOG` environment variable for per-module log levels.
/// Format: `CELLHIER_LOG=cellhier_refine=debug,cellhier_tables=warn`
///
/// Falls back to `cellhier=info` if `CELLHIER_LOG` is not set or is invalid.
/// Calling it more than once has no further effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("cellhier=info"));

        // A subscriber installed by the host process takes precedence.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
