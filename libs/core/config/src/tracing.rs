//! Process-wide error reporting and log subscriber setup.

use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install the color-eyre panic and error report hooks.
///
/// Call first thing in `main`. A second install is ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter used when `RUST_LOG` is not set.
///
/// SQL statement logging from sqlx stays at `warn` in both modes; enable
/// `DB_SQLX_LOGGING` or set `RUST_LOG` to see queries.
pub fn default_directives(environment: &Environment) -> &'static str {
    match environment {
        Environment::Production => "info,tower_http=info,sea_orm=warn,sqlx=warn",
        Environment::Development => "debug,tower_http=debug,sea_orm=info,sqlx=warn",
    }
}

/// Register the global subscriber.
///
/// - Production: flattened JSON events without module targets, one object
///   per line for the log shipper.
/// - Development: pretty multi-line output with targets.
///
/// Both attach `tracing_error::ErrorLayer` so eyre reports carry the span
/// trace of the failing request, e.g. the `product_id` recorded by
/// `#[instrument]` on the service methods. `RUST_LOG` overrides
/// [`default_directives`].
///
/// Calling this again after a subscriber is installed is a no-op, which
/// keeps tests that share a process happy.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let result = match environment {
        Environment::Production => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init(),
        Environment::Development => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init(),
    };

    match result {
        Ok(()) => info!(environment = %environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}
