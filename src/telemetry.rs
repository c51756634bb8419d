//! Tracing subscriber bootstrap for embedding applications.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "todo_core=info";

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter directives could not be parsed.
    #[error("invalid tracing directives '{directives}': {source}")]
    InvalidDirectives {
        /// Offending directives.
        directives: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// A global subscriber is already installed.
    #[error("tracing subscriber already initialised: {0}")]
    AlreadyInitialised(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs a formatted subscriber filtered by `RUST_LOG`, or by
/// `default_directives` when `RUST_LOG` is unset or invalid.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirectives`] when `default_directives`
/// does not parse, or [`TelemetryError::AlreadyInitialised`] when another
/// global subscriber is already active.
pub fn init_tracing(default_directives: &str) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives).map_err(|source| {
            TelemetryError::InvalidDirectives {
                directives: default_directives.to_owned(),
                source,
            }
        })?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
