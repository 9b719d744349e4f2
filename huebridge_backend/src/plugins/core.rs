//! Logging for the backend.
//!
//! Everything logs through `tracing`. Nothing is printed unless the
//! `stderr-logging` feature is enabled, in which case events are written to
//! stderr and filtered with `RUST_LOG` (defaulting to `info`).

#[cfg(feature = "stderr-logging")]
use tracing_subscriber::EnvFilter;

pub fn initialize() {
	#[cfg(feature = "stderr-logging")]
	{
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
		let result = tracing_subscriber::fmt()
			.with_writer(std::io::stderr)
			.with_env_filter(filter)
			.try_init();

		// A subscriber installed by the host application takes precedence
		if result.is_err() {
			tracing::debug!("Logging was already initialized");
		}
	}

	tracing::debug!("Core initialized");
}
