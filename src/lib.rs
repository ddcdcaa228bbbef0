pub mod config;
pub mod dosing;
mod error;
pub mod sweep;

pub use dosing::{compute_washing_parameters, DosingEngine, WashingParameters};
pub use error::DoseError;

/// Install the stderr log subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
