pub mod http;
pub mod noop;

use std::sync::Arc;
use std::time::Duration;

use crate::application::config::SyncConfig;
use crate::domain::ports::AlertSynchronizer;

use self::http::HttpSynchronizer;
use self::noop::NoopSynchronizer;

/// Create the synchronizer selected by configuration.
///
/// Returns [`NoopSynchronizer`] for the `noop` provider, for an unknown provider,
/// and when the `http` provider has no usable endpoint.
#[must_use]
pub fn create_synchronizer(config: &SyncConfig) -> Arc<dyn AlertSynchronizer> {
    match config.provider.trim() {
        "http" => {
            let Some(endpoint) = config.endpoint.as_deref() else {
                tracing::warn!("http sync provider has no endpoint, falling back to noop");
                return Arc::new(NoopSynchronizer::new());
            };
            match HttpSynchronizer::new(endpoint, Duration::from_secs(config.timeout_secs)) {
                Ok(sync) => Arc::new(sync),
                Err(e) => {
                    tracing::warn!("{e}, falling back to noop");
                    Arc::new(NoopSynchronizer::new())
                }
            }
        }
        "noop" => Arc::new(NoopSynchronizer::new()),
        _ => {
            tracing::warn!(
                provider = %config.provider,
                "unknown sync provider, falling back to noop"
            );
            Arc::new(NoopSynchronizer::new())
        }
    }
}
