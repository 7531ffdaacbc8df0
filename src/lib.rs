pub mod config;
pub mod geo;
pub mod observability;
pub mod persist;
pub mod session;
pub mod validation;

pub use config::CaptureConfig;
pub use geo::{Coordinate, GeodeticText};
pub use session::{FinishError, SessionController, SessionEvent, SessionMode, SessionSnapshot};
pub use validation::ValidationVerdict;

use std::sync::Arc;

use anyhow::Result;

use persist::{HttpPersistenceGateway, PersistenceGateway};
use validation::{HttpValidationAuthority, ValidationAuthority};

/// Shared wiring for the capture subsystem: configuration plus the two
/// network collaborators. A host keeps one context for the life of the app
/// and creates controllers from it.
#[derive(Clone)]
pub struct CaptureContext {
    pub config: Arc<CaptureConfig>,
    authority: Arc<dyn ValidationAuthority>,
    gateway: Arc<dyn PersistenceGateway>,
}

impl CaptureContext {
    /// Wire the context against the HTTP backend named in `config`.
    pub fn http(config: CaptureConfig) -> Result<Self> {
        let authority = Arc::new(HttpValidationAuthority::new(&config)?);
        let gateway = Arc::new(HttpPersistenceGateway::new(&config)?);
        Ok(Self {
            config: Arc::new(config),
            authority,
            gateway,
        })
    }

    /// Wire the context with explicit collaborator implementations —
    /// in-memory fakes in tests, alternative transports in hosts.
    pub fn with_parts(
        config: CaptureConfig,
        authority: Arc<dyn ValidationAuthority>,
        gateway: Arc<dyn PersistenceGateway>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            authority,
            gateway,
        }
    }

    /// Create a session controller bound to this context's collaborators.
    pub fn controller(&self) -> SessionController {
        SessionController::new(
            Arc::clone(&self.authority),
            Arc::clone(&self.gateway),
            self.config.tolerance_percent,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_context_builds_from_default_config() {
        let context = CaptureContext::http(CaptureConfig::default()).unwrap();
        assert_eq!(context.config.tolerance_percent, 10.0);
        let _controller = context.controller();
    }
}
