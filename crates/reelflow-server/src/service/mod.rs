//! Application state and dependency injection.

mod config;

use reelflow_webhook::TriggerService;

pub use crate::service::config::ServiceConfig;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    trigger: TriggerService,
}

impl ServiceState {
    /// Creates the state around an already selected trigger provider.
    pub fn new(trigger: TriggerService) -> Self {
        Self { trigger }
    }

    /// Creates a state that renders every result locally.
    pub fn mock() -> Self {
        Self::new(TriggerService::mock())
    }

    /// Initializes application state from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the webhook URL is invalid or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &ServiceConfig) -> reelflow_core::Result<Self> {
        let endpoint = config.webhook_url()?;
        let trigger = TriggerService::from_endpoint(endpoint, config.http_client.clone())?;
        Ok(Self::new(trigger))
    }

    /// Returns the trigger service.
    pub fn trigger(&self) -> &TriggerService {
        &self.trigger
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(trigger: TriggerService);

#[cfg(test)]
mod tests {
    use reelflow_core::ErrorKind;

    use super::*;

    #[test]
    fn missing_endpoint_selects_mock() {
        let state = ServiceState::from_config(&ServiceConfig::default()).unwrap();
        assert!(state.trigger().is_mock());
    }

    #[test]
    fn endpoint_selects_upstream() {
        let config = ServiceConfig::default().with_webhook_url("https://n8n.example.com/webhook/reel");
        let state = ServiceState::from_config(&config).unwrap();
        assert!(!state.trigger().is_mock());
    }

    #[test]
    fn invalid_endpoint_fails_startup() {
        let config = ServiceConfig::default().with_webhook_url("ftp://n8n.example.com");
        let error = ServiceState::from_config(&config).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }
}
