use std::sync::Arc;

use bridge_crm::CrmSyncClient;
use bridge_pipeline::{Onboarder, PgProvisioningStore};

use crate::config::{ConfigError, ServerConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; the inner data is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// The onboarding workflow wired to the configured backends.
    pub onboarder: Arc<Onboarder>,
}

impl AppState {
    /// Build the remote clients selected by `config` and wire them, together
    /// with the Postgres store, into an [`Onboarder`].
    pub fn new(pool: bridge_db::DbPool, config: ServerConfig) -> Result<Self, ConfigError> {
        let crm = bridge_crm::connect(config.crm.clone()).map_err(|e| ConfigError::Client {
            integration: "CRM",
            reason: e.to_string(),
        })?;
        let provisioning = bridge_provisioning::connect(config.provisioning.clone()).map_err(
            |e| ConfigError::Client {
                integration: "provisioning",
                reason: e.to_string(),
            },
        )?;

        let onboarder = Onboarder::new(
            CrmSyncClient::new(crm),
            provisioning,
            Arc::new(PgProvisioningStore::new(pool)),
        );

        Ok(Self {
            config: Arc::new(config),
            onboarder: Arc::new(onboarder),
        })
    }
}
