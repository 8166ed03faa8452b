//! REST client for the live provisioning platform.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProvisioningError;
use crate::{ProvisionRequest, ProvisionedAccount, ProvisioningApi, ProvisioningConfig};

/// HTTP client for the provisioning platform.
pub struct HttpProvisioningApi {
    client: reqwest::Client,
    base_url: String,
}

/// Read the account id out of a 2xx body.
///
/// The platform reports it as `userId`, older deployments as `id`, either as
/// a string or a number. The account already exists at this point, so an
/// empty or unparseable body yields no id rather than an error.
fn account_from_body(body: &[u8]) -> ProvisionedAccount {
    if body.iter().all(u8::is_ascii_whitespace) {
        return ProvisionedAccount::default();
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Provisioning platform returned a non-JSON success body");
            return ProvisionedAccount::default();
        }
    };

    ProvisionedAccount {
        external_account_id: id_field(&value, "userId").or_else(|| id_field(&value, "id")),
    }
}

fn id_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl HttpProvisioningApi {
    /// Create a client from explicit configuration.
    pub fn new(config: ProvisioningConfig) -> Result<Self, ProvisioningError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: ProvisioningConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ProvisioningApi for HttpProvisioningApi {
    async fn provision(
        &self,
        request: &ProvisionRequest,
    ) -> Result<ProvisionedAccount, ProvisioningError> {
        tracing::debug!(email = %request.email, "Provisioning account");

        let response = self
            .client
            .post(format!("{}/api/v1/provision-user", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), body = %body, "Provisioning platform returned an error");
            return Err(ProvisioningError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        Ok(account_from_body(&body))
    }
}
