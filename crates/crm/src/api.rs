//! REST client for the live CRM.
//!
//! Wraps the v2 contacts endpoints (search, create, update) using
//! [`reqwest`]. Every request carries the configured bearer credential and
//! is bounded by the configured timeout. No call is retried here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CrmApiError;
use crate::types::{ContactUpdate, CrmContact, NewContact};
use crate::{CrmApi, CrmConfig};

/// HTTP client for the CRM contacts API.
pub struct HttpCrmApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    location_id: String,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireContact {
    id: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    contacts: Option<Vec<WireContact>>,
}

#[derive(Debug, Deserialize)]
struct ContactEnvelope {
    contact: Option<WireContact>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateContactBody<'a> {
    #[serde(flatten)]
    contact: &'a NewContact,
    location_id: &'a str,
}

impl WireContact {
    fn into_contact(self) -> Option<CrmContact> {
        Some(CrmContact {
            id: self.id?,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            tags: self.tags.unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl HttpCrmApi {
    /// Create a client from explicit configuration.
    pub fn new(config: CrmConfig) -> Result<Self, CrmApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`]. The
    /// configured timeout is not applied to a caller-supplied client.
    pub fn with_client(client: reqwest::Client, config: CrmConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            location_id: config.location_id,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // ---- private helpers ----

    /// Return the response unchanged on a success status, or a
    /// [`CrmApiError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CrmApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), body = %body, "CRM API returned an error");
            return Err(CrmApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CrmApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CrmApi for HttpCrmApi {
    async fn search_contacts(&self, query: &str) -> Result<Vec<CrmContact>, CrmApiError> {
        let response = self
            .client
            .get(self.url("/v2/contacts/search"))
            .bearer_auth(&self.api_key)
            .query(&[("locationId", self.location_id.as_str()), ("query", query)])
            .send()
            .await?;

        let body: SearchResponse = Self::parse_response(response).await?;

        let contacts = body
            .contacts
            .unwrap_or_default()
            .into_iter()
            .filter_map(|wire| {
                let contact = wire.into_contact();
                if contact.is_none() {
                    tracing::warn!("Skipping CRM search result without an id");
                }
                contact
            })
            .collect();

        Ok(contacts)
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<CrmContact, CrmApiError> {
        let body = CreateContactBody {
            contact,
            location_id: &self.location_id,
        };

        let response = self
            .client
            .post(self.url("/v2/contacts/"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let envelope: ContactEnvelope = Self::parse_response(response).await?;

        envelope
            .contact
            .and_then(WireContact::into_contact)
            .ok_or_else(|| {
                CrmApiError::RemoteContractViolation("No contact ID returned from CRM".to_string())
            })
    }

    async fn update_contact(
        &self,
        contact_id: &str,
        update: &ContactUpdate,
    ) -> Result<(), CrmApiError> {
        let response = self
            .client
            .put(self.url(&format!("/v2/contacts/{contact_id}")))
            .bearer_auth(&self.api_key)
            .json(update)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}
