/// Failure of the account creation call.
///
/// Every variant renders with the `Provisioning failed:` prefix.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("Provisioning failed: HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform returned a non-2xx status code.
    #[error("Provisioning failed: platform error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
