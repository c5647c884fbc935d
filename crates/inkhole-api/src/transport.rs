// Transport configuration for building reqwest::Client instances.
//
// Every request a dashboard run makes must carry a bounded timeout:
// the program is invoked on a periodic schedule, and an unbounded hang
// would block that schedule indefinitely.

use std::time::Duration;

use crate::error::Error;

/// Connection settings shared by all requests in a run.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Accept self-signed certificates. Appliances reached over HTTPS on
    /// the local network almost never carry a CA-signed certificate.
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            accept_invalid_certs: true,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("inkhole/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
