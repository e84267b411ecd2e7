//! Blocking JSON-over-HTTP GET shared by every client.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tatwa_engine::LookupError;
use tracing::debug;

/// A `ureq` agent with a per-request timeout.
#[derive(Clone)]
pub(crate) struct HttpClient {
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}

impl HttpClient {
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// GET `url` with `query` and return the response body.
    ///
    /// HTTP error statuses become [`LookupError::Api`] for `service`.
    pub(crate) fn get_text(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, LookupError> {
        let mut request = self.agent.get(url);
        for (name, value) in query {
            request = request.query(name, value);
        }
        debug!(service, url, "GET");

        match request.call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| LookupError::Transport(format!("{service}: reading body: {e}"))),
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                let message = if body.trim().is_empty() {
                    format!("HTTP {code}")
                } else {
                    format!("HTTP {code}: {}", body.trim())
                };
                Err(LookupError::Api { service, message })
            }
            Err(e) => Err(LookupError::Transport(format!("{service}: {e}"))),
        }
    }
}

/// Deserialize a reply body, labelling failures with the service name.
pub(crate) fn decode<T: DeserializeOwned>(service: &str, body: &str) -> Result<T, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::Decode(format!("{service}: {e}")))
}
