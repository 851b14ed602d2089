use secrecy::{ExposeSecret, Secret};
use thiserror::Error;
use url::Url;

/// Client for the outage backend. The three logical operations (`status`,
/// `latest`, `report`) are multiplexed over one base URL through the `fn`
/// parameter, with the API key attached to every call.
#[derive(Clone)]
pub struct OutageApiClient {
    host: Url,
    api_key: Secret<String>,
}

#[derive(Error, Debug)]
pub enum OutageApiError {
    /// The service could not be reached or returned an unreadable body.
    /// Distinct from a backend-reported failure, which arrives as data
    /// (`ok: false`) rather than as an error.
    #[error("failed to reach the outage service")]
    Transport(#[source] anyhow::Error),
}

impl OutageApiClient {
    pub fn new(host: Url, api_key: Secret<String>) -> Self {
        Self { host, api_key }
    }

    /// Shared URL rule: base + `key` + `fn` + named parameters. `None`
    /// parameters are omitted; callers that must send an explicit empty
    /// placeholder pass `Some("")`.
    pub(crate) fn build_url(&self, operation: &str, params: &[(&str, Option<&str>)]) -> Url {
        let mut url = self.host.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", self.api_key.expose_secret());
            query.append_pair("fn", operation);
            for (name, value) in params {
                if let Some(value) = value {
                    query.append_pair(name, value);
                }
            }
        }
        url
    }
}

/// Maps empty strings to `None` so they drop out of the query string.
pub(crate) fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
