use serde::Deserialize;
use shared_kernel::http_client::HttpClient;

use crate::client::{non_empty, OutageApiClient, OutageApiError};

/// One recent report row, ordered as the backend returned it. The time
/// is an opaque display string; the widget never parses it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestReport {
    pub city: String,
    pub address: String,
    pub time: String,
}

#[derive(Deserialize, Debug)]
struct LatestPayload {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    items: Vec<LatestItemPayload>,
}

#[derive(Deserialize, Debug, Default)]
struct LatestItemPayload {
    #[serde(default)]
    city: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    time: String,
}

impl From<LatestItemPayload> for LatestReport {
    fn from(payload: LatestItemPayload) -> Self {
        LatestReport {
            city: payload.city,
            address: payload.address,
            time: payload.time,
        }
    }
}

impl OutageApiClient {
    /// Fetches the recent reports for a department. `None` means the
    /// backend declined (`ok: false`); the list is uncapped here, display
    /// truncation is the caller's concern.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn fetch_latest(
        &self,
        department: &str,
    ) -> Result<Option<Vec<LatestReport>>, OutageApiError> {
        let url = self.build_url("latest", &[("dept", non_empty(department))]);
        let payload = HttpClient::get_json::<LatestPayload>(url)
            .await
            .map_err(OutageApiError::Transport)?;
        if !payload.ok {
            return Ok(None);
        }
        Ok(Some(
            payload.items.into_iter().map(LatestReport::from).collect(),
        ))
    }
}
