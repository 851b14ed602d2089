use serde::Deserialize;
use shared_kernel::http_client::HttpClient;

use crate::client::{non_empty, OutageApiClient, OutageApiError};

/// A user-entered outage report. Department and city are mandatory and
/// validated by the caller before submission.
#[derive(Debug, Clone, Default)]
pub struct ReportSubmission {
    pub department: String,
    pub city: String,
    pub address: String,
    pub note: String,
}

#[derive(Deserialize, Debug)]
struct ReportAck {
    #[serde(default)]
    ok: bool,
}

impl OutageApiClient {
    /// Submits a report. The postal code is deliberately sent as an
    /// explicit empty placeholder: this client does not resolve postal
    /// codes for manually entered reports and the backend expects the
    /// parameter to be present.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn submit_report(
        &self,
        submission: &ReportSubmission,
    ) -> Result<bool, OutageApiError> {
        let url = self.build_url(
            "report",
            &[
                ("dept", non_empty(&submission.department)),
                ("city", non_empty(&submission.city)),
                ("address", non_empty(&submission.address)),
                ("postal_code", Some("")),
                ("note", non_empty(&submission.note)),
            ],
        );
        let ack = HttpClient::get_json::<ReportAck>(url)
            .await
            .map_err(OutageApiError::Transport)?;
        Ok(ack.ok)
    }
}
