use serde::Deserialize;
use shared_kernel::http_client::HttpClient;

use crate::client::{non_empty, OutageApiClient, OutageApiError};

/// Street-level disambiguation forwarded with a status check when the
/// user picked one of the autocomplete suggestions instead of typing
/// free text.
#[derive(Debug, Clone, Default)]
pub struct AddressHint {
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
}

/// Outcome of one status check. A backend-reported failure is data, not
/// an `Err`: transport problems surface as [`OutageApiError`] instead.
#[derive(Debug, Clone)]
pub enum StatusOutcome {
    Report(OutageStatus),
    Failed { message: String },
}

#[derive(Debug, Clone, Default)]
pub struct OutageStatus {
    pub has_outage: bool,
    pub city: String,
    pub postal_code: String,
    pub department: String,
    pub details: Vec<OutageDetail>,
}

/// One incident, in the order the backend returned it. Every field past
/// the location is optional upstream and stays optional here; rendering
/// substitutes placeholders.
#[derive(Debug, Clone, Default)]
pub struct OutageDetail {
    pub localisation: String,
    pub match_address: Option<String>,
    pub match_postal_code: Option<String>,
    pub incident_type: Option<String>,
    pub state: Option<String>,
    pub start_date: Option<String>,
    pub estimated_end_date: Option<String>,
    pub affected_households: Option<u32>,
    pub id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct StatusPayload {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    has_outage: bool,
    #[serde(default)]
    city: String,
    #[serde(default)]
    cp: String,
    #[serde(default)]
    dept: String,
    #[serde(default)]
    details: Vec<DetailPayload>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct DetailPayload {
    #[serde(default)]
    localisation: String,
    #[serde(rename = "matchAddr", default)]
    match_addr: Option<String>,
    #[serde(rename = "cpMatch", default)]
    cp_match: Option<String>,
    #[serde(rename = "typeIncident", default)]
    type_incident: Option<String>,
    #[serde(default)]
    etat: Option<String>,
    #[serde(rename = "dateDebut", default)]
    date_debut: Option<String>,
    #[serde(rename = "dateFinPrevue", default)]
    date_fin_prevue: Option<String>,
    #[serde(rename = "nbFoyers", default)]
    nb_foyers: Option<u32>,
    #[serde(default)]
    id: Option<String>,
}

impl From<DetailPayload> for OutageDetail {
    fn from(payload: DetailPayload) -> Self {
        OutageDetail {
            localisation: payload.localisation,
            match_address: payload.match_addr,
            match_postal_code: payload.cp_match,
            incident_type: payload.type_incident,
            state: payload.etat,
            start_date: payload.date_debut,
            estimated_end_date: payload.date_fin_prevue,
            affected_households: payload.nb_foyers,
            id: payload.id,
        }
    }
}

impl From<StatusPayload> for StatusOutcome {
    fn from(payload: StatusPayload) -> Self {
        if !payload.ok {
            return StatusOutcome::Failed {
                message: payload.error.unwrap_or_default(),
            };
        }
        StatusOutcome::Report(OutageStatus {
            has_outage: payload.has_outage,
            city: payload.city,
            postal_code: payload.cp,
            department: payload.dept,
            details: payload.details.into_iter().map(OutageDetail::from).collect(),
        })
    }
}

impl OutageApiClient {
    /// Queries the outage status for a location. `city` carries the raw
    /// query text; the postal code is forwarded when one was extracted
    /// from it, and the address hint when a suggestion was selected.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn check_status(
        &self,
        city: &str,
        postal_code: &str,
        address_hint: Option<&AddressHint>,
    ) -> Result<StatusOutcome, OutageApiError> {
        let url = self.build_url(
            "status",
            &[
                ("city", non_empty(city)),
                ("cp", non_empty(postal_code)),
                (
                    "addr",
                    address_hint.and_then(|hint| non_empty(&hint.address_line)),
                ),
                (
                    "addr_city",
                    address_hint.and_then(|hint| non_empty(&hint.city)),
                ),
                (
                    "addr_cp",
                    address_hint.and_then(|hint| non_empty(&hint.postal_code)),
                ),
            ],
        );
        let payload = HttpClient::get_json::<StatusPayload>(url)
            .await
            .map_err(OutageApiError::Transport)?;
        Ok(payload.into())
    }
}
