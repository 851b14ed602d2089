use async_trait::async_trait;

use address_search::suggestions::{Suggestion, SuggestionClient};
use outage_api::{
    AddressHint, LatestReport, OutageApiClient, OutageApiError, ReportSubmission, StatusOutcome,
};

/// Seam between the controller and the autocomplete service.
#[async_trait]
pub trait SuggestionSearch: Send + Sync {
    async fn fetch(&self, query: &str) -> Vec<Suggestion>;
}

/// Seam between the controller and the outage backend.
#[async_trait]
pub trait OutageBackend: Send + Sync {
    async fn check_status(
        &self,
        city: &str,
        postal_code: &str,
        address_hint: Option<&AddressHint>,
    ) -> Result<StatusOutcome, OutageApiError>;

    async fn fetch_latest(
        &self,
        department: &str,
    ) -> Result<Option<Vec<LatestReport>>, OutageApiError>;

    async fn submit_report(&self, submission: &ReportSubmission) -> Result<bool, OutageApiError>;
}

#[async_trait]
impl SuggestionSearch for SuggestionClient {
    async fn fetch(&self, query: &str) -> Vec<Suggestion> {
        SuggestionClient::fetch(self, query).await
    }
}

#[async_trait]
impl OutageBackend for OutageApiClient {
    async fn check_status(
        &self,
        city: &str,
        postal_code: &str,
        address_hint: Option<&AddressHint>,
    ) -> Result<StatusOutcome, OutageApiError> {
        OutageApiClient::check_status(self, city, postal_code, address_hint).await
    }

    async fn fetch_latest(
        &self,
        department: &str,
    ) -> Result<Option<Vec<LatestReport>>, OutageApiError> {
        OutageApiClient::fetch_latest(self, department).await
    }

    async fn submit_report(&self, submission: &ReportSubmission) -> Result<bool, OutageApiError> {
        OutageApiClient::submit_report(self, submission).await
    }
}
