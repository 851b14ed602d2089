use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use address_search::department::department_from_postal_code;
use address_search::formatter::format_match_address;
use address_search::suggestions::{Suggestion, SuggestionClient};
use outage_api::{AddressHint, OutageApiClient, OutageStatus, ReportSubmission, StatusOutcome};

use crate::api::{OutageBackend, SuggestionSearch};
use crate::render;
use crate::settings::Settings;
use crate::view_state::{CheckFlow, ReportFlow, StatusTone, SuggestFlow, ViewState};

lazy_static! {
    static ref POSTAL_CODE: Regex = Regex::new(r"\b(\d{5})\b").expect("valid regex");
}

/// Queries shorter than this never hit the autocomplete service.
const MIN_QUERY_CHARS: usize = 2;

/// Drives the widget: one method per user interaction, all mutations
/// funneled into the owned [`ViewState`]. Requests on the suggestion and
/// check flows are stamped with a sequence number at issue time; a
/// response only publishes into the view if no newer request has been
/// issued on its flow since.
pub struct ViewController {
    suggestion_search: Arc<dyn SuggestionSearch>,
    outage_backend: Arc<dyn OutageBackend>,
    limit_latest: usize,
    state: ViewState,
    selected_address: Option<Suggestion>,
    suggest_seq: u64,
    check_seq: u64,
}

impl ViewController {
    pub fn new(
        suggestion_search: Arc<dyn SuggestionSearch>,
        outage_backend: Arc<dyn OutageBackend>,
        limit_latest: usize,
    ) -> Self {
        Self {
            suggestion_search,
            outage_backend,
            limit_latest,
            state: ViewState::new(),
            selected_address: None,
            suggest_seq: 0,
            check_seq: 0,
        }
    }

    /// Wires the controller to the real clients described by the
    /// settings. Read once at startup; the controller never reloads.
    pub fn from_settings(settings: &Settings) -> Self {
        let suggestion_search = SuggestionClient::new(settings.ban.host.clone());
        let outage_backend = OutageApiClient::new(
            settings.outage_api.host.clone(),
            settings.outage_api.api_key.clone(),
        );
        Self::new(
            Arc::new(suggestion_search),
            Arc::new(outage_backend),
            settings.widget.limit_latest,
        )
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// The address input was edited. Any previously selected suggestion
    /// is invalidated; queries of at least [`MIN_QUERY_CHARS`] trigger an
    /// autocomplete lookup, shorter ones clear the list without a request.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn input_changed(&mut self, value: &str) {
        self.state.input_value = value.to_string();
        self.selected_address = None;
        if self.state.suggest_flow == SuggestFlow::AddressChosen {
            self.state.suggest_flow = SuggestFlow::Idle;
        }

        let query = value.trim().to_string();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.clear_suggestions();
            return;
        }

        self.suggest_seq += 1;
        let issued = self.suggest_seq;
        self.state.suggest_flow = SuggestFlow::Suggesting;

        let suggestions = self.suggestion_search.fetch(&query).await;
        self.apply_suggestions(issued, suggestions);
    }

    fn apply_suggestions(&mut self, issued: u64, suggestions: Vec<Suggestion>) {
        if issued != self.suggest_seq {
            // a newer query owns the list
            return;
        }
        if suggestions.is_empty() {
            self.clear_suggestions();
            return;
        }
        self.state.suggestions_html = render::render_suggestions(&suggestions);
        self.state.suggestions = suggestions;
        self.state.suggestions_visible = true;
    }

    /// A suggestion row was clicked: it becomes the selected address, the
    /// input takes its label and the report form is pre-filled from its
    /// structured fields.
    pub fn suggestion_selected(&mut self, index: usize) {
        let Some(suggestion) = self.state.suggestions.get(index).cloned() else {
            return;
        };
        self.state.input_value = suggestion.label.clone();
        self.state.report_city = suggestion.city.clone();
        self.state.report_department = department_from_postal_code(&suggestion.postcode);
        self.state.suggestions_visible = false;
        self.state.suggest_flow = SuggestFlow::AddressChosen;
        self.selected_address = Some(suggestion);
    }

    /// A click landed outside the input and the list: hide the list, keep
    /// everything else as it was.
    pub fn outside_click(&mut self) {
        self.state.suggestions_visible = false;
    }

    #[tracing::instrument(skip(self), level = "info")]
    pub async fn check_clicked(&mut self) {
        let query = self.state.input_value.trim().to_string();
        if query.is_empty() {
            self.show_status(render::status_text(render::MSG_EMPTY_ADDRESS), StatusTone::Error);
            return;
        }

        self.state.status_visible = false;
        self.state.details_visible = false;
        self.state.latest_visible = false;
        self.state.check_busy = true;
        self.state.check_flow = CheckFlow::Checking;

        self.check_seq += 1;
        let issued = self.check_seq;

        let postal_code = POSTAL_CODE
            .find(&query)
            .map(|found| found.as_str().to_string())
            .unwrap_or_default();
        let address_hint = self.selected_address.as_ref().map(|selected| AddressHint {
            address_line: selected.label.clone(),
            city: selected.city.clone(),
            postal_code: selected.postcode.clone(),
        });

        let outcome = self
            .outage_backend
            .check_status(&query, &postal_code, address_hint.as_ref())
            .await;
        if issued != self.check_seq {
            return;
        }
        self.state.check_busy = false;

        let status = match outcome {
            Err(error) => {
                tracing::warn!("status check failed: {error:?}");
                self.show_status(render::status_text(render::MSG_NETWORK_ERROR), StatusTone::Error);
                self.state.check_flow = CheckFlow::ErrorShown;
                return;
            }
            Ok(StatusOutcome::Failed { message }) => {
                self.show_status(render::backend_error(&message), StatusTone::Error);
                self.state.check_flow = CheckFlow::ErrorShown;
                return;
            }
            Ok(StatusOutcome::Report(status)) => status,
        };

        self.show_outage_status(&status);
        self.state.check_flow = CheckFlow::ResultShown;

        let department = resolve_department(&status, &postal_code);
        if department.is_empty() {
            return;
        }
        let latest = self.outage_backend.fetch_latest(&department).await;
        if issued != self.check_seq {
            return;
        }
        match latest {
            Err(error) => {
                tracing::warn!("latest reports fetch failed: {error:?}");
                self.show_status(render::status_text(render::MSG_NETWORK_ERROR), StatusTone::Error);
                self.state.check_flow = CheckFlow::ErrorShown;
            }
            // backend declined: leave the table hidden, keep the banner
            Ok(None) => {}
            Ok(Some(items)) => {
                self.state.latest_department = department;
                self.state.latest_html = render::render_latest_table(&items, self.limit_latest);
                self.state.latest_visible = true;
            }
        }
    }

    #[tracing::instrument(skip(self), level = "info")]
    pub async fn report_clicked(&mut self) {
        let department = self.state.report_department.trim().to_string();
        let city = self.state.report_city.trim().to_string();
        if department.is_empty() || city.is_empty() {
            self.state.report_message = render::MSG_REPORT_MISSING_FIELDS.to_string();
            return;
        }

        let submission = ReportSubmission {
            department,
            city,
            address: self.state.report_address.trim().to_string(),
            note: self.state.report_note.trim().to_string(),
        };
        self.state.report_busy = true;
        self.state.report_flow = ReportFlow::Reporting;

        let result = self.outage_backend.submit_report(&submission).await;
        self.state.report_busy = false;

        match result {
            Ok(true) => {
                self.state.report_message = render::MSG_REPORT_ACK.to_string();
                self.state.report_address.clear();
                self.state.report_note.clear();
                self.state.report_flow = ReportFlow::ReportAcked;
            }
            Ok(false) => {
                self.state.report_message = render::MSG_REPORT_FAILED.to_string();
                self.state.report_flow = ReportFlow::ReportFailed;
            }
            Err(error) => {
                tracing::warn!("report submission failed: {error:?}");
                self.state.report_message = render::MSG_NETWORK_ERROR.to_string();
                self.state.report_flow = ReportFlow::ReportFailed;
            }
        }
    }

    fn show_outage_status(&mut self, status: &OutageStatus) {
        if status.has_outage {
            let location = display_location(status);
            self.show_status(render::outage_banner(&location), StatusTone::Warn);
            self.state.details_html = render::render_details(&status.details);
            self.state.details_visible = true;
        } else {
            self.show_status(
                render::no_outage_banner(&status.city, &status.postal_code),
                StatusTone::Ok,
            );
        }
    }

    fn show_status(&mut self, html: String, tone: StatusTone) {
        self.state.status_html = html;
        self.state.status_tone = Some(tone);
        self.state.status_visible = true;
    }

    fn clear_suggestions(&mut self) {
        self.state.suggestions.clear();
        self.state.suggestions_html.clear();
        self.state.suggestions_visible = false;
        self.state.suggest_flow = SuggestFlow::Idle;
    }
}

/// The banner location prefers the first detail's formatted match address
/// over the city-level pair.
fn display_location(status: &OutageStatus) -> String {
    if let Some(detail) = status.details.first() {
        if let Some(raw) = detail.match_address.as_deref() {
            let known_postal_code = detail
                .match_postal_code
                .as_deref()
                .filter(|postal| !postal.is_empty())
                .unwrap_or(&status.postal_code);
            let formatted = format_match_address(raw, known_postal_code);
            if !formatted.is_empty() {
                return formatted;
            }
        }
    }
    format!("{} ({})", status.city, status.postal_code)
}

fn resolve_department(status: &OutageStatus, extracted_postal_code: &str) -> String {
    if !status.department.is_empty() {
        return status.department.clone();
    }
    let postal_code = if status.postal_code.is_empty() {
        extracted_postal_code
    } else {
        &status.postal_code
    };
    department_from_postal_code(postal_code)
}
