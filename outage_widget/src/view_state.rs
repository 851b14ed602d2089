use address_search::suggestions::Suggestion;

/// Suggestion-list lifecycle. `AddressChosen` means the input currently
/// holds the label of a picked suggestion; any further edit reverts to
/// free-text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestFlow {
    #[default]
    Idle,
    Suggesting,
    AddressChosen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckFlow {
    #[default]
    Idle,
    Checking,
    ResultShown,
    ErrorShown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFlow {
    #[default]
    Idle,
    Reporting,
    ReportAcked,
    ReportFailed,
}

/// Visual tone of the status banner, mapped by the host onto its own
/// style classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Ok,
    Warn,
    Error,
}

/// The widget's entire visible surface, owned by the controller and
/// read by the host after every interaction. Replaces ambient references
/// to individual page elements: the host binds each field to its markup
/// once, at initialization.
#[derive(Debug, Default)]
pub struct ViewState {
    pub input_value: String,

    pub suggestions: Vec<Suggestion>,
    pub suggestions_html: String,
    pub suggestions_visible: bool,

    /// True while a status check is in flight; the host disables the
    /// check control and shows the spinner.
    pub check_busy: bool,
    pub status_html: String,
    pub status_tone: Option<StatusTone>,
    pub status_visible: bool,

    pub details_html: String,
    pub details_visible: bool,

    pub latest_department: String,
    pub latest_html: String,
    pub latest_visible: bool,

    /// Report form fields, edited by the host as the user types.
    pub report_city: String,
    pub report_department: String,
    pub report_address: String,
    pub report_note: String,
    /// True while a submission is in flight; the host disables the
    /// report control and shows its busy label.
    pub report_busy: bool,
    pub report_message: String,

    pub suggest_flow: SuggestFlow,
    pub check_flow: CheckFlow,
    pub report_flow: ReportFlow,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }
}
