pub mod client;
pub mod contracts;

pub use client::{OutageApiClient, OutageApiError};
pub use contracts::latest::LatestReport;
pub use contracts::report::ReportSubmission;
pub use contracts::status::{AddressHint, OutageDetail, OutageStatus, StatusOutcome};
