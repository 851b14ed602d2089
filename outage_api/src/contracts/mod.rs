pub mod latest;
pub mod report;
pub mod status;
