// Error taxonomy for upstream queries and view requests
use chrono::NaiveDate;
use thiserror::Error;

/// A failed call to the planner statistics API. HTTP 404 is not an error;
/// repositories report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// A view request rejected before any upstream call is made.
#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("The start date ({start}) cannot be after the end date ({end}).")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Bin size must be between 1 and 60 minutes, got {0}.")]
    InvalidBinSize(u32),

    #[error("Invalid request parameters: {0}")]
    InvalidQuery(String),
}
