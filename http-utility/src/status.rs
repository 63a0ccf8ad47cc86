use http::{HeaderValue, StatusCode};

use crate::errors::HeaderError;

/// Extracts the response status from the decoded `:status` pseudo-header.
///
/// A response without a usable status is malformed; the error is for the codec layer to
/// propagate.
pub fn response_status(status: Option<&HeaderValue>) -> Result<StatusCode, HeaderError> {
    let status = status.ok_or(HeaderError::MissingStatus)?;
    StatusCode::from_bytes(status.as_bytes()).map_err(|_| HeaderError::MissingStatus)
}
