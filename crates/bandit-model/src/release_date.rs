use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Layout of `album_release_date` in the embedded page data,
/// e.g. `01 Jan 2020 00:00:00 GMT`.
pub const RELEASE_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S GMT";

#[derive(Debug, Error)]
pub enum ReleaseDateError {
    #[error("{0}")]
    Layout(#[from] chrono::ParseError),

    /// chrono accepted the value but it is not written the way
    /// [`format`] would write it (unpadded fields, missing spaces).
    #[error("not in the exact layout, expected {expected:?}")]
    NotCanonical { expected: String },
}

/// Parse a release date string. The storefront always publishes GMT.
///
/// Only the exact layout is accepted: the value must come back unchanged
/// from [`format`].
pub fn parse(value: &str) -> Result<DateTime<Utc>, ReleaseDateError> {
    let date = NaiveDateTime::parse_from_str(value, RELEASE_DATE_FORMAT)?.and_utc();
    let expected = format(&date);
    if expected != value {
        return Err(ReleaseDateError::NotCanonical { expected });
    }
    Ok(date)
}

/// Inverse of [`parse`]. Sub-second precision is dropped.
pub fn format(date: &DateTime<Utc>) -> String {
    date.format(RELEASE_DATE_FORMAT).to_string()
}
