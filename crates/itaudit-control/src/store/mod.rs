//! Data access for each audit table.
//!
//! Every function issues a single statement and hands back wire DTOs. None
//! of them check that a row exists before updating or deleting it; the
//! number of affected rows is returned for callers that care.

pub mod accounts;
pub mod comments;
pub mod computers;
pub mod network_devices;
pub mod site_content;
pub mod users;

/// Comment timestamps are ISO-8601 UTC with millisecond precision, so they
/// sort lexically in chronological order.
pub fn timestamp_now() -> String {
    format_timestamp(chrono::Utc::now())
}

pub fn format_timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamps_match_the_stored_format() {
        let at = chrono::Utc
            .with_ymd_and_hms(2024, 9, 28, 10, 15, 0)
            .unwrap();
        assert_eq!(format_timestamp(at), "2024-09-28T10:15:00.000Z");
    }
}
