use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// JST is UTC+9
const JST_OFFSET_SECONDS: i32 = 9 * 3600;

/// Get current Unix timestamp in milliseconds.
///
/// The value is timezone independent; JST only matters when rendering.
pub fn get_jst_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a Unix timestamp (milliseconds) as an RFC 3339 string in JST.
///
/// Falls back to UTC if the offset cannot be built, and to the epoch for
/// out-of-range timestamps.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_millis).unwrap_or_default();
    match FixedOffset::east_opt(JST_OFFSET_SECONDS) {
        Some(jst) => utc
            .with_timezone(&jst)
            .to_rfc3339_opts(SecondsFormat::Millis, false),
        None => utc.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
