/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's calendar date in UTC, formatted `YYYY-MM-DD`.
///
/// This is the partition key format used by the date index, so stats for
/// "today" roll over at UTC midnight.
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
