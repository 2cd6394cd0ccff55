/// Returns the current Unix timestamp in milliseconds.
pub fn current_unix_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}

/// Returns the current Unix millisecond clock, bumped past `previous` when the
/// clock has not advanced since the last issued value.
pub fn next_unix_ms_after(previous: Option<u64>) -> u64 {
    let now = current_unix_timestamp_ms();
    match previous {
        Some(previous) if previous >= now => previous.saturating_add(1),
        _ => now,
    }
}
