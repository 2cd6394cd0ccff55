//! Foundational low-level utilities shared across wedding crates.
//!
//! Provides the atomic file-write helper used by the site server's JSON stores
//! and the millisecond clock used for alert identifiers.

pub mod atomic_io;
pub mod time_utils;

pub use atomic_io::write_text_atomic;
pub use time_utils::{current_unix_timestamp_ms, next_unix_ms_after};

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use super::*;

    #[test]
    fn unit_next_unix_ms_after_is_strictly_increasing() {
        let first = next_unix_ms_after(None);
        let second = next_unix_ms_after(Some(first));
        let third = next_unix_ms_after(Some(second));
        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn regression_next_unix_ms_after_skips_past_future_previous_value() {
        let future = current_unix_timestamp_ms() + 60_000;
        assert_eq!(next_unix_ms_after(Some(future)), future + 1);
    }

    #[test]
    fn functional_write_text_atomic_replaces_existing_content() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let path = tempdir.path().join("info.json");
        write_text_atomic(&path, "{\"alerts\":[]}").expect("first write");
        write_text_atomic(&path, "{\"alerts\":[1]}").expect("second write");
        let contents = read_to_string(&path).expect("read");
        assert_eq!(contents, "{\"alerts\":[1]}");
        let leftovers = std::fs::read_dir(tempdir.path())
            .expect("list dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn regression_write_text_atomic_rejects_directory_destination() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let error = write_text_atomic(tempdir.path(), "x").expect_err("directory should fail");
        assert!(error.to_string().contains("is a directory"));
    }
}
