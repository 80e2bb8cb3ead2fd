//! Entry loader: the read path.
//!
//! Reads a collection's log in one go and parses it with
//! [`format::parse_log`](crate::format::parse_log). A collection that has
//! never been saved to has no log file and loads as empty. Read failures are
//! logged and also load as empty; the caller only ever sees a list.

use crate::collection::collection_dir;
use crate::format::{LOG_FILE_NAME, parse_log};
use crate::types::Entry;
use std::io;
use std::path::{Path, PathBuf};

/// Path of a collection's log file.
pub fn log_path(root: &Path, collection: &str) -> PathBuf {
    collection_dir(root, collection).join(LOG_FILE_NAME)
}

/// Whole file as a string; a missing file reads as empty.
pub fn read_text(path: &Path) -> io::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// Load all entries of a collection, oldest first.
pub fn load(root: &Path, collection: &str) -> Vec<Entry> {
    let path = log_path(root, collection);
    match read_text(&path) {
        Ok(content) => parse_log(&content),
        Err(e) => {
            tracing::warn!("cannot read {}: {e}", path.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ENTRY_MARKER, encode_record};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_collection_loads_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load(tmp.path(), "Default").is_empty());
    }

    #[test]
    fn missing_file_reads_as_empty_string() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_text(&tmp.path().join("nope.txt")).unwrap(), "");
    }

    #[test]
    fn unreadable_log_loads_empty() {
        let tmp = TempDir::new().unwrap();
        // A directory where the log should be cannot be read as a file
        fs::create_dir_all(log_path(tmp.path(), "Default")).unwrap();
        assert!(load(tmp.path(), "Default").is_empty());
    }

    #[test]
    fn loads_records_in_order() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("notes");
        fs::create_dir_all(&dir).unwrap();
        let log = [
            encode_record::<&str>(&[], "first"),
            encode_record(&["a", "b"], "second\nline"),
        ]
        .concat();
        fs::write(dir.join(LOG_FILE_NAME), log).unwrap();

        let entries = load(tmp.path(), "notes");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "first");
        assert_eq!(entries[1].image_names, vec!["a", "b"]);
        assert_eq!(entries[1].text, "second\nline");
    }

    #[test]
    fn hand_edited_prefix_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Default");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(LOG_FILE_NAME),
            format!("notes typed by hand\n{ENTRY_MARKER}\nreal entry\n"),
        )
        .unwrap();

        let entries = load(tmp.path(), "Default");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "real entry");
    }
}
