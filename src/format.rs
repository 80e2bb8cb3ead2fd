//! The entry log format.
//!
//! Each collection keeps a single UTF-8 text file, [`LOG_FILE_NAME`], to
//! which one record is appended per save:
//!
//! ```text
//! <MARKER><name_1>, <name_2>, ...\n<free text...>\n
//! ```
//!
//! - [`ENTRY_MARKER`] opens every record. It starts with the ASCII unit
//!   separator control character so it never shows up in typed text.
//! - [`IMAGE_SEPARATOR`] joins the image names on the first line.
//! - [`FIELD_SEPARATOR`] ends the image-name line. Everything after it up to
//!   the next marker is the text, newlines included.
//!
//! Encoding and parsing are pure string functions so the store and the loader
//! share one definition of the format and can be tested without a disk.

use crate::types::Entry;

/// Name of the log file inside a collection directory.
pub const LOG_FILE_NAME: &str = "TEXTS.txt";

/// Delimits consecutive records.
pub const ENTRY_MARKER: &str = "\x1f<§█ Entry █§>";

/// Between image names.
pub const IMAGE_SEPARATOR: &str = ", ";

/// Between the image-name field and the text field.
pub const FIELD_SEPARATOR: char = '\n';

/// Encode one record, including its trailing newline.
pub fn encode_record<S: AsRef<str>>(image_names: &[S], text: &str) -> String {
    let names: Vec<&str> = image_names.iter().map(AsRef::as_ref).collect();
    let mut record = format!(
        "{ENTRY_MARKER}{}{FIELD_SEPARATOR}{text}",
        names.join(IMAGE_SEPARATOR)
    );
    if !record.ends_with(FIELD_SEPARATOR) {
        record.push(FIELD_SEPARATOR);
    }
    record
}

/// Parse a whole log into entries, in document order.
///
/// Content before the first marker is dropped without complaint; in a
/// well-formed log it is empty.
pub fn parse_log(content: &str) -> Vec<Entry> {
    content.split(ENTRY_MARKER).skip(1).map(parse_record).collect()
}

/// Parse one record body (the text between two markers).
///
/// The image-name field is split as-is, so an empty field yields a single
/// empty name. The text keeps any inner newlines; only the newline that
/// terminates the record is removed.
pub fn parse_record(body: &str) -> Entry {
    let (names_field, text) = match body.split_once(FIELD_SEPARATOR) {
        Some((names, rest)) => (names, rest.strip_suffix(FIELD_SEPARATOR).unwrap_or(rest)),
        None => (body, ""),
    };
    let image_names = names_field
        .split(IMAGE_SEPARATOR)
        .map(str::to_string)
        .collect();
    Entry::new(image_names, text)
}
