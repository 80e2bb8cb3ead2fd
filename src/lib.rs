//! # note-save
//!
//! A scratchpad for text snippets and screenshots. Each save appends one
//! *entry* (free text plus any number of images) to a *collection*; browsing
//! pages back through a collection as a grid of cards.
//!
//! # Architecture: Write Path, Read Path, Layout
//!
//! ```text
//! save    (text, images)  →  <collection>/TEXTS.txt + <timestamp>.png   (store)
//! load    TEXTS.txt       →  Vec<Entry>                                 (load)
//! layout  Vec<Entry>      →  pages → rows → cells                       (layout)
//! ```
//!
//! The log is the only index. Entries are never rewritten or deleted; the
//! layout is recomputed from the log whenever the entries or the browse order
//! change.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`format`] | Log record encoding and parsing: marker, separators, trailing newline |
//! | [`store`] | Write path: names and writes images, then appends the record |
//! | [`load`] | Read path: reads and parses a collection's log |
//! | [`layout`] | Greedy row and page packing, page navigation |
//! | [`browser`] | Browse state: collection, order, current page |
//! | [`draft`] | Pending input: paste, remove image, escape, commit |
//! | [`collection`] | Collection names, listing, creation |
//! | [`naming`] | Timestamp image names with collision suffixes |
//! | [`imaging`] | Image backend trait, pure-Rust backend, clipboard providers |
//! | [`export`] | Static HTML export of one page using Maud |
//! | [`config`] | `config.toml` loading, validation, and merging over defaults |
//! | [`types`] | The [`Entry`](types::Entry) shared by all of the above |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Append-Only Text Log
//!
//! A collection's entries live in a single `TEXTS.txt`, one record per save.
//! Each record starts with a marker that opens with the ASCII unit
//! separator (`\x1f`), which never shows up in typed or pasted text, so entry
//! text can hold anything else, including blank lines and lines that look like
//! headers. The file stays readable and greppable in any editor.
//!
//! ## Images Written Before the Record
//!
//! A save writes its images first and appends the record last. A failed
//! image write leaves the log untouched, so every name in the log refers to a
//! file that was written. The price is the occasional orphan PNG.
//!
//! ## Explicit Context
//!
//! There is no global "current collection". Every operation takes the
//! collection it works on, and browse state lives in a [`browser::Browser`]
//! value owned by the caller.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate for decoding, PNG encoding
//! and Lanczos3 previews. No system libraries are needed.

pub mod browser;
pub mod collection;
pub mod config;
pub mod draft;
pub mod export;
pub mod format;
pub mod imaging;
pub mod layout;
pub mod load;
pub mod naming;
pub mod output;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
