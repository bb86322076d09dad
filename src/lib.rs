//! # iniread
//!
//! A reader for configuration text in the classic INI format: `[section]` headers followed
//! by `key = value` (or `key: value`) lines, `#` and `;` comments, and backslash line
//! continuation.
//!
//! There are two ways in:
//!
//! - [`read_value`] streams a file once and stops at the first match. Nothing is kept.
//! - [`parse_file`] / [`parse_stream`] build a [`Document`] for repeated lookups.
//!
//! Both use the same line reader and classifier, so they always agree on what a file says.
//!
//! ```ini
//! ; global entries live in the implicit "" section
//! name = demo
//!
//! [server]
//! host = example.org
//! motd = Hello, \
//!        world
//! ```

pub mod ini;

pub use ini::building::{parse_file, parse_file_with, parse_str, parse_stream, parse_stream_with};
pub use ini::config::{ReaderConfig, DEFAULT_MAX_LINE_LENGTH};
pub use ini::document::{
    find_section, free_document, get_value, section_get, Document, KeyValue, Section,
};
pub use ini::error::{describe_raw, ErrorCode, IniError, Result};
pub use ini::search::{read_value, read_value_from, read_value_from_with, read_value_with};
