//! Single key search
//!
//!     Finds one value without building a document. Lines are streamed through the reader
//!     and dropped as soon as they have been looked at; the search stops at the first match
//!     or as soon as the target section has been left.
//!
//!     The outcome always agrees with parsing the whole stream and calling
//!     [`Document::get_value`](crate::ini::document::Document::get_value): the same value or
//!     the same kind of miss.

use crate::ini::config::ReaderConfig;
use crate::ini::document::try_copy;
use crate::ini::error::{IniError, Result};
use crate::ini::reading::{match_key, parse_section, LineReader};
use log::{debug, error};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open `path` and look up `key` in `section`.
///
/// An unreadable path is logged at `error` level before the error is returned. Nothing
/// reaches stderr unless the caller has installed a logger, so callers that want a message
/// should report the returned [`IniError::FileOpen`] themselves.
pub fn read_value<P: AsRef<Path>>(path: P, section: &str, key: &str) -> Result<String> {
    read_value_with(path, section, key, &ReaderConfig::default())
}

/// [`read_value`] with explicit reader settings.
pub fn read_value_with<P: AsRef<Path>>(
    path: P,
    section: &str,
    key: &str,
    config: &ReaderConfig,
) -> Result<String> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            error!("Error: cannot read config file: {}", path.display());
            return Err(IniError::FileOpen {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    read_value_from_with(BufReader::new(file), section, key, config)
}

/// Look up `key` in `section` on an already open stream.
pub fn read_value_from<R: BufRead>(stream: R, section: &str, key: &str) -> Result<String> {
    read_value_from_with(stream, section, key, &ReaderConfig::default())
}

/// [`read_value_from`] with explicit reader settings.
pub fn read_value_from_with<R: BufRead>(
    stream: R,
    section: &str,
    key: &str,
    config: &ReaderConfig,
) -> Result<String> {
    let mut reader = LineReader::with_config(stream, *config);
    let mut search = Search::new(section, key);
    while let Some(line) = reader.next_line()? {
        if let Some(outcome) = search.step(&line) {
            debug!("search for [{}] {} ended at line {}", section, key, reader.line_number());
            return outcome;
        }
    }
    Err(search.pending)
}

/// Search state over a sequence of logical lines.
struct Search<'a> {
    section: &'a str,
    key: &'a str,
    in_section: bool,
    seen_header: bool,
    pending: IniError,
}

impl<'a> Search<'a> {
    fn new(section: &'a str, key: &'a str) -> Self {
        Self {
            section,
            key,
            in_section: false,
            seen_header: false,
            pending: IniError::SectionNotFound(section.to_string()),
        }
    }

    /// Look at one line. `Some` ends the search.
    fn step(&mut self, line: &str) -> Option<Result<String>> {
        if let Some(name) = parse_section(line) {
            if self.in_section {
                return Some(Err(IniError::key_not_found(self.section, self.key)));
            }
            self.seen_header = true;
            if name == self.section {
                self.enter();
            }
            return None;
        }

        // any line before the first header opens the implicit section
        if !self.seen_header && !self.in_section && self.section.is_empty() {
            self.enter();
        }
        if !self.in_section {
            return None;
        }
        match_key(line, self.key).map(try_copy)
    }

    fn enter(&mut self) {
        self.in_section = true;
        self.pending = IniError::key_not_found(self.section, self.key);
    }
}
