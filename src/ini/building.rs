//! Document building
//!
//!     Drives the [reader](crate::ini::reading::reader) and the
//!     [classifier](crate::ini::reading::classify) over a whole stream and collects the
//!     result into a [`Document`].
//!
//!     The builder moves through two states. Before the first header nothing is open; the
//!     first other line seen in that state, valid entry or not, opens the implicit (empty
//!     named) section. Every header
//!     opens a new section, even when one of that name already exists. Lines that are
//!     neither headers nor valid entries are dropped without complaint.
//!
//!     A failed allocation aborts the build. The partially built document is dropped before
//!     the error is returned, so callers never see half a document.

use crate::ini::config::ReaderConfig;
use crate::ini::document::Document;
use crate::ini::error::{IniError, Result};
use crate::ini::reading::{classify, LineKind, LineReader};
use log::{debug, trace};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::str::FromStr;

/// Parse an already open stream. The caller keeps ownership of the stream.
pub fn parse_stream<R: BufRead>(stream: R) -> Result<Document> {
    parse_stream_with(stream, &ReaderConfig::default())
}

/// Parse an already open stream with explicit reader settings.
pub fn parse_stream_with<R: BufRead>(stream: R, config: &ReaderConfig) -> Result<Document> {
    let mut reader = LineReader::with_config(stream, *config);
    let mut builder = DocumentBuilder::new();
    while let Some(line) = reader.next_line()? {
        builder.feed(&line, reader.line_number())?;
    }
    let doc = builder.finish();
    debug!("built document with {} section(s)", doc.len());
    Ok(doc)
}

/// Open `path` and parse it.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with(path, &ReaderConfig::default())
}

/// Open `path` and parse it with explicit reader settings.
pub fn parse_file_with<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<Document> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IniError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    parse_stream_with(BufReader::new(file), config)
}

/// Parse ini text held in memory.
pub fn parse_str(source: &str) -> Result<Document> {
    parse_stream(Cursor::new(source))
}

impl FromStr for Document {
    type Err = IniError;

    fn from_str(source: &str) -> Result<Self> {
        parse_str(source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NoSectionYet,
    InSection,
}

/// Accumulates classified lines into a document.
struct DocumentBuilder {
    doc: Document,
    state: State,
}

impl DocumentBuilder {
    fn new() -> Self {
        Self {
            doc: Document::new(),
            state: State::NoSectionYet,
        }
    }

    fn feed(&mut self, line: &str, line_number: usize) -> Result<()> {
        let kind = classify(line);
        if let LineKind::Section(name) = kind {
            self.doc.try_push_section(name)?;
            self.state = State::InSection;
            return Ok(());
        }

        if self.state == State::NoSectionYet {
            self.doc.try_push_section("")?;
            self.state = State::InSection;
        }
        match kind {
            LineKind::Entry { key, value } => self.doc.try_push_entry(key, value),
            _ => {
                trace!("line {}: ignoring {:?}", line_number, line);
                Ok(())
            }
        }
    }

    fn finish(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_and_entries() {
        let doc = parse_str("[A]\nk=1\n[B]\nk=2\n").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get_value("A", "k").unwrap(), "1");
        assert_eq!(doc.get_value("B", "k").unwrap(), "2");
    }

    #[test]
    fn test_implicit_section() {
        let doc = parse_str("top = level\n[named]\nx = y\n").unwrap();
        assert_eq!(doc.sections()[0].name(), "");
        assert_eq!(doc.get_value("", "top").unwrap(), "level");
    }

    #[test]
    fn test_implicit_section_opened_by_noise() {
        // the implicit section opens on the first non-header line, valid or not
        let doc = parse_str("garbage\n[a]\n").unwrap();
        let names: Vec<&str> = doc.section_names().collect();
        assert_eq!(names, vec!["", "a"]);
        assert!(doc.sections()[0].is_empty());
    }

    #[test]
    fn test_no_implicit_section_when_header_comes_first() {
        let doc = parse_str("; leading comment\n[a]\nk=v\n").unwrap();
        let names: Vec<&str> = doc.section_names().collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("# nothing\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_from_str() {
        let doc: Document = "[s]\nk: v\n".parse().unwrap();
        assert_eq!(doc.get_value("s", "k").unwrap(), "v");
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("/definitely/not/here.ini").unwrap_err();
        assert!(matches!(err, IniError::FileOpen { .. }));
    }
}
