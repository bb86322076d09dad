//! Physical to logical line reader
//!
//!     The reader pulls bounded physical lines from any [`BufRead`] and hands back logical
//!     lines: comments and blank lines are dropped, leading whitespace is removed, and lines
//!     ending in a continuation marker are joined with the lines that follow.
//!
//! Continuation
//!
//!     The trailing run of backslashes before the newline decides what happens to a line:
//!
//!         - an even count `n` (zero included) ends the line; each pair collapses into one
//!           literal backslash, so `n / 2` backslashes are dropped.
//!         - an odd count continues the line: `(n - 1) / 2` pairs collapse, the lone final
//!           backslash and the newline are dropped, and the next physical line is appended
//!           verbatim (no indentation stripping, no comment check). The same rule is then
//!           applied to the newly appended tail.
//!
//!     A stream that ends while a line is still being continued terminates the logical line
//!     with whatever was collected. After assembly all trailing whitespace is removed.
//!
//!     A `\r\n` terminator is treated like `\n`, so files written on Windows continue the
//!     same way.
//!
//! Allocation
//!
//!     Buffers grow through `try_reserve`, and a failed reservation surfaces as
//!     [`IniError::OutOfMemory`](crate::ini::error::IniError::OutOfMemory) with no partial line
//!     handed back.

use crate::ini::config::ReaderConfig;
use crate::ini::error::Result;
use std::io::{self, BufRead};

/// Produces logical lines from a buffered byte stream.
pub struct LineReader<R> {
    inner: R,
    config: ReaderConfig,
    physical: Vec<u8>,
    physical_count: usize,
    line_start: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ReaderConfig::default())
    }

    pub fn with_config(inner: R, config: ReaderConfig) -> Self {
        Self {
            inner,
            config,
            physical: Vec::new(),
            physical_count: 0,
            line_start: 0,
        }
    }

    /// 1-based number of the physical read that started the most recent logical line.
    pub fn line_number(&self) -> usize {
        self.line_start
    }

    /// Read the next logical line, or `None` once the stream is exhausted.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        let mut physical = std::mem::take(&mut self.physical);
        let line = self.assemble(&mut physical);
        self.physical = physical;
        line
    }

    fn assemble(&mut self, physical: &mut Vec<u8>) -> Result<Option<String>> {
        loop {
            if !self.read_physical(physical)? {
                return Ok(None);
            }
            let indent = leading_whitespace(physical);
            if !is_blank_or_comment(&physical[indent..]) {
                physical.drain(..indent);
                break;
            }
        }
        self.line_start = self.physical_count;

        let mut logical = Vec::new();
        let mut continued = append_physical(&mut logical, physical)?;
        while continued && self.read_physical(physical)? {
            continued = append_physical(&mut logical, physical)?;
        }

        let end = logical.len() - trailing_count(&logical, |b| b" \t\r\n".contains(&b));
        logical.truncate(end);

        Ok(Some(match String::from_utf8(logical) {
            Ok(line) => line,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }))
    }

    /// Read one physical line into `buf`: bytes up to and including the next newline, but
    /// never more than the configured bound. Returns false at end of stream.
    fn read_physical(&mut self, buf: &mut Vec<u8>) -> Result<bool> {
        buf.clear();
        let limit = self.config.effective_max_line_length();
        loop {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            if available.is_empty() {
                break;
            }

            let window = &available[..available.len().min(limit - buf.len())];
            let (used, done) = match window.iter().position(|&b| b == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (window.len(), buf.len() + window.len() == limit),
            };
            buf.try_reserve(used)?;
            buf.extend_from_slice(&window[..used]);
            self.inner.consume(used);
            if done {
                break;
            }
        }

        if buf.is_empty() {
            return Ok(false);
        }
        self.physical_count += 1;
        Ok(true)
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Append one physical line to the logical line under construction, resolving its trailing
/// backslashes. Returns true when the line continues onto the next physical line.
fn append_physical(logical: &mut Vec<u8>, physical: &[u8]) -> Result<bool> {
    let body = strip_newline(physical);
    let slashes = trailing_count(body, |b| b == b'\\');
    let continued = slashes % 2 == 1;
    let keep = body.len() - slashes / 2 - usize::from(continued);

    logical.try_reserve(keep)?;
    logical.extend_from_slice(&body[..keep]);
    Ok(continued)
}

fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn leading_whitespace(line: &[u8]) -> usize {
    line.iter().take_while(|&&b| b == b' ' || b == b'\t').count()
}

fn trailing_count(line: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    line.iter().rev().take_while(|&&b| pred(b)).count()
}

fn is_blank_or_comment(content: &[u8]) -> bool {
    match content.first() {
        None | Some(b'\n') | Some(b'#') | Some(b';') => true,
        Some(b'\r') => content.get(1).map_or(true, |&b| b == b'\n'),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(source: &str) -> Vec<String> {
        LineReader::new(Cursor::new(source))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn lines_with_limit(source: &str, limit: usize) -> Vec<String> {
        let config = ReaderConfig::new().with_max_line_length(limit);
        LineReader::with_config(Cursor::new(source), config)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(lines("a=1\nb=2\n"), vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_skips_comments_and_blanks() {
        let source = "; comment\n# another\n\n   \n\t\nkey=value\n  ; indented comment\n";
        assert_eq!(lines(source), vec!["key=value"]);
    }

    #[test]
    fn test_strips_leading_and_trailing_whitespace() {
        assert_eq!(lines("   key = value  \t\n"), vec!["key = value"]);
    }

    #[test]
    fn test_single_backslash_joins() {
        assert_eq!(lines("a\\\nb\n"), vec!["ab"]);
    }

    #[test]
    fn test_escaped_backslash_does_not_join() {
        assert_eq!(lines("a\\\\\nb\n"), vec!["a\\", "b"]);
    }

    #[test]
    fn test_three_backslashes_keep_one_and_join() {
        assert_eq!(lines("a\\\\\\\nb\n"), vec!["a\\b"]);
    }

    #[test]
    fn test_four_backslashes_keep_two() {
        assert_eq!(lines("a\\\\\\\\\nb\n"), vec!["a\\\\", "b"]);
    }

    #[test]
    fn test_multiple_continuations() {
        let source = "greeting = Hello, \\\n  and welcome \\\nfriend\nnext=1\n";
        assert_eq!(
            lines(source),
            vec!["greeting = Hello,   and welcome friend", "next=1"]
        );
    }

    #[test]
    fn test_continued_line_is_not_comment_filtered() {
        assert_eq!(lines("k = a\\\n# not a comment\n"), vec!["k = a# not a comment"]);
    }

    #[test]
    fn test_continuation_at_end_of_stream() {
        assert_eq!(lines("key = tail\\\n"), vec!["key = tail"]);
        assert_eq!(lines("key = tail\\"), vec!["key = tail"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        assert_eq!(lines("a=1\nb=2"), vec!["a=1", "b=2"]);
        assert_eq!(lines("b=2\\\\"), vec!["b=2\\"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(lines("a=1\r\nb=\\\r\n2\r\n\r\n"), vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_empty_stream() {
        assert!(lines("").is_empty());
        assert!(lines("\n\n; only comments\n").is_empty());
    }

    #[test]
    fn test_long_lines_are_split_into_bounded_reads() {
        // 4 bytes per read: "abc" + "d" ... each read is its own physical line
        assert_eq!(lines_with_limit("abcdef\n", 4), vec!["abcd", "ef"]);
    }

    #[test]
    fn test_line_numbers() {
        let mut reader = LineReader::new(Cursor::new("; c\n\na=1\\\nb\nc=2\n"));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("a=1b"));
        assert_eq!(reader.line_number(), 3);
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("c=2"));
        assert_eq!(reader.line_number(), 5);
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"k=\xff\n";
        let got: Vec<String> = LineReader::new(bytes).collect::<Result<_>>().unwrap();
        assert_eq!(got, vec!["k=\u{fffd}"]);
    }

    #[test]
    fn test_read_errors_propagate() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }
        let mut reader = LineReader::new(io::BufReader::new(Failing));
        assert!(matches!(
            reader.next_line(),
            Err(crate::ini::error::IniError::Io(_))
        ));
    }
}
