//! Reader configuration

use serde::Deserialize;

/// Default bound on a single physical line read, in bytes, newline included.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// Smallest usable bound: one content byte plus the newline.
const MIN_LINE_LENGTH: usize = 2;

/// Knobs for the line reader.
///
/// A physical line longer than `max_line_length` is delivered in several reads, each of
/// which is treated as its own physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub max_line_length: usize,
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// The bound actually applied; tiny values are clamped so every read makes progress.
    pub fn effective_max_line_length(&self) -> usize {
        self.max_line_length.max(MIN_LINE_LENGTH)
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}
