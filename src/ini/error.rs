//! Error types for reading ini data
//!
//! Every fallible operation returns [`IniError`]. Each variant maps onto a stable numeric
//! [`ErrorCode`], and each code has a fixed human readable description. Lookup misses
//! (`SectionNotFound`, `KeyNotFound`) are ordinary outcomes, not failures worth logging.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fixed messages, indexed by [`ErrorCode`] value. The last slot is the fallback for
/// codes outside the known range.
const DESCRIPTIONS: [&str; 11] = [
    "Everything OK",
    "Section not found",
    "Key not found in section",
    "Unable to open file",
    "I/O error occured",
    "Error allocating memory",
    "Variable not interpretable as boolean",
    "Variable not an integer",
    "Variable not an float",
    "Interpolation parse error",
    "BUG: invalid error code",
];

/// Stable numeric classification of every outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    Ok = 0,
    SectionNotFound = 1,
    KeyNotFound = 2,
    FileOpen = 3,
    Io = 4,
    OutOfMemory = 5,
    NotBoolean = 6,
    NotInteger = 7,
    NotFloat = 8,
    Interpolation = 9,
}

impl ErrorCode {
    const ALL: [ErrorCode; 10] = [
        ErrorCode::Ok,
        ErrorCode::SectionNotFound,
        ErrorCode::KeyNotFound,
        ErrorCode::FileOpen,
        ErrorCode::Io,
        ErrorCode::OutOfMemory,
        ErrorCode::NotBoolean,
        ErrorCode::NotInteger,
        ErrorCode::NotFloat,
        ErrorCode::Interpolation,
    ];

    /// Map a raw code back to its variant.
    pub fn from_raw(raw: i32) -> Option<ErrorCode> {
        usize::try_from(raw)
            .ok()
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    /// The raw numeric value.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Human readable description of this code.
    pub fn description(self) -> &'static str {
        DESCRIPTIONS[self as usize]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Describe a raw code, including codes nothing maps to.
pub fn describe_raw(raw: i32) -> &'static str {
    match ErrorCode::from_raw(raw) {
        Some(code) => code.description(),
        None => DESCRIPTIONS[DESCRIPTIONS.len() - 1],
    }
}

/// Errors produced while reading, building, or querying ini data.
#[derive(Debug, Error)]
pub enum IniError {
    #[error("Section not found: [{0}]")]
    SectionNotFound(String),

    #[error("Key not found in section [{section}]: {key}")]
    KeyNotFound { section: String, key: String },

    #[error("Unable to open file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error allocating memory")]
    OutOfMemory,

    #[error("Variable not interpretable as boolean: {0:?}")]
    NotBoolean(String),

    #[error("Variable not an integer: {0:?}")]
    NotInteger(String),

    #[error("Variable not a float: {0:?}")]
    NotFloat(String),

    /// Reserved; no operation in this crate produces it yet.
    #[error("Interpolation parse error: {0}")]
    Interpolation(String),
}

impl IniError {
    pub(crate) fn key_not_found(section: &str, key: &str) -> Self {
        IniError::KeyNotFound {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    /// The numeric classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            IniError::SectionNotFound(_) => ErrorCode::SectionNotFound,
            IniError::KeyNotFound { .. } => ErrorCode::KeyNotFound,
            IniError::FileOpen { .. } => ErrorCode::FileOpen,
            IniError::Io(_) => ErrorCode::Io,
            IniError::OutOfMemory => ErrorCode::OutOfMemory,
            IniError::NotBoolean(_) => ErrorCode::NotBoolean,
            IniError::NotInteger(_) => ErrorCode::NotInteger,
            IniError::NotFloat(_) => ErrorCode::NotFloat,
            IniError::Interpolation(_) => ErrorCode::Interpolation,
        }
    }

    /// True for the two "lookup missed" outcomes.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IniError::SectionNotFound(_) | IniError::KeyNotFound { .. }
        )
    }
}

impl From<std::collections::TryReserveError> for IniError {
    fn from(_: std::collections::TryReserveError) -> Self {
        IniError::OutOfMemory
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_raw() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_raw(code.as_raw()), Some(code));
        }
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(ErrorCode::Ok.description(), "Everything OK");
        assert_eq!(ErrorCode::KeyNotFound.description(), "Key not found in section");
        assert_eq!(ErrorCode::OutOfMemory.to_string(), "Error allocating memory");
    }

    #[test]
    fn test_unknown_raw_code() {
        assert_eq!(ErrorCode::from_raw(-1), None);
        assert_eq!(ErrorCode::from_raw(10), None);
        assert_eq!(describe_raw(42), "BUG: invalid error code");
        assert_eq!(describe_raw(1), "Section not found");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            IniError::SectionNotFound("a".into()).code(),
            ErrorCode::SectionNotFound
        );
        assert_eq!(IniError::key_not_found("a", "k").code(), ErrorCode::KeyNotFound);
        assert_eq!(IniError::OutOfMemory.code(), ErrorCode::OutOfMemory);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(IniError::from(io).code(), ErrorCode::Io);
    }

    #[test]
    fn test_try_reserve_failure_is_out_of_memory() {
        let mut buf: Vec<u8> = Vec::new();
        let err = buf.try_reserve(usize::MAX).unwrap_err();
        assert!(matches!(IniError::from(err), IniError::OutOfMemory));
    }

    #[test]
    fn test_display() {
        let err = IniError::key_not_found("server", "port");
        assert_eq!(err.to_string(), "Key not found in section [server]: port");
        assert!(err.is_not_found());
        assert!(!IniError::OutOfMemory.is_not_found());
    }
}
