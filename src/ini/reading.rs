//! Reading
//!
//!     Turning bytes into meaningful lines happens in two steps:
//!
//!         1. The [reader](reader) pulls bounded physical lines, drops comments and blank
//!            lines and joins continued lines into logical lines.
//!         2. The [classifier](classify) decides whether a logical line is a section header,
//!            a key/value entry, or noise to be ignored.
//!
//!     Both the document builder and the single key search sit on top of these two steps.

pub mod classify;
pub mod reader;

pub use classify::{classify, match_key, parse_section, split_key_value, LineKind};
pub use reader::LineReader;
