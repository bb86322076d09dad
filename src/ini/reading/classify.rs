//! Line Classification
//!
//! Decides what a logical line means: a `[section]` header, a `key = value` entry, or
//! nothing at all. Lines that fit neither shape are not errors; they are simply ignored.
//! All functions borrow from the line; callers copy what they keep.

/// Characters that separate a key from its value.
const SEPARATORS: [char; 2] = ['=', ':'];

/// What a logical line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Section(&'a str),
    Entry { key: &'a str, value: &'a str },
    Ignored,
}

/// Classify a logical line. Header detection wins over key/value splitting.
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(name) = parse_section(line) {
        return LineKind::Section(name);
    }
    match split_key_value(line) {
        Some((key, value)) => LineKind::Entry { key, value },
        None => LineKind::Ignored,
    }
}

/// Extract the section name from a `[name]` header.
///
/// The line must start with `[`, end with `]` and have something in between. The name is
/// the interior up to the first `]`, trimmed of spaces and tabs. An interior that trims to
/// nothing (`[ ]`) is not a header, so it can never be mistaken for the implicit section.
/// A name holding a stray `[` (`[[]`, `[a[b]]`) is rejected the same way.
pub fn parse_section(line: &str) -> Option<&str> {
    if line.len() < 3 {
        return None;
    }
    let interior = line.strip_prefix('[')?.strip_suffix(']')?;
    let interior = interior.trim_start_matches(is_blank);
    let name = match interior.find(']') {
        Some(close) => &interior[..close],
        None => interior,
    };
    let name = name.trim_end_matches(is_blank);
    (!name.is_empty() && !name.contains('[')).then_some(name)
}

/// Split `key <sep> value` on the first separator.
///
/// The key is the leading run of characters that are neither blanks nor separators. Blanks
/// may surround the separator. Both key and value must be non-empty.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let key_len = line
        .find(|c: char| is_blank(c) || SEPARATORS.contains(&c))
        .unwrap_or(line.len());
    if key_len == 0 {
        return None;
    }
    let (key, rest) = line.split_at(key_len);
    let value = value_after_separator(rest)?;
    Some((key, value))
}

/// Test a line against a known key and return its value on a match.
///
/// The line must start with exactly `key`, then optional blanks, then a separator. A longer
/// key sharing the prefix does not match, and neither does an entry with an empty value.
/// Keys that [`split_key_value`] could never produce (empty, or holding blanks or
/// separators) match nothing.
pub fn match_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    if key.is_empty() || key.contains(|c: char| is_blank(c) || SEPARATORS.contains(&c)) {
        return None;
    }
    let rest = line.strip_prefix(key)?;
    value_after_separator(rest)
}

/// Skip blanks, require a separator, skip blanks, return a non-empty remainder.
fn value_after_separator(rest: &str) -> Option<&str> {
    let rest = rest.trim_start_matches(is_blank);
    let rest = rest.strip_prefix(SEPARATORS)?;
    let value = rest.trim_start_matches(is_blank);
    (!value.is_empty()).then_some(value)
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
