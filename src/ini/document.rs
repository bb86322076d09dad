//! Document model
//!
//!     A [`Document`] owns its [`Section`]s in declaration order, and each section owns its
//!     [`KeyValue`] entries in declaration order. Nothing is merged or deduplicated: two
//!     `[a]` headers yield two sections, and lookups return the first match.
//!
//!     Entries found before any header live in the implicit section, whose name is the
//!     empty string.

use crate::ini::error::{IniError, Result};
use crate::ini::value;
use serde::Serialize;

/// A single `key = value` entry. Both strings are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A named group of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    name: String,
    entries: Vec<KeyValue>,
}

impl Section {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for the unnamed section holding entries seen before any header.
    pub fn is_implicit(&self) -> bool {
        self.name.is_empty()
    }

    pub fn entries(&self) -> &[KeyValue] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(KeyValue::key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the first entry named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(KeyValue::value)
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| IniError::key_not_found(&self.name, key))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        value::parse_bool(self.require(key)?)
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        value::parse_int(self.require(key)?)
    }

    pub fn get_float(&self, key: &str) -> Result<f64> {
        value::parse_float(self.require(key)?)
    }

    /// Append an entry, copying both strings. Every allocation is fallible.
    pub(crate) fn try_push(&mut self, key: &str, value: &str) -> Result<()> {
        let entry = KeyValue {
            key: try_copy(key)?,
            value: try_copy(value)?,
        };
        self.entries.try_reserve(1)?;
        self.entries.push(entry);
        Ok(())
    }
}

/// Parsed ini data: every section in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    /// First section called `name`.
    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Every section called `name`, in declaration order.
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections.iter().filter(move |section| section.name == name)
    }

    /// Look `key` up in the first section called `section`.
    ///
    /// Only the first matching section is searched, so a key that appears in a later
    /// duplicate section still reports `KeyNotFound`.
    pub fn get_value(&self, section: &str, key: &str) -> Result<&str> {
        self.find_section(section)
            .ok_or_else(|| IniError::SectionNotFound(section.to_string()))?
            .require(key)
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
        value::parse_bool(self.get_value(section, key)?)
    }

    pub fn get_int(&self, section: &str, key: &str) -> Result<i64> {
        value::parse_int(self.get_value(section, key)?)
    }

    pub fn get_float(&self, section: &str, key: &str) -> Result<f64> {
        value::parse_float(self.get_value(section, key)?)
    }

    /// Open a new, empty section at the end and hand it back for filling.
    pub(crate) fn try_push_section(&mut self, name: &str) -> Result<&mut Section> {
        let section = Section {
            name: try_copy(name)?,
            entries: Vec::new(),
        };
        self.sections.try_reserve(1)?;
        self.sections.push(section);
        let last = self.sections.len() - 1;
        Ok(&mut self.sections[last])
    }

    /// Append an entry to the most recently opened section. The builder always opens a
    /// section before the first entry, so an empty document has nowhere to put it.
    pub(crate) fn try_push_entry(&mut self, key: &str, value: &str) -> Result<()> {
        match self.sections.last_mut() {
            Some(section) => section.try_push(key, value),
            None => Ok(()),
        }
    }
}

/// Look `key` up in the first section called `section`.
pub fn get_value<'a>(doc: &'a Document, section: &str, key: &str) -> Result<&'a str> {
    doc.get_value(section, key)
}

/// First section called `name`.
pub fn find_section<'a>(doc: &'a Document, name: &str) -> Option<&'a Section> {
    doc.find_section(name)
}

/// Value of `key` inside one section.
pub fn section_get<'a>(section: &'a Section, key: &str) -> Option<&'a str> {
    section.get(key)
}

/// Release a document and everything it owns.
pub fn free_document(doc: Document) {
    drop(doc);
}

/// Owned copy of `text`, failing instead of aborting when memory runs out.
pub(crate) fn try_copy(text: &str) -> Result<String> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new();
        let top = doc.try_push_section("").unwrap();
        top.try_push("root", "yes").unwrap();
        let a = doc.try_push_section("a").unwrap();
        a.try_push("k", "1").unwrap();
        a.try_push("ratio", "0.5").unwrap();
        let again = doc.try_push_section("a").unwrap();
        again.try_push("late", "x").unwrap();
        doc
    }

    #[test]
    fn test_lookup() {
        let doc = sample();
        assert_eq!(doc.get_value("a", "k").unwrap(), "1");
        assert_eq!(doc.get_value("", "root").unwrap(), "yes");
        assert_eq!(section_get(find_section(&doc, "a").unwrap(), "ratio"), Some("0.5"));
    }

    #[test]
    fn test_missing() {
        let doc = sample();
        assert!(matches!(
            doc.get_value("nope", "k"),
            Err(IniError::SectionNotFound(name)) if name == "nope"
        ));
        assert!(matches!(
            get_value(&doc, "a", "missing"),
            Err(IniError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_sections_are_kept_apart() {
        let doc = sample();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.sections_named("a").count(), 2);
        // only the first [a] is consulted
        assert!(doc.get_value("a", "late").is_err());
        let second = doc.sections_named("a").nth(1).unwrap();
        assert_eq!(second.get("late"), Some("x"));
    }

    #[test]
    fn test_typed_lookups() {
        let doc = sample();
        assert!(doc.get_bool("", "root").unwrap());
        assert_eq!(doc.get_int("a", "k").unwrap(), 1);
        assert_eq!(doc.get_float("a", "ratio").unwrap(), 0.5);
        assert!(matches!(doc.get_int("a", "ratio"), Err(IniError::NotInteger(_))));
        assert!(matches!(doc.get_bool("b", "x"), Err(IniError::SectionNotFound(_))));
        let a = doc.find_section("a").unwrap();
        assert!(matches!(a.get_bool("k"), Ok(true)));
        assert!(matches!(a.get_float("zzz"), Err(IniError::KeyNotFound { .. })));
    }

    #[test]
    fn test_entries_land_in_last_section() {
        let mut doc = sample();
        doc.try_push_entry("tail", "end").unwrap();
        assert_eq!(doc.sections()[2].get("tail"), Some("end"));
        assert_eq!(doc.sections()[2].len(), 2);
    }

    #[test]
    fn test_accessors() {
        let doc = sample();
        let names: Vec<&str> = doc.section_names().collect();
        assert_eq!(names, vec!["", "a", "a"]);
        assert!(doc.sections()[0].is_implicit());
        let keys: Vec<&str> = doc.sections()[1].keys().collect();
        assert_eq!(keys, vec!["k", "ratio"]);
        assert_eq!(doc.sections()[1].entries()[1].value(), "0.5");
        free_document(doc);
    }
}
