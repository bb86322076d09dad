//! Fluent assertions for parsed documents
//!
//!     Tests describe what a document should contain instead of walking its sections by
//!     hand. Each assertion panics with a message that names the section and the full
//!     contents it actually found.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use iniread::ini::testing::assert_doc;
//!
//!     let doc = iniread::parse_str("[server]\nhost = a\nport = 80\n").unwrap();
//!     assert_doc(&doc)
//!         .section_count(1)
//!         .section(0, |s| {
//!             s.name("server").entry_count(2).entry("host", "a").entry("port", "80");
//!         });
//!     ```

use crate::ini::document::{Document, Section};

/// Start asserting on a document.
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

fn summarize(doc: &Document) -> String {
    doc.sections()
        .iter()
        .map(|section| format!("[{}]{}", section.name(), section.len()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the number of sections, implicit section included.
    pub fn section_count(self, expected: usize) -> Self {
        assert_eq!(
            self.doc.len(),
            expected,
            "Expected {} sections, found {}: [{}]",
            expected,
            self.doc.len(),
            summarize(self.doc)
        );
        self
    }

    /// Assert section names in declaration order.
    pub fn section_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.doc.section_names().collect();
        assert_eq!(actual, expected, "Section names differ");
        self
    }

    /// Assert on a section by position.
    pub fn section<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        assert!(
            index < self.doc.len(),
            "Section index {} out of bounds (document has {} sections: [{}])",
            index,
            self.doc.len(),
            summarize(self.doc)
        );
        assertion(SectionAssertion {
            section: &self.doc.sections()[index],
            context: format!("sections[{}]", index),
        });
        self
    }

    /// Assert that `get_value(section, key)` yields `value`.
    pub fn value(self, section: &str, key: &str, value: &str) -> Self {
        match self.doc.get_value(section, key) {
            Ok(actual) => assert_eq!(
                actual, value,
                "Value of [{}] {} differs",
                section, key
            ),
            Err(err) => panic!(
                "Expected [{}] {} = {:?}, got error: {} (sections: [{}])",
                section,
                key,
                value,
                err,
                summarize(self.doc)
            ),
        }
        self
    }

    /// Assert that `get_value(section, key)` misses.
    pub fn missing(self, section: &str, key: &str) -> Self {
        if let Ok(actual) = self.doc.get_value(section, key) {
            panic!(
                "Expected [{}] {} to be missing, found {:?}",
                section, key, actual
            );
        }
        self
    }
}

pub struct SectionAssertion<'a> {
    section: &'a Section,
    context: String,
}

impl SectionAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.section.name(),
            expected,
            "{}: section name differs",
            self.context
        );
        self
    }

    pub fn entry_count(self, expected: usize) -> Self {
        let keys: Vec<&str> = self.section.keys().collect();
        assert_eq!(
            keys.len(),
            expected,
            "{}: expected {} entries, found {:?}",
            self.context,
            expected,
            keys
        );
        self
    }

    /// Assert that the section holds `key` with `value`.
    pub fn entry(self, key: &str, value: &str) -> Self {
        assert_eq!(
            self.section.get(key),
            Some(value),
            "{} [{}]: entry {} differs (entries: {:?})",
            self.context,
            self.section.name(),
            key,
            self.section.entries()
        );
        self
    }

    /// Assert keys in declaration order.
    pub fn keys(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.section.keys().collect();
        assert_eq!(actual, expected, "{}: keys differ", self.context);
        self
    }
}
