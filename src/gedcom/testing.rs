//! Test helpers for record trees
//!
//!     [`assert_record`] checks a record and, through nested closures, its whole subtree
//!     in one expression. Failures name the path to the offending node, so a broken
//!     grandchild reports as `HEAD:children[0]:children[1]` rather than a bare mismatch.
//!
//!         assert_record(&head)
//!             .tag("HEAD")
//!             .child_count(1)
//!             .child(0, |gedc| {
//!                 gedc.tag("GEDC").child(0, |vers| {
//!                     vers.tag("VERS").data("5.5");
//!                 });
//!             });
//!
//!     Text checks go through [`TextMatch`], which also backs the `data_starts_with` and
//!     `data_contains` shortcuts.

mod matchers;

pub use matchers::TextMatch;

use crate::gedcom::record::{Record, RecordKind};

/// Start a fluent assertion on `record`.
pub fn assert_record(record: &Record) -> RecordAssertion<'_> {
    let context = if record.tag().is_empty() {
        "<cleared>".to_string()
    } else {
        record.tag().to_string()
    };
    RecordAssertion { record, context }
}

pub struct RecordAssertion<'a> {
    record: &'a Record,
    context: String,
}

impl<'a> RecordAssertion<'a> {
    pub fn level(self, expected: usize) -> Self {
        assert_eq!(
            self.record.level, expected,
            "{}: Expected level {}, found {}",
            self.context, expected, self.record.level
        );
        self
    }

    pub fn id(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.record.id(), &self.field("id"));
        self
    }

    pub fn tag(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.record.tag(), &self.field("tag"));
        self
    }

    pub fn xref(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.record.xref_id, &self.field("xref"));
        self
    }

    pub fn data(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.record.data, &self.field("data"));
        self
    }

    pub fn data_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(&self.record.data, &self.field("data"));
        self
    }

    pub fn data_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(&self.record.data, &self.field("data"));
        self
    }

    pub fn kind(self, expected: RecordKind) -> Self {
        assert_eq!(
            self.record.kind(),
            expected,
            "{}: Expected kind {}, found {}",
            self.context,
            expected.name(),
            self.record.kind().name()
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.record.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.record)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(RecordAssertion<'a>),
    {
        let child = self.record.children.get(index).unwrap_or_else(|| {
            panic!(
                "{}: Child index {} out of bounds (record has {} children)",
                self.context,
                index,
                self.record.children.len()
            )
        });
        assertion(RecordAssertion {
            record: child,
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }

    fn field(&self, name: &str) -> String {
        format!("{}.{}", self.context, name)
    }
}

fn summarize(record: &Record) -> String {
    record
        .children
        .iter()
        .map(|child| child.tag())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new(0, "HEAD").with_child(
            Record::new(1, "GEDC").with_child(Record::new(2, "VERS").with_data("5.5")),
        )
    }

    #[test]
    fn walks_nested_children() {
        assert_record(&sample()).tag("HEAD").child_count(1).child(0, |gedc| {
            gedc.level(1).child(0, |vers| {
                vers.data("5.5").data_starts_with("5.").data_contains(".5");
            });
        });
    }

    #[test]
    #[should_panic(expected = "HEAD:children[0]:children[0].data")]
    fn failure_names_the_path() {
        assert_record(&sample()).child(0, |gedc| {
            gedc.child(0, |vers| {
                vers.data("5.5.1");
            });
        });
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn missing_child_panics() {
        assert_record(&sample()).child(3, |_| {});
    }
}
