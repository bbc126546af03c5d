//! The universal GEDCOM node
//!
//!     Every line of a GEDCOM file becomes a [`Record`]: a level, an optional id the record
//!     declares, a tag, an optional cross-reference to another record and a data payload.
//!     Lines one level deeper follow as [`children`](Record::children), in file order.
//!
//!     Typed views (Individual, Name, Event, ...) own nothing of their own. They are
//!     accessor sets over a `Record`, selected by its [`RecordKind`]. The kind is decided
//!     once, by the factory or a typed constructor, and stays with the node.
//!
//!     `id` and `tag` are read-only after construction because [`RecordList`] indexes
//!     its members by both. Everything else is plain public data.

pub mod kind;
pub mod list;

pub use kind::RecordKind;
pub use list::RecordList;

use crate::gedcom::building::factory;
use crate::gedcom::formats::writer::MAX_LINE_LENGTH;
use crate::gedcom::lexing::get_id;
use crate::gedcom::tags::{CONC, CONT, USER_DEFINED_PREFIX};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Record {
    pub level: usize,
    id: String,
    tag: String,
    pub xref_id: String,
    pub data: String,
    #[serde(skip_serializing_if = "RecordList::is_empty")]
    pub children: RecordList,
    kind: RecordKind,
}

impl Record {
    /// A generic record. Use [`promoted`](Self::promoted) or a typed constructor to
    /// attach a typed view.
    pub fn new(level: usize, tag: impl Into<String>) -> Self {
        Self {
            level,
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_xref(mut self, xref_id: impl Into<String>) -> Self {
        self.xref_id = xref_id.into();
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_child(mut self, child: Record) -> Self {
        self.children.add(child);
        self
    }

    pub(crate) fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    /// Run the record through the factory, fixing its kind from tag, level and xref.
    pub fn promoted(self) -> Self {
        factory::promote(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Numeric part of the id (`@I12@` is 12), or -1 when there is none.
    pub fn numeric_id(&self) -> i32 {
        get_id(&self.id)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_user_defined(&self) -> bool {
        self.tag.starts_with(USER_DEFINED_PREFIX)
    }

    /// A record left behind by a line that failed to parse.
    pub fn is_cleared(&self) -> bool {
        self.level == 0
            && self.tag.is_empty()
            && self.id.is_empty()
            && self.xref_id.is_empty()
            && self.data.is_empty()
    }

    pub fn append_data(&mut self, data: &str) {
        self.data.push_str(data);
    }

    pub fn child(&self, tag: &str) -> Option<&Record> {
        self.children.get_first_by_tag(tag)
    }

    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Record> {
        self.children.get_first_by_tag_mut(tag)
    }

    /// Data of the first child with `tag`, or empty.
    pub fn child_data(&self, tag: &str) -> &str {
        self.children.get_record_data(tag)
    }

    /// Data of the first `sub` under the first `tag` child, or empty.
    pub fn grandchild_data(&self, tag: &str, sub: &str) -> &str {
        self.child(tag)
            .map(|child| child.children.get_record_data(sub))
            .unwrap_or("")
    }

    /// Cross-reference of the first child with `tag`, or empty.
    pub fn child_xref(&self, tag: &str) -> &str {
        self.children.get_xref_id(tag)
    }

    /// Overwrite the first `tag` child's data, adding the child one level down if absent.
    pub fn set_child_data(&mut self, tag: &str, data: impl Into<String>) {
        let level = self.level + 1;
        match self.children.get_first_by_tag_mut(tag) {
            Some(child) => child.data = data.into(),
            None => self
                .children
                .add(Record::new(level, tag).with_data(data).promoted()),
        }
    }

    /// Overwrite `tag`/`sub` data, adding the child and grandchild as needed.
    pub fn set_grandchild_data(&mut self, tag: &str, sub: &str, data: impl Into<String>) {
        self.ensure_child(tag).set_child_data(sub, data);
    }

    /// Overwrite the first `tag` child's cross-reference, adding the child if absent.
    pub fn set_child_xref(&mut self, tag: &str, xref_id: impl Into<String>) {
        let level = self.level + 1;
        match self.children.get_first_by_tag_mut(tag) {
            Some(child) => child.xref_id = xref_id.into(),
            None => self
                .children
                .add(Record::new(level, tag).with_xref(xref_id).promoted()),
        }
    }

    /// Append a promoted child one level down.
    pub fn add_child_record(
        &mut self,
        id: impl Into<String>,
        xref_id: impl Into<String>,
        tag: &str,
        data: impl Into<String>,
    ) {
        let child = Record::new(self.level + 1, tag)
            .with_id(id)
            .with_xref(xref_id)
            .with_data(data)
            .promoted();
        self.children.add(child);
    }

    pub(crate) fn ensure_child(&mut self, tag: &str) -> &mut Record {
        let position = match self.children.position_of_tag(tag) {
            Some(position) => position,
            None => {
                self.children.add(Record::new(self.level + 1, tag).promoted());
                self.children.len() - 1
            }
        };
        &mut self.children[position]
    }

    /// Move every line after the first `\n` of `data` into `CONT` children placed ahead
    /// of the existing children. No-op when `data` holds no newline.
    pub fn split_on_embedded_newline(&mut self) {
        if !self.data.contains('\n') {
            return;
        }

        let data = std::mem::take(&mut self.data);
        let mut segments = data.split('\n').map(|s| s.strip_suffix('\r').unwrap_or(s));
        self.data = segments.next().unwrap_or_default().to_string();

        let existing = std::mem::take(&mut self.children);
        for segment in segments {
            self.children
                .add(Record::new(self.level + 1, CONT).with_data(segment));
        }
        self.children.extend(existing);
    }

    /// Cut data too long for one line into `CONC` children.
    ///
    /// The record's own overflow goes first; leading `CONT` children that are too long
    /// are followed by their own `CONC` siblings. Line width is capped both by
    /// `max_length` and by what remains of [`MAX_LINE_LENGTH`] after level and tag.
    pub fn split_long_data(&mut self, max_length: usize) {
        let level = self.level + 1;
        let width = data_width(self.level, &self.tag, max_length);
        let mut rebuilt = RecordList::new();

        let mut chunks = split_chunks(&self.data, width).into_iter();
        if let Some(first) = chunks.next() {
            self.data = first;
        }
        for chunk in chunks {
            rebuilt.add(Record::new(level, CONC).with_data(chunk));
        }

        let mut leading = true;
        for mut child in std::mem::take(&mut self.children) {
            let continuation =
                child.level == level && (child.tag == CONT || child.tag == CONC);
            leading = leading && continuation;
            if !leading {
                rebuilt.add(child);
                continue;
            }

            let width = data_width(child.level, &child.tag, max_length);
            let mut chunks = split_chunks(&child.data, width).into_iter();
            if let Some(first) = chunks.next() {
                child.data = first;
            }
            rebuilt.add(child);
            for chunk in chunks {
                rebuilt.add(Record::new(level, CONC).with_data(chunk));
            }
        }

        self.children = rebuilt;
    }
}

/// Characters of data that fit on a line at `level` with `tag`.
pub(crate) fn data_width(level: usize, tag: &str, max_length: usize) -> usize {
    let digits = level.to_string().len();
    let available = MAX_LINE_LENGTH.saturating_sub(digits + 1 + tag.chars().count() + 1);
    max_length.min(available).max(1)
}

/// Split `text` into chunks of at most `width` characters.
///
/// Readers trim each line, so a cut is moved back while it would leave whitespace at
/// either side of it. When no such position exists the chunk is cut at `width`.
pub(crate) fn split_chunks(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while chars.len() - start > width {
        let mut cut = start + width;
        while cut > start + 1 && (chars[cut - 1].is_whitespace() || chars[cut].is_whitespace()) {
            cut -= 1;
        }
        if chars[cut - 1].is_whitespace() || chars[cut].is_whitespace() {
            cut = start + width;
        }
        chunks.push(chars[start..cut].iter().collect());
        start = cut;
    }
    chunks.push(chars[start..].iter().collect());
    chunks
}

/// Records compare by level, id, tag, xref and data. Children and kind are ignored.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.level == other.level
            && self.data == other.data
            && self.tag == other.tag
            && self.xref_id == other.xref_id
    }
}

impl Eq for Record {}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level:{} Id:{} Tag:{} XRefId:{} Data:{}",
            self.level, self.id, self.tag, self.xref_id, self.data
        )?;
        for child in self.children.iter() {
            write!(f, "\n{child}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::testing::assert_record;
    use proptest::prelude::*;

    #[test]
    fn equality_ignores_children() {
        let bare = Record::new(1, "NAME").with_data("John /Smith/");
        let with_child = bare
            .clone()
            .with_child(Record::new(2, "GIVN").with_data("John"));
        assert_eq!(bare, with_child);
        assert_ne!(bare, Record::new(1, "NAME").with_data("Jane /Smith/"));
        assert_ne!(bare, Record::new(2, "NAME").with_data("John /Smith/"));
    }

    #[test]
    fn numeric_id_reads_the_id_body() {
        assert_eq!(Record::new(0, "INDI").with_id("@I42@").numeric_id(), 42);
        assert_eq!(Record::new(0, "HEAD").numeric_id(), -1);
    }

    #[test]
    fn serializes_fields_and_nested_children() {
        let record = Record::new(0, "INDI")
            .with_id("@I1@")
            .with_child(Record::new(1, "NAME").with_data("Ann /Lee/"))
            .promoted();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "@I1@");
        assert_eq!(value["kind"], "Individual");
        assert_eq!(value["children"][0]["data"], "Ann /Lee/");
        assert!(value["children"][0].get("children").is_none());
    }

    #[test]
    fn display_lists_fields_then_children() {
        let record = Record::new(0, "INDI")
            .with_id("@I1@")
            .with_child(Record::new(1, "NAME").with_data("John /Smith/"));
        assert_eq!(
            record.to_string(),
            "Level:0 Id:@I1@ Tag:INDI XRefId: Data:\nLevel:1 Id: Tag:NAME XRefId: Data:John /Smith/"
        );
    }

    #[test]
    fn set_child_data_adds_then_overwrites() {
        let mut record = Record::new(0, "INDI").with_id("@I1@");
        record.set_child_data("SEX", "M");
        record.set_child_data("SEX", "F");
        assert_record(&record)
            .child_count(1)
            .child(0, |sex| {
                sex.level(1).tag("SEX").data("F");
            });
    }

    #[test]
    fn set_grandchild_data_builds_the_path() {
        let mut header = Record::new(0, "HEAD");
        header.set_grandchild_data("GEDC", "VERS", "5.5");
        header.set_grandchild_data("GEDC", "FORM", "LINEAGE-LINKED");
        assert_eq!(header.grandchild_data("GEDC", "VERS"), "5.5");
        assert_record(&header).child_count(1).child(0, |gedc| {
            gedc.tag("GEDC").level(1).child_count(2).child(1, |form| {
                form.tag("FORM").level(2).data("LINEAGE-LINKED");
            });
        });
    }

    #[test]
    fn set_child_xref_adds_then_overwrites() {
        let mut family = Record::new(0, "FAM").with_id("@F1@").promoted();
        family.set_child_xref("HUSB", "@I1@");
        family.set_child_xref("HUSB", "@I2@");
        assert_eq!(family.child_xref("HUSB"), "@I2@");
        assert_eq!(family.children.len(), 1);
    }

    #[test]
    fn embedded_newlines_become_leading_cont_children() {
        let mut note = Record::new(0, "NOTE")
            .with_data("first\nsecond\n\nfourth")
            .with_child(Record::new(1, "SOUR").with_xref("@S1@"));
        note.split_on_embedded_newline();

        assert_record(&note)
            .data("first")
            .child_count(4)
            .child(0, |c| {
                c.tag("CONT").level(1).data("second");
            })
            .child(1, |c| {
                c.tag("CONT").data("");
            })
            .child(2, |c| {
                c.tag("CONT").data("fourth");
            })
            .child(3, |c| {
                c.tag("SOUR").xref("@S1@");
            });
    }

    #[test]
    fn long_data_is_cut_into_conc_children() {
        let mut note = Record::new(1, "NOTE").with_data("x".repeat(25));
        note.split_long_data(10);
        assert_record(&note)
            .data(&"x".repeat(10))
            .child_count(2)
            .child(0, |c| {
                c.tag("CONC").level(2).data(&"x".repeat(10));
            })
            .child(1, |c| {
                c.tag("CONC").data("xxxxx");
            });
    }

    #[test]
    fn long_cont_lines_get_their_own_conc_siblings() {
        let mut note = Record::new(0, "NOTE").with_data("short\nabcdefghij");
        note.split_on_embedded_newline();
        note.split_long_data(4);
        let tags: Vec<_> = note
            .children
            .iter()
            .map(|c| (c.tag().to_string(), c.data.clone()))
            .collect();
        assert_eq!(note.data, "shor");
        assert_eq!(
            tags,
            vec![
                ("CONC".into(), "t".into()),
                ("CONT".into(), "abcd".into()),
                ("CONC".into(), "efgh".into()),
                ("CONC".into(), "ij".into()),
            ]
        );
    }

    #[test]
    fn data_width_accounts_for_level_and_tag() {
        assert_eq!(data_width(0, "NOTE", 248), 248);
        assert_eq!(data_width(12, "NOTE", 248), 247);
        assert_eq!(data_width(1, "_VERYLONGUSERDEFINEDTAG", 248), 229);
        assert_eq!(data_width(0, "NOTE", 60), 60);
    }

    #[test]
    fn chunks_avoid_cutting_next_to_whitespace() {
        let chunks = split_chunks("aaaa bbbb cccc", 6);
        assert_eq!(chunks, vec!["aaaa b", "bbb cc", "cc"]);
        for chunk in &chunks {
            assert_eq!(chunk.trim(), chunk);
        }
    }

    #[test]
    fn chunks_fall_back_to_hard_cuts() {
        assert_eq!(split_chunks("a     b", 2), vec!["a ", "  ", "  ", "b"]);
    }

    proptest! {
        #[test]
        fn newline_split_is_idempotent(data in "[a-z \n]{0,40}") {
            let mut once = Record::new(0, "NOTE").with_data(data);
            once.split_on_embedded_newline();
            let mut twice = once.clone();
            twice.split_on_embedded_newline();
            prop_assert!(!once.data.contains('\n'));
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.children.len(), twice.children.len());
        }

        #[test]
        fn chunks_rejoin_to_the_input(text in "[a-z ]{0,80}", width in 1usize..20) {
            let chunks = split_chunks(&text, width);
            prop_assert_eq!(chunks.concat(), text);
            for chunk in &chunks {
                prop_assert!(chunk.chars().count() <= width);
            }
        }
    }
}
