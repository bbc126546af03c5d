//! Ordered, tag-indexed record storage.
//!
//! A [`RecordList`] keeps records in insertion order (the on-disk order) and maintains
//! two derived indexes alongside the backing vector: the positions of every record per
//! tag, and the highest numeric id seen per tag. Every mutating method updates both
//! indexes before returning.

use crate::gedcom::error::{GedcomError, Result};
use crate::gedcom::record::Record;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Default)]
pub struct RecordList {
    records: Vec<Record>,
    by_tag: HashMap<String, Vec<usize>>,
    max_ids: HashMap<String, i32>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Mutable iteration. Ids and tags cannot change through `&mut Record`, so the
    /// indexes stay valid.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn add(&mut self, record: Record) {
        let index = self.records.len();
        self.index_tag(record.tag(), index);
        self.track_id(&record);
        self.records.push(record);
    }

    pub fn insert(&mut self, index: usize, record: Record) -> Result<()> {
        if index > self.records.len() {
            return Err(GedcomError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        for positions in self.by_tag.values_mut() {
            for position in positions.iter_mut().filter(|p| **p >= index) {
                *position += 1;
            }
        }
        self.index_tag(record.tag(), index);
        self.track_id(&record);
        self.records.insert(index, record);
        Ok(())
    }

    /// Remove the first record equal to `record` (see [`Record`]'s equality).
    pub fn remove(&mut self, record: &Record) -> Result<Record> {
        let index = self
            .position(record)
            .ok_or_else(|| GedcomError::RecordNotFound(describe(record)))?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Record> {
        let tag = match self.records.get(index) {
            Some(record) => record.tag().to_string(),
            None => {
                return Err(GedcomError::IndexOutOfRange {
                    index,
                    len: self.records.len(),
                })
            }
        };
        self.unindex_tag(&tag, index)?;
        for positions in self.by_tag.values_mut() {
            for position in positions.iter_mut().filter(|p| **p > index) {
                *position -= 1;
            }
        }
        Ok(self.records.remove(index))
    }

    /// Put `record` at `index`, returning the record it displaced.
    pub fn replace(&mut self, index: usize, record: Record) -> Result<Record> {
        let old_tag = match self.records.get(index) {
            Some(old) => old.tag().to_string(),
            None => {
                return Err(GedcomError::IndexOutOfRange {
                    index,
                    len: self.records.len(),
                })
            }
        };
        self.unindex_tag(&old_tag, index)?;
        self.index_tag(record.tag(), index);
        self.track_id(&record);
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    /// Put `record` in place of the first record with the same tag, or append it when
    /// there is none. Returns the displaced record.
    pub fn replace_or_add(&mut self, record: Record) -> Option<Record> {
        match self.position_of_tag(record.tag()) {
            Some(index) => {
                self.track_id(&record);
                Some(std::mem::replace(&mut self.records[index], record))
            }
            None => {
                self.add(record);
                None
            }
        }
    }

    /// Drop every record. Recorded max ids are kept.
    pub fn clear(&mut self) {
        self.records.clear();
        self.by_tag.clear();
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.position(record).is_some()
    }

    pub fn position(&self, record: &Record) -> Option<usize> {
        self.records.iter().position(|r| r == record)
    }

    pub fn position_of_tag(&self, tag: &str) -> Option<usize> {
        self.by_tag.get(tag).and_then(|positions| positions.first().copied())
    }

    pub fn index_of_id(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Record> {
        self.index_of_id(id).map(|index| &self.records[index])
    }

    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.index_of_id(id).map(move |index| &mut self.records[index])
    }

    pub fn get_first_by_tag(&self, tag: &str) -> Option<&Record> {
        self.position_of_tag(tag).map(|index| &self.records[index])
    }

    pub fn get_first_by_tag_mut(&mut self, tag: &str) -> Option<&mut Record> {
        self.position_of_tag(tag)
            .map(move |index| &mut self.records[index])
    }

    pub fn get_all_by_tag(&self, tag: &str) -> Vec<&Record> {
        self.by_tag
            .get(tag)
            .map(|positions| positions.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Every record whose tag occurs inside `tags`, a comma separated list such as
    /// `"FAMC, FAMS"`.
    ///
    /// Membership is substring containment over the whole list, not a token match: a
    /// tag that is a fragment of a listed tag (e.g. `AM` in `"FAMC, FAMS"`) matches too.
    /// Records with an empty tag never match.
    pub fn get_all_by_tags(&self, tags: &str) -> Vec<&Record> {
        let tags = tags.trim();
        self.records
            .iter()
            .filter(|r| {
                let tag = r.tag().trim();
                !tag.is_empty() && tags.contains(tag)
            })
            .collect()
    }

    pub fn get_record_data(&self, tag: &str) -> &str {
        self.get_first_by_tag(tag).map(|r| r.data.as_str()).unwrap_or("")
    }

    pub fn get_xref_id(&self, tag: &str) -> &str {
        self.get_first_by_tag(tag)
            .map(|r| r.xref_id.as_str())
            .unwrap_or("")
    }

    pub fn get_xref_ids(&self, tag: &str) -> Vec<&str> {
        self.get_all_by_tag(tag)
            .into_iter()
            .map(|r| r.xref_id.as_str())
            .collect()
    }

    /// Highest numeric id recorded for `tag`, if any record of that tag carried one.
    pub fn max_id(&self, tag: &str) -> Option<i32> {
        self.max_ids.get(tag).copied()
    }

    /// Next free numeric id for `tag`: one past the highest seen, or 1.
    pub fn get_next_id(&self, tag: &str) -> i32 {
        self.max_id(tag).map_or(1, |max| max + 1)
    }

    fn index_tag(&mut self, tag: &str, index: usize) {
        let positions = self.by_tag.entry(tag.to_string()).or_default();
        let at = positions.partition_point(|&p| p < index);
        positions.insert(at, index);
    }

    fn unindex_tag(&mut self, tag: &str, index: usize) -> Result<()> {
        let positions = self
            .by_tag
            .get_mut(tag)
            .ok_or_else(|| GedcomError::IndexCorrupted(tag.to_string()))?;
        let at = positions
            .binary_search(&index)
            .map_err(|_| GedcomError::IndexCorrupted(tag.to_string()))?;
        positions.remove(at);
        if positions.is_empty() {
            self.by_tag.remove(tag);
        }
        Ok(())
    }

    fn track_id(&mut self, record: &Record) {
        if record.id().is_empty() {
            return;
        }
        let id = record.numeric_id();
        if id < 0 {
            return;
        }
        let max = self.max_ids.entry(record.tag().to_string()).or_insert(id);
        if id > *max {
            *max = id;
        }
    }
}

fn describe(record: &Record) -> String {
    if record.id().is_empty() {
        format!("{} at level {}", record.tag(), record.level)
    } else {
        format!("{} {}", record.id(), record.tag())
    }
}

impl Index<usize> for RecordList {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl IndexMut<usize> for RecordList {
    fn index_mut(&mut self, index: usize) -> &mut Record {
        &mut self.records[index]
    }
}

impl Extend<Record> for RecordList {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}

impl FromIterator<Record> for RecordList {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut list = RecordList::new();
        list.extend(iter);
        list
    }
}

impl IntoIterator for RecordList {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.records).into_iter()
    }
}

/// Subtrees are torn down through a work list instead of nested drops, so freeing a
/// deeply nested tree needs no stack beyond this frame.
impl Drop for RecordList {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.records);
        while let Some(mut record) = pending.pop() {
            pending.append(&mut record.children.records);
        }
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a mut RecordList {
    type Item = &'a mut Record;
    type IntoIter = std::slice::IterMut<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter_mut()
    }
}

/// Lists compare by their records, in order.
impl PartialEq for RecordList {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Serialize for RecordList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

impl fmt::Display for RecordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn individual(n: i32) -> Record {
        Record::new(0, "INDI").with_id(format!("@I{n}@"))
    }

    fn family(n: i32) -> Record {
        Record::new(0, "FAM").with_id(format!("@F{n}@"))
    }

    fn sample() -> RecordList {
        [
            Record::new(0, "HEAD"),
            individual(1),
            family(1),
            individual(2),
            Record::new(0, "TRLR"),
        ]
        .into_iter()
        .collect()
    }

    fn assert_index_consistent(list: &RecordList) {
        for (index, record) in list.iter().enumerate() {
            let positions = &list.by_tag[record.tag()];
            assert!(positions.contains(&index), "{index} missing from {}", record.tag());
        }
        let indexed: usize = list.by_tag.values().map(Vec::len).sum();
        assert_eq!(indexed, list.len());
        assert!(list.by_tag.values().all(|p| !p.is_empty()));
    }

    #[test]
    fn slice_follows_insertion_order() {
        let list = sample();
        let tags: Vec<_> = list.as_slice().iter().map(Record::tag).collect();
        assert_eq!(tags, vec!["HEAD", "INDI", "FAM", "INDI", "TRLR"]);
    }

    #[test]
    fn replace_or_add_swaps_the_first_match() {
        let mut list = sample();
        let displaced = list.replace_or_add(individual(7));
        assert_eq!(displaced.map(|r| r.id().to_string()), Some("@I1@".into()));
        assert_eq!(list.len(), 5);
        assert_eq!(list[1].id(), "@I7@");
        assert_eq!(list.get_next_id("INDI"), 8);
        assert_index_consistent(&list);

        assert!(list.replace_or_add(Record::new(0, "SUBM")).is_none());
        assert_eq!(list.len(), 6);
        assert_eq!(list.get_first_by_tag("SUBM").map(|r| r.level), Some(0));
        assert_index_consistent(&list);
    }

    #[test]
    fn deep_trees_drop_without_recursion() {
        let depth = 200_000;
        let mut record = Record::new(depth - 1, "NOTE");
        for level in (0..depth - 1).rev() {
            record = Record::new(level, "NOTE").with_child(record);
        }
        let list: RecordList = std::iter::once(record).collect();
        assert_eq!(list.len(), 1);
        drop(list);
    }

    #[test]
    fn next_id_starts_at_one() {
        let list = RecordList::new();
        assert_eq!(list.get_next_id("INDI"), 1);
    }

    #[test]
    fn next_id_follows_the_highest_seen() {
        let mut list = RecordList::new();
        list.add(individual(1));
        list.add(individual(3));
        list.add(individual(2));
        assert_eq!(list.get_next_id("INDI"), 4);
        assert_eq!(list.get_next_id("FAM"), 1);
    }

    #[test]
    fn max_id_survives_removal() {
        let mut list = RecordList::new();
        list.add(individual(7));
        list.remove(&individual(7)).expect("record present");
        assert_eq!(list.get_next_id("INDI"), 8);
    }

    #[test]
    fn unparseable_ids_do_not_move_the_allocator() {
        let mut list = RecordList::new();
        list.add(Record::new(0, "SUBM").with_id("@SUBM@"));
        assert_eq!(list.max_id("SUBM"), None);
        assert_eq!(list.get_next_id("SUBM"), 1);
    }

    #[test]
    fn lookups_by_tag_keep_file_order() {
        let list = sample();
        let ids: Vec<_> = list.get_all_by_tag("INDI").iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["@I1@", "@I2@"]);
        assert_eq!(list.get_first_by_tag("FAM").map(Record::id), Some("@F1@"));
        assert!(list.get_first_by_tag("SOUR").is_none());
        assert!(list.get_all_by_tag("SOUR").is_empty());
    }

    #[test]
    fn lookups_by_id() {
        let list = sample();
        assert_eq!(list.get_by_id("@F1@").map(Record::tag), Some("FAM"));
        assert_eq!(list.index_of_id("@I2@"), Some(3));
        assert!(list.get_by_id("@I99@").is_none());
    }

    #[test]
    fn insert_shifts_indexed_positions() {
        let mut list = sample();
        list.insert(1, individual(9)).expect("in range");
        let ids: Vec<_> = list.get_all_by_tag("INDI").iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["@I9@", "@I1@", "@I2@"]);
        assert_eq!(list.get_first_by_tag("FAM").map(Record::id), Some("@F1@"));
        assert_index_consistent(&list);
    }

    #[test]
    fn insert_past_the_end_is_rejected() {
        let mut list = sample();
        let err = list.insert(9, individual(9)).unwrap_err();
        assert!(matches!(err, GedcomError::IndexOutOfRange { index: 9, len: 5 }));
    }

    #[test]
    fn remove_drops_empty_buckets() {
        let mut list = sample();
        let removed = list.remove(&family(1)).expect("family present");
        assert_eq!(removed.id(), "@F1@");
        assert!(!list.by_tag.contains_key("FAM"));
        assert_eq!(list.get_first_by_tag("INDI").map(Record::id), Some("@I1@"));
        assert_eq!(list.get_all_by_tag("INDI")[1].id(), "@I2@");
        assert_index_consistent(&list);
    }

    #[test]
    fn removing_an_absent_record_is_not_found() {
        let mut list = sample();
        let err = list.remove(&individual(5)).unwrap_err();
        assert!(matches!(err, GedcomError::RecordNotFound(_)));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn remove_at_reports_corrupted_index() {
        let mut list = sample();
        list.by_tag.remove("FAM");
        let err = list.remove_at(2).unwrap_err();
        assert!(matches!(err, GedcomError::IndexCorrupted(tag) if tag == "FAM"));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn replace_moves_the_record_between_buckets() {
        let mut list = sample();
        let old = list.replace(2, individual(4)).expect("in range");
        assert_eq!(old.tag(), "FAM");
        assert!(list.get_first_by_tag("FAM").is_none());
        assert_eq!(list.get_all_by_tag("INDI").len(), 3);
        assert_eq!(list.get_next_id("INDI"), 5);
        assert_index_consistent(&list);
    }

    #[test]
    fn data_and_xref_conveniences() {
        let mut list = RecordList::new();
        list.add(Record::new(1, "NAME").with_data("John /Smith/"));
        list.add(Record::new(1, "FAMS").with_xref("@F1@"));
        list.add(Record::new(1, "FAMS").with_xref("@F2@"));
        assert_eq!(list.get_record_data("NAME"), "John /Smith/");
        assert_eq!(list.get_record_data("SEX"), "");
        assert_eq!(list.get_xref_id("FAMS"), "@F1@");
        assert_eq!(list.get_xref_ids("FAMS"), vec!["@F1@", "@F2@"]);
        assert_eq!(list.get_xref_id("FAMC"), "");
    }

    #[test]
    fn tag_groups_match_by_containment() {
        let mut list = RecordList::new();
        list.add(Record::new(1, "FAMC").with_xref("@F1@"));
        list.add(Record::new(1, "NAME"));
        list.add(Record::new(1, "FAMS").with_xref("@F2@"));
        list.add(Record::new(1, "AM"));
        list.add(Record::new(1, ""));
        let tags: Vec<_> = list
            .get_all_by_tags("FAMC, FAMS")
            .iter()
            .map(|r| r.tag())
            .collect();
        assert_eq!(tags, vec!["FAMC", "FAMS", "AM"]);
    }

    #[test]
    fn display_writes_one_record_per_line() {
        let list: RecordList = [Record::new(0, "HEAD"), Record::new(0, "TRLR")]
            .into_iter()
            .collect();
        assert_eq!(
            list.to_string(),
            "Level:0 Id: Tag:HEAD XRefId: Data:\nLevel:0 Id: Tag:TRLR XRefId: Data:\n"
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, i32),
        Insert(usize, u8, i32),
        RemoveAt(usize),
        Replace(usize, u8, i32),
    }

    fn tag_for(n: u8) -> &'static str {
        ["INDI", "FAM", "NOTE", "SOUR"][n as usize % 4]
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<u8>(), 0..50i32).prop_map(|(t, id)| Op::Add(t, id)),
            (0..20usize, any::<u8>(), 0..50i32).prop_map(|(i, t, id)| Op::Insert(i, t, id)),
            (0..20usize).prop_map(Op::RemoveAt),
            (0..20usize, any::<u8>(), 0..50i32).prop_map(|(i, t, id)| Op::Replace(i, t, id)),
        ]
    }

    proptest! {
        #[test]
        fn indexes_track_every_mutation(ops in prop::collection::vec(op(), 0..40)) {
            let mut list = RecordList::new();
            for op in ops {
                let record = |t: u8, id: i32| Record::new(0, tag_for(t)).with_id(format!("@X{id}@"));
                let _ = match op {
                    Op::Add(t, id) => { list.add(record(t, id)); Ok(()) }
                    Op::Insert(i, t, id) => list.insert(i, record(t, id)),
                    Op::RemoveAt(i) => list.remove_at(i).map(|_| ()),
                    Op::Replace(i, t, id) => list.replace(i, record(t, id)).map(|_| ()),
                };
                assert_index_consistent(&list);
                for tag in ["INDI", "FAM", "NOTE", "SOUR"] {
                    let expected: Vec<_> = list.iter().filter(|r| r.tag() == tag).collect();
                    prop_assert_eq!(list.get_all_by_tag(tag), expected);
                }
            }
        }
    }
}
