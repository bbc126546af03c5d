//! Streaming record tree reader
//!
//!     [`GedcomReader`] turns a line stream into top-level record trees. It holds exactly
//!     one parsed line of lookahead: reading a record takes the buffered line, then keeps
//!     consuming while the buffered line sits one level deeper. `CONC` lines are appended
//!     to the data directly, `CONT` lines after a newline, and anything else opens a child
//!     that collects its own subtree the same way. A line at any other level closes open
//!     records until one accepts it; if none does, it stays buffered for the caller.
//!
//!     Every finished record passes through the [factory](crate::gedcom::building::factory)
//!     so it comes back with its typed view attached.
//!
//! Bad input
//!
//!     A line that does not parse, blank lines included, becomes a cleared record (level 0,
//!     empty tag) and still takes its turn in the lookahead, so it ends whatever record was
//!     open. Because its tag is empty it never matches a tag-filtered read, so it is
//!     skipped in practice.
//!     Only I/O errors from the underlying source are returned as errors.

use crate::gedcom::ast::{
    Family, Header, Individual, MultimediaRecord, NoteRecord, RepositoryRecord, SourceRecord,
    SubmissionRecord, SubmitterRecord,
};
use crate::gedcom::building::promote;
use crate::gedcom::error::Result;
use crate::gedcom::lexing::parse_line;
use crate::gedcom::record::{Record, RecordList};
use crate::gedcom::tags::{self, ANY, CONC, CONT};
use gedcom_config::ReaderConfig;
use std::io::{BufRead, BufReader, Read};
use tracing::{debug, trace};

const BYTE_ORDER_MARK: char = '\u{feff}';

pub struct GedcomReader<R> {
    source: R,
    next: Option<Record>,
    line_number: usize,
    strip_byte_order_mark: bool,
    buffer: Vec<u8>,
}

impl<R: Read> GedcomReader<BufReader<R>> {
    /// Read from an unbuffered byte source.
    pub fn from_reader(source: R) -> Result<Self> {
        Self::new(BufReader::new(source))
    }
}

impl<'a> GedcomReader<&'a [u8]> {
    /// Read from text held in memory.
    pub fn from_text(text: &'a str) -> Result<Self> {
        Self::new(text.as_bytes())
    }
}

impl<R: BufRead> GedcomReader<R> {
    /// Wrap `source` and prime the lookahead with its first line.
    pub fn new(source: R) -> Result<Self> {
        Self::with_config(source, &ReaderConfig::default())
    }

    pub fn with_config(source: R, config: &ReaderConfig) -> Result<Self> {
        let mut reader = Self {
            source,
            next: None,
            line_number: 0,
            strip_byte_order_mark: config.strip_byte_order_mark,
            buffer: Vec::new(),
        };
        reader.advance()?;
        Ok(reader)
    }

    /// Release the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// The buffered line the next read will start from.
    pub fn peek(&self) -> Option<&Record> {
        self.next.as_ref()
    }

    /// True while there is at least one more line to read.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Number of raw lines consumed so far, including the buffered one.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.source.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let mut line = String::from_utf8_lossy(&self.buffer).into_owned();
        if self.line_number == 1 && self.strip_byte_order_mark {
            if let Some(rest) = line.strip_prefix(BYTE_ORDER_MARK) {
                line = rest.to_string();
            }
        }
        Ok(Some(line))
    }

    /// Refill the lookahead with the next line, or a cleared record if it does not parse.
    fn advance(&mut self) -> Result<()> {
        let line_number = self.line_number + 1;
        self.next = self.read_line()?.map(|line| {
            parse_line(&line).unwrap_or_else(|err| {
                debug!(line = line_number, error = %err, "clearing unparsable GEDCOM line");
                Record::default()
            })
        });
        Ok(())
    }

    /// Read the next record together with its whole subtree.
    ///
    /// Returns `Ok(None)` at the end of the stream. Open records are kept on an explicit
    /// stack, so nesting depth is bounded by memory only.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let Some(root) = self.next.take() else {
            return Ok(None);
        };
        self.advance()?;

        let mut open = vec![root];
        while let Some(next) = self.next.take() {
            while open.len() > 1 && !continues(&open, &next) {
                close_innermost(&mut open);
            }
            let Some(current) = open.last_mut() else {
                self.next = Some(next);
                break;
            };
            if next.level != current.level + 1 {
                self.next = Some(next);
                break;
            }
            match next.tag() {
                CONC => current.append_data(&next.data),
                CONT => {
                    current.append_data("\n");
                    current.append_data(&next.data);
                }
                _ => open.push(next),
            }
            self.advance()?;
        }
        while open.len() > 1 {
            close_innermost(&mut open);
        }

        let Some(record) = open.pop() else {
            return Ok(None);
        };
        if record.level == 0 {
            trace!(tag = record.tag(), id = record.id(), children = record.children.len(), "read record");
        }
        Ok(Some(promote(record)))
    }

    /// Read records until one tagged `tag` (or any, for `ANY`) turns up.
    pub fn read_record_tagged(&mut self, tag: &str) -> Result<Option<Record>> {
        while let Some(record) = self.read_record()? {
            if matches_tag(&record, tag) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Drain the stream, keeping every record tagged `tag` (or every record, for `ANY`).
    pub fn read_records(&mut self, tag: &str) -> Result<RecordList> {
        let mut records = RecordList::new();
        while let Some(record) = self.read_record()? {
            if matches_tag(&record, tag) {
                records.add(record);
            }
        }
        Ok(records)
    }

    /// Drain the stream into a list of every record read.
    pub fn read_all(&mut self) -> Result<RecordList> {
        self.read_records(ANY)
    }

    /// Read past whole records until the buffered line is `tag` at `level`.
    ///
    /// Records passed over are consumed and lost. Returns whether the reader is now
    /// positioned on a matching line.
    pub fn move_to(&mut self, tag: &str, level: usize) -> Result<bool> {
        while self
            .next
            .as_ref()
            .is_some_and(|next| next.level >= level && next.tag() != tag)
        {
            self.read_record()?;
        }
        Ok(self
            .next
            .as_ref()
            .is_some_and(|next| next.tag() == tag && next.level == level))
    }

    pub fn move_to_header(&mut self) -> Result<bool> {
        self.move_to(tags::HEAD, 0)
    }

    pub fn move_to_individual(&mut self) -> Result<bool> {
        self.move_to(tags::INDI, 0)
    }

    pub fn move_to_family(&mut self) -> Result<bool> {
        self.move_to(tags::FAM, 0)
    }

    pub fn move_to_multimedia(&mut self) -> Result<bool> {
        self.move_to(tags::OBJE, 0)
    }

    pub fn move_to_note(&mut self) -> Result<bool> {
        self.move_to(tags::NOTE, 0)
    }

    pub fn move_to_repository(&mut self) -> Result<bool> {
        self.move_to(tags::REPO, 0)
    }

    pub fn move_to_source(&mut self) -> Result<bool> {
        self.move_to(tags::SOUR, 0)
    }

    pub fn move_to_submitter(&mut self) -> Result<bool> {
        self.move_to(tags::SUBM, 0)
    }

    pub fn move_to_submission(&mut self) -> Result<bool> {
        self.move_to(tags::SUBN, 0)
    }

    pub fn read_header(&mut self) -> Result<Option<Header>> {
        Ok(self.read_record_tagged(tags::HEAD)?.and_then(Header::view))
    }

    pub fn read_individual(&mut self) -> Result<Option<Individual>> {
        Ok(self.read_record_tagged(tags::INDI)?.and_then(Individual::view))
    }

    pub fn read_family(&mut self) -> Result<Option<Family>> {
        Ok(self.read_record_tagged(tags::FAM)?.and_then(Family::view))
    }

    pub fn read_multimedia(&mut self) -> Result<Option<MultimediaRecord>> {
        Ok(self
            .read_record_tagged(tags::OBJE)?
            .and_then(MultimediaRecord::view))
    }

    pub fn read_note(&mut self) -> Result<Option<NoteRecord>> {
        Ok(self.read_record_tagged(tags::NOTE)?.and_then(NoteRecord::view))
    }

    pub fn read_repository(&mut self) -> Result<Option<RepositoryRecord>> {
        Ok(self
            .read_record_tagged(tags::REPO)?
            .and_then(RepositoryRecord::view))
    }

    pub fn read_source(&mut self) -> Result<Option<SourceRecord>> {
        Ok(self.read_record_tagged(tags::SOUR)?.and_then(SourceRecord::view))
    }

    pub fn read_submitter(&mut self) -> Result<Option<SubmitterRecord>> {
        Ok(self
            .read_record_tagged(tags::SUBM)?
            .and_then(SubmitterRecord::view))
    }

    pub fn read_submission(&mut self) -> Result<Option<SubmissionRecord>> {
        Ok(self
            .read_record_tagged(tags::SUBN)?
            .and_then(SubmissionRecord::view))
    }

    pub fn read_individuals(&mut self) -> Result<RecordList> {
        self.read_records(tags::INDI)
    }

    pub fn read_families(&mut self) -> Result<RecordList> {
        self.read_records(tags::FAM)
    }

    pub fn read_multimedia_objects(&mut self) -> Result<RecordList> {
        self.read_records(tags::OBJE)
    }

    pub fn read_notes(&mut self) -> Result<RecordList> {
        self.read_records(tags::NOTE)
    }

    pub fn read_repositories(&mut self) -> Result<RecordList> {
        self.read_records(tags::REPO)
    }

    pub fn read_sources(&mut self) -> Result<RecordList> {
        self.read_records(tags::SOUR)
    }

    pub fn read_submitters(&mut self) -> Result<RecordList> {
        self.read_records(tags::SUBM)
    }
}

/// Whether `line` belongs directly under the innermost open record.
fn continues(open: &[Record], line: &Record) -> bool {
    open.last()
        .is_some_and(|current| line.level == current.level + 1)
}

/// Finish the innermost open record and attach it to its parent.
fn close_innermost(open: &mut Vec<Record>) {
    if let Some(child) = open.pop() {
        if let Some(parent) = open.last_mut() {
            parent.children.add(promote(child));
        }
    }
}

/// `ANY` matches every parsed record; cleared records match nothing.
fn matches_tag(record: &Record, tag: &str) -> bool {
    if record.tag().is_empty() {
        return false;
    }
    tag == ANY || record.tag() == tag
}

/// Yields top-level records until the stream ends.
impl<R: BufRead> Iterator for GedcomReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::record::RecordKind;
    use crate::gedcom::testing::assert_record;

    fn reader(text: &str) -> GedcomReader<&[u8]> {
        GedcomReader::from_text(text).expect("in-memory reads do not fail")
    }

    #[test]
    fn lookahead_ends_the_subtree() {
        let mut reader = reader("0 HEAD\n1 SOUR X\n1 DATE Y\n0 TRLR\n");
        let head = reader.read_record().unwrap().expect("header");
        assert_record(&head)
            .tag("HEAD")
            .child_count(2)
            .child(0, |c| {
                c.tag("SOUR").data("X");
            })
            .child(1, |c| {
                c.tag("DATE").data("Y");
            });
        let trailer = reader.read_record().unwrap().expect("trailer");
        assert_record(&trailer).tag("TRLR").child_count(0);
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn conc_joins_and_cont_breaks() {
        let mut reader = reader("0 NOTE A\n1 CONC B\n1 CONT C\n");
        let note = reader.read_record().unwrap().expect("note");
        assert_record(&note).data("AB\nC").child_count(0);
    }

    #[test]
    fn nested_children_keep_file_order() {
        let text = "0 @I1@ INDI\n1 NAME John /Smith/\n2 GIVN John\n2 SURN Smith\n1 BIRT\n2 DATE 1 JAN 1900\n2 PLAC Boston\n1 SEX M\n0 TRLR\n";
        let mut reader = reader(text);
        let individual = reader.read_record().unwrap().expect("individual");
        assert_record(&individual)
            .id("@I1@")
            .kind(RecordKind::Individual)
            .child_count(3)
            .child(0, |name| {
                name.tag("NAME").kind(RecordKind::Name).child_count(2);
            })
            .child(1, |birth| {
                birth.tag("BIRT").child_count(2).child(1, |place| {
                    place.tag("PLAC").level(2).data("Boston").kind(RecordKind::Place);
                });
            })
            .child(2, |sex| {
                sex.tag("SEX").data("M");
            });
    }

    #[test]
    fn level_jumps_end_the_record() {
        let mut reader = reader("0 @I1@ INDI\n2 DATE stray\n1 NAME Ann\n0 TRLR\n");
        let individual = reader.read_record().unwrap().expect("individual");
        assert_eq!(individual.children.len(), 0);
        let stray = reader.read_record().unwrap().expect("stray line");
        assert_record(&stray).level(2).tag("DATE");
        let name = reader.read_record().unwrap().expect("orphan name");
        assert_record(&name).level(1).tag("NAME");
    }

    #[test]
    fn blank_lines_end_the_open_subtree() {
        let mut reader = reader("0 @I1@ INDI\n1 NAME x\n\n2 GIVN y\n   \n0 TRLR\n");
        let individual = reader.read_record().unwrap().expect("individual");
        assert_record(&individual).child_count(1).child(0, |name| {
            name.tag("NAME").child_count(0);
        });
        assert!(reader.read_record().unwrap().expect("blank line").is_cleared());
        let given = reader.read_record().unwrap().expect("detached given name");
        assert_record(&given).level(2).tag("GIVN").data("y");
        assert!(reader.read_record().unwrap().expect("whitespace line").is_cleared());
        assert_eq!(reader.read_record().unwrap().map(|r| r.tag().to_string()), Some("TRLR".into()));
    }

    #[test]
    fn deep_nesting_reads_without_recursion() {
        let depth = 100_000;
        let text: String = (0..depth).map(|level| format!("{level} NOTE\n")).collect();
        let records = reader(&text).read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), RecordKind::Note);

        let mut node = &records[0];
        let mut levels = 1;
        while let Some(child) = node.children.get(0) {
            assert_eq!(child.level, node.level + 1);
            node = child;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(node.kind(), RecordKind::NoteLink);
    }

    #[test]
    fn closing_several_levels_at_once() {
        let text = "0 @I1@ INDI\n1 BIRT\n2 PLAC Boston\n3 FORM City\n1 SEX F\n0 TRLR\n";
        let individual = reader(text).read_record().unwrap().expect("individual");
        assert_record(&individual)
            .child_count(2)
            .child(0, |birth| {
                birth.tag("BIRT").child(0, |place| {
                    place.tag("PLAC").child_count(1);
                });
            })
            .child(1, |sex| {
                sex.tag("SEX").level(1).data("F");
            });
    }

    #[test]
    fn malformed_lines_become_cleared_records() {
        let mut reader = reader("0 HEAD\ngarbage\n0 TRLR\n");
        let head = reader.read_record().unwrap().expect("header");
        assert!(head.children.is_empty());
        let cleared = reader.read_record().unwrap().expect("cleared record");
        assert!(cleared.is_cleared());
        assert_record(&cleared).tag("").kind(RecordKind::Generic);
        let trailer = reader.read_record().unwrap().expect("trailer");
        assert_eq!(trailer.tag(), "TRLR");
    }

    #[test]
    fn tag_filtered_reads_skip_cleared_records() {
        let mut reader = reader("0 HEAD\n@@@\n0 @I1@ INDI\n0 TRLR\n");
        let all = reader.read_all().unwrap();
        let tags: Vec<_> = all.iter().map(Record::tag).collect();
        assert_eq!(tags, vec!["HEAD", "INDI", "TRLR"]);
    }

    #[test]
    fn crlf_and_byte_order_mark() {
        let mut reader = reader("\u{feff}0 HEAD\r\n1 CHAR UTF-8\r\n0 TRLR\r\n");
        let head = reader.read_record().unwrap().expect("header");
        assert_record(&head).tag("HEAD").child(0, |c| {
            c.data("UTF-8");
        });
    }

    #[test]
    fn byte_order_mark_can_be_kept() {
        let config = ReaderConfig {
            strip_byte_order_mark: false,
        };
        let mut reader =
            GedcomReader::with_config("\u{feff}0 HEAD\n".as_bytes(), &config).unwrap();
        let first = reader.read_record().unwrap().expect("a record");
        assert!(first.is_cleared());
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let bytes: &[u8] = b"0 @N1@ NOTE\n1 CONT caf\xe9\n";
        let mut reader = GedcomReader::new(bytes).unwrap();
        let note = reader.read_record().unwrap().expect("note");
        assert_eq!(note.data, "\ncaf\u{fffd}");
    }

    #[test]
    fn read_record_tagged_passes_over_other_records() {
        let mut reader = reader("0 HEAD\n0 @I1@ INDI\n0 @F1@ FAM\n1 HUSB @I1@\n0 TRLR\n");
        let family = reader.read_family().unwrap().expect("family");
        assert_eq!(family.husband(), "@I1@");
        assert!(reader.read_family().unwrap().is_none());
        assert!(!reader.has_next());
    }

    #[test]
    fn read_records_collects_by_tag() {
        let text = "0 HEAD\n0 @I1@ INDI\n0 @F1@ FAM\n0 @I2@ INDI\n0 TRLR\n";
        let individuals = reader(text).read_individuals().unwrap();
        assert_eq!(individuals.len(), 2);
        assert_eq!(individuals.get_next_id("INDI"), 3);
        assert_eq!(reader(text).read_all().unwrap().len(), 5);
    }

    #[test]
    fn move_to_consumes_whole_records() {
        let text = "0 HEAD\n1 SOUR X\n0 @I1@ INDI\n1 NAME A /B/\n0 @F1@ FAM\n0 TRLR\n";
        let mut reader = reader(text);
        assert!(reader.move_to_family().unwrap());
        assert_eq!(reader.peek().map(Record::tag), Some("FAM"));
        assert!(reader.move_to_family().unwrap());
        let family = reader.read_record().unwrap().expect("family");
        assert_eq!(family.id(), "@F1@");
        assert!(!reader.move_to_individual().unwrap());
        assert!(!reader.has_next());
    }

    #[test]
    fn typed_reads_return_views() {
        let text = "0 HEAD\n1 GEDC\n2 VERS 5.5\n0 @I1@ INDI\n1 NAME John /Smith/\n0 TRLR\n";
        let mut reader = reader(text);
        let header = reader.read_header().unwrap().expect("header");
        assert_eq!(header.gedcom_version(), "5.5");
        let individual = reader.read_individual().unwrap().expect("individual");
        assert_eq!(individual.name().map(|n| n.last_name().to_string()), Some("Smith".into()));
    }

    #[test]
    fn iterates_top_level_records() {
        let tags: Vec<String> = reader("0 HEAD\n1 CHAR ASCII\n0 TRLR\n")
            .map(|r| r.map(|r| r.tag().to_string()))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(tags, vec!["HEAD", "TRLR"]);
    }

    #[test]
    fn empty_input_has_nothing_to_read() {
        let mut reader = reader("");
        assert!(!reader.has_next());
        assert!(reader.read_record().unwrap().is_none());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn into_inner_returns_the_rest_of_the_source() {
        let reader = reader("0 HEAD\n0 TRLR\n");
        let rest = reader.into_inner();
        assert_eq!(rest, b"0 TRLR\n");
    }
}
