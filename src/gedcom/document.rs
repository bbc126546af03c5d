//! Document element
//!
//! A [`Document`] is the whole transmission: every top-level record in file order. The
//! group accessors (`individuals`, `families` and so on) filter the record list on each
//! call, so they always reflect the latest `add_record` or `remove_record`.
//!
//! Saving writes the groups in a fixed order: header, submitters, individuals, families,
//! sources, repositories, notes, trailer. A trailer is emitted even when the document
//! holds none.

use crate::gedcom::ast::{
    Family, Header, Individual, MultimediaRecord, NoteRecord, RepositoryRecord, SourceRecord,
    SubmissionRecord, SubmitterRecord,
};
use crate::gedcom::error::Result;
use crate::gedcom::formats::GedcomWriter;
use crate::gedcom::reading::GedcomReader;
use crate::gedcom::record::{Record, RecordList};
use crate::gedcom::tags::{FAM, HEAD, INDI, NOTE, OBJE, REPO, SOUR, SUBM, SUBN, TRLR};
use gedcom_config::{GedcomConfig, ReaderConfig};
use std::fmt;
use std::io::{BufRead, Read, Write};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    records: RecordList,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: RecordList) -> Self {
        Self { records }
    }

    /// Read every record from an unbuffered byte source.
    pub fn load<R: Read>(source: R) -> Result<Self> {
        Self::from_reader(GedcomReader::from_reader(source)?)
    }

    pub fn load_buf<R: BufRead>(source: R) -> Result<Self> {
        Self::from_reader(GedcomReader::new(source)?)
    }

    pub fn load_str(text: &str) -> Result<Self> {
        Self::from_reader(GedcomReader::from_text(text)?)
    }

    pub fn load_with<R: BufRead>(source: R, config: &ReaderConfig) -> Result<Self> {
        Self::from_reader(GedcomReader::with_config(source, config)?)
    }

    fn from_reader<R: BufRead>(mut reader: GedcomReader<R>) -> Result<Self> {
        let records = reader.read_all()?;
        debug!(
            records = records.len(),
            lines = reader.line_number(),
            "loaded GEDCOM document"
        );
        Ok(Self { records })
    }

    /// Write the document with the default writer settings.
    pub fn save<W: Write>(&self, sink: W) -> Result<()> {
        self.write(GedcomWriter::new(sink))
    }

    pub fn save_with<W: Write>(&self, sink: W, config: &GedcomConfig) -> Result<()> {
        self.write(GedcomWriter::with_config(sink, &config.writer)?)
    }

    pub fn save_to_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.save(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn write<W: Write>(&self, mut writer: GedcomWriter<W>) -> Result<()> {
        let synthesized;
        let trailer = match self.trailer() {
            Some(trailer) => trailer,
            None => {
                synthesized = Record::new(0, TRLR);
                &synthesized
            }
        };

        let mut written = 0;
        let groups = self
            .records
            .get_first_by_tag(HEAD)
            .into_iter()
            .chain(self.records.get_all_by_tag(SUBM))
            .chain(self.records.get_all_by_tag(INDI))
            .chain(self.records.get_all_by_tag(FAM))
            .chain(self.records.get_all_by_tag(SOUR))
            .chain(self.records.get_all_by_tag(REPO))
            .chain(self.records.get_all_by_tag(NOTE))
            .chain(std::iter::once(trailer));
        for record in groups {
            writer.write_record(record, true)?;
            written += 1;
        }
        writer.into_inner()?;
        debug!(records = written, "saved GEDCOM document");
        Ok(())
    }

    pub fn records(&self) -> &RecordList {
        &self.records
    }

    pub fn into_records(self) -> RecordList {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add_record(&mut self, record: impl Into<Record>) {
        self.records.add(record.into());
    }

    pub fn add_records(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.extend(records);
    }

    /// Remove the first record equal to `record`; fails when there is none.
    pub fn remove_record(&mut self, record: &Record) -> Result<Record> {
        self.records.remove(record)
    }

    pub fn header(&self) -> Option<Header<&Record>> {
        self.records.get_first_by_tag(HEAD).and_then(Header::view)
    }

    pub fn header_mut(&mut self) -> Option<Header<&mut Record>> {
        self.records.get_first_by_tag_mut(HEAD).and_then(Header::view)
    }

    pub fn trailer(&self) -> Option<&Record> {
        self.records.get_first_by_tag(TRLR)
    }

    pub fn submission(&self) -> Option<SubmissionRecord<&Record>> {
        self.records
            .get_first_by_tag(SUBN)
            .and_then(SubmissionRecord::view)
    }

    pub fn individuals(&self) -> impl Iterator<Item = Individual<&Record>> {
        self.group(INDI, Individual::view)
    }

    pub fn families(&self) -> impl Iterator<Item = Family<&Record>> {
        self.group(FAM, Family::view)
    }

    pub fn multimedia(&self) -> impl Iterator<Item = MultimediaRecord<&Record>> {
        self.group(OBJE, MultimediaRecord::view)
    }

    pub fn notes(&self) -> impl Iterator<Item = NoteRecord<&Record>> {
        self.group(NOTE, NoteRecord::view)
    }

    pub fn repositories(&self) -> impl Iterator<Item = RepositoryRecord<&Record>> {
        self.group(REPO, RepositoryRecord::view)
    }

    pub fn sources(&self) -> impl Iterator<Item = SourceRecord<&Record>> {
        self.group(SOUR, SourceRecord::view)
    }

    pub fn submitters(&self) -> impl Iterator<Item = SubmitterRecord<&Record>> {
        self.group(SUBM, SubmitterRecord::view)
    }

    fn group<'a, V: 'a>(
        &'a self,
        tag: &str,
        view: fn(&'a Record) -> Option<V>,
    ) -> impl Iterator<Item = V> + 'a {
        self.records.get_all_by_tag(tag).into_iter().filter_map(view)
    }

    pub fn select_record(&self, id: &str) -> Option<&Record> {
        self.records.get_by_id(id)
    }

    pub fn select_record_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.records.get_by_id_mut(id)
    }

    pub fn select_individual(&self, id: &str) -> Option<Individual<&Record>> {
        self.select_record(id).and_then(Individual::view)
    }

    pub fn select_family(&self, id: &str) -> Option<Family<&Record>> {
        self.select_record(id).and_then(Family::view)
    }

    /// The first family with exactly this husband and wife.
    pub fn select_family_by_spouses(&self, husband: &str, wife: &str) -> Option<Family<&Record>> {
        self.families()
            .find(|family| family.husband() == husband && family.wife() == wife)
    }

    /// Families where `individual` is either spouse.
    pub fn select_families<'a>(
        &'a self,
        individual: &'a str,
    ) -> impl Iterator<Item = Family<&'a Record>> + 'a {
        self.families()
            .filter(move |family| family.husband() == individual || family.wife() == individual)
    }

    pub fn select_husbands_families<'a>(
        &'a self,
        husband: &'a str,
    ) -> impl Iterator<Item = Family<&'a Record>> + 'a {
        self.families()
            .filter(move |family| family.husband() == husband)
    }

    pub fn select_wifes_families<'a>(
        &'a self,
        wife: &'a str,
    ) -> impl Iterator<Item = Family<&'a Record>> + 'a {
        self.families().filter(move |family| family.wife() == wife)
    }

    /// The first family listing `child` under `CHIL`.
    pub fn select_childs_family(&self, child: &str) -> Option<Family<&Record>> {
        self.families()
            .find(|family| family.children().contains(&child))
    }

    pub fn select_note(&self, id: &str) -> Option<NoteRecord<&Record>> {
        self.select_record(id).and_then(NoteRecord::view)
    }

    pub fn select_source(&self, id: &str) -> Option<SourceRecord<&Record>> {
        self.select_record(id).and_then(SourceRecord::view)
    }

    pub fn select_repository(&self, id: &str) -> Option<RepositoryRecord<&Record>> {
        self.select_record(id).and_then(RepositoryRecord::view)
    }

    pub fn select_submitter(&self, id: &str) -> Option<SubmitterRecord<&Record>> {
        self.select_record(id).and_then(SubmitterRecord::view)
    }

    pub fn select_multimedia(&self, id: &str) -> Option<MultimediaRecord<&Record>> {
        self.select_record(id).and_then(MultimediaRecord::view)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.records, f)
    }
}
