//! Top-level (level 0) record views.

use super::annotations::RecordMetadata;
use super::structures::{
    Address, Association, EventOrFact, FamilyLink, HeaderSource, Name, NoteLink, SourceEvent,
    SourceRepositoryLink,
};
use crate::gedcom::building::classification::{
    FAMILY_EVENT_TAGS, INDIVIDUAL_ATTRIBUTE_TAGS, INDIVIDUAL_EVENT_TAGS,
};
use crate::gedcom::lexing::create_id;
use crate::gedcom::record::{Record, RecordKind};
use crate::gedcom::tags::*;
use serde::Serialize;
use std::borrow::{Borrow, BorrowMut};

typed_view! {
    /// `HEAD`: information about the transmission as a whole.
    Header => RecordKind::Header
}

impl Header {
    pub fn new() -> Self {
        Self(Record::new(0, HEAD).with_kind(RecordKind::Header))
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Borrow<Record>> Header<R> {
    pub fn character_set(&self) -> &str {
        self.record().child_data(CHAR)
    }

    pub fn character_set_version(&self) -> &str {
        self.record().grandchild_data(CHAR, VERS)
    }

    pub fn copyright(&self) -> &str {
        self.record().child_data(COPR)
    }

    pub fn destination(&self) -> &str {
        self.record().child_data(DEST)
    }

    pub fn file_name(&self) -> &str {
        self.record().child_data(FILE)
    }

    pub fn gedcom_form(&self) -> &str {
        self.record().grandchild_data(GEDC, FORM)
    }

    pub fn gedcom_version(&self) -> &str {
        self.record().grandchild_data(GEDC, VERS)
    }

    pub fn language(&self) -> &str {
        self.record().child_data(LANG)
    }

    pub fn place_hierarchy(&self) -> &str {
        self.record().grandchild_data(PLAC, FORM)
    }

    /// The producing system's description of itself.
    pub fn source(&self) -> Option<HeaderSource<&Record>> {
        self.record().child(SOUR).and_then(HeaderSource::view)
    }

    /// Cross-reference to the `SUBN` record.
    pub fn submission(&self) -> &str {
        self.record().child_xref(SUBN)
    }

    /// Cross-reference to the `SUBM` record.
    pub fn submitter(&self) -> &str {
        self.record().child_xref(SUBM)
    }

    pub fn transmission_date(&self) -> &str {
        self.record().child_data(DATE)
    }

    pub fn transmission_time(&self) -> &str {
        self.record().grandchild_data(DATE, TIME)
    }
}

impl<R: BorrowMut<Record>> Header<R> {
    pub fn set_character_set(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(CHAR, value);
    }

    pub fn set_character_set_version(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(CHAR, VERS, value);
    }

    pub fn set_copyright(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(COPR, value);
    }

    pub fn set_destination(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(DEST, value);
    }

    pub fn set_file_name(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(FILE, value);
    }

    pub fn set_gedcom_form(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(GEDC, FORM, value);
    }

    pub fn set_gedcom_version(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(GEDC, VERS, value);
    }

    pub fn set_language(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(LANG, value);
    }

    pub fn set_place_hierarchy(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(PLAC, FORM, value);
    }

    /// Replace the header's source description, or add one.
    pub fn set_source(&mut self, source: HeaderSource) {
        self.record_mut().children.replace_or_add(source.into());
    }

    pub fn set_submission(&mut self, xref_id: impl Into<String>) {
        self.record_mut().set_child_xref(SUBN, xref_id);
    }

    pub fn set_submitter(&mut self, xref_id: impl Into<String>) {
        self.record_mut().set_child_xref(SUBM, xref_id);
    }

    pub fn set_transmission_date(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(DATE, value);
    }

    pub fn set_transmission_time(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(DATE, TIME, value);
    }
}

/// An individual's recorded sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sex {
    Unknown,
    Male,
    Female,
}

impl Sex {
    /// Reads the leading `M` or `F` of a `SEX` value.
    pub fn parse(value: &str) -> Sex {
        if value.starts_with('M') {
            Sex::Male
        } else if value.starts_with('F') {
            Sex::Female
        } else {
            Sex::Unknown
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "",
        }
    }
}

typed_view! {
    /// `INDI`: one person.
    Individual => RecordKind::Individual
}

impl Individual {
    /// A fresh individual with id `@I<id>@`.
    pub fn new(id: i32) -> Self {
        Self(
            Record::new(0, INDI)
                .with_id(create_id('I', id))
                .with_kind(RecordKind::Individual),
        )
    }
}

impl<R: Borrow<Record>> Individual<R> {
    /// The first `NAME`.
    pub fn name(&self) -> Option<Name<&Record>> {
        self.record().child(NAME).and_then(Name::view)
    }

    pub fn names(&self) -> Vec<Name<&Record>> {
        self.children_viewed(NAME, Name::view)
    }

    pub fn sex(&self) -> Sex {
        Sex::parse(self.record().child_data(SEX))
    }

    pub fn restriction_notice(&self) -> &str {
        self.record().child_data(RESN)
    }

    pub fn events(&self) -> Vec<EventOrFact<&Record>> {
        self.record()
            .children
            .get_all_by_tags(INDIVIDUAL_EVENT_TAGS)
            .into_iter()
            .filter_map(EventOrFact::view)
            .collect()
    }

    pub fn attributes(&self) -> Vec<EventOrFact<&Record>> {
        self.record()
            .children
            .get_all_by_tags(INDIVIDUAL_ATTRIBUTE_TAGS)
            .into_iter()
            .filter_map(EventOrFact::view)
            .collect()
    }

    pub fn family_links(&self) -> Vec<FamilyLink<&Record>> {
        self.record()
            .children
            .get_all_by_tags(FAMILY_LINK_TAGS)
            .into_iter()
            .filter_map(FamilyLink::view)
            .collect()
    }

    pub fn associations(&self) -> Vec<Association<&Record>> {
        self.children_viewed(ASSO, Association::view)
    }

    pub fn aliases(&self) -> Vec<&str> {
        self.record().children.get_xref_ids(ALIA)
    }

    pub fn ancestor_interests(&self) -> Vec<&str> {
        self.record().children.get_xref_ids(ANCI)
    }

    pub fn descendant_interests(&self) -> Vec<&str> {
        self.record().children.get_xref_ids(DESI)
    }

    pub fn submitters(&self) -> Vec<&str> {
        self.record().children.get_xref_ids(SUBM)
    }

    fn children_viewed<'a, V>(&'a self, tag: &str, view: fn(&'a Record) -> Option<V>) -> Vec<V> {
        self.record()
            .children
            .get_all_by_tag(tag)
            .into_iter()
            .filter_map(view)
            .collect()
    }
}

impl<R: BorrowMut<Record>> Individual<R> {
    pub fn name_mut(&mut self) -> Option<Name<&mut Record>> {
        self.record_mut().child_mut(NAME).and_then(Name::view)
    }

    /// Replace the first `NAME`, or add one.
    pub fn set_name(&mut self, name: Name) {
        self.record_mut().children.replace_or_add(name.into());
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.record_mut().set_child_data(SEX, sex.code());
    }

    pub fn set_restriction_notice(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(RESN, value);
    }

    pub fn add_event(&mut self, event: EventOrFact) {
        self.record_mut().children.add(event.into());
    }

    /// Link to a family as a child (`FAMC`) or a spouse (`FAMS`).
    pub fn add_family_link(&mut self, link: FamilyLink) {
        self.record_mut().children.add(link.into());
    }
}

typed_view! {
    /// `FAM`: a couple and their children.
    Family => RecordKind::Family
}

impl Family {
    /// A fresh family with id `@F<id>@`.
    pub fn new(id: i32) -> Self {
        Self(
            Record::new(0, FAM)
                .with_id(create_id('F', id))
                .with_kind(RecordKind::Family),
        )
    }
}

impl<R: Borrow<Record>> Family<R> {
    pub fn husband(&self) -> &str {
        self.record().child_xref(HUSB)
    }

    pub fn wife(&self) -> &str {
        self.record().child_xref(WIFE)
    }

    /// Cross-references of every `CHIL`, in file order.
    pub fn children(&self) -> Vec<&str> {
        self.record().children.get_xref_ids(CHIL)
    }

    pub fn number_of_children(&self) -> &str {
        self.record().child_data(NCHI)
    }

    pub fn events(&self) -> Vec<EventOrFact<&Record>> {
        self.record()
            .children
            .get_all_by_tags(FAMILY_EVENT_TAGS)
            .into_iter()
            .filter_map(EventOrFact::view)
            .collect()
    }

    pub fn submitters(&self) -> Vec<&str> {
        self.record().children.get_xref_ids(SUBM)
    }
}

impl<R: BorrowMut<Record>> Family<R> {
    pub fn set_husband(&mut self, xref_id: impl Into<String>) {
        self.record_mut().set_child_xref(HUSB, xref_id);
    }

    pub fn set_wife(&mut self, xref_id: impl Into<String>) {
        self.record_mut().set_child_xref(WIFE, xref_id);
    }

    pub fn add_child(&mut self, xref_id: impl Into<String>) {
        self.record_mut().add_child_record("", xref_id, CHIL, "");
    }

    pub fn add_event(&mut self, event: EventOrFact) {
        self.record_mut().children.add(event.into());
    }
}

typed_view! {
    /// `OBJE` at level 0.
    MultimediaRecord => RecordKind::Multimedia
}

impl<R: Borrow<Record>> MultimediaRecord<R> {
    pub fn format(&self) -> &str {
        self.record().child_data(FORM)
    }

    pub fn title(&self) -> &str {
        self.record().child_data(TITL)
    }

    /// The encoded `BLOB` payload.
    pub fn content(&self) -> &str {
        self.record().child_data(BLOB)
    }
}

impl<R: BorrowMut<Record>> MultimediaRecord<R> {
    pub fn set_format(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(FORM, value);
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(TITL, value);
    }

    pub fn set_content(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(BLOB, value);
    }
}

typed_view! {
    /// `NOTE` at level 0. The note text is the record's own data.
    NoteRecord => RecordKind::Note
}

impl<R: Borrow<Record>> NoteRecord<R> {
    pub fn text(&self) -> &str {
        &self.record().data
    }
}

typed_view! {
    /// `REPO` at level 0: an archive or library holding sources.
    RepositoryRecord => RecordKind::Repository
}

impl<R: Borrow<Record>> RepositoryRecord<R> {
    pub fn name(&self) -> &str {
        self.record().child_data(NAME)
    }

    pub fn address(&self) -> Option<Address<&Record>> {
        self.record().child(ADDR).and_then(Address::view)
    }
}

impl<R: BorrowMut<Record>> RepositoryRecord<R> {
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(NAME, value);
    }
}

typed_view! {
    /// `SOUR` at level 0.
    SourceRecord => RecordKind::Source
}

impl<R: Borrow<Record>> SourceRecord<R> {
    pub fn title(&self) -> &str {
        self.record().child_data(TITL)
    }

    pub fn author(&self) -> &str {
        self.record().child_data(AUTH)
    }

    pub fn abbreviated_title(&self) -> &str {
        self.record().child_data(ABBR)
    }

    pub fn publisher_info(&self) -> &str {
        self.record().child_data(PUBL)
    }

    pub fn text(&self) -> &str {
        self.record().child_data(TEXT)
    }

    /// `DATA/AGNC`: the agency responsible for the recorded data.
    pub fn agency(&self) -> &str {
        self.record().grandchild_data(DATA, AGNC)
    }

    /// `DATA/EVEN` entries: which events the source records.
    pub fn source_events(&self) -> Vec<SourceEvent<&Record>> {
        self.data_children(EVEN)
            .into_iter()
            .filter_map(SourceEvent::view)
            .collect()
    }

    /// `DATA/NOTE` entries.
    pub fn source_notes(&self) -> Vec<NoteLink<&Record>> {
        self.data_children(NOTE)
            .into_iter()
            .filter_map(NoteLink::view)
            .collect()
    }

    pub fn repositories(&self) -> Vec<SourceRepositoryLink<&Record>> {
        self.record()
            .children
            .get_all_by_tag(REPO)
            .into_iter()
            .filter_map(SourceRepositoryLink::view)
            .collect()
    }

    fn data_children(&self, tag: &str) -> Vec<&Record> {
        self.record()
            .child(DATA)
            .map(|data| data.children.get_all_by_tag(tag))
            .unwrap_or_default()
    }
}

impl<R: BorrowMut<Record>> SourceRecord<R> {
    pub fn set_title(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(TITL, value);
    }

    pub fn set_author(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(AUTH, value);
    }

    pub fn set_abbreviated_title(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(ABBR, value);
    }

    pub fn set_publisher_info(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(PUBL, value);
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(TEXT, value);
    }

    pub fn set_agency(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(DATA, AGNC, value);
    }
}

typed_view! {
    /// `SUBM`: who contributed the data.
    SubmitterRecord => RecordKind::Submitter
}

impl<R: Borrow<Record>> SubmitterRecord<R> {
    pub fn name(&self) -> &str {
        self.record().child_data(NAME)
    }

    pub fn address(&self) -> Option<Address<&Record>> {
        self.record().child(ADDR).and_then(Address::view)
    }

    /// Every non-empty `LANG`.
    pub fn languages(&self) -> Vec<&str> {
        self.record()
            .children
            .get_all_by_tag(LANG)
            .into_iter()
            .map(|lang| lang.data.as_str())
            .filter(|lang| !lang.is_empty())
            .collect()
    }

    /// The submitter's registered `RFN`.
    pub fn registered_id(&self) -> &str {
        self.record().child_data(RFN)
    }
}

impl<R: BorrowMut<Record>> SubmitterRecord<R> {
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(NAME, value);
    }

    pub fn add_language(&mut self, value: impl Into<String>) {
        self.record_mut().add_child_record("", "", LANG, value);
    }
}

typed_view! {
    /// `SUBN`: the submission request itself. Carries only the shared metadata.
    SubmissionRecord => RecordKind::Submission
}

impl<R: Borrow<Record>> RecordMetadata for Header<R> {}
impl<R: Borrow<Record>> RecordMetadata for Individual<R> {}
impl<R: Borrow<Record>> RecordMetadata for Family<R> {}
impl<R: Borrow<Record>> RecordMetadata for MultimediaRecord<R> {}
impl<R: Borrow<Record>> RecordMetadata for NoteRecord<R> {}
impl<R: Borrow<Record>> RecordMetadata for RepositoryRecord<R> {}
impl<R: Borrow<Record>> RecordMetadata for SourceRecord<R> {}
impl<R: Borrow<Record>> RecordMetadata for SubmitterRecord<R> {}
impl<R: Borrow<Record>> RecordMetadata for SubmissionRecord<R> {}
