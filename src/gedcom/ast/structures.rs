//! Substructure views: the pieces nested under top-level records.

use crate::gedcom::building::classification::{classify, fact_type, EventClass, FactType};
use crate::gedcom::record::{Record, RecordKind};
use crate::gedcom::tags::*;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::{Borrow, BorrowMut};

typed_view! {
    /// `ADDR`: free-form address text plus its parsed parts.
    Address => RecordKind::Address
}

impl Address {
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        Self(
            Record::new(level, ADDR)
                .with_data(text)
                .with_kind(RecordKind::Address),
        )
    }
}

impl<R: Borrow<Record>> Address<R> {
    pub fn text(&self) -> &str {
        &self.record().data
    }

    pub fn line1(&self) -> &str {
        self.record().child_data(ADR1)
    }

    pub fn line2(&self) -> &str {
        self.record().child_data(ADR2)
    }

    pub fn city(&self) -> &str {
        self.record().child_data(CITY)
    }

    pub fn state(&self) -> &str {
        self.record().child_data(STAE)
    }

    pub fn postal_code(&self) -> &str {
        self.record().child_data(POST)
    }

    pub fn country(&self) -> &str {
        self.record().child_data(CTRY)
    }
}

impl<R: BorrowMut<Record>> Address<R> {
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.record_mut().data = value.into();
    }

    pub fn set_line1(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(ADR1, value);
    }

    pub fn set_line2(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(ADR2, value);
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(CITY, value);
    }

    pub fn set_state(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(STAE, value);
    }

    pub fn set_postal_code(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(POST, value);
    }

    pub fn set_country(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(CTRY, value);
    }
}

typed_view! {
    /// `ASSO`: a link to an associated individual.
    Association => RecordKind::Association
}

impl<R: Borrow<Record>> Association<R> {
    pub fn individual(&self) -> &str {
        &self.record().xref_id
    }

    pub fn association_type(&self) -> &str {
        self.record().child_data(TYPE)
    }

    pub fn relation(&self) -> &str {
        self.record().child_data(RELA)
    }
}

typed_view! {
    /// `CALN`: a call number within a repository.
    CallNumber => RecordKind::CallNumber
}

impl CallNumber {
    pub fn new(level: usize, number: impl Into<String>) -> Self {
        Self(
            Record::new(level, CALN)
                .with_data(number)
                .with_kind(RecordKind::CallNumber),
        )
    }
}

impl<R: Borrow<Record>> CallNumber<R> {
    pub fn number(&self) -> &str {
        &self.record().data
    }

    pub fn media(&self) -> &str {
        self.record().child_data(MEDI)
    }
}

impl<R: BorrowMut<Record>> CallNumber<R> {
    pub fn set_media(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(MEDI, value);
    }
}

typed_view! {
    /// `CHAN`: when a record was last changed.
    ChangeDate => RecordKind::ChangeDate
}

impl ChangeDate {
    pub fn new(level: usize) -> Self {
        Self(Record::new(level, CHAN).with_kind(RecordKind::ChangeDate))
    }
}

impl<R: Borrow<Record>> ChangeDate<R> {
    pub fn date(&self) -> &str {
        self.record().child_data(DATE)
    }

    pub fn time(&self) -> &str {
        self.record().grandchild_data(DATE, TIME)
    }

    /// Date and time joined by a space, skipping whichever is empty.
    pub fn timestamp(&self) -> String {
        [self.date(), self.time()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<R: BorrowMut<Record>> ChangeDate<R> {
    pub fn set_date(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(DATE, value);
    }

    pub fn set_time(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(DATE, TIME, value);
    }
}

typed_view! {
    /// Any event or attribute line: `BIRT`, `MARR`, `OCCU` and the rest.
    EventOrFact => RecordKind::Event(_)
}

impl EventOrFact {
    /// A new event with optional `DATE` and `PLAC` children. Empty values are left out.
    pub fn new(
        level: usize,
        tag: &str,
        date: impl Into<String>,
        place: impl Into<String>,
    ) -> Self {
        let mut record = Record::new(level, tag).with_kind(RecordKind::Event(classify(tag)));
        let (date, place) = (date.into(), place.into());
        if !date.is_empty() {
            record.set_child_data(DATE, date);
        }
        if !place.is_empty() {
            record.children.add(Place::new(level + 1, place).into());
        }
        Self(record)
    }
}

impl<R: Borrow<Record>> EventOrFact<R> {
    pub fn class(&self) -> EventClass {
        match self.record().kind() {
            RecordKind::Event(class) => class,
            _ => EventClass::Unknown,
        }
    }

    pub fn fact_type(&self) -> FactType {
        fact_type(self.class(), self.record().tag())
    }

    pub fn date(&self) -> &str {
        self.record().child_data(DATE)
    }

    pub fn place(&self) -> Option<Place<&Record>> {
        self.record().child(PLAC).and_then(Place::view)
    }

    pub fn place_name(&self) -> &str {
        self.record().child_data(PLAC)
    }

    pub fn address(&self) -> Option<Address<&Record>> {
        self.record().child(ADDR).and_then(Address::view)
    }

    pub fn age(&self) -> &str {
        self.record().child_data(AGE)
    }

    pub fn agency(&self) -> &str {
        self.record().child_data(AGNC)
    }

    pub fn cause(&self) -> &str {
        self.record().child_data(CAUS)
    }

    pub fn type_detail(&self) -> &str {
        self.record().child_data(TYPE)
    }

    /// `HUSB/AGE` on family events.
    pub fn husband_age(&self) -> &str {
        self.record().grandchild_data(HUSB, AGE)
    }

    /// `WIFE/AGE` on family events.
    pub fn wife_age(&self) -> &str {
        self.record().grandchild_data(WIFE, AGE)
    }

    pub fn phone_numbers(&self) -> Vec<&str> {
        self.record()
            .children
            .get_all_by_tag(PHON)
            .into_iter()
            .map(|phone| phone.data.as_str())
            .collect()
    }
}

impl<R: BorrowMut<Record>> EventOrFact<R> {
    pub fn set_date(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(DATE, value);
    }

    pub fn set_place(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(PLAC, value);
    }

    pub fn set_age(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(AGE, value);
    }

    pub fn set_agency(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(AGNC, value);
    }

    pub fn set_cause(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(CAUS, value);
    }

    pub fn set_type_detail(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(TYPE, value);
    }

    pub fn set_husband_age(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(HUSB, AGE, value);
    }

    pub fn set_wife_age(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(WIFE, AGE, value);
    }

    pub fn add_phone_number(&mut self, value: impl Into<String>) {
        self.record_mut().add_child_record("", "", PHON, value);
    }
}

/// What kind of identifier an [`ExternalId`] carries, from its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExternalIdType {
    /// `AFN`
    AncestralFileNumber,
    /// `RIN`
    AutomatedRecord,
    /// `RFN`
    PermanentRecordFileNumber,
    /// `REFN`
    UserDefined,
}

typed_view! {
    /// `AFN`, `RFN`, `RIN` or `REFN`.
    ExternalId => RecordKind::ExternalId
}

impl<R: Borrow<Record>> ExternalId<R> {
    pub fn id_type(&self) -> ExternalIdType {
        match self.record().tag() {
            AFN => ExternalIdType::AncestralFileNumber,
            RIN => ExternalIdType::AutomatedRecord,
            RFN => ExternalIdType::PermanentRecordFileNumber,
            _ => ExternalIdType::UserDefined,
        }
    }

    pub fn value(&self) -> &str {
        &self.record().data
    }

    /// `TYPE` under a `REFN`.
    pub fn type_detail(&self) -> &str {
        self.record().child_data(TYPE)
    }
}

/// Which side of a family an individual is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FamilyLinkType {
    /// `FAMC`
    Child,
    /// `FAMS`
    Spouse,
}

impl FamilyLinkType {
    pub fn tag(self) -> &'static str {
        match self {
            FamilyLinkType::Child => FAMC,
            FamilyLinkType::Spouse => FAMS,
        }
    }
}

typed_view! {
    /// `FAMC` or `FAMS`.
    FamilyLink => RecordKind::FamilyLink
}

impl FamilyLink {
    pub fn new(level: usize, link_type: FamilyLinkType, family: impl Into<String>) -> Self {
        Self(
            Record::new(level, link_type.tag())
                .with_xref(family)
                .with_kind(RecordKind::FamilyLink),
        )
    }
}

impl<R: Borrow<Record>> FamilyLink<R> {
    pub fn family(&self) -> &str {
        &self.record().xref_id
    }

    pub fn link_type(&self) -> FamilyLinkType {
        if self.record().tag() == FAMS {
            FamilyLinkType::Spouse
        } else {
            FamilyLinkType::Child
        }
    }

    /// `PEDI`: birth, adopted, foster and so on.
    pub fn pedigree(&self) -> &str {
        self.record().child_data(PEDI)
    }
}

impl<R: BorrowMut<Record>> FamilyLink<R> {
    pub fn set_pedigree(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(PEDI, value);
    }
}

typed_view! {
    /// `HEAD/SOUR`: the system that produced the file.
    HeaderSource => RecordKind::HeaderSource
}

impl HeaderSource {
    pub fn new(system_id: impl Into<String>) -> Self {
        Self(
            Record::new(1, SOUR)
                .with_data(system_id)
                .with_kind(RecordKind::HeaderSource),
        )
    }
}

impl<R: Borrow<Record>> HeaderSource<R> {
    pub fn system_id(&self) -> &str {
        &self.record().data
    }

    pub fn product_name(&self) -> &str {
        self.record().child_data(NAME)
    }

    pub fn version(&self) -> &str {
        self.record().child_data(VERS)
    }

    pub fn company(&self) -> &str {
        self.record().child_data(CORP)
    }

    pub fn company_address(&self) -> Option<Address<&Record>> {
        self.record()
            .child(CORP)
            .and_then(|corp| corp.child(ADDR))
            .and_then(Address::view)
    }

    /// Name of the electronic data source (`DATA`).
    pub fn source_data(&self) -> &str {
        self.record().child_data(DATA)
    }

    pub fn publication_date(&self) -> &str {
        self.record().grandchild_data(DATA, DATE)
    }

    pub fn source_copyright(&self) -> &str {
        self.record().grandchild_data(DATA, COPR)
    }
}

impl<R: BorrowMut<Record>> HeaderSource<R> {
    pub fn set_system_id(&mut self, value: impl Into<String>) {
        self.record_mut().data = value.into();
    }

    pub fn set_product_name(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(NAME, value);
    }

    pub fn set_version(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(VERS, value);
    }

    pub fn set_company(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(CORP, value);
    }

    /// Replace the company address, adding an empty `CORP` first if needed.
    pub fn set_company_address(&mut self, text: impl Into<String>) {
        let corp = self.record_mut().ensure_child(CORP);
        let address = Address::new(corp.level + 1, text);
        corp.children.replace_or_add(address.into());
    }

    pub fn set_source_data(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(DATA, value);
    }

    pub fn set_publication_date(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(DATA, DATE, value);
    }

    pub fn set_source_copyright(&mut self, value: impl Into<String>) {
        self.record_mut().set_grandchild_data(DATA, COPR, value);
    }
}

typed_view! {
    /// `OBJE` below level 0: a pointer to a multimedia record or an inline file.
    MultimediaLink => RecordKind::MultimediaLink
}

impl MultimediaLink {
    pub fn new(level: usize) -> Self {
        Self(Record::new(level, OBJE).with_kind(RecordKind::MultimediaLink))
    }
}

impl<R: Borrow<Record>> MultimediaLink<R> {
    pub fn multimedia_record(&self) -> &str {
        &self.record().xref_id
    }

    pub fn file(&self) -> &str {
        self.record().child_data(FILE)
    }

    pub fn format(&self) -> &str {
        self.record().child_data(FORM)
    }

    pub fn title(&self) -> &str {
        self.record().child_data(TITL)
    }
}

impl<R: BorrowMut<Record>> MultimediaLink<R> {
    pub fn set_multimedia_record(&mut self, xref_id: impl Into<String>) {
        self.record_mut().xref_id = xref_id.into();
    }

    pub fn set_file(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(FILE, value);
    }

    pub fn set_format(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(FORM, value);
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(TITL, value);
    }
}

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<first>[\w\s]*)/(?P<last>\S*)/").unwrap());

typed_view! {
    /// `NAME`: a personal name written as `Given /Surname/`.
    Name => RecordKind::Name
}

impl Name {
    pub fn new(name: impl Into<String>, level: usize) -> Self {
        Self(
            Record::new(level, NAME)
                .with_data(name)
                .with_kind(RecordKind::Name),
        )
    }
}

impl<R: Borrow<Record>> Name<R> {
    pub fn full_name(&self) -> &str {
        &self.record().data
    }

    /// `GIVN`, or the text before the slashes of the full name.
    pub fn given_name(&self) -> &str {
        match self.record().child_data(GIVN) {
            "" => self.from_full_name("first"),
            given => given,
        }
    }

    /// `SURN`, or the text between the slashes of the full name.
    pub fn last_name(&self) -> &str {
        match self.record().child_data(SURN) {
            "" => self.from_full_name("last"),
            last => last,
        }
    }

    pub fn nickname(&self) -> &str {
        self.record().child_data(NICK)
    }

    pub fn prefix(&self) -> &str {
        self.record().child_data(NPFX)
    }

    pub fn suffix(&self) -> &str {
        self.record().child_data(NSFX)
    }

    pub fn surname_prefix(&self) -> &str {
        self.record().child_data(SPFX)
    }

    fn from_full_name(&self, group: &str) -> &str {
        NAME_REGEX
            .captures(self.full_name())
            .and_then(|captures| captures.name(group))
            .map(|m| m.as_str().trim())
            .unwrap_or("")
    }
}

impl<R: BorrowMut<Record>> Name<R> {
    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.record_mut().data = value.into();
    }

    pub fn set_given_name(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(GIVN, value);
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(SURN, value);
    }

    pub fn set_nickname(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(NICK, value);
    }

    pub fn set_prefix(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(NPFX, value);
    }

    pub fn set_suffix(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(NSFX, value);
    }

    pub fn set_surname_prefix(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(SPFX, value);
    }
}

typed_view! {
    /// `NOTE` below level 0: a pointer to a note record or inline text.
    NoteLink => RecordKind::NoteLink
}

impl NoteLink {
    /// Inline note text at `level`.
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        Self(
            Record::new(level, NOTE)
                .with_data(text)
                .with_kind(RecordKind::NoteLink),
        )
    }

    /// A pointer to the note record `xref_id`.
    pub fn to_record(level: usize, xref_id: impl Into<String>) -> Self {
        Self(
            Record::new(level, NOTE)
                .with_xref(xref_id)
                .with_kind(RecordKind::NoteLink),
        )
    }
}

impl<R: Borrow<Record>> NoteLink<R> {
    pub fn note_record(&self) -> &str {
        &self.record().xref_id
    }

    pub fn text(&self) -> &str {
        &self.record().data
    }
}

typed_view! {
    /// `PLAC`: a place name, jurisdictions separated by commas.
    Place => RecordKind::Place
}

impl Place {
    pub fn new(level: usize, name: impl Into<String>) -> Self {
        Self(
            Record::new(level, PLAC)
                .with_data(name)
                .with_kind(RecordKind::Place),
        )
    }
}

impl<R: Borrow<Record>> Place<R> {
    pub fn name(&self) -> &str {
        &self.record().data
    }

    /// The comma-separated jurisdictions, most specific first.
    pub fn jurisdictions(&self) -> Vec<&str> {
        self.name()
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

typed_view! {
    /// `SOUR` below level 0 with a pointer: cites a source record.
    SourceCitation => RecordKind::SourceCitation
}

impl SourceCitation {
    pub fn new(level: usize, source: impl Into<String>) -> Self {
        Self(
            Record::new(level, SOUR)
                .with_xref(source)
                .with_kind(RecordKind::SourceCitation),
        )
    }
}

impl<R: Borrow<Record>> SourceCitation<R> {
    pub fn source(&self) -> &str {
        &self.record().xref_id
    }

    pub fn description(&self) -> &str {
        &self.record().data
    }

    pub fn page(&self) -> &str {
        self.record().child_data(PAGE)
    }

    pub fn event_type(&self) -> &str {
        self.record().child_data(EVEN)
    }

    pub fn role(&self) -> &str {
        self.record().grandchild_data(EVEN, ROLE)
    }

    pub fn date(&self) -> &str {
        self.record().grandchild_data(DATA, DATE)
    }

    /// `QUAY` as a number, or -1 when absent or not numeric.
    pub fn quality(&self) -> i32 {
        self.record().child_data(QUAY).trim().parse().unwrap_or(-1)
    }

    /// Every non-empty `TEXT`, direct and under `DATA`.
    pub fn entries(&self) -> Vec<&str> {
        let direct = self.record().children.get_all_by_tag(TEXT);
        let nested = self
            .record()
            .child(DATA)
            .map(|data| data.children.get_all_by_tag(TEXT))
            .unwrap_or_default();
        direct
            .into_iter()
            .chain(nested)
            .map(|text| text.data.as_str())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl<R: BorrowMut<Record>> SourceCitation<R> {
    pub fn set_page(&mut self, value: impl Into<String>) {
        self.record_mut().set_child_data(PAGE, value);
    }

    pub fn set_quality(&mut self, value: i32) {
        self.record_mut().set_child_data(QUAY, value.to_string());
    }
}

typed_view! {
    /// `SOUR/DATA/EVEN`: the events a source records, with their period and place.
    SourceEvent => RecordKind::SourceEvent | RecordKind::Event(_)
}

impl<R: Borrow<Record>> SourceEvent<R> {
    pub fn events(&self) -> &str {
        &self.record().data
    }

    pub fn date(&self) -> &str {
        self.record().child_data(DATE)
    }

    pub fn place(&self) -> &str {
        self.record().child_data(PLAC)
    }
}

typed_view! {
    /// `REPO` below level 0: where a source can be found.
    SourceRepositoryLink => RecordKind::SourceRepositoryLink
}

impl<R: Borrow<Record>> SourceRepositoryLink<R> {
    pub fn repository(&self) -> &str {
        &self.record().xref_id
    }

    pub fn call_numbers(&self) -> Vec<CallNumber<&Record>> {
        self.record()
            .children
            .get_all_by_tag(CALN)
            .into_iter()
            .filter_map(CallNumber::view)
            .collect()
    }
}

typed_view! {
    /// A `_`-prefixed extension tag.
    UserDefined => RecordKind::UserDefined
}

impl UserDefined {
    /// Prefixes `tag` with `_` when it lacks one.
    pub fn new(tag: &str, level: usize, data: impl Into<String>) -> Self {
        let tag = if tag.starts_with(USER_DEFINED_PREFIX) {
            tag.to_string()
        } else {
            format!("{USER_DEFINED_PREFIX}{tag}")
        };
        Self(
            Record::new(level, tag)
                .with_data(data)
                .with_kind(RecordKind::UserDefined),
        )
    }
}

impl<R: Borrow<Record>> UserDefined<R> {
    /// View any record whose tag starts with `_`, whatever its kind.
    pub fn from_tag(record: R) -> Option<Self> {
        record
            .borrow()
            .is_user_defined()
            .then(|| Self::unchecked(record))
    }
}
