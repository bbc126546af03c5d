//! One enum over every view, for code that wants to match on what a record is.

use super::records::*;
use super::structures::*;
use crate::gedcom::record::{Record, RecordKind};

/// A borrowed record wrapped in the view its kind selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typed<'a> {
    Header(Header<&'a Record>),
    Individual(Individual<&'a Record>),
    Family(Family<&'a Record>),
    Multimedia(MultimediaRecord<&'a Record>),
    Note(NoteRecord<&'a Record>),
    Repository(RepositoryRecord<&'a Record>),
    Source(SourceRecord<&'a Record>),
    Submitter(SubmitterRecord<&'a Record>),
    Submission(SubmissionRecord<&'a Record>),
    Address(Address<&'a Record>),
    Association(Association<&'a Record>),
    CallNumber(CallNumber<&'a Record>),
    ChangeDate(ChangeDate<&'a Record>),
    Event(EventOrFact<&'a Record>),
    ExternalId(ExternalId<&'a Record>),
    FamilyLink(FamilyLink<&'a Record>),
    HeaderSource(HeaderSource<&'a Record>),
    MultimediaLink(MultimediaLink<&'a Record>),
    Name(Name<&'a Record>),
    NoteLink(NoteLink<&'a Record>),
    Place(Place<&'a Record>),
    SourceCitation(SourceCitation<&'a Record>),
    SourceEvent(SourceEvent<&'a Record>),
    SourceRepositoryLink(SourceRepositoryLink<&'a Record>),
    UserDefined(UserDefined<&'a Record>),
    Generic(&'a Record),
}

impl Record {
    /// The view matching this record's kind.
    pub fn typed(&self) -> Typed<'_> {
        use RecordKind as K;
        match self.kind() {
            K::Generic => Typed::Generic(self),
            K::Header => Typed::Header(Header::unchecked(self)),
            K::Individual => Typed::Individual(Individual::unchecked(self)),
            K::Family => Typed::Family(Family::unchecked(self)),
            K::Multimedia => Typed::Multimedia(MultimediaRecord::unchecked(self)),
            K::Note => Typed::Note(NoteRecord::unchecked(self)),
            K::Repository => Typed::Repository(RepositoryRecord::unchecked(self)),
            K::Source => Typed::Source(SourceRecord::unchecked(self)),
            K::Submitter => Typed::Submitter(SubmitterRecord::unchecked(self)),
            K::Submission => Typed::Submission(SubmissionRecord::unchecked(self)),
            K::Address => Typed::Address(Address::unchecked(self)),
            K::Association => Typed::Association(Association::unchecked(self)),
            K::CallNumber => Typed::CallNumber(CallNumber::unchecked(self)),
            K::ChangeDate => Typed::ChangeDate(ChangeDate::unchecked(self)),
            K::Event(_) => Typed::Event(EventOrFact::unchecked(self)),
            K::ExternalId => Typed::ExternalId(ExternalId::unchecked(self)),
            K::FamilyLink => Typed::FamilyLink(FamilyLink::unchecked(self)),
            K::HeaderSource => Typed::HeaderSource(HeaderSource::unchecked(self)),
            K::MultimediaLink => Typed::MultimediaLink(MultimediaLink::unchecked(self)),
            K::Name => Typed::Name(Name::unchecked(self)),
            K::NoteLink => Typed::NoteLink(NoteLink::unchecked(self)),
            K::Place => Typed::Place(Place::unchecked(self)),
            K::SourceCitation => Typed::SourceCitation(SourceCitation::unchecked(self)),
            K::SourceEvent => Typed::SourceEvent(SourceEvent::unchecked(self)),
            K::SourceRepositoryLink => {
                Typed::SourceRepositoryLink(SourceRepositoryLink::unchecked(self))
            }
            K::UserDefined => Typed::UserDefined(UserDefined::unchecked(self)),
        }
    }
}
