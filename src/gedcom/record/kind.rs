//! The closed set of typed views a record can be promoted to.

use crate::gedcom::building::EventClass;
use serde::Serialize;

/// Which typed view applies to a [`Record`](super::Record).
///
/// Set by the factory at read time or by the typed constructors. Top-level record
/// kinds come first, nested structure kinds after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    /// No typed view. Unknown and user-defined tags read from a file end up here.
    #[default]
    Generic,

    Header,
    Individual,
    Family,
    Multimedia,
    Note,
    Repository,
    Source,
    Submitter,
    Submission,

    Address,
    Association,
    CallNumber,
    ChangeDate,
    Event(EventClass),
    ExternalId,
    FamilyLink,
    HeaderSource,
    MultimediaLink,
    Name,
    NoteLink,
    Place,
    SourceCitation,
    SourceEvent,
    SourceRepositoryLink,
    UserDefined,
}

impl RecordKind {
    /// True for the independently addressable, level 0 record kinds.
    pub fn is_record(self) -> bool {
        matches!(
            self,
            RecordKind::Header
                | RecordKind::Individual
                | RecordKind::Family
                | RecordKind::Multimedia
                | RecordKind::Note
                | RecordKind::Repository
                | RecordKind::Source
                | RecordKind::Submitter
                | RecordKind::Submission
        )
    }

    /// True for nested structure kinds.
    pub fn is_structure(self) -> bool {
        self != RecordKind::Generic && !self.is_record()
    }

    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Generic => "Record",
            RecordKind::Header => "Header",
            RecordKind::Individual => "Individual",
            RecordKind::Family => "Family",
            RecordKind::Multimedia => "Multimedia",
            RecordKind::Note => "Note",
            RecordKind::Repository => "Repository",
            RecordKind::Source => "Source",
            RecordKind::Submitter => "Submitter",
            RecordKind::Submission => "Submission",
            RecordKind::Address => "Address",
            RecordKind::Association => "Association",
            RecordKind::CallNumber => "CallNumber",
            RecordKind::ChangeDate => "ChangeDate",
            RecordKind::Event(EventClass::Family) => "FamilyEvent",
            RecordKind::Event(EventClass::Individual) => "IndividualEvent",
            RecordKind::Event(EventClass::Attribute) => "Attribute",
            RecordKind::Event(EventClass::Unknown) => "Event",
            RecordKind::ExternalId => "ExternalId",
            RecordKind::FamilyLink => "FamilyLink",
            RecordKind::HeaderSource => "HeaderSource",
            RecordKind::MultimediaLink => "MultimediaLink",
            RecordKind::Name => "Name",
            RecordKind::NoteLink => "NoteLink",
            RecordKind::Place => "Place",
            RecordKind::SourceCitation => "SourceCitation",
            RecordKind::SourceEvent => "SourceEvent",
            RecordKind::SourceRepositoryLink => "SourceRepositoryLink",
            RecordKind::UserDefined => "UserDefined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RecordKind::Individual, true, false, "Individual")]
    #[case(RecordKind::Submission, true, false, "Submission")]
    #[case(RecordKind::Name, false, true, "Name")]
    #[case(RecordKind::Event(EventClass::Family), false, true, "FamilyEvent")]
    #[case(RecordKind::Generic, false, false, "Record")]
    fn kinds_are_records_or_structures(
        #[case] kind: RecordKind,
        #[case] record: bool,
        #[case] structure: bool,
        #[case] name: &str,
    ) {
        assert_eq!(kind.is_record(), record);
        assert_eq!(kind.is_structure(), structure);
        assert_eq!(kind.name(), name);
    }
}
