//! Tag-driven type promotion.
//!
//! The same tag means different things at different depths: `NOTE` at level 0 is a note
//! record, deeper it links to one or carries the note inline. `SOUR` deeper than level 0
//! is a citation when it points somewhere and the header's source description when it
//! does not. [`kind_of`] settles this once, from `(tag, level, xref present)`.

use super::classification::{classify, EventClass};
use crate::gedcom::record::{Record, RecordKind};

/// The kind a record with this tag, level and cross-reference presence promotes to.
pub fn kind_of(tag: &str, level: usize, has_xref: bool) -> RecordKind {
    let top_level = level == 0;
    match tag {
        "FAM" => RecordKind::Family,
        "HEAD" => RecordKind::Header,
        "INDI" => RecordKind::Individual,
        "SUBM" => RecordKind::Submitter,
        "SUBN" => RecordKind::Submission,

        "OBJE" if top_level => RecordKind::Multimedia,
        "OBJE" => RecordKind::MultimediaLink,
        "NOTE" if top_level => RecordKind::Note,
        "NOTE" => RecordKind::NoteLink,
        "REPO" if top_level => RecordKind::Repository,
        "REPO" => RecordKind::SourceRepositoryLink,
        "SOUR" if top_level => RecordKind::Source,
        "SOUR" if !has_xref => RecordKind::HeaderSource,
        "SOUR" => RecordKind::SourceCitation,

        "ADDR" => RecordKind::Address,
        "ASSO" => RecordKind::Association,
        "CHAN" => RecordKind::ChangeDate,
        "CALN" => RecordKind::CallNumber,
        "NAME" => RecordKind::Name,
        "PLAC" => RecordKind::Place,

        "AFN" | "RIN" | "RFN" | "REFN" => RecordKind::ExternalId,
        "FAMC" | "FAMS" => RecordKind::FamilyLink,

        _ => match classify(tag) {
            EventClass::Unknown => RecordKind::Generic,
            class => RecordKind::Event(class),
        },
    }
}

/// Attach the typed view matching the record's tag, level and cross-reference.
///
/// Never fails: records with no typed meaning come back as [`RecordKind::Generic`].
pub fn promote(record: Record) -> Record {
    let kind = kind_of(record.tag(), record.level, !record.xref_id.is_empty());
    record.with_kind(kind)
}
