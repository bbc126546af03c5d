//! Typed views over records
//!
//!     A view is a thin wrapper around a [`Record`](crate::gedcom::record::Record), or a
//!     reference to one, that adds accessors named after what the tags mean. Views never
//!     copy data: getters read children, setters write children.
//!
//!     Every view is generic over how it holds its record:
//!
//!         - `Individual` (that is, `Individual<Record>`) owns the record; typed
//!           constructors return this form
//!         - `Individual<&Record>` borrows it; child accessors hand these out
//!         - `Individual<&mut Record>` borrows it mutably and unlocks the setters
//!
//!     `view` only succeeds when the record's [`RecordKind`](crate::gedcom::record::RecordKind)
//!     matches, so a view always wraps the kind of node it describes.
//!
//! Shared accessors
//!
//!     Notes, multimedia links and source citations can hang off any record or structure;
//!     they come from [`Annotated`]. Top-level records additionally carry a change date,
//!     an automated record id and user reference numbers through [`RecordMetadata`].

#[macro_use]
mod view;

pub mod annotations;
pub mod records;
pub mod structures;
pub mod typed;

pub use annotations::{Annotated, RecordMetadata};
pub use records::{
    Family, Header, Individual, MultimediaRecord, NoteRecord, RepositoryRecord, Sex,
    SourceRecord, SubmissionRecord, SubmitterRecord,
};
pub use structures::{
    Address, Association, CallNumber, ChangeDate, EventOrFact, ExternalId, ExternalIdType,
    FamilyLink, FamilyLinkType, HeaderSource, MultimediaLink, Name, NoteLink, Place,
    SourceCitation, SourceEvent, SourceRepositoryLink, UserDefined,
};
pub use typed::Typed;
