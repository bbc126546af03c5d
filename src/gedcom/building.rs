//! Type promotion for freshly read records
//!
//!     The reader produces plain [`Record`](crate::gedcom::record::Record) nodes. Before a
//!     node is handed back it goes through the [factory], which decides from its tag,
//!     its level and whether it carries a cross-reference which typed view applies. The
//!     decision is stored on the node as a [`RecordKind`](crate::gedcom::record::RecordKind).
//!
//!     Tags that name events or attributes are resolved through the membership tables in
//!     [classification], which also maps a tag to its specific [`FactType`].

pub mod classification;
pub mod factory;

pub use classification::{classify, fact_type, EventClass, FactType};
pub use factory::{kind_of, promote};
