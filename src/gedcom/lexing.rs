//! Line level tokenization
//!
//!     A GEDCOM line is `level [@id@] TAG [xref | data]`. [line] splits one raw line into
//!     a flat [`Record`](crate::gedcom::record::Record) with no children; [ids] holds the
//!     cross-reference id helpers the line parser and the record collection share.

pub mod ids;
pub mod line;

pub use ids::{clean_id, create_id, get_id};
pub use line::parse_line;
