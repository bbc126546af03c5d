//! Output formats for record trees
//!
//! - [writer]: the GEDCOM line format itself, the inverse of the reader

pub mod writer;

pub use writer::{to_gedcom_string, GedcomWriter, MAX_DATA_LENGTH, MAX_LINE_LENGTH};
