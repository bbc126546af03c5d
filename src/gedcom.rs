//! Main module for gedcom library functionality

pub mod ast;
pub mod building;
pub mod document;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod reading;
pub mod record;
pub mod tags;
pub mod testing;

pub use document::Document;
pub use error::{GedcomError, LineError, Result};
pub use reading::GedcomReader;
pub use record::{Record, RecordKind, RecordList};
