//! # gedcom
//!
//! Reads GEDCOM 5.5 genealogy files into record trees and writes them back.
//!
//! The pipeline runs line by line: [lexing](gedcom::lexing) splits a raw line into a flat
//! record, [reading](gedcom::reading) assembles records into trees with one line of
//! lookahead, [building](gedcom::building) attaches a typed view to each node, and
//! [formats::writer](gedcom::formats::writer) turns trees back into lines. A
//! [`Document`](gedcom::Document) ties the pieces together for whole files.
//!
//! ## Testing
//!
//! Record trees are checked with the fluent assertions in the
//! [testing module](gedcom::testing).

pub mod gedcom;
