//! GEDCOM line emitter
//!
//! The inverse of the reader. Before a record's line is written its data is prepared on
//! a scratch copy, in two passes:
//!
//! 1. embedded newlines become `CONT` lines one level down,
//! 2. data too long for one line is cut into `CONC` lines one level down.
//!
//! The record handed in is never modified. Each record then becomes exactly one line
//! shaped by which fields it carries:
//!
//! - with an id: `level id tag`
//! - with a cross-reference: `level tag xref`
//! - otherwise: `level tag data`
//!
//! Empty parts are left out together with their separating space.

use crate::gedcom::error::{GedcomError, Result};
use crate::gedcom::record::{Record, RecordList};
use gedcom_config::WriterConfig;
use std::io::Write;
use tracing::trace;

/// Longest line the format allows, level and tag included.
pub const MAX_LINE_LENGTH: usize = 255;

/// Ceiling for [`GedcomWriter::set_max_data_length`].
pub const MAX_DATA_LENGTH: usize = 248;

pub struct GedcomWriter<W: Write> {
    sink: W,
    max_data_length: usize,
    newline: String,
}

impl<W: Write> GedcomWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            max_data_length: MAX_DATA_LENGTH,
            newline: "\n".to_string(),
        }
    }

    /// Build a writer from configuration, rejecting an out-of-range data length.
    pub fn with_config(sink: W, config: &WriterConfig) -> Result<Self> {
        let mut writer = Self::new(sink);
        writer.set_max_data_length(config.max_data_length)?;
        writer.set_newline(config.newline.clone());
        Ok(writer)
    }

    pub fn max_data_length(&self) -> usize {
        self.max_data_length
    }

    /// Accepts `1..=248`.
    pub fn set_max_data_length(&mut self, length: usize) -> Result<()> {
        if !(1..=MAX_DATA_LENGTH).contains(&length) {
            return Err(GedcomError::MaxLengthOutOfRange(length));
        }
        self.max_data_length = length;
        Ok(())
    }

    pub fn newline(&self) -> &str {
        &self.newline
    }

    pub fn set_newline(&mut self, newline: impl Into<String>) {
        self.newline = newline.into();
    }

    /// Write `record`, then, when `include_children` is set, its children depth first.
    pub fn write_record(&mut self, record: &Record, include_children: bool) -> Result<()> {
        if !include_children {
            return self.write_prepared(record);
        }
        let mut pending = vec![record];
        while let Some(next) = pending.pop() {
            self.write_prepared(next)?;
            pending.extend(next.children.iter().rev());
        }
        Ok(())
    }

    /// One record's own line plus the continuation lines its data needs.
    fn write_prepared(&mut self, record: &Record) -> Result<()> {
        let mut line = Record::new(record.level, record.tag())
            .with_id(record.id())
            .with_xref(record.xref_id.as_str())
            .with_data(record.data.as_str());
        line.split_on_embedded_newline();
        line.split_long_data(self.max_data_length);
        if line.has_children() {
            trace!(tag = record.tag(), lines = line.children.len(), "continuation lines");
        }

        self.write_line(&line)?;
        for continuation in &line.children {
            self.write_line(continuation)?;
        }
        Ok(())
    }

    /// Write every record of `records` with its children.
    pub fn write_records(&mut self, records: &RecordList) -> Result<()> {
        for record in records {
            self.write_record(record, true)?;
        }
        Ok(())
    }

    /// Emit one line for `record` as is, without splitting its data.
    pub fn write_line(&mut self, record: &Record) -> Result<()> {
        self.write_level(record.level)?;
        if !record.id().is_empty() {
            self.write_id(record.id())?;
            self.write_tag(record.tag())?;
        } else if !record.xref_id.is_empty() {
            self.write_tag(record.tag())?;
            self.write_xref_id(&record.xref_id)?;
        } else {
            self.write_tag(record.tag())?;
            self.write_data(&record.data)?;
        }
        self.sink.write_all(self.newline.as_bytes())?;
        Ok(())
    }

    pub fn write_level(&mut self, level: usize) -> Result<()> {
        write!(self.sink, "{level}")?;
        Ok(())
    }

    pub fn write_id(&mut self, id: &str) -> Result<()> {
        self.write_field(id)
    }

    /// Write a numbered id such as `@I12@`.
    pub fn write_id_number(&mut self, id: i32, prefix: &str) -> Result<()> {
        let id = crate::gedcom::lexing::create_id(prefix, id);
        self.write_field(&id)
    }

    pub fn write_tag(&mut self, tag: &str) -> Result<()> {
        self.write_field(tag)
    }

    pub fn write_xref_id(&mut self, xref_id: &str) -> Result<()> {
        self.write_field(xref_id)
    }

    pub fn write_data(&mut self, data: &str) -> Result<()> {
        self.write_field(data)
    }

    fn write_field(&mut self, text: &str) -> Result<()> {
        if !text.is_empty() {
            write!(self.sink, " {text}")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Flush and hand back the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Render records and their children to a string with the given configuration.
pub fn to_gedcom_string(records: &RecordList, config: &WriterConfig) -> Result<String> {
    let mut writer = GedcomWriter::with_config(Vec::new(), config)?;
    writer.write_records(records)?;
    Ok(String::from_utf8(writer.into_inner()?)?)
}
