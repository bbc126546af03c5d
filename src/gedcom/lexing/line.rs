//! Raw line to flat record.

use super::ids::clean_id;
use crate::gedcom::error::LineError;
use crate::gedcom::record::Record;
use once_cell::sync::Lazy;
use regex::Regex;

/// `level TAG [data]`. An id declaration shows up here as a tag starting with `@`.
static LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<level>[0-9]+)\s+(?P<tag>\S+)(?:\s+(?P<data>.+))?$").unwrap()
});

/// Split one raw line into a childless [`Record`].
///
/// Surrounding whitespace is ignored. The level must open the line: text ahead of it,
/// a sign included, makes the line malformed. `0 @I1@ INDI extra` declares id `@I1@` with tag
/// `INDI`; anything after the tag on such a line is dropped. Data starting with `@` is a
/// cross-reference and moves to `xref_id`. Ids are normalized through [`clean_id`].
///
/// The returned record is generic; the reader promotes it once its subtree is complete.
pub fn parse_line(raw: &str) -> Result<Record, LineError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(LineError::Empty);
    }

    let captures = LINE_REGEX
        .captures(text)
        .ok_or_else(|| LineError::Malformed(text.to_string()))?;

    let level_text = &captures["level"];
    let level = level_text
        .parse::<usize>()
        .map_err(|_| LineError::InvalidLevel(level_text.to_string()))?;
    let mut tag = captures["tag"].trim();
    let mut data = captures.name("data").map_or("", |m| m.as_str().trim());

    let mut id = String::new();
    if tag.starts_with('@') {
        id = clean_id(tag)?;
        tag = data.split_whitespace().next().unwrap_or("");
        data = "";
    }

    let mut record = Record::new(level, tag).with_id(id);
    if data.starts_with('@') {
        record.xref_id = clean_id(data)?;
    } else {
        record.data = data.to_string();
    }
    Ok(record)
}
