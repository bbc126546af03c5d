//! Capabilities shared across views.

use super::structures::{ChangeDate, ExternalId, MultimediaLink, NoteLink, SourceCitation};
use crate::gedcom::record::Record;
use crate::gedcom::tags::{AFN, CHAN, NOTE, OBJE, REFN, RFN, RIN, SOUR};

/// Notes, multimedia links and source citations attached to a node.
pub trait Annotated {
    fn node(&self) -> &Record;

    fn notes(&self) -> Vec<NoteLink<&Record>> {
        self.node()
            .children
            .get_all_by_tag(NOTE)
            .into_iter()
            .filter_map(NoteLink::view)
            .collect()
    }

    fn multimedia(&self) -> Vec<MultimediaLink<&Record>> {
        self.node()
            .children
            .get_all_by_tag(OBJE)
            .into_iter()
            .filter_map(MultimediaLink::view)
            .collect()
    }

    fn source_citations(&self) -> Vec<SourceCitation<&Record>> {
        self.node()
            .children
            .get_all_by_tag(SOUR)
            .into_iter()
            .filter_map(SourceCitation::view)
            .collect()
    }
}

impl Annotated for Record {
    fn node(&self) -> &Record {
        self
    }
}

/// Bookkeeping every top-level record may carry.
pub trait RecordMetadata: Annotated {
    fn change_date(&self) -> Option<ChangeDate<&Record>> {
        self.node().child(CHAN).and_then(ChangeDate::view)
    }

    /// The `RIN` assigned by the producing system, or empty.
    fn automated_record_id(&self) -> &str {
        self.node().child_data(RIN)
    }

    fn user_reference_numbers(&self) -> Vec<ExternalId<&Record>> {
        self.node()
            .children
            .get_all_by_tag(REFN)
            .into_iter()
            .filter_map(ExternalId::view)
            .collect()
    }

    /// Every external identifier: `AFN`, `RFN`, `RIN` and `REFN`, in file order.
    fn external_ids(&self) -> Vec<ExternalId<&Record>> {
        self.node()
            .children
            .iter()
            .filter(|child| [AFN, RFN, RIN, REFN].contains(&child.tag()))
            .filter_map(ExternalId::view)
            .collect()
    }
}
