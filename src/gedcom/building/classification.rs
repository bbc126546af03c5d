//! Event and attribute tag tables.
//!
//! Three membership lists decide whether a tag is a family event, an individual event
//! or an individual attribute. Lists are checked in that order and the first hit wins,
//! so `EVEN`, which appears in both event lists, always classifies as a family event.

use serde::Serialize;

/// Family event tags, checked first.
pub const FAMILY_EVENT_TAGS: &str = "ANUL, DIV, DIVF, ENGA, MARR, MARB, MARC, MARL, MARS, EVEN";

/// Individual event tags, checked second.
pub const INDIVIDUAL_EVENT_TAGS: &str = "ADOP, BAPM, BARM, BASM, BIRT, BLES, BURI, CENS, CHR, CHRA, CONF, CREM, DEAT, EMIG, FCOM, GRAD, IMMI, NATU, ORDN, PROB, RETI, WILL, EVEN";

/// Individual attribute tags, checked last.
pub const INDIVIDUAL_ATTRIBUTE_TAGS: &str =
    "CAST, DSCR, EDUC, IDNO, NATI, NCHI, NMR, OCCU, PROP, RELI, RESI, SSN, TITL";

/// Which event table a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventClass {
    Family,
    Individual,
    Attribute,
    Unknown,
}

/// The specific event or fact named by a tag within its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FactType {
    // Individual events
    Adoption,
    Baptism,
    BarMitzvah,
    BasMitzvah,
    Birth,
    Blessing,
    Burial,
    Census,
    Christening,
    AdultChristening,
    Confirmation,
    Cremation,
    Death,
    Emigration,
    FirstCommunion,
    Graduation,
    Immigration,
    Naturalisation,
    Ordination,
    Probate,
    Retirement,
    Will,
    // Individual attributes
    Caste,
    Description,
    Education,
    IdNumber,
    NationalOrTribalOrigin,
    NoOfChildren,
    NoOfMarriages,
    Occupation,
    Property,
    Religion,
    Residence,
    SocialSecurityNumber,
    Title,
    // Family events
    Annulment,
    Divorce,
    DivorceFiled,
    Engagement,
    Marriage,
    MarriageBann,
    MarriageContract,
    MarriageLicense,
    MarriageSettlement,
    /// Generic `EVEN`.
    Other,
    Unknown,
}

fn list_contains(list: &str, tag: &str) -> bool {
    list.split(',').any(|entry| entry.trim() == tag)
}

/// Classify a tag. Total over all inputs; anything outside the three tables is
/// [`EventClass::Unknown`].
pub fn classify(tag: &str) -> EventClass {
    let tag = tag.trim();
    if list_contains(FAMILY_EVENT_TAGS, tag) {
        EventClass::Family
    } else if list_contains(INDIVIDUAL_EVENT_TAGS, tag) {
        EventClass::Individual
    } else if list_contains(INDIVIDUAL_ATTRIBUTE_TAGS, tag) {
        EventClass::Attribute
    } else {
        EventClass::Unknown
    }
}

/// Map a tag to its fact type within the given class. Combinations that do not
/// belong together (e.g. `BIRT` as a family event) are [`FactType::Unknown`].
pub fn fact_type(class: EventClass, tag: &str) -> FactType {
    use FactType::*;
    match class {
        EventClass::Family => match tag {
            "ANUL" => Annulment,
            "DIV" => Divorce,
            "DIVF" => DivorceFiled,
            "ENGA" => Engagement,
            "MARR" => Marriage,
            "MARB" => MarriageBann,
            "MARC" => MarriageContract,
            "MARL" => MarriageLicense,
            "MARS" => MarriageSettlement,
            "EVEN" => Other,
            _ => Unknown,
        },
        EventClass::Individual => match tag {
            "ADOP" => Adoption,
            "BAPM" => Baptism,
            "BARM" => BarMitzvah,
            "BASM" => BasMitzvah,
            "BIRT" => Birth,
            "BLES" => Blessing,
            "BURI" => Burial,
            "CENS" => Census,
            "CHR" => Christening,
            "CHRA" => AdultChristening,
            "CONF" => Confirmation,
            "CREM" => Cremation,
            "DEAT" => Death,
            "EMIG" => Emigration,
            "FCOM" => FirstCommunion,
            "GRAD" => Graduation,
            "IMMI" => Immigration,
            "NATU" => Naturalisation,
            "ORDN" => Ordination,
            "PROB" => Probate,
            "RETI" => Retirement,
            "WILL" => Will,
            "EVEN" => Other,
            _ => Unknown,
        },
        EventClass::Attribute => match tag {
            "CAST" => Caste,
            "DSCR" => Description,
            "EDUC" => Education,
            "IDNO" => IdNumber,
            "NATI" => NationalOrTribalOrigin,
            "NCHI" => NoOfChildren,
            "NMR" => NoOfMarriages,
            "OCCU" => Occupation,
            "PROP" => Property,
            "RELI" => Religion,
            "RESI" => Residence,
            "SSN" => SocialSecurityNumber,
            "TITL" => Title,
            _ => Unknown,
        },
        EventClass::Unknown => Unknown,
    }
}
