//! Tag mnemonics used by the reader, factory and typed views.
//!
//! Only tags the crate gives meaning to are listed. Any other tag, including
//! user-defined `_` tags, is carried through as plain text.

// Top-level records
pub const HEAD: &str = "HEAD";
pub const TRLR: &str = "TRLR";
pub const INDI: &str = "INDI";
pub const FAM: &str = "FAM";
pub const OBJE: &str = "OBJE";
pub const NOTE: &str = "NOTE";
pub const REPO: &str = "REPO";
pub const SOUR: &str = "SOUR";
pub const SUBM: &str = "SUBM";
pub const SUBN: &str = "SUBN";

// Continuation
pub const CONC: &str = "CONC";
pub const CONT: &str = "CONT";

// Structures
pub const ADDR: &str = "ADDR";
pub const ASSO: &str = "ASSO";
pub const CALN: &str = "CALN";
pub const CHAN: &str = "CHAN";
pub const NAME: &str = "NAME";
pub const PLAC: &str = "PLAC";
pub const FAMC: &str = "FAMC";
pub const FAMS: &str = "FAMS";

// External identifiers
pub const AFN: &str = "AFN";
pub const RIN: &str = "RIN";
pub const RFN: &str = "RFN";
pub const REFN: &str = "REFN";

// Fields
pub const ABBR: &str = "ABBR";
pub const ADR1: &str = "ADR1";
pub const ADR2: &str = "ADR2";
pub const AGE: &str = "AGE";
pub const AGNC: &str = "AGNC";
pub const ALIA: &str = "ALIA";
pub const ANCI: &str = "ANCI";
pub const AUTH: &str = "AUTH";
pub const BLOB: &str = "BLOB";
pub const CAUS: &str = "CAUS";
pub const CHAR: &str = "CHAR";
pub const CHIL: &str = "CHIL";
pub const CITY: &str = "CITY";
pub const COPR: &str = "COPR";
pub const CORP: &str = "CORP";
pub const CTRY: &str = "CTRY";
pub const DATA: &str = "DATA";
pub const DATE: &str = "DATE";
pub const DESI: &str = "DESI";
pub const DEST: &str = "DEST";
pub const EVEN: &str = "EVEN";
pub const FILE: &str = "FILE";
pub const FORM: &str = "FORM";
pub const GEDC: &str = "GEDC";
pub const GIVN: &str = "GIVN";
pub const HUSB: &str = "HUSB";
pub const LANG: &str = "LANG";
pub const MEDI: &str = "MEDI";
pub const NCHI: &str = "NCHI";
pub const NICK: &str = "NICK";
pub const NPFX: &str = "NPFX";
pub const NSFX: &str = "NSFX";
pub const PAGE: &str = "PAGE";
pub const PEDI: &str = "PEDI";
pub const PHON: &str = "PHON";
pub const POST: &str = "POST";
pub const PUBL: &str = "PUBL";
pub const QUAY: &str = "QUAY";
pub const RELA: &str = "RELA";
pub const RESN: &str = "RESN";
pub const ROLE: &str = "ROLE";
pub const SEX: &str = "SEX";
pub const SPFX: &str = "SPFX";
pub const STAE: &str = "STAE";
pub const SURN: &str = "SURN";
pub const TEXT: &str = "TEXT";
pub const TIME: &str = "TIME";
pub const TITL: &str = "TITL";
pub const TYPE: &str = "TYPE";
pub const VERS: &str = "VERS";
pub const WIFE: &str = "WIFE";

/// Wildcard accepted by the reader's tag-filtered reads.
pub const ANY: &str = "ANY";

/// Prefix that marks a user-defined tag.
pub const USER_DEFINED_PREFIX: char = '_';

/// Tags that link an individual to a family, as a list for `get_all_by_tags`.
pub const FAMILY_LINK_TAGS: &str = "FAMC, FAMS";
