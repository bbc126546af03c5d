use gedcom::gedcom::formats::{to_gedcom_string, GedcomWriter};
use gedcom::gedcom::reading::GedcomReader;
use gedcom::gedcom::Document;
use gedcom_config::{GedcomConfig, Loader, ReaderConfig, WriterConfig};
use rstest::rstest;

const MINIMAL: &str = include_str!("fixtures/minimal.ged");
const FAMILY: &str = include_str!("fixtures/family.ged");

fn rewrite(text: &str) -> String {
    let records = GedcomReader::from_text(text).unwrap().read_all().unwrap();
    to_gedcom_string(&records, &WriterConfig::default()).unwrap()
}

#[rstest]
#[case::minimal(MINIMAL)]
#[case::family(FAMILY)]
fn writer_reproduces_fixture(#[case] text: &str) {
    assert_eq!(rewrite(text), text);
}

#[test]
fn document_save_reproduces_fixture() {
    let document = Document::load_str(FAMILY).unwrap();
    assert_eq!(document.save_to_string().unwrap(), FAMILY);
}

#[test]
fn document_load_from_file() {
    let file = std::fs::File::open(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/family.ged"
    ))
    .expect("fixture exists");
    let document = Document::load(file).unwrap();
    assert_eq!(document.save_to_string().unwrap(), FAMILY);
}

#[test]
fn crlf_round_trips_with_matching_newline() {
    let crlf = FAMILY.replace('\n', "\r\n");
    let document = Document::load_buf(crlf.as_bytes()).unwrap();
    let mut config = GedcomConfig::default();
    config.writer.newline = "\r\n".to_string();
    let mut out = Vec::new();
    document.save_with(&mut out, &config).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), crlf);
}

#[test]
fn byte_order_mark_is_not_written_back() {
    let with_bom = format!("\u{feff}{FAMILY}");
    let document = Document::load_with(with_bom.as_bytes(), &ReaderConfig::default()).unwrap();
    assert_eq!(document.save_to_string().unwrap(), FAMILY);
}

#[test]
fn long_data_rejoins_and_resplits_at_the_same_points() {
    let text = format!(
        "0 @I1@ INDI\n1 NOTE {}\n2 CONC {}\n2 CONC {}\n1 NAME A /B/\n0 TRLR\n",
        "x".repeat(248),
        "y".repeat(248),
        "z".repeat(10)
    );
    let records = GedcomReader::from_text(&text).unwrap().read_all().unwrap();
    assert_eq!(records[0].children[0].data.len(), 506);
    assert_eq!(records[0].children.len(), 2);
    assert_eq!(rewrite(&text), text);
}

#[test]
fn narrower_writer_resplits_consistently() {
    let records = GedcomReader::from_text(FAMILY).unwrap().read_all().unwrap();
    let mut writer = GedcomWriter::new(Vec::new());
    writer.set_max_data_length(8).unwrap();
    writer.write_records(&records).unwrap();
    let narrow = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    assert_ne!(narrow, FAMILY);

    let reread = GedcomReader::from_text(&narrow).unwrap().read_all().unwrap();
    assert_eq!(
        to_gedcom_string(&reread, &WriterConfig::default()).unwrap(),
        FAMILY
    );
}

#[test]
fn layered_config_drives_the_writer() {
    let config = Loader::new()
        .with_toml_str("[writer]\nmax_data_length = 10\n")
        .build()
        .unwrap();
    assert_eq!(config.writer.newline, "\n");

    let document = Document::load_str(FAMILY).unwrap();
    let mut out = Vec::new();
    document.save_with(&mut out, &config).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("1 TITL Parish reg\n2 CONC ister of S\n2 CONC t Peter\n"));

    let reloaded = Document::load_str(&text).unwrap();
    assert_eq!(reloaded.save_to_string().unwrap(), FAMILY);
}
