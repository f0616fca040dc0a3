use walnut_zonecheck::rr::{
    Cds, Csync, Ds, Loc, RecordTypeTable, SoaContent, ends_with, is_properly_quoted,
    is_valid_csync, is_valid_ds, is_valid_loc, is_valid_rr_priority, is_valid_soa_content,
};
use walnut_zonecheck::{Configuration, ValidationError, validate_content};

mod support;
use support::{SOA_CONTENT, subscribe};

static_assertions::assert_impl_all!(RecordTypeTable: Send, Sync);
static_assertions::assert_impl_all!(ValidationError: Send, Sync, std::error::Error);
static_assertions::assert_impl_all!(SoaContent: Send, Sync);

#[test]
fn quoting() {
    subscribe();
    for text in ["", "no quotes here", r#""quoted""#, r#""escaped \" quote""#] {
        assert!(is_properly_quoted(text), "{text}");
    }
    for text in [r#""unbalanced"#, r#""inner " quote""#] {
        assert!(!is_properly_quoted(text), "{text}");
    }
}

#[test]
fn suffixes() {
    subscribe();
    assert!(ends_with("", ""));
    assert!(ends_with("", "example.com"));
    assert!(!ends_with("com", ""));
    assert!(!ends_with("COM", "example.com"));
    assert!(ends_with("中国", "example.中国"));
}

#[test]
fn ds_records() {
    subscribe();
    let content = "45342 13 2 348dedbedc0cddcc4f2605ba42d428223672e5e913762c68f29d8547baa680c0";
    assert!(is_valid_ds(content));
    assert!(!is_valid_ds(&format!("{content};")));
    assert!(!is_valid_ds(
        "45342 13 2 348dedbedc0cddcc4f2605ba42d428223672e5e913762c68f29d8547baa680cg"
    ));

    let ds: Ds = content.parse().unwrap();
    assert_eq!(ds.key_tag(), 45342);
    assert_eq!(ds.algorithm(), 13);
    assert_eq!(ds.to_string(), content);

    assert_eq!("0 0 0 00".parse::<Cds>().unwrap(), Cds::Delete);
}

#[test]
fn csync_records() {
    subscribe();
    assert!(is_valid_csync("1234 3 A NS AAAA"));
    assert!(!is_valid_csync("4294967296 3 A NS"));
    assert!(!is_valid_csync("1234 4 A NS"));
    assert!(!is_valid_csync("1234 3"));
    assert!(!is_valid_csync("66 3 a"));
    assert!(!is_valid_csync("66 3 A ns"));
    assert!(!is_valid_csync("1234567890 1 A NS DS"));
    assert!(matches!(
        validate_content("CSYNC", "1234567890 1 A CSYNC", RecordTypeTable::standard()),
        Err(ValidationError::Csync(_))
    ));

    let table = Configuration::new()
        .with_record_types(["TYPE65534"])
        .record_types();
    let csync = Csync::parse("1234 1 A TYPE65534", &table).unwrap();
    assert!(csync.flags().immediate());
    assert!(!csync.flags().soa_minimum());
}

#[test]
fn loc_records() {
    subscribe();
    let content = "90 59 59.9 N 10 18 E 42849672.95m 1m";
    assert!(is_valid_loc(content));
    assert!(!is_valid_loc("90 59 59.9 N 10 18 E 42849672.96m 1m"));
    assert!(!is_valid_loc("90 59 59.9 N 10 18 S 42849672.95m 1m"));

    let loc: Loc = content.parse().unwrap();
    assert_eq!(loc.altitude(), 4_284_967_295);
    assert_eq!(loc.size(), Some(100));
    assert_eq!(loc.horizontal_precision(), None);
}

#[test]
fn priorities() {
    subscribe();
    assert!(is_valid_rr_priority(10, "MX"));
    assert!(!is_valid_rr_priority(10, "A"));
    assert!(is_valid_rr_priority("0", "A"));
    assert!(!is_valid_rr_priority(-1, "MX"));
}

#[test]
fn soa_content() {
    subscribe();
    assert!(is_valid_soa_content(SOA_CONTENT));

    let soa: SoaContent = SOA_CONTENT.parse().unwrap();
    assert_eq!(soa.serial().get(), 2024010100);
    assert!(soa.warnings().is_empty());

    assert!(!is_valid_soa_content(
        r"ns1.example.com john\046doe.example.com 1 2 3 4 5"
    ));
}

#[test]
fn content_by_record_type() {
    subscribe();
    let table = RecordTypeTable::standard();

    assert!(validate_content("SOA", SOA_CONTENT, table).is_ok());
    assert!(validate_content("MX", "mail.example.com", table).is_ok());

    let error = validate_content("DS", "1 13 2 xyz", table).unwrap_err();
    assert!(matches!(error, ValidationError::Ds(_)));
    assert!(error.to_string().starts_with("invalid DS content"));

    assert!(matches!(
        validate_content("NOPE", "", table),
        Err(ValidationError::UnknownType(_))
    ));
}
