//! Edge case tests for the EDF header codec and the annotation scrubber

use chrono::NaiveDate;
use edfveil::core::annotation::{
    parse_document, scrub, write_document, MetadataConsistency, ScrubMode, ScrubOptions,
};
use edfveil::core::header::{shift_start_date, HeaderRecord};
use edfveil::core::registry::DayOffset;
use edfveil::domain::EdfveilError;

fn header_with(patient: &str, date: &str, time: &str) -> HeaderRecord {
    let mut bytes = vec![b' '; 256];
    bytes[8..8 + patient.len()].copy_from_slice(patient.as_bytes());
    bytes[168..176].copy_from_slice(date.as_bytes());
    bytes[176..184].copy_from_slice(time.as_bytes());
    HeaderRecord::from_bytes(bytes).unwrap()
}

#[test]
fn test_leap_day_shifts_by_day_count() {
    let header = header_with("5Y4Z", "29.02.20", "10.30.00");
    let (_, shift) = shift_start_date(&header, DayOffset::new(-400).unwrap()).unwrap();
    assert_eq!(shift.new_date, NaiveDate::from_ymd_opt(2019, 1, 25).unwrap());
}

#[test]
fn test_month_rollover() {
    let header = header_with("5WPR", "01.03.19", "08.15.30");
    let (shifted, shift) = shift_start_date(&header, DayOffset::new(37).unwrap()).unwrap();
    assert_eq!(shift.new_date, NaiveDate::from_ymd_opt(2019, 4, 7).unwrap());
    assert_eq!(&shifted.as_bytes()[168..176], b"07.04.19");
}

#[test]
fn test_year_pivot_low_side() {
    // yy=85 is 1985, the oldest representable year
    let header = header_with("P1", "15.06.85", "00.00.00");
    assert_eq!(
        header.start_date().unwrap(),
        NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()
    );

    // A negative shift that would land in 1984 is rejected
    let err = shift_start_date(&header, DayOffset::new(-200).unwrap()).unwrap_err();
    assert!(matches!(err, EdfveilError::FormatInvariant(_)));
}

#[test]
fn test_year_pivot_high_side() {
    // yy=84 is 2084, the newest representable year
    let header = header_with("P1", "15.06.84", "00.00.00");
    assert_eq!(
        header.start_date().unwrap(),
        NaiveDate::from_ymd_opt(2084, 6, 15).unwrap()
    );

    let err = shift_start_date(&header, DayOffset::new(300).unwrap()).unwrap_err();
    assert!(matches!(err, EdfveilError::FormatInvariant(_)));
}

#[test]
fn test_shift_crossing_the_pivot_wraps_the_two_digit_year() {
    // 1999-12-20 + 20 days = 2000-01-09, serialized yy drops to 00
    let header = header_with("P1", "20.12.99", "23.59.59");
    let (shifted, shift) = shift_start_date(&header, DayOffset::new(20).unwrap()).unwrap();
    assert_eq!(shift.new_date, NaiveDate::from_ymd_opt(2000, 1, 9).unwrap());
    assert_eq!(&shifted.as_bytes()[168..176], b"09.01.00");
}

#[test]
fn test_zero_offset_is_valid_but_rewrites_nothing_visible() {
    let header = header_with("P1", "01.03.19", "08.15.30");
    let (shifted, shift) = shift_start_date(&header, DayOffset::new(0).unwrap()).unwrap();
    assert_eq!(shift.original_date, shift.new_date);
    assert_eq!(shifted.as_bytes(), header.as_bytes());
}

#[test]
fn test_offset_bounds_enforced() {
    assert!(DayOffset::new(1095).is_ok());
    assert!(DayOffset::new(-1095).is_ok());
    assert!(DayOffset::new(1096).is_err());
    assert!(DayOffset::new(-1096).is_err());
}

#[test]
fn test_truncated_header_rejected() {
    let bytes = vec![b' '; 255];
    assert!(matches!(
        HeaderRecord::from_bytes(bytes),
        Err(EdfveilError::MalformedHeader(_))
    ));
}

#[test]
fn test_invalid_calendar_date_rejected() {
    let header = header_with("P1", "31.02.20", "00.00.00");
    assert!(matches!(
        shift_start_date(&header, DayOffset::new(1).unwrap()),
        Err(EdfveilError::MalformedHeader(_))
    ));
}

#[test]
fn test_multi_layer_document_is_flagged_not_failed() {
    let xml = r#"<annotations>
  <annotation layer="1" createTime="2020-08-20T18:24:35Z"/>
  <annotation layer="2" createTime="2020-08-20T18:25:00Z"/>
</annotations>"#;

    let doc = parse_document(xml).unwrap();
    let outcome = scrub(
        &doc,
        DayOffset::new(10).unwrap(),
        &ScrubOptions::default(),
    )
    .unwrap();

    assert!(outcome.layer_flag);
    assert_eq!(outcome.audit.layers, vec!["1".to_string(), "2".to_string()]);
    assert_eq!(outcome.audit.create_times_removed, 2);
}

#[test]
fn test_strict_metadata_mismatch_flagged() {
    let xml = r#"<annotations>
  <annotation layer="1" annotator="tech.a"/>
  <annotation layer="1" annotator="tech.b"/>
</annotations>"#;

    let doc = parse_document(xml).unwrap();
    let strict = ScrubOptions {
        mode: ScrubMode::Remove,
        metadata_consistency: MetadataConsistency::Strict,
        expected_original_date: None,
    };
    let outcome = scrub(&doc, DayOffset::new(0).unwrap(), &strict).unwrap();
    assert!(outcome.audit.metadata_mismatch);
    // First-seen value is the canonical audit value
    assert_eq!(outcome.audit.annotator.as_deref(), Some("tech.a"));

    // The default trusting mode records the first value without flagging
    let outcome = scrub(&doc, DayOffset::new(0).unwrap(), &ScrubOptions::default()).unwrap();
    assert!(!outcome.audit.metadata_mismatch);
}

#[test]
fn test_shift_mode_rejects_unparseable_create_time() {
    let xml = r#"<annotations>
  <annotation layer="1" createTime="yesterday-ish"/>
</annotations>"#;

    let doc = parse_document(xml).unwrap();
    let options = ScrubOptions {
        mode: ScrubMode::Shift,
        metadata_consistency: MetadataConsistency::Trust,
        expected_original_date: None,
    };
    assert!(matches!(
        scrub(&doc, DayOffset::new(5).unwrap(), &options),
        Err(EdfveilError::MalformedDocument(_))
    ));
}

#[test]
fn test_unknown_attributes_survive_the_round_trip() {
    let xml = r#"<annotations>
  <annotation layer="1" severity="3" reviewed="true" createTime="2020-08-20T18:24:35Z"/>
</annotations>"#;

    let doc = parse_document(xml).unwrap();
    let outcome = scrub(
        &doc,
        DayOffset::new(0).unwrap(),
        &ScrubOptions::default(),
    )
    .unwrap();
    let written = write_document(&outcome.document).unwrap();

    assert!(written.contains(r#"severity="3""#));
    assert!(written.contains(r#"reviewed="true""#));
    assert!(!written.contains("createTime"));
}

#[test]
fn test_empty_document_scrubs_to_empty() {
    let doc = parse_document("<annotations/>").unwrap();
    let outcome = scrub(
        &doc,
        DayOffset::new(42).unwrap(),
        &ScrubOptions::default(),
    )
    .unwrap();
    assert!(outcome.document.entries.is_empty());
    assert!(!outcome.layer_flag);
}
