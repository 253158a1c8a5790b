//! Integration tests for the precipitation family.

use chrono::{Datelike, Timelike};
use gsshaio::gssha::ast::precip::PrecipValueKind;
use gsshaio::gssha::diagnostics::Diagnostics;
use gsshaio::gssha::formats::precip as writer;
use gsshaio::gssha::parsers::precip as parser;
use std::fs;

fn read_sample() -> String {
    fs::read_to_string("docs/samples/sample.gag").expect("failed to read sample precipitation file")
}

#[test]
fn test_sample_round_trip_is_byte_identical() {
    let source = read_sample();
    let mut diag = Diagnostics::new();
    let file = parser::parse(&source, None, &mut diag).unwrap();
    let text = writer::serialize(&file, None, &mut diag);
    assert_eq!(text, source);
}

/// The canonical end-to-end scenario: a one-gage event parses to exactly
/// one gage and one value, and re-serializes with 3-decimal formatting.
#[test]
fn test_single_gage_event_end_to_end() {
    let source =
        "EVENT \"e1\"\nNRGAG 1\nNRPDS 1\nCOORD 10.0 20.0 \"g1\"\nGAGES 2001 01 01 00 00 5.250\n";
    let mut diag = Diagnostics::new();
    let file = parser::parse(source, None, &mut diag).unwrap();

    let event = &file.events[0];
    assert_eq!(event.nr_gag, 1);
    assert_eq!(event.nr_pds, 1);
    assert_eq!(event.gages.len(), 1);
    assert_eq!((event.gages[0].x, event.gages[0].y), (10.0, 20.0));

    let value = &event.values[0];
    assert_eq!(value.kind, PrecipValueKind::Gages);
    assert_eq!(
        (
            value.date_time.year(),
            value.date_time.month(),
            value.date_time.day(),
            value.date_time.hour(),
            value.date_time.minute()
        ),
        (2001, 1, 1, 0, 0)
    );
    assert_eq!(value.value, 5.25);

    let text = writer::serialize(&file, None, &mut diag);
    let value_line = text.lines().last().unwrap();
    insta::assert_snapshot!(value_line, @"GAGES 2001 01 01 00 00    5.250");
}

#[test]
fn test_values_pair_with_gages_by_column() {
    let source = read_sample();
    let mut diag = Diagnostics::new();
    let file = parser::parse(&source, None, &mut diag).unwrap();

    let event = &file.events[0];
    assert_eq!(event.gages.len(), 2);
    assert_eq!(event.values.len(), 4); // 2 lines x 2 gages

    // Column order is gage order.
    assert_eq!(event.values[0].gage, 0);
    assert_eq!(event.values[0].value, 1.0);
    assert_eq!(event.values[1].gage, 1);
    assert_eq!(event.values[1].value, 2.0);
}

#[test]
fn test_mixed_value_kinds_round_trip() {
    let source = "\
EVENT \"mixed\"
NRGAG 1
NRPDS 2
COORD 0.000000 0.000000 \"a\"
ACCUM 2001 01 01 00 00    0.100
RATES 2001 01 01 00 15    0.400
";
    let mut diag = Diagnostics::new();
    let file = parser::parse(source, None, &mut diag).unwrap();
    let text = writer::serialize(&file, None, &mut diag);
    assert_eq!(text, source);
}
