//! Integration tests for the storm pipe network family.

use gsshaio::gssha::diagnostics::Diagnostics;
use gsshaio::gssha::formats::pipe as writer;
use gsshaio::gssha::pairing::join_by_key;
use gsshaio::gssha::parsers::pipe as parser;
use std::fs;

fn read_sample() -> String {
    fs::read_to_string("docs/samples/sample.spn").expect("failed to read sample pipe network")
}

#[test]
fn test_sample_round_trip_is_byte_identical() {
    let source = read_sample();
    let mut diag = Diagnostics::new();
    let network = parser::parse(&source, None, &mut diag).unwrap();
    let text = writer::serialize(&network, None, &mut diag);
    assert_eq!(text, source);
}

#[test]
fn test_sample_structure() {
    let source = read_sample();
    let mut diag = Diagnostics::new();
    let network = parser::parse(&source, None, &mut diag).unwrap();

    assert_eq!(network.connections.len(), 1);
    assert_eq!(network.super_junctions.len(), 2);
    assert_eq!(network.super_links.len(), 1);

    let slink = &network.super_links[0];
    assert_eq!(slink.nodes.len(), 2);
    assert_eq!(slink.pipes.len(), 1);
    assert_eq!(slink.pipes[0].xsec_type, 1);
    assert_eq!(slink.pipes[0].length, 30.0);
}

/// Pipe connectivity is keyed on the slink number, not on list position.
#[test]
fn test_keyed_pairing_tolerates_reordering() {
    let source = "\
CONNECT  2  3  4
CONNECT  1  1  2
SLINK   1      0
NODE  1  1.00  1.00  1.000000  0  1  1  1.000000  1.000000
SLINK   2      0
NODE  1  1.00  1.00  1.000000  0  1  1  1.000000  1.000000
";
    let mut diag = Diagnostics::new();
    let network = parser::parse(source, None, &mut diag).unwrap();
    assert!(diag.is_empty());

    let pairs = join_by_key(
        &network.super_links,
        &network.connections,
        |l| l.number,
        |c| c.slink_number,
        "slink connectivity",
        &mut diag,
    );

    // Slink 1 finds the second CONNECT record, slink 2 the first.
    assert_eq!(pairs[0].1.unwrap().up_sjunc, 1);
    assert_eq!(pairs[1].1.unwrap().up_sjunc, 3);
}
