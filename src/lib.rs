//! # gsshaio
//!
//! A reader and writer for the GSSHA model's text formats.
//!
//! GSSHA projects are described by a family of fixed-grammar, line-oriented
//! files: channel input files, mapping tables, precipitation files, storm
//! pipe networks, and WMS gridded datasets. This crate parses each family
//! into typed records and serializes those records back to text that the
//! model accepts byte-for-byte.
//!
//! ## Testing
//!
//! Integration tests are driven by the canonical sample files in
//! `docs/samples`. Round-trip stability (`parse` then `serialize` yields the
//! input) is the contract most tests assert.

pub mod gssha;
