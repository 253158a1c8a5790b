//! The GSSHA text-format toolkit.
//!
//! Modules are layered the same way the data flows:
//!
//! - [`lexing`] — splits a raw line stream into keyword-delimited chunks and
//!   scans single lines into fields.
//! - [`parsers`] — one grammar parser per file family, each re-invoking the
//!   chunker with a narrower keyword vocabulary for nested structure.
//! - [`ast`] — the typed records produced by the parsers.
//! - [`formats`] — serializers that reproduce the exact column layout of
//!   each family, including the mapping-table unpivot.
//! - [`replace`] — the replacement-parameter mechanism that intercepts every
//!   numeric field on read and write.
//! - [`pairing`] — the two record-assembly strategies (positional zip and
//!   keyed join) used to associate independently parsed record lists.
//! - [`processor`] — format-family dispatch for callers that work with
//!   whole files.

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod pairing;
pub mod parsers;
pub mod processor;
pub mod replace;
