//! Grammar parsers, one per file family.
//!
//! Every parser follows the same pattern: chunk the input with the family's
//! keyword vocabulary, then interpret each chunk by keyword — re-invoking
//! the chunker on a chunk's own lines with a narrower vocabulary wherever
//! the grammar nests. A required field absent from its expected position is
//! a fatal [`ParseError`](crate::gssha::error::ParseError); recoverable
//! conditions go through the diagnostics channel.

pub mod channel;
pub mod dataset;
pub mod map_table;
pub mod pipe;
pub mod precip;

mod support;
