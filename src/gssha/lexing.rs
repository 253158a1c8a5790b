//! Lexing layer: the keyword chunker and the per-line field scanner.
//!
//! GSSHA files are line-oriented. The first whitespace-delimited token of a
//! line is its discriminant; a recognized discriminant opens a new chunk and
//! every following non-keyword line belongs to that chunk. Grammar parsers
//! re-invoke the chunker on a chunk's own lines with a narrower keyword
//! vocabulary to expose nested structure.

pub mod chunk;
pub mod scan;

pub use chunk::{chunk, Chunk, ChunkMap};
pub use scan::{fields, tokens, ScannedField};
