//! Serializers, one per file family.
//!
//! Output is compared byte-for-byte by downstream consumers, so every
//! padding here is part of the contract. All serializers route scalar
//! fields through [`value`] so replacement parameters and degraded
//! renderings are handled uniformly.

pub mod channel;
pub mod dataset;
pub mod map_table;
pub mod pipe;
pub mod precip;
pub mod value;
