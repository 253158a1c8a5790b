//! Typed records for each file family.
//!
//! Records are the durable output of the read path and the required input
//! of the write path. Each family gets one module; nested structure is
//! modeled with tagged unions so an unhandled variant is a compile error,
//! not a silent fall-through.

pub mod channel;
pub mod dataset;
pub mod map_table;
pub mod pipe;
pub mod precip;
