//! Precipitation file records.
//!
//! A precipitation file holds one or more events. Each event declares its
//! gages (`COORD` lines) and a series of typed value lines; the k-th value
//! on a line belongs to the k-th declared gage. Records are normalized: one
//! [`PrecipValue`] per (line, gage) pair.

use chrono::NaiveDateTime;

/// A parsed precipitation file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrecipFile {
    pub events: Vec<PrecipEvent>,
}

/// One precipitation event.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrecipEvent {
    pub description: String,
    pub nr_gag: i64,
    pub nr_pds: i64,
    pub gages: Vec<PrecipGage>,
    pub values: Vec<PrecipValue>,
}

/// One rain gage.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrecipGage {
    pub x: f64,
    pub y: f64,
    pub description: String,
}

/// The value-line type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PrecipValueKind {
    Gages,
    Accum,
    Rates,
    Radar,
}

impl PrecipValueKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            PrecipValueKind::Gages => "GAGES",
            PrecipValueKind::Accum => "ACCUM",
            PrecipValueKind::Rates => "RATES",
            PrecipValueKind::Radar => "RADAR",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "GAGES" => Some(PrecipValueKind::Gages),
            "ACCUM" => Some(PrecipValueKind::Accum),
            "RATES" => Some(PrecipValueKind::Rates),
            "RADAR" => Some(PrecipValueKind::Radar),
            _ => None,
        }
    }
}

/// One normalized value: kind, timestamp, gage (0-based index into the
/// event's gage list) and the value itself.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrecipValue {
    pub kind: PrecipValueKind,
    pub date_time: NaiveDateTime,
    pub gage: usize,
    pub value: f64,
}
