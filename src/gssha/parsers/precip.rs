//! Precipitation file grammar.
//!
//! One `EVENT` chunk per event, re-chunked with the event vocabulary. Value
//! lines carry one value per declared gage; the k-th value belongs to the
//! k-th `COORD` line.

use chrono::NaiveDate;

use crate::gssha::ast::precip::{PrecipEvent, PrecipFile, PrecipGage, PrecipValue, PrecipValueKind};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::error::ParseError;
use crate::gssha::lexing::scan::fields;
use crate::gssha::lexing::scan::tokens;
use crate::gssha::lexing::{chunk, Chunk};
use crate::gssha::parsers::support::{float_field, int_field, tok};
use crate::gssha::replace::ReplaceParamSet;

const EVENT_KEYWORDS: &[&str] = &[
    "EVENT", "NRPDS", "NRGAG", "COORD", "GAGES", "ACCUM", "RATES", "RADAR",
];

const VALUE_CARDS: &[&str] = &["GAGES", "ACCUM", "RATES", "RADAR"];

/// Parse a whole precipitation file.
pub fn parse(
    source: &str,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<PrecipFile, ParseError> {
    let chunks = chunk(&["EVENT"], source.lines())?;

    let mut events = Vec::new();
    for event_chunk in chunks.get("EVENT") {
        events.push(parse_event(event_chunk, params, diag)?);
    }

    Ok(PrecipFile { events })
}

/// Parse one `EVENT` chunk.
pub fn parse_event(
    event_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<PrecipEvent, ParseError> {
    let chunks = chunk(EVENT_KEYWORDS, event_chunk.lines.iter().map(String::as_str))?;

    let header = chunks
        .get("EVENT")
        .first()
        .ok_or_else(|| ParseError::malformed("event block has no EVENT line"))?;
    let description = fields(header.head())
        .get(1)
        .map(|f| f.text().to_string())
        .unwrap_or_default();

    let nr_gag = required_count(chunks.get("NRGAG").first(), "NRGAG")?;
    let nr_pds = required_count(chunks.get("NRPDS").first(), "NRPDS")?;

    let mut gages = Vec::new();
    for coord in chunks.get("COORD") {
        let coord_fields = fields(coord.head());
        let texts: Vec<String> = coord_fields.iter().map(|f| f.text().to_string()).collect();
        gages.push(PrecipGage {
            x: float_field(tok(&texts, 1, "COORD x")?, "COORD x", params)?,
            y: float_field(tok(&texts, 2, "COORD y")?, "COORD y", params)?,
            // A blank description is tolerated.
            description: texts.get(3).cloned().unwrap_or_default(),
        });
    }

    if nr_gag != gages.len() as i64 {
        diag.warn(format!(
            "NRGAG declares {} gages but {} COORD lines are present",
            nr_gag,
            gages.len()
        ));
    }

    let mut values = Vec::new();
    for card in VALUE_CARDS {
        for value_chunk in chunks.get(card) {
            parse_value_line(value_chunk, &gages, params, &mut values)?;
        }
    }

    Ok(PrecipEvent {
        description,
        nr_gag,
        nr_pds,
        gages,
        values,
    })
}

fn required_count(card: Option<&Chunk>, name: &str) -> Result<i64, ParseError> {
    let card = card.ok_or_else(|| ParseError::malformed(format!("event has no {} card", name)))?;
    let fields = tokens(card.head());
    int_field(tok(&fields, 1, name)?, name, None)
}

/// Parse one typed value line into normalized per-gage values.
fn parse_value_line(
    value_chunk: &Chunk,
    gages: &[PrecipGage],
    params: Option<&ReplaceParamSet>,
    out: &mut Vec<PrecipValue>,
) -> Result<(), ParseError> {
    let line_fields = tokens(value_chunk.head());
    let keyword = tok(&line_fields, 0, "value line type")?;
    let kind = PrecipValueKind::from_keyword(keyword)
        .ok_or_else(|| ParseError::malformed(format!("unknown value line type {:?}", keyword)))?;

    let year = int_field(tok(&line_fields, 1, "value year")?, "value year", None)?;
    let month = int_field(tok(&line_fields, 2, "value month")?, "value month", None)?;
    let day = int_field(tok(&line_fields, 3, "value day")?, "value day", None)?;
    let hour = int_field(tok(&line_fields, 4, "value hour")?, "value hour", None)?;
    let minute = int_field(tok(&line_fields, 5, "value minute")?, "value minute", None)?;

    let date_time = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .and_then(|d| d.and_hms_opt(hour as u32, minute as u32, 0))
        .ok_or_else(|| {
            ParseError::malformed(format!(
                "invalid timestamp {} {} {} {} {}",
                year, month, day, hour, minute
            ))
        })?;

    let value_tokens = &line_fields[6..];
    if value_tokens.len() > gages.len() {
        return Err(ParseError::malformed(format!(
            "value line carries {} values but only {} gages are declared",
            value_tokens.len(),
            gages.len()
        )));
    }

    for (gage, token) in value_tokens.iter().enumerate() {
        out.push(PrecipValue {
            kind,
            date_time,
            gage,
            value: float_field(token, "gage value", params)?,
        });
    }

    Ok(())
}
