//! WMS gridded dataset grammar.
//!
//! One header chunk followed by `TS` time-step chunks. The flat cell array
//! of each time step is reshaped row-major with the externally supplied
//! column count; the file itself never carries the grid width.

use crate::gssha::ast::dataset::{DatasetKind, TimeStep, WmsDataset};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::error::ParseError;
use crate::gssha::lexing::scan::tokens;
use crate::gssha::lexing::{chunk, Chunk};
use crate::gssha::parsers::support::{float_field, int_field, tok};

const FILE_KEYWORDS: &[&str] = &["DATASET", "TS"];

const HEADER_KEYWORDS: &[&str] = &[
    "DATASET", "OBJTYPE", "VECTYPE", "BEGSCL", "BEGVEC", "OBJID", "ND", "NC", "NAME",
];

const END_DATASET_TAG: &str = "ENDDS";

/// Parse a whole WMS dataset file. `columns` is the grid width from the
/// project's mask raster.
pub fn parse(
    source: &str,
    columns: usize,
    diag: &mut Diagnostics,
) -> Result<WmsDataset, ParseError> {
    if columns == 0 {
        return Err(ParseError::malformed("grid column count must be positive"));
    }

    let chunks = chunk(FILE_KEYWORDS, source.lines())?;

    let header_chunk = chunks
        .get("DATASET")
        .first()
        .ok_or_else(|| ParseError::malformed("dataset file has no DATASET header"))?;
    let mut dataset = parse_header(header_chunk)?;

    for ts_chunk in chunks.get("TS") {
        dataset
            .time_steps
            .push(parse_time_step(ts_chunk, columns, dataset.number_cells, diag)?);
    }

    Ok(dataset)
}

fn parse_header(header_chunk: &Chunk) -> Result<WmsDataset, ParseError> {
    let chunks = chunk(HEADER_KEYWORDS, header_chunk.lines.iter().map(String::as_str))?;

    let card = |name: &str| -> Option<String> {
        chunks
            .get(name)
            .first()
            .and_then(|c| tokens(c.head()).get(1).cloned())
    };

    let kind = if chunks.contains("BEGSCL") {
        DatasetKind::Scalar {
            object_type: card("OBJTYPE")
                .ok_or_else(|| ParseError::malformed("scalar dataset has no OBJTYPE card"))?,
        }
    } else if chunks.contains("BEGVEC") {
        DatasetKind::Vector {
            vector_type: card("VECTYPE")
                .ok_or_else(|| ParseError::malformed("vector dataset has no VECTYPE card"))?,
        }
    } else {
        return Err(ParseError::malformed(
            "dataset header has neither BEGSCL nor BEGVEC",
        ));
    };

    let number_data = card("ND")
        .ok_or_else(|| ParseError::malformed("dataset header has no ND card"))
        .and_then(|v| int_field(&v, "ND", None))?;
    let number_cells = card("NC")
        .ok_or_else(|| ParseError::malformed("dataset header has no NC card"))
        .and_then(|v| int_field(&v, "NC", None))?;
    let object_id = card("OBJID")
        .map(|v| int_field(&v, "OBJID", None))
        .transpose()?;
    let name = card("NAME").unwrap_or_default();

    Ok(WmsDataset {
        kind,
        object_id,
        number_data,
        number_cells,
        name,
        time_steps: Vec::new(),
    })
}

/// Parse one `TS` chunk: status flag and timestamp on the head line, then
/// an optional status array and the flat cell array, one value per line.
fn parse_time_step(
    ts_chunk: &Chunk,
    columns: usize,
    number_cells: i64,
    diag: &mut Diagnostics,
) -> Result<TimeStep, ParseError> {
    let head_fields = tokens(ts_chunk.head());
    let i_status = int_field(tok(&head_fields, 1, "TS status flag")?, "TS status flag", None)?;
    let timestamp = float_field(
        tok(&head_fields, 2, "TS timestamp")?,
        "TS timestamp",
        None,
    )?;

    let cells = number_cells as usize;

    // The dataset terminator rides along as the last continuation line of
    // the final time step.
    let mut lines: Vec<&String> = ts_chunk.tail().iter().collect();
    if lines
        .last()
        .is_some_and(|line| line.contains(END_DATASET_TAG))
    {
        lines.pop();
    }

    let expected = if i_status == 1 { cells * 2 } else { cells };
    if lines.len() != expected {
        return Err(ParseError::malformed(format!(
            "time step carries {} value lines, expected {}",
            lines.len(),
            expected
        )));
    }

    let mut status = Vec::new();
    let value_lines = if i_status == 1 {
        for line in &lines[..cells] {
            status.push(int_field(line.trim(), "cell status", None)?);
        }
        &lines[cells..]
    } else {
        &lines[..]
    };

    let mut flat = Vec::with_capacity(cells);
    for line in value_lines {
        flat.push(float_field(line.trim(), "cell value", None)?);
    }

    if cells % columns != 0 {
        diag.warn(format!(
            "cell count {} does not divide evenly into {} columns",
            cells, columns
        ));
    }

    let values = flat.chunks(columns).map(<[f64]>::to_vec).collect();

    Ok(TimeStep {
        i_status,
        timestamp,
        status,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
DATASET
OBJTYPE \"mesh2d\"
BEGSCL
OBJID 1
ND 6
NC 6
NAME \"depth\"
TS 0 0.000000
0.000000
0.100000
0.200000
0.300000
0.400000
0.500000
TS 1 1.000000
1
1
1
1
1
1
0.000000
0.150000
0.250000
0.350000
0.450000
0.550000
ENDDS
";

    #[test]
    fn test_parse_scalar_dataset() {
        let mut diag = Diagnostics::new();
        let dataset = parse(SAMPLE, 3, &mut diag).unwrap();

        assert_eq!(
            dataset.kind,
            DatasetKind::Scalar {
                object_type: "mesh2d".to_string()
            }
        );
        assert_eq!(dataset.object_id, Some(1));
        assert_eq!(dataset.number_cells, 6);
        assert_eq!(dataset.name, "depth");
        assert_eq!(dataset.time_steps.len(), 2);

        let first = &dataset.time_steps[0];
        assert_eq!(first.i_status, 0);
        assert!(first.status.is_empty());
        assert_eq!(first.values, vec![vec![0.0, 0.1, 0.2], vec![0.3, 0.4, 0.5]]);

        let second = &dataset.time_steps[1];
        assert_eq!(second.i_status, 1);
        assert_eq!(second.status, vec![1, 1, 1, 1, 1, 1]);
        assert_eq!(second.timestamp, 1.0);
        assert_eq!(second.cell_count(), 6);
    }

    #[test]
    fn test_wrong_cell_count_is_fatal() {
        let source = "DATASET\nOBJTYPE \"mesh2d\"\nBEGSCL\nND 1\nNC 3\nNAME \"d\"\nTS 0 0.0\n1.0\n";
        let mut diag = Diagnostics::new();
        let err = parse(source, 3, &mut diag).unwrap_err();
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_zero_columns_is_rejected() {
        let mut diag = Diagnostics::new();
        assert!(parse(SAMPLE, 0, &mut diag).is_err());
    }
}
