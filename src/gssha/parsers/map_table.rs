//! Mapping-table file grammar.
//!
//! Header line, optional `NUM_*` globals, an `ID` line declaring the
//! variable list, then index rows parsed by fixed character columns (index
//! in 0..6, descriptions in 6..46 and 46..86, values whitespace-split from
//! column 86 on). The two layered soil tables accumulate three consecutive
//! value lines into one row. `CONTAMINANT_TRANSPORT` and `SEDIMENTS` have
//! their own non-generic layouts.

use crate::gssha::ast::map_table::{
    is_layered, Contaminant, IndexMapDecl, IndexRow, IndexedTable, MapTable, MapTableFile,
    MapTableKind, RowValues, Sediment, TableGlobals,
};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::error::ParseError;
use crate::gssha::lexing::scan::tokens;
use crate::gssha::lexing::{chunk, Chunk};
use crate::gssha::parsers::support::{float_field, int_field, tok};
use crate::gssha::replace::ReplaceParamSet;

/// Table keywords that use the generic indexed layout.
pub const GENERIC_TABLES: &[&str] = &[
    "ROUGHNESS",
    "INTERCEPTION",
    "RETENTION",
    "GREEN_AMPT_INFILTRATION",
    "GREEN_AMPT_INITIAL_SOIL_MOISTURE",
    "RICHARDS_EQN_INFILTRATION_BROOKS",
    "RICHARDS_EQN_INFILTRATION_HAVERCAMP",
    "EVAPOTRANSPIRATION",
    "WELL_TABLE",
    "OVERLAND_BOUNDARY",
    "TIME_SERIES_INDEX",
    "GROUNDWATER",
    "GROUNDWATER_BOUNDARY",
    "AREA_REDUCTION",
    "WETLAND_PROPERTIES",
    "MULTI_LAYER_SOIL",
    "SOIL_EROSION_PROPS",
];

const NUM_VARS: &[&str] = &["NUM_IDS", "MAX_NUMBER_CELLS", "NUM_SED", "MAX_SOIL_ID"];

/// Placeholder column labels that are not variables.
const IGNORE: &[&str] = &["ID", "DESCRIPTION1", "DESCRIPTION2"];

/// The only variables `SOIL_EROSION_PROPS` reads literally from its header.
const SOIL_EROSION: &[&str] = &[
    "SPLASH_COEF",
    "DETACH_COEF",
    "DETACH_EXP",
    "DETACH_CRIT",
    "SED_COEF",
];

/// Sentinel appended to short layers of the 3-layer tables.
const LAYER_PAD: f64 = -9999.0;

/// Parse a whole mapping-table file.
pub fn parse(
    source: &str,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<MapTableFile, ParseError> {
    let mut keywords: Vec<&str> = vec!["GSSHA_INDEX_MAP_TABLES", "INDEX_MAP"];
    keywords.extend_from_slice(GENERIC_TABLES);
    keywords.push("CONTAMINANT_TRANSPORT");
    keywords.push("SEDIMENTS");

    let chunks = chunk(&keywords, source.lines())?;

    let mut index_maps = Vec::new();
    for decl in chunks.get("INDEX_MAP") {
        index_maps.push(parse_index_map(decl)?);
    }

    let mut tables = Vec::new();

    for name in GENERIC_TABLES {
        for table_chunk in chunks.get(name) {
            if let Some(table) = parse_indexed_table(name, table_chunk, params, diag)? {
                tables.push(table);
            }
        }
    }
    for table_chunk in chunks.get("CONTAMINANT_TRANSPORT") {
        if let Some(table) = parse_contaminant_table(table_chunk, params, diag)? {
            tables.push(table);
        }
    }
    for table_chunk in chunks.get("SEDIMENTS") {
        if let Some(table) = parse_sediment_table(table_chunk, params, diag)? {
            tables.push(table);
        }
    }

    // Drop tables whose index map was never declared.
    let known: Vec<&str> = index_maps.iter().map(|m| m.name.as_str()).collect();
    tables.retain(|table| {
        let missing: Option<&str> = match &table.kind {
            MapTableKind::Indexed(_) => table
                .index_map_name
                .as_deref()
                .filter(|name| !known.contains(name)),
            MapTableKind::Contaminants(contaminants) => contaminants
                .iter()
                .map(|c| c.index_map_name.as_str())
                .find(|name| !known.contains(name)),
            MapTableKind::Sediments(_) => None,
        };
        if let Some(name) = missing {
            diag.warn(format!(
                "index map {:?} for table {} is not declared; table skipped",
                name, table.name
            ));
            false
        } else {
            true
        }
    });

    // Tables are kept (and later written) in name order.
    tables.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(MapTableFile { index_maps, tables })
}

/// Parse one `INDEX_MAP "<path>" "<name>"` declaration. The path is
/// reduced to its final component.
fn parse_index_map(decl: &Chunk) -> Result<IndexMapDecl, ParseError> {
    let fields = tokens(decl.head());
    let path = tok(&fields, 1, "INDEX_MAP path")?;
    let name = tok(&fields, 2, "INDEX_MAP name")?;

    let filename = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_string();

    Ok(IndexMapDecl {
        filename,
        name: name.to_string(),
    })
}

/// Parse a generic indexed table; `None` when the table is semantically
/// absent (empty index map name).
fn parse_indexed_table(
    name: &str,
    table_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<Option<MapTable>, ParseError> {
    let header = tokens(table_chunk.head());
    let index_map_name = tok(&header, 1, "table index map name")?.to_string();

    if index_map_name.is_empty() {
        diag.info(format!(
            "no index map assigned to {} table; table not read",
            name
        ));
        return Ok(None);
    }

    let mut globals = TableGlobals::default();
    let mut variables: Vec<String> = Vec::new();
    let mut rows: Vec<IndexRow> = Vec::new();

    // Accumulator for the layered tables.
    let layered = is_layered(name);
    let mut pending: Option<(IndexRow, Vec<Vec<f64>>)> = None;

    for line in table_chunk.tail() {
        let first = line.split_whitespace().next().unwrap_or_default();

        if NUM_VARS.contains(&first) {
            set_global(&mut globals, first, line)?;
        } else if first == "ID" {
            variables = build_var_list(&tokens(line), name, &globals)?;
        } else if layered {
            match pending.as_mut() {
                None => {
                    let row = parse_index_row(line, params)?;
                    let RowValues::Single(first_layer) = row.values.clone() else {
                        unreachable!()
                    };
                    pending = Some((row, vec![pad_layer(first_layer, variables.len())]));
                }
                Some((_, layers)) => {
                    let layer = value_tokens(line, params)?;
                    layers.push(pad_layer(layer, variables.len()));
                }
            }
            if let Some((row, layers)) = pending.take() {
                if layers.len() == 3 {
                    rows.push(IndexRow {
                        values: RowValues::Layered(layers),
                        ..row
                    });
                } else {
                    pending = Some((row, layers));
                }
            }
        } else {
            rows.push(parse_index_row(line, params)?);
        }
    }

    if pending.is_some() {
        return Err(ParseError::malformed(format!(
            "{} table's value-line count is not a multiple of 3",
            name
        )));
    }

    Ok(Some(MapTable {
        name: name.to_string(),
        index_map_name: Some(index_map_name),
        globals,
        kind: MapTableKind::Indexed(IndexedTable { variables, rows }),
    }))
}

fn set_global(globals: &mut TableGlobals, name: &str, line: &str) -> Result<(), ParseError> {
    let fields = tokens(line);
    let value = int_field(tok(&fields, 1, name)?, name, None)?;
    match name {
        "NUM_IDS" => globals.num_ids = Some(value),
        "MAX_NUMBER_CELLS" => globals.max_number_cells = Some(value),
        "NUM_SED" => globals.num_sed = Some(value),
        "MAX_SOIL_ID" => globals.max_soil_id = Some(value),
        _ => unreachable!("not a table global: {}", name),
    }
    Ok(())
}

/// Build the variable list from an `ID` header line.
///
/// Placeholders are filtered out; for `SOIL_EROSION_PROPS` only the fixed
/// allow-list is read literally and the declared sediment count appends one
/// `XSEDIMENT` slot per sediment.
fn build_var_list(
    header: &[String],
    table_name: &str,
    globals: &TableGlobals,
) -> Result<Vec<String>, ParseError> {
    let mut variables = Vec::new();

    if table_name == "SOIL_EROSION_PROPS" {
        let num_sed = globals.num_sed.ok_or_else(|| {
            ParseError::malformed("SOIL_EROSION_PROPS requires NUM_SED before its ID line")
        })?;
        for item in header {
            if SOIL_EROSION.contains(&item.as_str()) {
                variables.push(item.clone());
            }
        }
        for _ in 0..num_sed {
            variables.push("XSEDIMENT".to_string());
        }
    } else {
        for item in header {
            if !IGNORE.contains(&item.as_str()) {
                variables.push(item.clone());
            }
        }
    }

    Ok(variables)
}

/// Slice one value line by fixed character columns.
fn parse_index_row(line: &str, params: Option<&ReplaceParamSet>) -> Result<IndexRow, ParseError> {
    let index_text = slice_cols(line, 0, 6).trim();
    let index = int_field(index_text, "row index", None)?;

    let description1 = slice_cols(line, 6, 46).trim().to_string();
    let description2 = slice_cols(line, 46, 86).trim().to_string();

    let values = value_tokens(slice_cols(line, 86, line.len()), params)?;

    Ok(IndexRow {
        index,
        description1,
        description2,
        values: RowValues::Single(values),
    })
}

/// Whitespace-split numeric values with replacement preprocessing.
fn value_tokens(text: &str, params: Option<&ReplaceParamSet>) -> Result<Vec<f64>, ParseError> {
    text.split_whitespace()
        .map(|token| float_field(token, "table value", params))
        .collect()
}

fn pad_layer(mut layer: Vec<f64>, width: usize) -> Vec<f64> {
    while layer.len() < width {
        layer.push(LAYER_PAD);
    }
    layer
}

/// Character-column slice tolerant of short lines.
fn slice_cols(line: &str, start: usize, end: usize) -> &str {
    let len = line.len();
    let start = start.min(len);
    let end = end.clamp(start, len);
    line.get(start..end).unwrap_or_default()
}

/// Parse a `CONTAMINANT_TRANSPORT` table; `None` when no contaminants are
/// declared.
fn parse_contaminant_table(
    table_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<Option<MapTable>, ParseError> {
    let count_line = table_chunk
        .lines
        .get(1)
        .ok_or_else(|| ParseError::malformed("CONTAMINANT_TRANSPORT has no NUM_CONTAM line"))?;
    let count_fields = tokens(count_line);
    if tok(&count_fields, 0, "NUM_CONTAM")? != "NUM_CONTAM" {
        return Err(ParseError::malformed(
            "CONTAMINANT_TRANSPORT must declare NUM_CONTAM on its second line",
        ));
    }
    let num_contam = int_field(tok(&count_fields, 1, "NUM_CONTAM")?, "NUM_CONTAM", None)?;

    if num_contam == 0 {
        diag.info(
            "no contaminants in the CONTAMINANT_TRANSPORT table (NUM_CONTAM = 0); table not read",
        );
        return Ok(None);
    }

    let globals = TableGlobals {
        num_contam: Some(num_contam),
        ..TableGlobals::default()
    };

    let mut contaminants: Vec<Contaminant> = Vec::new();

    for line in table_chunk.tail().iter().skip(1) {
        let first = line.split_whitespace().next().unwrap_or_default();

        if first.starts_with('"') {
            // A new contaminant header: "name" "indexMapName" outputPath
            let fields = tokens(line);
            contaminants.push(Contaminant {
                name: tok(&fields, 0, "contaminant name")?.to_string(),
                index_map_name: tok(&fields, 1, "contaminant index map")?.to_string(),
                output_path: tok(&fields, 2, "contaminant output path")?.to_string(),
                precip_conc: 0.0,
                partition: 0.0,
                num_ids: None,
                table: IndexedTable {
                    variables: Vec::new(),
                    rows: Vec::new(),
                },
            });
        } else {
            let current = contaminants.last_mut().ok_or_else(|| {
                ParseError::malformed(format!(
                    "CONTAMINANT_TRANSPORT line before any contaminant header: {}",
                    line.trim()
                ))
            })?;

            match first {
                "PRECIP_CONC" => {
                    let fields = tokens(line);
                    current.precip_conc =
                        float_field(tok(&fields, 1, "PRECIP_CONC")?, "PRECIP_CONC", params)?;
                }
                "PARTITION" => {
                    let fields = tokens(line);
                    current.partition =
                        float_field(tok(&fields, 1, "PARTITION")?, "PARTITION", params)?;
                }
                "NUM_IDS" => {
                    let fields = tokens(line);
                    current.num_ids =
                        Some(int_field(tok(&fields, 1, "NUM_IDS")?, "NUM_IDS", None)?);
                }
                "ID" => {
                    current.table.variables =
                        build_var_list(&tokens(line), "CONTAMINANT_TRANSPORT", &globals)?;
                }
                _ => {
                    current.table.rows.push(parse_index_row(line, params)?);
                }
            }
        }
    }

    Ok(Some(MapTable {
        name: "CONTAMINANT_TRANSPORT".to_string(),
        index_map_name: None,
        globals,
        kind: MapTableKind::Contaminants(contaminants),
    }))
}

/// Parse a `SEDIMENTS` table; `None` when the declared count is zero.
fn parse_sediment_table(
    table_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<Option<MapTable>, ParseError> {
    let mut globals = TableGlobals::default();
    let mut sediments = Vec::new();

    for line in table_chunk.tail() {
        let first = line.split_whitespace().next().unwrap_or_default();

        match first {
            "NUM_SED" => {
                let fields = tokens(line);
                let count = int_field(tok(&fields, 1, "NUM_SED")?, "NUM_SED", None)?;
                if count == 0 {
                    diag.info("no sediments in the SEDIMENTS table (NUM_SED = 0); table not read");
                    return Ok(None);
                }
                globals.num_sed = Some(count);
            }
            // The column-header line starts with the word "Sediment".
            "Sediment" => {}
            _ => {
                let fields = tokens(line);
                sediments.push(Sediment {
                    description: tok(&fields, 0, "sediment description")?.to_string(),
                    specific_gravity: float_field(
                        tok(&fields, 1, "sediment specific gravity")?,
                        "sediment specific gravity",
                        params,
                    )?,
                    particle_diameter: float_field(
                        tok(&fields, 2, "sediment particle diameter")?,
                        "sediment particle diameter",
                        params,
                    )?,
                    output_filename: tok(&fields, 3, "sediment output filename")?.to_string(),
                });
            }
        }
    }

    Ok(Some(MapTable {
        name: "SEDIMENTS".to_string(),
        index_map_name: None,
        globals,
        kind: MapTableKind::Sediments(sediments),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> (MapTableFile, Diagnostics) {
        let mut diag = Diagnostics::new();
        let file = parse(source, None, &mut diag).unwrap();
        (file, diag)
    }

    fn roughness_source() -> String {
        let mut s = String::new();
        s.push_str("GSSHA_INDEX_MAP_TABLES\n");
        s.push_str("INDEX_MAP                \"maps/soils.idx\" \"soil_idx\"\n");
        s.push_str("ROUGHNESS \"soil_idx\"\n");
        s.push_str("NUM_IDS 2\n");
        s.push_str(
            "ID    DESCRIPTION1                            DESCRIPTION2                            ROUGH  \n",
        );
        s.push_str(&format!("{:<6}{:<40}{:<40}{}\n", 1, "clay", "", "0.035000   "));
        s.push_str(&format!("{:<6}{:<40}{:<40}{}\n", 2, "sand", "coarse", "0.020000   "));
        s
    }

    #[test]
    fn test_generic_table() {
        let (file, diag) = parse_ok(&roughness_source());
        assert!(diag.is_empty());

        assert_eq!(file.index_maps.len(), 1);
        assert_eq!(file.index_maps[0].name, "soil_idx");
        assert_eq!(file.index_maps[0].filename, "soils.idx");

        let table = &file.tables[0];
        assert_eq!(table.name, "ROUGHNESS");
        assert_eq!(table.globals.num_ids, Some(2));

        let MapTableKind::Indexed(indexed) = &table.kind else {
            panic!("expected indexed table");
        };
        assert_eq!(indexed.variables, vec!["ROUGH"]);
        assert_eq!(indexed.rows.len(), 2);
        assert_eq!(indexed.rows[0].index, 1);
        assert_eq!(indexed.rows[0].description1, "clay");
        assert_eq!(indexed.rows[1].description2, "coarse");
        assert_eq!(indexed.rows[0].values, RowValues::Single(vec![0.035]));
    }

    #[test]
    fn test_empty_index_map_name_short_circuits() {
        let source = "GSSHA_INDEX_MAP_TABLES\nROUGHNESS \"\"\nNUM_IDS 2\n";
        let (file, diag) = parse_ok(source);
        assert!(file.tables.is_empty());
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_undeclared_index_map_skips_table() {
        let source = "GSSHA_INDEX_MAP_TABLES\nROUGHNESS \"mystery_idx\"\nNUM_IDS 1\n";
        let (file, diag) = parse_ok(source);
        assert!(file.tables.is_empty());
        assert!(diag.iter().any(|d| d.message.contains("mystery_idx")));
    }

    #[test]
    fn test_multi_layer_grouping() {
        let mut s = String::new();
        s.push_str("GSSHA_INDEX_MAP_TABLES\n");
        s.push_str("INDEX_MAP                \"maps/soils.idx\" \"soil_idx\"\n");
        s.push_str("MULTI_LAYER_SOIL \"soil_idx\"\n");
        s.push_str(
            "ID    DESCRIPTION1                            DESCRIPTION2                            POROSITY  DEPTH  \n",
        );
        s.push_str(&format!("{:<6}{:<40}{:<40}0.400000   1.000000   \n", 1, "loam", ""));
        s.push_str("                                                                                      0.350000   2.000000   \n");
        s.push_str("                                                                                      0.300000   \n");

        let (file, _) = parse_ok(&s);
        let MapTableKind::Indexed(indexed) = &file.tables[0].kind else {
            panic!("expected indexed table");
        };
        assert_eq!(indexed.rows.len(), 1);
        assert_eq!(
            indexed.rows[0].values,
            RowValues::Layered(vec![
                vec![0.4, 1.0],
                vec![0.35, 2.0],
                vec![0.3, -9999.0], // bottom layer depth is unbounded
            ])
        );
    }

    #[test]
    fn test_multi_layer_requires_multiple_of_three() {
        let mut s = String::new();
        s.push_str("GSSHA_INDEX_MAP_TABLES\n");
        s.push_str("INDEX_MAP                \"maps/soils.idx\" \"soil_idx\"\n");
        s.push_str("MULTI_LAYER_SOIL \"soil_idx\"\n");
        s.push_str(
            "ID    DESCRIPTION1                            DESCRIPTION2                            POROSITY  \n",
        );
        s.push_str(&format!("{:<6}{:<40}{:<40}0.400000   \n", 1, "loam", ""));

        let mut diag = Diagnostics::new();
        let err = parse(&s, None, &mut diag).unwrap_err();
        assert!(err.to_string().contains("multiple of 3"));
    }

    #[test]
    fn test_soil_erosion_props_variable_expansion() {
        let mut s = String::new();
        s.push_str("GSSHA_INDEX_MAP_TABLES\n");
        s.push_str("INDEX_MAP                \"maps/soils.idx\" \"soil_idx\"\n");
        s.push_str("SOIL_EROSION_PROPS \"soil_idx\"\n");
        s.push_str("NUM_SED 2\n");
        s.push_str(
            "ID    DESCRIPTION1                            DESCRIPTION2                            SPLASH_COEF  DETACH_COEF  2 SEDIMENTS....  \n",
        );
        s.push_str(&format!(
            "{:<6}{:<40}{:<40}10.000000   0.500000   0.100000   0.200000   \n",
            1, "silt", ""
        ));

        let (file, _) = parse_ok(&s);
        let MapTableKind::Indexed(indexed) = &file.tables[0].kind else {
            panic!("expected indexed table");
        };
        assert_eq!(
            indexed.variables,
            vec!["SPLASH_COEF", "DETACH_COEF", "XSEDIMENT", "XSEDIMENT"]
        );
    }

    #[test]
    fn test_sediments_zero_count_is_no_table() {
        let source = "GSSHA_INDEX_MAP_TABLES\nSEDIMENTS\nNUM_SED 0\n";
        let (file, diag) = parse_ok(source);
        assert!(file.tables.is_empty());
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_sediments_rows() {
        let source = "\
GSSHA_INDEX_MAP_TABLES
SEDIMENTS
NUM_SED 1
Sediment Description                      Spec. Grav   Part. Dia     Output Filename
fine_sand                                 2.650000     0.000150      fine_sand
";
        let (file, _) = parse_ok(source);
        let MapTableKind::Sediments(sediments) = &file.tables[0].kind else {
            panic!("expected sediments");
        };
        assert_eq!(sediments[0].description, "fine_sand");
        assert_eq!(sediments[0].specific_gravity, 2.65);
        assert_eq!(sediments[0].output_filename, "fine_sand");
    }

    #[test]
    fn test_contaminant_table() {
        let mut s = String::new();
        s.push_str("GSSHA_INDEX_MAP_TABLES\n");
        s.push_str("INDEX_MAP                \"maps/landuse.idx\" \"land_idx\"\n");
        s.push_str("CONTAMINANT_TRANSPORT\n");
        s.push_str("NUM_CONTAM 1\n");
        s.push_str("\"benzene\"  \"land_idx\"  out/benzene.out\n");
        s.push_str("PRECIP_CONC          0.10\n");
        s.push_str("PARTITION            0.50\n");
        s.push_str("NUM_IDS 1\n");
        s.push_str(
            "ID    DESCRIPTION1                            DESCRIPTION2                            DISPERSION  DECAY  \n",
        );
        s.push_str(&format!("{:<6}{:<40}{:<40}5.000000   0.010000   \n", 1, "urban", ""));

        let (file, _) = parse_ok(&s);
        let MapTableKind::Contaminants(contaminants) = &file.tables[0].kind else {
            panic!("expected contaminants");
        };
        let c = &contaminants[0];
        assert_eq!(c.name, "benzene");
        assert_eq!(c.index_map_name, "land_idx");
        assert_eq!(c.precip_conc, 0.1);
        assert_eq!(c.table.variables, vec!["DISPERSION", "DECAY"]);
        assert_eq!(c.table.rows.len(), 1);
    }

    #[test]
    fn test_contaminant_zero_count_is_no_table() {
        let source = "GSSHA_INDEX_MAP_TABLES\nCONTAMINANT_TRANSPORT\nNUM_CONTAM 0\n";
        let (file, diag) = parse_ok(source);
        assert!(file.tables.is_empty());
        assert_eq!(diag.len(), 1);
    }
}
