//! Mapping-table file records.
//!
//! A mapping-table file declares index maps and a sequence of tables. Most
//! tables share one generic layout (variable header plus index rows); two
//! kinds are non-generic: `CONTAMINANT_TRANSPORT` nests a table per
//! contaminant, and `SEDIMENTS` is a flat list with no variable header at
//! all.

/// Sentinel for "no data" values; anything at or below this is omitted from
/// serialized output.
pub const NO_DATA: f64 = -9999.0;

/// A parsed mapping-table file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapTableFile {
    pub index_maps: Vec<IndexMapDecl>,
    pub tables: Vec<MapTable>,
}

/// One `INDEX_MAP` declaration: a raster path and the name tables use to
/// reference it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexMapDecl {
    pub filename: String,
    pub name: String,
}

/// One mapping table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapTable {
    /// The table keyword (`ROUGHNESS`, `SEDIMENTS`, …).
    pub name: String,
    /// The referenced index map; `None` for the non-indexed kinds.
    pub index_map_name: Option<String>,
    pub globals: TableGlobals,
    pub kind: MapTableKind,
}

/// The `NUM_*` global-variable lines of a table, kept only when declared.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TableGlobals {
    pub num_ids: Option<i64>,
    pub max_number_cells: Option<i64>,
    pub num_sed: Option<i64>,
    pub max_soil_id: Option<i64>,
    pub num_contam: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MapTableKind {
    /// The generic layout: declared variables plus index rows.
    Indexed(IndexedTable),
    /// `CONTAMINANT_TRANSPORT`: one nested table per contaminant.
    Contaminants(Vec<Contaminant>),
    /// `SEDIMENTS`: a flat, non-indexed list.
    Sediments(Vec<Sediment>),
}

/// Variable header plus ordered index rows.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexedTable {
    /// Declared variable names; values in every row align to this list
    /// positionally.
    pub variables: Vec<String>,
    pub rows: Vec<IndexRow>,
}

/// One row of a table: an index, two fixed-width description fields, and
/// variable-aligned values.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexRow {
    pub index: i64,
    pub description1: String,
    pub description2: String,
    pub values: RowValues,
}

/// Values of one row: flat for ordinary tables, a layer×variable matrix for
/// the 3-layer soil tables.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RowValues {
    Single(Vec<f64>),
    Layered(Vec<Vec<f64>>),
}

impl RowValues {
    /// All layers, viewing flat rows as one layer.
    pub fn layers(&self) -> &[Vec<f64>] {
        match self {
            RowValues::Single(values) => std::slice::from_ref(values),
            RowValues::Layered(layers) => layers,
        }
    }
}

/// One contaminant of a `CONTAMINANT_TRANSPORT` table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contaminant {
    pub name: String,
    pub index_map_name: String,
    pub output_path: String,
    pub precip_conc: f64,
    pub partition: f64,
    pub num_ids: Option<i64>,
    pub table: IndexedTable,
}

/// One row of the `SEDIMENTS` table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sediment {
    pub description: String,
    pub specific_gravity: f64,
    pub particle_diameter: f64,
    pub output_filename: String,
}

/// Table names whose rows carry three layers of values.
pub fn is_layered(table_name: &str) -> bool {
    matches!(
        table_name,
        "MULTI_LAYER_SOIL" | "RICHARDS_EQN_INFILTRATION_BROOKS"
    )
}
