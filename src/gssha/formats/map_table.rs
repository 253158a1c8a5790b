//! Mapping-table serialization: the unpivot direction.
//!
//! Index rows are already the pivoted form; the work here is rebuilding the
//! exact column layout: computed paddings for the index and description
//! fields, 6-decimal values with three-space separators, omission of
//! no-data sentinels, and the collapsed `SEDIMENTS....` header label.

use crate::gssha::ast::map_table::{
    Contaminant, IndexRow, MapTable, MapTableFile, MapTableKind, Sediment, NO_DATA,
};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::formats::value;
use crate::gssha::replace::{write_value, ReplaceParamSet, WriteField};

/// Serialize a whole mapping-table file.
pub fn serialize(
    file: &MapTableFile,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> String {
    let mut out = String::new();
    out.push_str("GSSHA_INDEX_MAP_TABLES\n");

    for map in &file.index_maps {
        out.push_str(&format!(
            "INDEX_MAP{}\"{}\" \"{}\"\n",
            " ".repeat(16),
            map.filename,
            map.name
        ));
    }

    for table in &file.tables {
        match &table.kind {
            MapTableKind::Indexed(_) => write_indexed_table(&mut out, table, params, diag),
            MapTableKind::Contaminants(contaminants) => {
                write_contaminant_table(&mut out, table, contaminants, params, diag)
            }
            MapTableKind::Sediments(sediments) => {
                write_sediment_table(&mut out, table, sediments, params, diag)
            }
        }
    }

    out
}

fn write_indexed_table(
    out: &mut String,
    table: &MapTable,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    let MapTableKind::Indexed(indexed) = &table.kind else {
        return;
    };

    out.push_str(&format!(
        "{} \"{}\"\n",
        table.name,
        table.index_map_name.as_deref().unwrap_or("")
    ));

    write_globals(out, table);
    write_value_block(
        out,
        &indexed.variables,
        &indexed.rows,
        table.globals.num_sed,
        params,
        diag,
    );
}

fn write_globals(out: &mut String, table: &MapTable) {
    if let Some(num_ids) = table.globals.num_ids {
        out.push_str(&format!("NUM_IDS {}\n", num_ids));
    }
    if let Some(max_number_cells) = table.globals.max_number_cells {
        out.push_str(&format!("MAX_NUMBER_CELLS {}\n", max_number_cells));
    }
    if let Some(num_sed) = table.globals.num_sed {
        out.push_str(&format!("NUM_SED {}\n", num_sed));
    }
    if let Some(max_soil_id) = table.globals.max_soil_id {
        out.push_str(&format!("MAX_SOIL_ID {}\n", max_soil_id));
    }
}

/// The variable header line plus one formatted line per row (and one
/// continuation line per extra layer).
fn write_value_block(
    out: &mut String,
    variables: &[String],
    rows: &[IndexRow],
    num_sed: Option<i64>,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    let mut var_string = String::new();
    let mut sediments_labeled = false;
    for variable in variables {
        if variable == "XSEDIMENT" {
            // The repeated XSEDIMENT slots collapse into one trailing label.
            if !sediments_labeled {
                var_string.push_str(&format!("{} SEDIMENTS....  ", num_sed.unwrap_or(0)));
                sediments_labeled = true;
            }
        } else {
            var_string.push_str(variable);
            var_string.push_str("  ");
        }
    }

    out.push_str(&format!(
        "ID{}DESCRIPTION1{}DESCRIPTION2{}{}\n",
        " ".repeat(4),
        " ".repeat(28),
        " ".repeat(28),
        var_string
    ));

    for row in rows {
        let index_text = row.index.to_string();
        let pad1 = (6usize.saturating_sub(index_text.len())).max(1);
        let pad2 = 40usize.saturating_sub(row.description1.len());
        let pad3 = 40usize.saturating_sub(row.description2.len());

        let prefix = format!(
            "{}{}{}{}{}{}",
            index_text,
            " ".repeat(pad1),
            row.description1,
            " ".repeat(pad2),
            row.description2,
            " ".repeat(pad3)
        );

        let layers = row.values.layers();
        out.push_str(&prefix);
        out.push_str(&values_string(&layers[0], params, diag));
        out.push('\n');

        // Layers after the first carry an indentation-only prefix.
        for layer in &layers[1..] {
            out.push_str(&" ".repeat(prefix.len()));
            out.push_str(&values_string(layer, params, diag));
            out.push('\n');
        }
    }
}

/// Join one layer's values with three-space separators. No-data sentinels
/// contribute nothing — neither digits nor a separator of their own — so
/// the surrounding fields keep their spacing.
fn values_string(values: &[f64], params: Option<&ReplaceParamSet>, diag: &mut Diagnostics) -> String {
    let mut s = String::new();
    for &v in values {
        match write_value(v, params) {
            WriteField::Verbatim(text) => {
                diag.info(format!("table value rendered verbatim as {}", text));
                s.push_str(&text);
                s.push_str("   ");
            }
            WriteField::Number(n) if n <= NO_DATA => {}
            WriteField::Number(n) => {
                s.push_str(&value::f6(n, None, diag));
                s.push_str("   ");
            }
        }
    }
    s
}

fn write_contaminant_table(
    out: &mut String,
    table: &MapTable,
    contaminants: &[Contaminant],
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!("{}\n", table.name));
    out.push_str(&format!(
        "NUM_CONTAM {}\n",
        table.globals.num_contam.unwrap_or(contaminants.len() as i64)
    ));

    for contaminant in contaminants {
        out.push_str(&format!(
            "\"{}\"  \"{}\"  {}\n",
            contaminant.name, contaminant.index_map_name, contaminant.output_path
        ));
        out.push_str(&format!(
            "PRECIP_CONC{}{}\n",
            " ".repeat(10),
            value::f2(contaminant.precip_conc, params, diag)
        ));
        out.push_str(&format!(
            "PARTITION{}{}\n",
            " ".repeat(12),
            value::f2(contaminant.partition, params, diag)
        ));
        if let Some(num_ids) = contaminant.num_ids {
            out.push_str(&format!("NUM_IDS {}\n", num_ids));
        }

        write_value_block(
            out,
            &contaminant.table.variables,
            &contaminant.table.rows,
            table.globals.num_sed,
            params,
            diag,
        );
    }
}

fn write_sediment_table(
    out: &mut String,
    table: &MapTable,
    sediments: &[Sediment],
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!("{}\n", table.name));
    if let Some(num_sed) = table.globals.num_sed {
        out.push_str(&format!("NUM_SED {}\n", num_sed));
    }

    out.push_str(&format!(
        "Sediment Description{}Spec. Grav{}Part. Dia{}Output Filename\n",
        " ".repeat(22),
        " ".repeat(3),
        " ".repeat(5)
    ));

    for sediment in sediments {
        let pad = 42usize.saturating_sub(sediment.description.len());
        out.push_str(&format!(
            "{}{}{}{}{}{}{}\n",
            sediment.description,
            " ".repeat(pad),
            value::f6(sediment.specific_gravity, params, diag),
            " ".repeat(5),
            value::f6(sediment.particle_diameter, params, diag),
            " ".repeat(6),
            sediment.output_filename
        ));
    }
}
