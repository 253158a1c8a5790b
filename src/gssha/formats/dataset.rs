//! WMS dataset serialization.
//!
//! The dataset format is CRLF-terminated. Status and value arrays write one
//! cell per line; the retained status array makes serialization lossless
//! without consulting the mask raster.

use crate::gssha::ast::dataset::{DatasetKind, WmsDataset};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::formats::value;

/// Serialize a whole WMS dataset file.
pub fn serialize(dataset: &WmsDataset, diag: &mut Diagnostics) -> String {
    let mut out = String::new();
    out.push_str("DATASET\r\n");

    match &dataset.kind {
        DatasetKind::Scalar { object_type } => {
            out.push_str(&format!("OBJTYPE {}\r\n", object_type));
            out.push_str("BEGSCL\r\n");
        }
        DatasetKind::Vector { vector_type } => {
            out.push_str(&format!("VECTYPE {}\r\n", vector_type));
            out.push_str("BEGVEC\r\n");
        }
    }

    if let Some(object_id) = dataset.object_id {
        out.push_str(&format!("OBJID {}\r\n", object_id));
    }
    out.push_str(&format!("ND {}\r\n", dataset.number_data));
    out.push_str(&format!("NC {}\r\n", dataset.number_cells));
    out.push_str(&format!("NAME {}\r\n", dataset.name));

    for time_step in &dataset.time_steps {
        out.push_str(&format!(
            "TS {} {}\r\n",
            time_step.i_status,
            value::f6(time_step.timestamp, None, diag)
        ));

        for status in &time_step.status {
            out.push_str(&format!("{}\r\n", status));
        }
        for row in &time_step.values {
            for cell in row {
                out.push_str(&format!("{}\r\n", value::f6(*cell, None, diag)));
            }
        }
    }

    out.push_str("ENDDS\r\n");
    out
}
