//! Storm pipe network serialization.
//!
//! Flat two-space-separated records; elevations render at 2 decimals and
//! the remaining measures at 6, except pipe length which the format keeps
//! at 2.

use crate::gssha::ast::pipe::{Pipe, PipeNetwork, SuperJunction, SuperNode};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::formats::value;
use crate::gssha::replace::ReplaceParamSet;

/// Serialize a whole storm pipe network file.
pub fn serialize(
    network: &PipeNetwork,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> String {
    let mut out = String::new();

    for connection in &network.connections {
        out.push_str(&format!(
            "CONNECT  {}  {}  {}\n",
            connection.slink_number, connection.up_sjunc, connection.down_sjunc
        ));
    }

    for sjunc in &network.super_junctions {
        write_sjunc(&mut out, sjunc, params, diag);
    }

    for slink in &network.super_links {
        out.push_str(&format!("SLINK   {}      {}\n", slink.number, slink.num_pipes));
        for node in &slink.nodes {
            write_node(&mut out, node, params, diag);
        }
        for pipe in &slink.pipes {
            write_pipe(&mut out, pipe, params, diag);
        }
    }

    out
}

fn write_sjunc(
    out: &mut String,
    sjunc: &SuperJunction,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!(
        "SJUNC  {}  {}  {}  {}  {}  {}  {}  {}  {}\n",
        sjunc.number,
        value::f2(sjunc.ground_surface_elev, params, diag),
        value::f2(sjunc.invert_elev, params, diag),
        value::f6(sjunc.manhole_sa, params, diag),
        sjunc.inlet_code,
        sjunc.link_or_cell_i,
        sjunc.node_or_cell_j,
        value::f6(sjunc.weir_side_length, params, diag),
        value::f6(sjunc.orifice_diameter, params, diag)
    ));
}

fn write_node(
    out: &mut String,
    node: &SuperNode,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!(
        "NODE  {}  {}  {}  {}  {}  {}  {}  {}  {}\n",
        node.number,
        value::f2(node.ground_surface_elev, params, diag),
        value::f2(node.invert_elev, params, diag),
        value::f6(node.manhole_sa, params, diag),
        node.inlet_code,
        node.cell_i,
        node.cell_j,
        value::f6(node.weir_side_length, params, diag),
        value::f6(node.orifice_diameter, params, diag)
    ));
}

fn write_pipe(
    out: &mut String,
    pipe: &Pipe,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!(
        "PIPE  {}  {}  {}  {}  {}  {}  {}  {}  {}\n",
        pipe.number,
        pipe.xsec_type,
        value::f6(pipe.diameter_or_height, params, diag),
        value::f6(pipe.width, params, diag),
        value::f6(pipe.slope, params, diag),
        value::f6(pipe.roughness, params, diag),
        value::f2(pipe.length, params, diag),
        value::f6(pipe.conductance, params, diag),
        value::f6(pipe.drain_spacing, params, diag)
    ));
}
