//! Channel input file serialization.
//!
//! Card keywords are left-padded to fixed column widths: 12 for the global
//! cards, 15 for link and cross-section cards, 25 for structure cards, and
//! 13/17 for the lake/reservoir card families. The connectivity block uses
//! 5-wide right-aligned fields.

use crate::gssha::ast::channel::{
    ChannelNetwork, CrossSection, CrossSectionLink, CrossSectionShape, Culvert, LinkBody,
    ReservoirKind, ReservoirLink, StreamLink, Structure, StructureLink, Weir,
};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::formats::value;
use crate::gssha::replace::ReplaceParamSet;

/// Serialize a whole channel input file.
pub fn serialize(
    network: &ChannelNetwork,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> String {
    let mut out = String::new();
    out.push_str("GSSHA_CHAN\n");

    if let Some(alpha) = network.alpha {
        out.push_str(&format!("{:<12}{}\n", "ALPHA", value::f6(alpha, params, diag)));
    }
    if let Some(beta) = network.beta {
        out.push_str(&format!("{:<12}{}\n", "BETA", value::f6(beta, params, diag)));
    }
    if let Some(theta) = network.theta {
        out.push_str(&format!("{:<12}{}\n", "THETA", value::f6(theta, params, diag)));
    }
    if let Some(num_links) = network.num_links {
        out.push_str(&format!("{:<12}{}\n", "LINKS", num_links));
    }
    if let Some(max_nodes) = network.max_nodes {
        out.push_str(&format!("{:<12}{}\n", "MAXNODES", max_nodes));
    }

    write_connectivity(&mut out, &network.links);

    for link in &network.links {
        out.push_str(&format!("{:<15}{}\n", "LINK", link.number));
        match &link.body {
            LinkBody::CrossSection(cs) => write_cross_section_link(&mut out, cs, params, diag),
            LinkBody::Structure(st) => write_structure_link(&mut out, st, params, diag),
            LinkBody::Reservoir(res) => write_reservoir_link(&mut out, res, params, diag),
        }
        out.push('\n');
    }

    out
}

fn write_connectivity(out: &mut String, links: &[StreamLink]) {
    for link in links {
        let mut up = String::new();
        for up_link in &link.upstream_links {
            up.push_str(&format!("{:>5}", up_link));
        }
        out.push_str(&format!(
            "CONNECT{:>5}{:>5}{:>5}{}\n",
            link.number, link.downstream_link, link.num_upstream_links, up
        ));
    }
    out.push('\n');
}

fn write_cross_section_link(
    out: &mut String,
    link: &CrossSectionLink,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!("{:<15}{}\n", "DX", value::f6(link.dx, params, diag)));
    out.push_str(&format!("{}\n", link.type_card));
    out.push_str(&format!("{:<15}{}\n", "NODES", link.num_nodes));

    for (idx, node) in link.nodes.iter().enumerate() {
        out.push_str(&format!("NODE {}\n", node.number));
        out.push_str(&format!(
            "X_Y  {} {}\n",
            value::f6(node.x, params, diag),
            value::f6(node.y, params, diag)
        ));
        out.push_str(&format!("ELEV {}\n", value::f6(node.elevation, params, diag)));

        // The cross section rides along after the first node.
        if idx == 0 {
            out.push_str("XSEC\n");
            write_cross_section(out, &link.cross_section, params, diag);
        }
    }
}

fn write_cross_section(
    out: &mut String,
    xsec: &CrossSection,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!(
        "{:<15}{}\n",
        "MANNINGS_N",
        value::f6(xsec.mannings_n, params, diag)
    ));

    match &xsec.shape {
        CrossSectionShape::Trapezoid {
            bottom_width,
            bankfull_depth,
            side_slope,
        } => {
            out.push_str(&format!(
                "{:<15}{}\n",
                "BOTTOM_WIDTH",
                value::f6(*bottom_width, params, diag)
            ));
            out.push_str(&format!(
                "{:<15}{}\n",
                "BANKFULL_DEPTH",
                value::f6(*bankfull_depth, params, diag)
            ));
            out.push_str(&format!(
                "{:<15}{}\n",
                "SIDE_SLOPE",
                value::f6(*side_slope, params, diag)
            ));
            write_optional_cards(out, xsec, params, diag);
        }
        CrossSectionShape::Breakpoint {
            num_pairs,
            num_interp,
            points,
        } => {
            out.push_str(&format!("{:<15}{}\n", "NPAIRS", num_pairs));
            if let Some(num_interp) = num_interp {
                out.push_str(&format!(
                    "{:<15}{}\n",
                    "NUM_INTERP",
                    value::int(*num_interp, params, diag)
                ));
            }
            write_optional_cards(out, xsec, params, diag);
            for point in points {
                out.push_str(&format!(
                    "X1   {} {}\n",
                    value::f6(point.x, params, diag),
                    value::f6(point.y, params, diag)
                ));
            }
        }
    }
}

fn write_optional_cards(
    out: &mut String,
    xsec: &CrossSection,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    if xsec.erode {
        out.push_str("ERODE\n");
    }
    if let Some(max_erosion) = xsec.max_erosion {
        out.push_str(&format!(
            "{:<15}{}\n",
            "MAX_EROSION",
            value::f6(max_erosion, params, diag)
        ));
    }
    if xsec.subsurface {
        out.push_str("SUBSURFACE\n");
    }
    if let Some(m_river) = xsec.m_river {
        out.push_str(&format!(
            "{:<15}{}\n",
            "M_RIVER",
            value::f6(m_river, params, diag)
        ));
    }
    if let Some(k_river) = xsec.k_river {
        out.push_str(&format!(
            "{:<15}{}\n",
            "K_RIVER",
            value::f6(k_river, params, diag)
        ));
    }
}

fn write_structure_link(
    out: &mut String,
    link: &StructureLink,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str("STRUCTURE\n");
    out.push_str(&format!("{:<15}{}\n", "NUMSTRUCTS", link.num_structs));

    for structure in &link.structures {
        match structure {
            Structure::Weir(weir) => write_weir(out, weir, params, diag),
            Structure::Culvert(culvert) => write_culvert(out, culvert, params, diag),
        }
    }
}

fn structure_card(
    out: &mut String,
    name: &str,
    field: Option<f64>,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    if let Some(v) = field {
        out.push_str(&format!("{:<25}{}\n", name, value::f6(v, params, diag)));
    }
}

fn write_weir(
    out: &mut String,
    weir: &Weir,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!("{:<15}{}\n", "STRUCTTYPE", weir.structtype));
    structure_card(out, "CREST_LENGTH", weir.crest_length, params, diag);
    structure_card(out, "CREST_LOW_ELEV", weir.crest_low_elev, params, diag);
    structure_card(
        out,
        "DISCHARGE_COEFF_FORWARD",
        weir.discharge_coeff_forward,
        params,
        diag,
    );
    structure_card(
        out,
        "DISCHARGE_COEFF_REVERSE",
        weir.discharge_coeff_reverse,
        params,
        diag,
    );
    structure_card(out, "CREST_LOW_LOC", weir.crest_low_loc, params, diag);
    structure_card(out, "STEEP_SLOPE", weir.steep_slope, params, diag);
    structure_card(out, "SHALLOW_SLOPE", weir.shallow_slope, params, diag);
}

fn write_culvert(
    out: &mut String,
    culvert: &Culvert,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    out.push_str(&format!("{:<15}{}\n", "STRUCTTYPE", culvert.structtype));
    structure_card(out, "UPINVERT", culvert.upinvert, params, diag);
    structure_card(out, "DOWNINVERT", culvert.downinvert, params, diag);
    structure_card(out, "INLET_DISCH_COEFF", culvert.inlet_disch_coeff, params, diag);
    structure_card(
        out,
        "REV_FLOW_DISCH_COEFF",
        culvert.rev_flow_disch_coeff,
        params,
        diag,
    );
    structure_card(out, "SLOPE", culvert.slope, params, diag);
    structure_card(out, "LENGTH", culvert.length, params, diag);
    structure_card(out, "ROUGH_COEFF", culvert.rough_coeff, params, diag);
    structure_card(out, "DIAMETER", culvert.diameter, params, diag);
    structure_card(out, "WIDTH", culvert.width, params, diag);
    structure_card(out, "HEIGHT", culvert.height, params, diag);
}

fn write_reservoir_link(
    out: &mut String,
    link: &ReservoirLink,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    match link.kind {
        ReservoirKind::Lake => {
            out.push_str("LAKE\n");
            reservoir_card(out, "INITWSE", 13, link.init_wse, params, diag);
            reservoir_card(out, "MINWSE", 13, link.min_wse, params, diag);
            reservoir_card(out, "MAXWSE", 13, link.max_wse, params, diag);
            if let Some(num_pts) = link.num_pts {
                out.push_str(&format!("{:<13}{}\n", "NUMPTS", num_pts));
            }
        }
        ReservoirKind::Reservoir => {
            out.push_str("RESERVOIR\n");
            reservoir_card(out, "RES_INITWSE", 17, link.init_wse, params, diag);
            reservoir_card(out, "RES_MINWSE", 17, link.min_wse, params, diag);
            reservoir_card(out, "RES_MAXWSE", 17, link.max_wse, params, diag);
            if let Some(num_pts) = link.num_pts {
                out.push_str(&format!("{:<17}{}\n", "RES_NUMPTS", num_pts));
            }
        }
    }

    // Ten points per line, pairs separated by five spaces.
    for (idx, point) in link.points.iter().enumerate() {
        if (idx + 1) % 10 != 0 {
            out.push_str(&format!("{}  {}     ", point.i, point.j));
        } else {
            out.push_str(&format!("{}  {}\n", point.i, point.j));
        }
    }
    if link.points.len() % 10 != 0 {
        out.push('\n');
    }
}

fn reservoir_card(
    out: &mut String,
    name: &str,
    width: usize,
    field: Option<f64>,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) {
    if let Some(v) = field {
        out.push_str(&format!(
            "{:<width$}{}\n",
            name,
            value::f6(v, params, diag),
            width = width
        ));
    }
}
