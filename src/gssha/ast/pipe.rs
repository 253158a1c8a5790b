//! Storm pipe network file records.
//!
//! Structurally parallel to the channel file but flatter, and with the
//! opposite pairing contract: `CONNECT` records reference super links by
//! slink number, not by position.

/// A parsed storm pipe network file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipeNetwork {
    pub connections: Vec<SlinkConnection>,
    pub super_junctions: Vec<SuperJunction>,
    pub super_links: Vec<SuperLink>,
}

/// `CONNECT`: ties a super link to its up/downstream super junctions by id.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlinkConnection {
    pub slink_number: i64,
    pub up_sjunc: i64,
    pub down_sjunc: i64,
}

/// `SJUNC`: one super junction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SuperJunction {
    pub number: i64,
    pub ground_surface_elev: f64,
    pub invert_elev: f64,
    pub manhole_sa: f64,
    pub inlet_code: i64,
    pub link_or_cell_i: i64,
    pub node_or_cell_j: i64,
    pub weir_side_length: f64,
    pub orifice_diameter: f64,
}

/// `SLINK`: a super link with its node and pipe chains.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SuperLink {
    pub number: i64,
    pub num_pipes: i64,
    pub nodes: Vec<SuperNode>,
    pub pipes: Vec<Pipe>,
}

/// `NODE`: one node of a super link.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SuperNode {
    pub number: i64,
    pub ground_surface_elev: f64,
    pub invert_elev: f64,
    pub manhole_sa: f64,
    pub inlet_code: i64,
    pub cell_i: i64,
    pub cell_j: i64,
    pub weir_side_length: f64,
    pub orifice_diameter: f64,
}

/// `PIPE`: one pipe segment of a super link.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pipe {
    pub number: i64,
    pub xsec_type: i64,
    pub diameter_or_height: f64,
    pub width: f64,
    pub slope: f64,
    pub roughness: f64,
    pub length: f64,
    pub conductance: f64,
    pub drain_spacing: f64,
}
