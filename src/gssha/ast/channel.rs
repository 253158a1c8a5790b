//! Channel (stream network) input file records.
//!
//! A channel file carries a handful of global cards, one `CONNECT` record
//! per link describing connectivity, and one `LINK` block per link. The two
//! lists are parsed independently and paired by position: the i-th CONNECT
//! record describes the i-th LINK block, in file order. That positional
//! contract — not any embedded key — is the sole linkage mechanism.

/// A parsed channel input file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChannelNetwork {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub theta: Option<f64>,
    /// The `LINKS` card (declared link count).
    pub num_links: Option<i64>,
    pub max_nodes: Option<i64>,
    pub links: Vec<StreamLink>,
}

/// One stream link with its connectivity merged in.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StreamLink {
    pub number: i64,
    pub downstream_link: i64,
    pub num_upstream_links: i64,
    pub upstream_links: Vec<i64>,
    pub body: LinkBody,
}

/// Connectivity for one link, as read from a `CONNECT` line.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Connectivity {
    pub link: i64,
    pub downstream_link: i64,
    pub num_upstream_links: i64,
    pub upstream_links: Vec<i64>,
}

/// The three link sub-grammars.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum LinkBody {
    CrossSection(CrossSectionLink),
    Structure(StructureLink),
    Reservoir(ReservoirLink),
}

/// A fluvial link: spacing, cross-section and node chain.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CrossSectionLink {
    pub dx: f64,
    /// The exact cross-section type card (`TRAPEZOID`, `BREAKPOINT_ERODE`,
    /// `TRAP_SUBSURFACE`, …), preserved for serialization.
    pub type_card: String,
    /// Derived from the type card decorations.
    pub erode: bool,
    pub subsurface: bool,
    pub num_nodes: i64,
    pub cross_section: CrossSection,
    pub nodes: Vec<Node>,
}

/// Cross-section properties shared by both shapes, plus the shape itself.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CrossSection {
    pub mannings_n: f64,
    pub erode: bool,
    pub subsurface: bool,
    pub max_erosion: Option<f64>,
    pub m_river: Option<f64>,
    pub k_river: Option<f64>,
    pub shape: CrossSectionShape,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CrossSectionShape {
    Trapezoid {
        bottom_width: f64,
        bankfull_depth: f64,
        side_slope: f64,
    },
    Breakpoint {
        num_pairs: i64,
        num_interp: Option<i64>,
        points: Vec<XyPair>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct XyPair {
    pub x: f64,
    pub y: f64,
}

/// One computation node of a fluvial link.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub number: i64,
    pub x: f64,
    pub y: f64,
    pub elevation: f64,
}

/// A hydraulic-structure link.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StructureLink {
    pub num_structs: i64,
    pub structures: Vec<Structure>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Structure {
    Weir(Weir),
    Culvert(Culvert),
}

/// Weir structure fields. Absent cards stay `None` and are not written.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Weir {
    /// `WEIR` or `SAG_WEIR`.
    pub structtype: String,
    pub crest_length: Option<f64>,
    pub crest_low_elev: Option<f64>,
    pub discharge_coeff_forward: Option<f64>,
    pub discharge_coeff_reverse: Option<f64>,
    pub crest_low_loc: Option<f64>,
    pub steep_slope: Option<f64>,
    pub shallow_slope: Option<f64>,
}

/// Culvert structure fields. Absent cards stay `None` and are not written.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Culvert {
    /// `ROUND_CULVERT` or `RECT_CULVERT`.
    pub structtype: String,
    pub upinvert: Option<f64>,
    pub downinvert: Option<f64>,
    pub inlet_disch_coeff: Option<f64>,
    pub rev_flow_disch_coeff: Option<f64>,
    pub slope: Option<f64>,
    pub length: Option<f64>,
    pub rough_coeff: Option<f64>,
    pub diameter: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// A reservoir or lake link.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReservoirLink {
    pub kind: ReservoirKind,
    pub min_wse: Option<f64>,
    pub init_wse: Option<f64>,
    pub max_wse: Option<f64>,
    pub num_pts: Option<i64>,
    pub points: Vec<IjPoint>,
}

/// Which card family the link used; the two differ only in card names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReservoirKind {
    Reservoir,
    Lake,
}

/// An embankment cell, as an (i, j) grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IjPoint {
    pub i: i64,
    pub j: i64,
}
