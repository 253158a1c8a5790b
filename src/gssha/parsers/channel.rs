//! Channel input file grammar.
//!
//! The second line of a `LINK` chunk selects one of three sub-grammars:
//! `DX` for fluvial cross-section links, `STRUCTURE` for hydraulic
//! structures, and `RESERVOIR`/`LAKE` for impoundments. `CONNECT` chunks
//! are parsed on their own and paired with links by position afterwards.

use crate::gssha::ast::channel::{
    ChannelNetwork, Connectivity, CrossSection, CrossSectionLink, CrossSectionShape, Culvert,
    IjPoint, LinkBody, Node, ReservoirKind, ReservoirLink, StreamLink, Structure, StructureLink,
    Weir, XyPair,
};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::error::ParseError;
use crate::gssha::lexing::{chunk, Chunk};
use crate::gssha::pairing::zip_by_position;
use crate::gssha::parsers::support::{float_field, int_field, tok};
use crate::gssha::replace::ReplaceParamSet;
use crate::gssha::lexing::scan::tokens;

const FILE_KEYWORDS: &[&str] = &[
    "GSSHA_CHAN",
    "ALPHA",
    "BETA",
    "THETA",
    "LINKS",
    "MAXNODES",
    "CONNECT",
    "LINK",
];

/// Every cross-section type card: a base shape decorated with `ERODE` and
/// `SUBSURFACE` in any order, plus the structural keywords of the
/// sub-grammar.
const XSECTION_KEYWORDS: &[&str] = &[
    "LINK",
    "DX",
    "TRAPEZOID",
    "TRAPEZOID_ERODE",
    "TRAPEZOID_SUBSURFACE",
    "ERODE_TRAPEZOID",
    "ERODE_SUBSURFACE",
    "SUBSURFACE_TRAPEZOID",
    "SUBSURFACE_ERODE",
    "TRAPEZOID_ERODE_SUBSURFACE",
    "TRAPEZOID_SUBSURFACE_ERODE",
    "ERODE_TRAPEZOID_SUBSURFACE",
    "ERODE_SUBSURFACE_TRAPEZOID",
    "SUBSURFACE_TRAPEZOID_ERODE",
    "SUBSURFACE_ERODE_TRAPEZOID",
    "BREAKPOINT",
    "BREAKPOINT_ERODE",
    "BREAKPOINT_SUBSURFACE",
    "ERODE_BREAKPOINT",
    "SUBSURFACE_BREAKPOINT",
    "BREAKPOINT_ERODE_SUBSURFACE",
    "BREAKPOINT_SUBSURFACE_ERODE",
    "ERODE_BREAKPOINT_SUBSURFACE",
    "ERODE_SUBSURFACE_BREAKPOINT",
    "SUBSURFACE_BREAKPOINT_ERODE",
    "SUBSURFACE_ERODE_BREAKPOINT",
    "TRAP",
    "TRAP_ERODE",
    "TRAP_SUBSURFACE",
    "ERODE_TRAP",
    "SUBSURFACE_TRAP",
    "TRAP_ERODE_SUBSURFACE",
    "TRAP_SUBSURFACE_ERODE",
    "ERODE_TRAP_SUBSURFACE",
    "ERODE_SUBSURFACE_TRAP",
    "SUBSURFACE_TRAP_ERODE",
    "SUBSURFACE_ERODE_TRAP",
    "NODES",
    "NODE",
    "XSEC",
];

const XSEC_PROP_KEYWORDS: &[&str] = &[
    "MANNINGS_N",
    "BOTTOM_WIDTH",
    "BANKFULL_DEPTH",
    "SIDE_SLOPE",
    "NPAIRS",
    "NUM_INTERP",
    "X1",
    "ERODE",
    "MAX_EROSION",
    "SUBSURFACE",
    "M_RIVER",
    "K_RIVER",
];

const STRUCTURE_KEYWORDS: &[&str] = &["LINK", "STRUCTURE", "NUMSTRUCTS", "STRUCTTYPE"];

const WEIR_KEYWORDS: &[&str] = &[
    "STRUCTTYPE",
    "CREST_LENGTH",
    "CREST_LOW_ELEV",
    "DISCHARGE_COEFF_FORWARD",
    "DISCHARGE_COEFF_REVERSE",
    "CREST_LOW_LOC",
    "STEEP_SLOPE",
    "SHALLOW_SLOPE",
];

const CULVERT_KEYWORDS: &[&str] = &[
    "STRUCTTYPE",
    "UPINVERT",
    "DOWNINVERT",
    "INLET_DISCH_COEFF",
    "REV_FLOW_DISCH_COEFF",
    "SLOPE",
    "LENGTH",
    "ROUGH_COEFF",
    "DIAMETER",
    "WIDTH",
    "HEIGHT",
];

const RESERVOIR_KEYWORDS: &[&str] = &[
    "LINK",
    "RESERVOIR",
    "RES_MINWSE",
    "RES_INITWSE",
    "RES_MAXWSE",
    "RES_NUMPTS",
    "LAKE",
    "MINWSE",
    "INITWSE",
    "MAXWSE",
    "NUMPTS",
];

const WEIRS: &[&str] = &["WEIR", "SAG_WEIR"];
const CULVERTS: &[&str] = &["ROUND_CULVERT", "RECT_CULVERT"];
const CURVES: &[&str] = &["RATING_CURVE", "SCHEDULED_RELEASE", "RULE_CURVE"];

/// Parse a whole channel input file.
pub fn parse(
    source: &str,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<ChannelNetwork, ParseError> {
    let chunks = chunk(FILE_KEYWORDS, source.lines())?;

    let mut network = ChannelNetwork {
        alpha: None,
        beta: None,
        theta: None,
        num_links: None,
        max_nodes: None,
        links: Vec::new(),
    };

    if let Some(card) = chunks.get("ALPHA").first() {
        network.alpha = Some(card_float(card, "ALPHA", params)?);
    }
    if let Some(card) = chunks.get("BETA").first() {
        network.beta = Some(card_float(card, "BETA", params)?);
    }
    if let Some(card) = chunks.get("THETA").first() {
        network.theta = Some(card_float(card, "THETA", params)?);
    }
    if let Some(card) = chunks.get("LINKS").first() {
        network.num_links = Some(card_int(card, "LINKS")?);
    }
    if let Some(card) = chunks.get("MAXNODES").first() {
        network.max_nodes = Some(card_int(card, "MAXNODES")?);
    }

    let mut bodies = Vec::new();
    for link_chunk in chunks.get("LINK") {
        bodies.push(parse_link(link_chunk, params, diag)?);
    }

    let mut connects = Vec::new();
    for connect_chunk in chunks.get("CONNECT") {
        connects.push(parse_connect(connect_chunk)?);
    }

    // The i-th CONNECT record describes the i-th LINK block, in file order.
    let paired = zip_by_position(bodies, connects, "channel links/connectivity")?;

    for ((number, body), connect) in paired {
        network.links.push(StreamLink {
            number,
            downstream_link: connect.downstream_link,
            num_upstream_links: connect.num_upstream_links,
            upstream_links: connect.upstream_links,
            body,
        });
    }

    if let Some(declared) = network.num_links {
        if declared != network.links.len() as i64 {
            diag.warn(format!(
                "LINKS card declares {} links but the file contains {}",
                declared,
                network.links.len()
            ));
        }
    }

    Ok(network)
}

/// Parse one `CONNECT` line.
pub fn parse_connect(connect_chunk: &Chunk) -> Result<Connectivity, ParseError> {
    let fields = tokens(connect_chunk.head());
    let mut upstream = Vec::new();
    for (i, token) in fields.iter().enumerate().skip(4) {
        upstream.push(int_field(token, &format!("CONNECT upstream link {}", i - 3), None)?);
    }

    Ok(Connectivity {
        link: int_field(tok(&fields, 1, "CONNECT link number")?, "CONNECT link number", None)?,
        downstream_link: int_field(
            tok(&fields, 2, "CONNECT downstream link")?,
            "CONNECT downstream link",
            None,
        )?,
        num_upstream_links: int_field(
            tok(&fields, 3, "CONNECT upstream count")?,
            "CONNECT upstream count",
            None,
        )?,
        upstream_links: upstream,
    })
}

/// Parse one `LINK` chunk, dispatching on its second line.
fn parse_link(
    link_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<(i64, LinkBody), ParseError> {
    let selector_line = link_chunk
        .lines
        .get(1)
        .ok_or_else(|| ParseError::malformed("LINK chunk has no type line"))?;
    let selector = selector_line
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    match selector.as_str() {
        "DX" => parse_xsection_link(link_chunk, params, diag),
        "STRUCTURE" => parse_structure_link(link_chunk, params, diag),
        "RESERVOIR" | "LAKE" => parse_reservoir_link(link_chunk, params),
        other => Err(ParseError::malformed(format!(
            "unrecognized link type card {:?}",
            other
        ))),
    }
}

fn is_section_card(keyword: &str) -> bool {
    keyword.contains("TRAPEZOID") || keyword.contains("BREAKPOINT") || keyword.contains("TRAP")
}

fn parse_xsection_link(
    link_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<(i64, LinkBody), ParseError> {
    let chunks = chunk(XSECTION_KEYWORDS, link_chunk.lines.iter().map(String::as_str))?;

    let number = link_number(chunks.get("LINK").first())?;
    let dx = card_float(
        chunks
            .get("DX")
            .first()
            .ok_or_else(|| ParseError::malformed("cross-section link has no DX card"))?,
        "DX",
        params,
    )?;

    let mut type_card = None;
    let mut erode = false;
    let mut subsurface = false;
    for keyword in XSECTION_KEYWORDS {
        if is_section_card(keyword) && chunks.contains(keyword) {
            type_card = Some(keyword.to_string());
            erode = keyword.contains("ERODE");
            subsurface = keyword.contains("SUBSURFACE");
        }
    }
    let type_card =
        type_card.ok_or_else(|| ParseError::malformed("cross-section link has no type card"))?;

    let num_nodes = card_int(
        chunks
            .get("NODES")
            .first()
            .ok_or_else(|| ParseError::malformed("cross-section link has no NODES card"))?,
        "NODES",
    )?;

    let mut nodes = Vec::new();
    for node_chunk in chunks.get("NODE") {
        nodes.push(parse_node(node_chunk, params)?);
    }

    let xsec_chunk = chunks
        .get("XSEC")
        .first()
        .ok_or_else(|| ParseError::malformed("cross-section link has no XSEC block"))?;
    let cross_section = parse_xsection(xsec_chunk, &type_card, params, diag)?;

    Ok((
        number,
        LinkBody::CrossSection(CrossSectionLink {
            dx,
            type_card,
            erode,
            subsurface,
            num_nodes,
            cross_section,
            nodes,
        }),
    ))
}

/// Parse a `NODE` sub-chunk: node number, one `X_Y` line, one `ELEV` line.
fn parse_node(node_chunk: &Chunk, params: Option<&ReplaceParamSet>) -> Result<Node, ParseError> {
    let chunks = chunk(&["NODE", "X_Y", "ELEV"], node_chunk.lines.iter().map(String::as_str))?;

    let number = card_int(
        chunks
            .get("NODE")
            .first()
            .ok_or_else(|| ParseError::malformed("node block has no NODE line"))?,
        "NODE",
    )?;

    let xy = chunks
        .get("X_Y")
        .first()
        .ok_or_else(|| ParseError::malformed("node block has no X_Y line"))?;
    let xy_fields = tokens(xy.head());
    let x = float_field(tok(&xy_fields, 1, "X_Y x")?, "X_Y x", params)?;
    let y = float_field(tok(&xy_fields, 2, "X_Y y")?, "X_Y y", params)?;

    let elevation = card_float(
        chunks
            .get("ELEV")
            .first()
            .ok_or_else(|| ParseError::malformed("node block has no ELEV line"))?,
        "ELEV",
        params,
    )?;

    Ok(Node {
        number,
        x,
        y,
        elevation,
    })
}

fn parse_xsection(
    xsec_chunk: &Chunk,
    type_card: &str,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<CrossSection, ParseError> {
    let chunks = chunk(
        &[XSEC_PROP_KEYWORDS, &["XSEC"][..]].concat(),
        xsec_chunk.lines.iter().map(String::as_str),
    )?;

    let prop = |name: &str| -> Result<Option<f64>, ParseError> {
        chunks
            .get(name)
            .first()
            .map(|c| card_float(c, name, params))
            .transpose()
    };

    let mannings_n = prop("MANNINGS_N")?
        .ok_or_else(|| ParseError::malformed("cross section has no MANNINGS_N"))?;

    let shape = if type_card.contains("BREAKPOINT") {
        let num_pairs = card_int(
            chunks
                .get("NPAIRS")
                .first()
                .ok_or_else(|| ParseError::malformed("breakpoint cross section has no NPAIRS"))?,
            "NPAIRS",
        )?;
        let num_interp = chunks
            .get("NUM_INTERP")
            .first()
            .map(|c| card_int(c, "NUM_INTERP"))
            .transpose()?;

        let mut points = Vec::new();
        for x1 in chunks.get("X1") {
            let fields = tokens(x1.head());
            points.push(XyPair {
                x: float_field(tok(&fields, 1, "X1 x")?, "X1 x", params)?,
                y: float_field(tok(&fields, 2, "X1 y")?, "X1 y", params)?,
            });
        }

        if num_pairs != points.len() as i64 {
            diag.warn(format!(
                "NPAIRS declares {} breakpoints but {} X1 lines are present",
                num_pairs,
                points.len()
            ));
        }

        CrossSectionShape::Breakpoint {
            num_pairs,
            num_interp,
            points,
        }
    } else {
        CrossSectionShape::Trapezoid {
            bottom_width: prop("BOTTOM_WIDTH")?
                .ok_or_else(|| ParseError::malformed("trapezoid cross section has no BOTTOM_WIDTH"))?,
            bankfull_depth: prop("BANKFULL_DEPTH")?.ok_or_else(|| {
                ParseError::malformed("trapezoid cross section has no BANKFULL_DEPTH")
            })?,
            side_slope: prop("SIDE_SLOPE")?
                .ok_or_else(|| ParseError::malformed("trapezoid cross section has no SIDE_SLOPE"))?,
        }
    };

    Ok(CrossSection {
        mannings_n,
        erode: chunks.contains("ERODE"),
        subsurface: chunks.contains("SUBSURFACE"),
        max_erosion: prop("MAX_EROSION")?,
        m_river: prop("M_RIVER")?,
        k_river: prop("K_RIVER")?,
        shape,
    })
}

fn parse_structure_link(
    link_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<(i64, LinkBody), ParseError> {
    let chunks = chunk(STRUCTURE_KEYWORDS, link_chunk.lines.iter().map(String::as_str))?;

    let number = link_number(chunks.get("LINK").first())?;
    let num_structs = card_int(
        chunks
            .get("NUMSTRUCTS")
            .first()
            .ok_or_else(|| ParseError::malformed("structure link has no NUMSTRUCTS card"))?,
        "NUMSTRUCTS",
    )?;

    let mut structures = Vec::new();
    for struct_chunk in chunks.get("STRUCTTYPE") {
        let fields = tokens(struct_chunk.head());
        let structtype = tok(&fields, 1, "STRUCTTYPE")?.to_string();

        if WEIRS.contains(&structtype.as_str()) {
            structures.push(Structure::Weir(parse_weir(struct_chunk, structtype, params)?));
        } else if CULVERTS.contains(&structtype.as_str()) {
            structures.push(Structure::Culvert(parse_culvert(
                struct_chunk,
                structtype,
                params,
            )?));
        } else if CURVES.contains(&structtype.as_str()) {
            diag.warn(format!(
                "structure type {} is not modeled; structure skipped",
                structtype
            ));
        } else {
            diag.warn(format!(
                "unrecognized structure type {}; structure skipped",
                structtype
            ));
        }
    }

    Ok((
        number,
        LinkBody::Structure(StructureLink {
            num_structs,
            structures,
        }),
    ))
}

fn parse_weir(
    struct_chunk: &Chunk,
    structtype: String,
    params: Option<&ReplaceParamSet>,
) -> Result<Weir, ParseError> {
    let chunks = chunk(WEIR_KEYWORDS, struct_chunk.lines.iter().map(String::as_str))?;
    let prop = |name: &str| -> Result<Option<f64>, ParseError> {
        chunks
            .get(name)
            .first()
            .map(|c| card_float(c, name, params))
            .transpose()
    };

    Ok(Weir {
        structtype,
        crest_length: prop("CREST_LENGTH")?,
        crest_low_elev: prop("CREST_LOW_ELEV")?,
        discharge_coeff_forward: prop("DISCHARGE_COEFF_FORWARD")?,
        discharge_coeff_reverse: prop("DISCHARGE_COEFF_REVERSE")?,
        crest_low_loc: prop("CREST_LOW_LOC")?,
        steep_slope: prop("STEEP_SLOPE")?,
        shallow_slope: prop("SHALLOW_SLOPE")?,
    })
}

fn parse_culvert(
    struct_chunk: &Chunk,
    structtype: String,
    params: Option<&ReplaceParamSet>,
) -> Result<Culvert, ParseError> {
    let chunks = chunk(CULVERT_KEYWORDS, struct_chunk.lines.iter().map(String::as_str))?;
    let prop = |name: &str| -> Result<Option<f64>, ParseError> {
        chunks
            .get(name)
            .first()
            .map(|c| card_float(c, name, params))
            .transpose()
    };

    Ok(Culvert {
        structtype,
        upinvert: prop("UPINVERT")?,
        downinvert: prop("DOWNINVERT")?,
        inlet_disch_coeff: prop("INLET_DISCH_COEFF")?,
        rev_flow_disch_coeff: prop("REV_FLOW_DISCH_COEFF")?,
        slope: prop("SLOPE")?,
        length: prop("LENGTH")?,
        rough_coeff: prop("ROUGH_COEFF")?,
        diameter: prop("DIAMETER")?,
        width: prop("WIDTH")?,
        height: prop("HEIGHT")?,
    })
}

fn parse_reservoir_link(
    link_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
) -> Result<(i64, LinkBody), ParseError> {
    let chunks = chunk(RESERVOIR_KEYWORDS, link_chunk.lines.iter().map(String::as_str))?;

    let number = link_number(chunks.get("LINK").first())?;

    let kind = if chunks.contains("LAKE") {
        ReservoirKind::Lake
    } else if chunks.contains("RESERVOIR") {
        ReservoirKind::Reservoir
    } else {
        return Err(ParseError::malformed(
            "reservoir link has neither RESERVOIR nor LAKE card",
        ));
    };

    let wse = |name: &str| -> Result<Option<f64>, ParseError> {
        chunks
            .get(name)
            .first()
            .map(|c| card_float(c, name, params))
            .transpose()
    };

    let min_wse = wse("MINWSE")?.map_or_else(|| wse("RES_MINWSE"), |v| Ok(Some(v)))?;
    let init_wse = wse("INITWSE")?.map_or_else(|| wse("RES_INITWSE"), |v| Ok(Some(v)))?;
    let max_wse = wse("MAXWSE")?.map_or_else(|| wse("RES_MAXWSE"), |v| Ok(Some(v)))?;

    let pts_chunk = chunks
        .get("NUMPTS")
        .first()
        .or_else(|| chunks.get("RES_NUMPTS").first());

    let mut num_pts = None;
    let mut points = Vec::new();
    if let Some(pts) = pts_chunk {
        num_pts = Some(card_int(pts, "NUMPTS")?);

        // Continuation lines hold interleaved ordinates, two per point.
        let mut ordinates = Vec::new();
        for line in pts.tail() {
            for token in line.split_whitespace() {
                ordinates.push(int_field(token, "reservoir point ordinate", None)?);
            }
        }
        if ordinates.len() % 2 != 0 {
            return Err(ParseError::malformed(format!(
                "reservoir point list has an odd ordinate count ({})",
                ordinates.len()
            )));
        }
        for pair in ordinates.chunks(2) {
            points.push(IjPoint {
                i: pair[0],
                j: pair[1],
            });
        }
    }

    Ok((
        number,
        LinkBody::Reservoir(ReservoirLink {
            kind,
            min_wse,
            init_wse,
            max_wse,
            num_pts,
            points,
        }),
    ))
}

fn link_number(link_card: Option<&Chunk>) -> Result<i64, ParseError> {
    let card = link_card.ok_or_else(|| ParseError::malformed("link block has no LINK card"))?;
    card_int(card, "LINK")
}

/// Second token of a chunk's head line, as a float.
fn card_float(
    card: &Chunk,
    name: &str,
    params: Option<&ReplaceParamSet>,
) -> Result<f64, ParseError> {
    let fields = tokens(card.head());
    float_field(tok(&fields, 1, name)?, name, params)
}

/// Second token of a chunk's head line, as an integer.
fn card_int(card: &Chunk, name: &str) -> Result<i64, ParseError> {
    let fields = tokens(card.head());
    int_field(tok(&fields, 1, name)?, name, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
GSSHA_CHAN
ALPHA       3.000000
BETA        1.000000
THETA       1.000000
LINKS       1
MAXNODES    3
CONNECT    1    0    1    2
LINK           1
DX             100.000000
TRAPEZOID
NODES          2
NODE 1
X_Y  0.000000 0.000000
ELEV 100.000000
NODE 2
X_Y  50.000000 0.000000
ELEV 99.000000
XSEC
MANNINGS_N     0.035000
BOTTOM_WIDTH   2.000000
BANKFULL_DEPTH 1.500000
SIDE_SLOPE     2.000000
";

    #[test]
    fn test_parse_trapezoid_link() {
        let mut diag = Diagnostics::new();
        let network = parse(SAMPLE, None, &mut diag).unwrap();

        assert_eq!(network.alpha, Some(3.0));
        assert_eq!(network.num_links, Some(1));
        assert_eq!(network.links.len(), 1);

        let link = &network.links[0];
        assert_eq!(link.number, 1);
        assert_eq!(link.downstream_link, 0);
        assert_eq!(link.upstream_links, vec![2]);

        match &link.body {
            LinkBody::CrossSection(cs) => {
                assert_eq!(cs.dx, 100.0);
                assert_eq!(cs.type_card, "TRAPEZOID");
                assert_eq!(cs.nodes.len(), 2);
                assert_eq!(cs.nodes[1].elevation, 99.0);
                match &cs.cross_section.shape {
                    CrossSectionShape::Trapezoid { bottom_width, .. } => {
                        assert_eq!(*bottom_width, 2.0)
                    }
                    other => panic!("expected trapezoid, got {:?}", other),
                }
            }
            other => panic!("expected cross-section link, got {:?}", other),
        }
    }

    #[test]
    fn test_decorated_type_card_sets_flags() {
        let source = SAMPLE.replace("TRAPEZOID\n", "TRAPEZOID_ERODE_SUBSURFACE\n");
        let mut diag = Diagnostics::new();
        let network = parse(&source, None, &mut diag).unwrap();

        match &network.links[0].body {
            LinkBody::CrossSection(cs) => {
                assert_eq!(cs.type_card, "TRAPEZOID_ERODE_SUBSURFACE");
                assert!(cs.erode);
                assert!(cs.subsurface);
            }
            other => panic!("expected cross-section link, got {:?}", other),
        }
    }

    #[test]
    fn test_connect_count_mismatch_is_fatal() {
        let source = SAMPLE.replace("CONNECT    1    0    1    2\n", "");
        let mut diag = Diagnostics::new();
        let err = parse(&source, None, &mut diag).unwrap_err();
        assert!(err.to_string().contains("positional pairing"));
    }

    #[test]
    fn test_reservoir_point_degrouping() {
        let source = "\
GSSHA_CHAN
CONNECT    1    0    0
LINK           1
RESERVOIR
RES_INITWSE      95.000000
RES_MINWSE       90.000000
RES_MAXWSE       100.000000
RES_NUMPTS       3
10  12     11  12     11  13
";
        let mut diag = Diagnostics::new();
        let network = parse(source, None, &mut diag).unwrap();

        match &network.links[0].body {
            LinkBody::Reservoir(res) => {
                assert_eq!(res.kind, ReservoirKind::Reservoir);
                assert_eq!(res.num_pts, Some(3));
                assert_eq!(
                    res.points,
                    vec![
                        IjPoint { i: 10, j: 12 },
                        IjPoint { i: 11, j: 12 },
                        IjPoint { i: 11, j: 13 },
                    ]
                );
            }
            other => panic!("expected reservoir link, got {:?}", other),
        }
    }

    #[test]
    fn test_structure_link_with_weir() {
        let source = "\
GSSHA_CHAN
CONNECT    1    0    0
LINK           1
STRUCTURE
NUMSTRUCTS     1
STRUCTTYPE     WEIR
CREST_LENGTH             10.000000
CREST_LOW_ELEV           95.000000
";
        let mut diag = Diagnostics::new();
        let network = parse(source, None, &mut diag).unwrap();

        match &network.links[0].body {
            LinkBody::Structure(st) => {
                assert_eq!(st.num_structs, 1);
                match &st.structures[0] {
                    Structure::Weir(weir) => {
                        assert_eq!(weir.structtype, "WEIR");
                        assert_eq!(weir.crest_length, Some(10.0));
                        assert_eq!(weir.steep_slope, None);
                    }
                    other => panic!("expected weir, got {:?}", other),
                }
            }
            other => panic!("expected structure link, got {:?}", other),
        }
    }
}
