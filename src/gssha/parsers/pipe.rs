//! Storm pipe network file grammar.
//!
//! `CONNECT` and `SJUNC` records are single lines; `SLINK` chunks re-chunk
//! into a header plus repeated `NODE` and `PIPE` lines. Unlike the channel
//! file, connections reference super links by slink number.

use crate::gssha::ast::pipe::{
    Pipe, PipeNetwork, SlinkConnection, SuperJunction, SuperLink, SuperNode,
};
use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::error::ParseError;
use crate::gssha::lexing::scan::tokens;
use crate::gssha::lexing::{chunk, Chunk};
use crate::gssha::pairing::join_by_key;
use crate::gssha::parsers::support::{float_field, int_field, tok};
use crate::gssha::replace::ReplaceParamSet;

const FILE_KEYWORDS: &[&str] = &["CONNECT", "SJUNC", "SLINK"];
const SLINK_KEYWORDS: &[&str] = &["SLINK", "NODE", "PIPE"];

/// Parse a whole storm pipe network file.
pub fn parse(
    source: &str,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> Result<PipeNetwork, ParseError> {
    let chunks = chunk(FILE_KEYWORDS, source.lines())?;

    let mut connections = Vec::new();
    for connect_chunk in chunks.get("CONNECT") {
        connections.push(parse_connect(connect_chunk)?);
    }

    let mut super_junctions = Vec::new();
    for sjunc_chunk in chunks.get("SJUNC") {
        super_junctions.push(parse_sjunc(sjunc_chunk, params)?);
    }

    let mut super_links = Vec::new();
    for slink_chunk in chunks.get("SLINK") {
        super_links.push(parse_slink(slink_chunk, params)?);
    }

    // Associations are keyed, not positional; report dangling ids now.
    join_by_key(
        &super_links,
        &connections,
        |l: &SuperLink| l.number,
        |c: &SlinkConnection| c.slink_number,
        "slink connectivity",
        diag,
    );

    Ok(PipeNetwork {
        connections,
        super_junctions,
        super_links,
    })
}

fn parse_connect(connect_chunk: &Chunk) -> Result<SlinkConnection, ParseError> {
    let fields = tokens(connect_chunk.head());
    Ok(SlinkConnection {
        slink_number: int_field(tok(&fields, 1, "CONNECT slink")?, "CONNECT slink", None)?,
        up_sjunc: int_field(
            tok(&fields, 2, "CONNECT upstream sjunc")?,
            "CONNECT upstream sjunc",
            None,
        )?,
        down_sjunc: int_field(
            tok(&fields, 3, "CONNECT downstream sjunc")?,
            "CONNECT downstream sjunc",
            None,
        )?,
    })
}

fn parse_sjunc(
    sjunc_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
) -> Result<SuperJunction, ParseError> {
    let fields = tokens(sjunc_chunk.head());
    Ok(SuperJunction {
        number: int_field(tok(&fields, 1, "SJUNC number")?, "SJUNC number", None)?,
        ground_surface_elev: float_field(
            tok(&fields, 2, "SJUNC ground surface elevation")?,
            "SJUNC ground surface elevation",
            params,
        )?,
        invert_elev: float_field(
            tok(&fields, 3, "SJUNC invert elevation")?,
            "SJUNC invert elevation",
            params,
        )?,
        manhole_sa: float_field(
            tok(&fields, 4, "SJUNC manhole surface area")?,
            "SJUNC manhole surface area",
            params,
        )?,
        inlet_code: int_field(tok(&fields, 5, "SJUNC inlet code")?, "SJUNC inlet code", None)?,
        link_or_cell_i: int_field(
            tok(&fields, 6, "SJUNC link or cell i")?,
            "SJUNC link or cell i",
            None,
        )?,
        node_or_cell_j: int_field(
            tok(&fields, 7, "SJUNC node or cell j")?,
            "SJUNC node or cell j",
            None,
        )?,
        weir_side_length: float_field(
            tok(&fields, 8, "SJUNC weir side length")?,
            "SJUNC weir side length",
            params,
        )?,
        orifice_diameter: float_field(
            tok(&fields, 9, "SJUNC orifice diameter")?,
            "SJUNC orifice diameter",
            params,
        )?,
    })
}

fn parse_slink(
    slink_chunk: &Chunk,
    params: Option<&ReplaceParamSet>,
) -> Result<SuperLink, ParseError> {
    let chunks = chunk(SLINK_KEYWORDS, slink_chunk.lines.iter().map(String::as_str))?;

    let header = chunks
        .get("SLINK")
        .first()
        .ok_or_else(|| ParseError::malformed("slink block has no SLINK line"))?;
    let header_fields = tokens(header.head());

    let mut nodes = Vec::new();
    for node_chunk in chunks.get("NODE") {
        nodes.push(parse_node(node_chunk, params)?);
    }

    let mut pipes = Vec::new();
    for pipe_chunk in chunks.get("PIPE") {
        pipes.push(parse_pipe(pipe_chunk, params)?);
    }

    Ok(SuperLink {
        number: int_field(
            tok(&header_fields, 1, "SLINK number")?,
            "SLINK number",
            None,
        )?,
        num_pipes: int_field(
            tok(&header_fields, 2, "SLINK pipe count")?,
            "SLINK pipe count",
            None,
        )?,
        nodes,
        pipes,
    })
}

fn parse_node(node_chunk: &Chunk, params: Option<&ReplaceParamSet>) -> Result<SuperNode, ParseError> {
    let fields = tokens(node_chunk.head());
    Ok(SuperNode {
        number: int_field(tok(&fields, 1, "NODE number")?, "NODE number", None)?,
        ground_surface_elev: float_field(
            tok(&fields, 2, "NODE ground surface elevation")?,
            "NODE ground surface elevation",
            params,
        )?,
        invert_elev: float_field(
            tok(&fields, 3, "NODE invert elevation")?,
            "NODE invert elevation",
            params,
        )?,
        manhole_sa: float_field(
            tok(&fields, 4, "NODE manhole surface area")?,
            "NODE manhole surface area",
            params,
        )?,
        inlet_code: int_field(tok(&fields, 5, "NODE inlet code")?, "NODE inlet code", None)?,
        cell_i: int_field(tok(&fields, 6, "NODE cell i")?, "NODE cell i", None)?,
        cell_j: int_field(tok(&fields, 7, "NODE cell j")?, "NODE cell j", None)?,
        weir_side_length: float_field(
            tok(&fields, 8, "NODE weir side length")?,
            "NODE weir side length",
            params,
        )?,
        orifice_diameter: float_field(
            tok(&fields, 9, "NODE orifice diameter")?,
            "NODE orifice diameter",
            params,
        )?,
    })
}

fn parse_pipe(pipe_chunk: &Chunk, params: Option<&ReplaceParamSet>) -> Result<Pipe, ParseError> {
    let fields = tokens(pipe_chunk.head());
    Ok(Pipe {
        number: int_field(tok(&fields, 1, "PIPE number")?, "PIPE number", None)?,
        xsec_type: int_field(
            tok(&fields, 2, "PIPE cross-section type")?,
            "PIPE cross-section type",
            None,
        )?,
        diameter_or_height: float_field(
            tok(&fields, 3, "PIPE diameter or height")?,
            "PIPE diameter or height",
            params,
        )?,
        width: float_field(tok(&fields, 4, "PIPE width")?, "PIPE width", params)?,
        slope: float_field(tok(&fields, 5, "PIPE slope")?, "PIPE slope", params)?,
        roughness: float_field(tok(&fields, 6, "PIPE roughness")?, "PIPE roughness", params)?,
        length: float_field(tok(&fields, 7, "PIPE length")?, "PIPE length", params)?,
        conductance: float_field(
            tok(&fields, 8, "PIPE conductance")?,
            "PIPE conductance",
            params,
        )?,
        drain_spacing: float_field(
            tok(&fields, 9, "PIPE drain spacing")?,
            "PIPE drain spacing",
            params,
        )?,
    })
}
