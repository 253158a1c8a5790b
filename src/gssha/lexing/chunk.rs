//! Keyword-delimited chunking of a line stream.
//!
//! One call over one line stream and one keyword vocabulary produces a
//! [`ChunkMap`]. Within a single keyword the chunk order matches file order;
//! across different keywords no order is preserved — consumers that need
//! cross-keyword ordering must reconstruct it out of band (see
//! [`pairing`](crate::gssha::pairing)).

use std::collections::HashMap;

use crate::gssha::error::ParseError;

/// A keyword line plus its non-keyword continuation lines.
///
/// Invariant: `lines` is non-empty and the first line's discriminant equals
/// `keyword`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub keyword: String,
    pub lines: Vec<String>,
}

impl Chunk {
    /// The line that opened this chunk.
    pub fn head(&self) -> &str {
        &self.lines[0]
    }

    /// The lines after the keyword line.
    pub fn tail(&self) -> &[String] {
        &self.lines[1..]
    }
}

/// Keyword → ordered chunk list, produced by one chunker pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMap {
    buckets: HashMap<String, Vec<Chunk>>,
}

impl ChunkMap {
    /// All chunks filed under `keyword`, in file order. Empty for keywords
    /// that never occurred.
    pub fn get(&self, keyword: &str) -> &[Chunk] {
        self.buckets.get(keyword).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The single chunk for `keyword`, if exactly one occurred.
    pub fn only(&self, keyword: &str) -> Option<&Chunk> {
        match self.get(keyword) {
            [chunk] => Some(chunk),
            _ => None,
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        !self.get(keyword).is_empty()
    }

    fn push(&mut self, chunk: Chunk) {
        self.buckets.entry(chunk.keyword.clone()).or_default().push(chunk);
    }
}

/// The discriminant of a line: its first whitespace-delimited token.
pub fn discriminant(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// Divide a line stream into chunks between the given keywords.
///
/// Blank lines are skipped. A line whose discriminant is a member of
/// `keywords` opens a new chunk; any other line is appended to the currently
/// open chunk. A continuation line with no open chunk is an error: there is
/// no well-defined chunk to attach it to, and attaching it to anything else
/// would silently corrupt the neighbouring record.
pub fn chunk<'a, I>(keywords: &[&str], lines: I) -> Result<ChunkMap, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = ChunkMap::default();
    let mut open: Option<Chunk> = None;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let token = discriminant(line).unwrap_or_default();

        if keywords.contains(&token) {
            if let Some(finished) = open.take() {
                map.push(finished);
            }
            open = Some(Chunk {
                keyword: token.to_string(),
                lines: vec![line.to_string()],
            });
        } else {
            match open.as_mut() {
                Some(chunk) => chunk.lines.push(line.to_string()),
                None => return Err(ParseError::OrphanLine(line.trim().to_string())),
            }
        }
    }

    if let Some(finished) = open {
        map.push(finished);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_preserves_order() {
        let lines = ["NODE 1", "X_Y 0.0 0.0", "NODE 2", "X_Y 1.0 1.0"];
        let map = chunk(&["NODE"], lines).unwrap();

        let nodes = map.get("NODE");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].lines, vec!["NODE 1", "X_Y 0.0 0.0"]);
        assert_eq!(nodes[1].lines, vec!["NODE 2", "X_Y 1.0 1.0"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let lines = ["LINK 1", "", "   ", "DX 10.0"];
        let map = chunk(&["LINK"], lines).unwrap();
        assert_eq!(map.get("LINK")[0].lines, vec!["LINK 1", "DX 10.0"]);
    }

    #[test]
    fn test_orphan_line_is_an_error() {
        let lines = ["DX 10.0", "LINK 1"];
        let err = chunk(&["LINK"], lines).unwrap_err();
        assert_eq!(err, ParseError::OrphanLine("DX 10.0".to_string()));
    }

    #[test]
    fn test_unused_keywords_yield_empty_buckets() {
        let map = chunk(&["LINK", "CONNECT"], ["LINK 1"]).unwrap();
        assert!(map.contains("LINK"));
        assert!(!map.contains("CONNECT"));
        assert!(map.get("CONNECT").is_empty());
    }

    #[test]
    fn test_chunk_head_and_tail() {
        let map = chunk(&["EVENT"], ["EVENT \"storm\"", "NRGAG 2"]).unwrap();
        let event = map.only("EVENT").unwrap();
        assert_eq!(event.head(), "EVENT \"storm\"");
        assert_eq!(event.tail(), ["NRGAG 2".to_string()]);
    }

    #[test]
    fn test_keyword_must_be_first_token() {
        // A keyword appearing later in a line does not open a chunk.
        let lines = ["LINK 1", "NOT A LINK"];
        let map = chunk(&["LINK"], lines).unwrap();
        assert_eq!(map.get("LINK")[0].lines.len(), 2);
    }
}
