//! Per-line field scanning.
//!
//! Splits one line into whitespace-separated fields while keeping quoted
//! fields (index map names, gage descriptions, event descriptions) intact.
//! The scanner is the only place the crate looks below the line level; the
//! rest of the grammar is positional over the scanned fields.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawField {
    /// A double-quoted field; may be empty (`""`).
    #[regex(r#""[^"]*""#)]
    Quoted,

    /// Any other run of non-whitespace, non-quote characters.
    #[regex(r#"[^ \t\r\n\f"]+"#)]
    Bare,
}

/// One scanned field of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannedField {
    /// An unquoted field, verbatim.
    Bare(String),
    /// A quoted field with the quotes stripped; may be empty.
    Quoted(String),
}

impl ScannedField {
    /// The field's text, quotes already stripped.
    pub fn text(&self) -> &str {
        match self {
            ScannedField::Bare(s) | ScannedField::Quoted(s) => s,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, ScannedField::Quoted(_))
    }
}

/// Scan a line into fields, preserving the quoted/bare distinction.
pub fn fields(line: &str) -> Vec<ScannedField> {
    let mut lexer = RawField::lexer(line);
    let mut out = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(RawField::Quoted) => {
                let slice = lexer.slice();
                out.push(ScannedField::Quoted(slice[1..slice.len() - 1].to_string()));
            }
            Ok(RawField::Bare) => out.push(ScannedField::Bare(lexer.slice().to_string())),
            // A stray quote character; nothing sensible to attach it to.
            Err(()) => {}
        }
    }

    out
}

/// Scan a line into plain strings, quotes stripped.
pub fn tokens(line: &str) -> Vec<String> {
    fields(line)
        .into_iter()
        .map(|f| match f {
            ScannedField::Bare(s) | ScannedField::Quoted(s) => s,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_fields() {
        assert_eq!(
            tokens("CONNECT 1 0 1 2"),
            vec!["CONNECT", "1", "0", "1", "2"]
        );
    }

    #[test]
    fn test_quoted_field_keeps_spaces() {
        let scanned = fields("EVENT \"Big Storm 2001\"");
        assert_eq!(scanned[0], ScannedField::Bare("EVENT".to_string()));
        assert_eq!(scanned[1], ScannedField::Quoted("Big Storm 2001".to_string()));
    }

    #[test]
    fn test_empty_quoted_field() {
        let scanned = fields("ROUGHNESS \"\"");
        assert_eq!(scanned[1], ScannedField::Quoted(String::new()));
    }

    #[test]
    fn test_mixed_quoting() {
        assert_eq!(
            tokens("\"contam\" \"soil_idx\" out/contam.out"),
            vec!["contam", "soil_idx", "out/contam.out"]
        );
    }

    #[test]
    fn test_bracketed_token_is_bare() {
        let scanned = fields("MANNINGS_N [ROUGH_PARAM]");
        assert_eq!(scanned[1], ScannedField::Bare("[ROUGH_PARAM]".to_string()));
    }
}
