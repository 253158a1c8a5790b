//! Field-level helpers shared by the grammar parsers.

use crate::gssha::error::ParseError;
use crate::gssha::replace::{read_value, ReplaceParamSet};

/// The `idx`-th token of a token list, or a malformed-input error naming
/// the missing field.
pub fn tok<'a>(tokens: &'a [String], idx: usize, field: &str) -> Result<&'a str, ParseError> {
    tokens
        .get(idx)
        .map(String::as_str)
        .ok_or_else(|| ParseError::malformed(format!("missing field {}", field)))
}

/// Parse a float field, applying replacement-parameter preprocessing first.
pub fn float_field(
    token: &str,
    field: &str,
    params: Option<&ReplaceParamSet>,
) -> Result<f64, ParseError> {
    let processed = read_value(token, params);
    processed
        .parse()
        .map_err(|_| ParseError::bad_number(field, token))
}

/// Parse an integer field, applying replacement-parameter preprocessing
/// first (a replaced field parses to its negated parameter id).
pub fn int_field(
    token: &str,
    field: &str,
    params: Option<&ReplaceParamSet>,
) -> Result<i64, ParseError> {
    let processed = read_value(token, params);
    processed
        .parse()
        .map_err(|_| ParseError::bad_number(field, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gssha::replace::{ReplaceParamSet, TargetParameter};

    #[test]
    fn test_tok_reports_field_name() {
        let tokens = vec!["CONNECT".to_string()];
        let err = tok(&tokens, 3, "downstream link").unwrap_err();
        assert!(err.to_string().contains("downstream link"));
    }

    #[test]
    fn test_float_field_with_replacement() {
        let params = ReplaceParamSet::new(vec![TargetParameter {
            name: "K".to_string(),
            format: "%f".to_string(),
        }]);
        assert_eq!(float_field("[K]", "k", Some(&params)).unwrap(), -1.0);
        assert_eq!(float_field("1.5", "k", Some(&params)).unwrap(), 1.5);
        assert!(float_field("abc", "k", None).is_err());
    }
}
