//! Scalar field rendering.
//!
//! Every numeric field passes through the replacement-parameter write
//! preprocessor first. A field that resolves to a parameter name (or to the
//! `[NO_VARIABLE]` literal) cannot be rendered in its numeric format; it is
//! emitted verbatim and the degradation is recorded, never silent.

use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::replace::{write_value, ReplaceParamSet, WriteField};

/// Render with 6 decimal places; the default for most value cards.
pub fn f6(value: f64, params: Option<&ReplaceParamSet>, diag: &mut Diagnostics) -> String {
    numeric(value, 6, params, diag)
}

/// Render with 2 decimal places (contaminant globals, pipe elevations).
pub fn f2(value: f64, params: Option<&ReplaceParamSet>, diag: &mut Diagnostics) -> String {
    numeric(value, 2, params, diag)
}

/// Render with 3 decimal places (precipitation values).
pub fn f3(value: f64, params: Option<&ReplaceParamSet>, diag: &mut Diagnostics) -> String {
    numeric(value, 3, params, diag)
}

/// Render an integer field, still honoring replacement parameters.
pub fn int(value: i64, params: Option<&ReplaceParamSet>, diag: &mut Diagnostics) -> String {
    match write_value(value as f64, params) {
        WriteField::Number(_) => value.to_string(),
        WriteField::Verbatim(text) => {
            diag.info(format!("field rendered verbatim as {}", text));
            text
        }
    }
}

fn numeric(
    value: f64,
    decimals: usize,
    params: Option<&ReplaceParamSet>,
    diag: &mut Diagnostics,
) -> String {
    match write_value(value, params) {
        WriteField::Number(v) if v.is_finite() => format!("{:.*}", decimals, v),
        WriteField::Number(v) => {
            diag.warn(format!("non-finite value {} rendered verbatim", v));
            v.to_string()
        }
        WriteField::Verbatim(text) => {
            diag.info(format!("field rendered verbatim as {}", text));
            text
        }
    }
}
