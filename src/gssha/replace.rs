//! Replacement parameters.
//!
//! GSSHA's alternate run modes substitute named parameters for literal
//! numeric values: a field reads `[NAME]` instead of a number. On read the
//! bracketed name resolves to the negated 1-based id of the declared
//! parameter so records stay numeric; on write the negative id resolves back
//! to the declared name. Every numeric field in every grammar goes through
//! [`read_value`] before coercion, and every serializer goes through
//! [`write_value`] before formatting.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::gssha::error::ParseError;

/// Reserved id emitted when a bracketed token matches no declared parameter.
pub const REPLACE_NO_VALUE: i64 = -999_999;

/// Literal written back for the reserved id.
pub const NO_VARIABLE: &str = "[NO_VARIABLE]";

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());

/// One declared target parameter. Ids are 1-based declaration positions.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetParameter {
    /// Bare name, without brackets.
    pub name: String,
    /// The numeric format hint carried by the declaration (e.g. `%f`);
    /// kept verbatim, not interpreted.
    pub format: String,
}

/// The full set of declared replacement parameters for one conversion run.
///
/// Read-only once constructed; shared by reference across all read/write
/// calls of a run.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReplaceParamSet {
    targets: Vec<TargetParameter>,
}

impl ReplaceParamSet {
    pub fn new(targets: Vec<TargetParameter>) -> Self {
        Self { targets }
    }

    /// Convenience constructor for the conventional declaration layout: a
    /// count line followed by one `name format` line per parameter.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let mut targets = Vec::new();

        for line in text.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [] | [_] => {} // blank or the count line
                [name, format, ..] => targets.push(TargetParameter {
                    name: name.trim_matches(['[', ']']).to_string(),
                    format: format.to_string(),
                }),
            }
        }

        if targets.is_empty() {
            return Err(ParseError::malformed(
                "replacement parameter text declares no parameters",
            ));
        }

        Ok(Self { targets })
    }

    pub fn targets(&self) -> &[TargetParameter] {
        &self.targets
    }

    /// 1-based id of the named parameter.
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.targets.iter().position(|t| t.name == name).map(|i| i + 1)
    }

    /// Name for a 1-based id.
    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.targets.get(id.checked_sub(1)?).map(|t| t.name.as_str())
    }
}

/// Preprocess a scalar token during reading.
///
/// With no parameter set, or for an ordinary token, the token passes
/// through unchanged. A bracketed token resolves to the negated id of the
/// first declared parameter with that name, or to [`REPLACE_NO_VALUE`] when
/// nothing matches.
pub fn read_value(token: &str, params: Option<&ReplaceParamSet>) -> String {
    let Some(params) = params else {
        return token.to_string();
    };

    if !token.contains('[') && !token.contains(']') {
        return token.to_string();
    }

    let resolved = BRACKETED
        .captures(token)
        .and_then(|caps| params.id_of(caps.get(1).map_or("", |m| m.as_str())))
        .map(|id| -(id as i64))
        .unwrap_or(REPLACE_NO_VALUE);

    resolved.to_string()
}

/// What a serializer should emit for one scalar field.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteField {
    /// An ordinary number; render in the field's normal numeric format.
    Number(f64),
    /// A replacement name or the `[NO_VARIABLE]` literal; emit verbatim.
    Verbatim(String),
}

/// Preprocess a scalar value during writing; the inverse of [`read_value`].
pub fn write_value(value: f64, params: Option<&ReplaceParamSet>) -> WriteField {
    let Some(params) = params else {
        return WriteField::Number(value);
    };

    if value == REPLACE_NO_VALUE as f64 {
        return WriteField::Verbatim(NO_VARIABLE.to_string());
    }

    if value < 0.0 && value.fract() == 0.0 {
        let id = (-value) as usize;
        if let Some(name) = params.name_of(id) {
            return WriteField::Verbatim(name.to_string());
        }
    }

    WriteField::Number(value)
}
