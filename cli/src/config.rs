//! Configuration of the command-line interface.

use anyhow::{Context, Result};
use matrix3d::{Matrix3d, ParsePolicy};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Options controlling how transforms are read and printed. Loaded from a RON
/// file and overridden by command-line flags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// How to handle input that is not a recognizable transform value.
    pub parse_policy: ParsePolicy,
    /// Number of decimals to round printed values to.
    pub precision: Option<usize>,
    /// Print `matrix(...)` instead of `matrix3d(...)` when the result has no
    /// 3D components.
    pub prefer_short_form: bool,
}

impl CliConfig {
    /// Reads the RON (Rusty Object Notation) file at the given path and
    /// deserializes it into a configuration.
    pub fn from_ron_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();

        let text = fs::read_to_string(file_path)
            .with_context(|| format!("Could not open {}", file_path.display()))?;

        ron::from_str(&text)
            .map_err(anyhow::Error::from)
            .with_context(|| format!("Invalid syntax in {}", file_path.display()))
    }

    /// Applies the command-line overrides on top of this configuration.
    pub fn with_overrides(mut self, lenient: bool, precision: Option<usize>, short: bool) -> Self {
        if lenient {
            self.parse_policy = ParsePolicy::Lenient;
        }
        if precision.is_some() {
            self.precision = precision;
        }
        self.prefer_short_form |= short;
        self
    }

    /// Renders the matrix as a transform property value according to this
    /// configuration.
    pub fn render(&self, matrix: &Matrix3d) -> String {
        let matrix = match self.precision {
            Some(decimals) => matrix.mapped(|value| round_to_decimals(value, decimals)),
            None => *matrix,
        };
        match matrix.to_short() {
            Some(short) if self.prefer_short_form => short.to_string(),
            _ => matrix.to_string(),
        }
    }
}

fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}
