//! Antoine vapor-pressure coefficients and the tables that supply them.
//!
//! Coefficients follow the natural-log convention used by the bundled data:
//! `ln(Psat / mmHg) = A - B / (T / K + C)`.

use crate::error::{ThermoError, ThermoResult};
use mc_core::ensure_finite;
use mc_core::units::constants::ATMOSPHERE_MMHG;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fitted (A, B, C) triple for one pure component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AntoineCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl AntoineCoefficients {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Saturation pressure [mmHg] at `t_k` kelvin. No range checking.
    #[inline]
    pub fn saturation_pressure(&self, t_k: f64) -> f64 {
        (self.a - self.b / (t_k + self.c)).exp()
    }

    /// Temperature [K] at which the saturation pressure equals `p_mmhg`.
    #[inline]
    pub fn saturation_temperature(&self, p_mmhg: f64) -> f64 {
        self.b / (self.a - p_mmhg.ln()) - self.c
    }

    /// Normal boiling point [K], i.e. the saturation temperature at 760 mmHg.
    #[inline]
    pub fn boiling_point(&self) -> f64 {
        self.saturation_temperature(ATMOSPHERE_MMHG)
    }
}

/// Lookup of Antoine coefficients by chemical name.
pub trait CoefficientSource {
    /// Coefficients for `name`, or `None` if the source does not know it.
    fn coefficients(&self, name: &str) -> Option<AntoineCoefficients>;

    /// All chemical names, in source order.
    fn names(&self) -> Vec<&str>;

    /// Like [`Self::coefficients`], but a missing name is an error.
    fn require(&self, name: &str) -> ThermoResult<AntoineCoefficients> {
        self.coefficients(name)
            .ok_or_else(|| ThermoError::UnknownChemical {
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntoineEntry {
    pub name: String,
    pub coefficients: AntoineCoefficients,
}

/// Ordered name -> coefficients table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AntoineTable {
    entries: Vec<AntoineEntry>,
}

impl AntoineTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, coefficients: AntoineCoefficients) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.coefficients = coefficients,
            None => self.entries.push(AntoineEntry { name, coefficients }),
        }
    }

    pub fn entries(&self) -> &[AntoineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a delimited table of `name, A, B, C` rows.
    ///
    /// Spaces around fields are ignored and blank lines are skipped. When
    /// `has_header` is set the first line is discarded unread.
    pub fn parse_delimited(text: &str, delimiter: char, has_header: bool) -> ThermoResult<Self> {
        let mut table = Self::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            if has_header && idx == 0 {
                continue;
            }
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split(delimiter).map(str::trim);
            let name = match fields.next() {
                Some(name) if !name.is_empty() => name,
                _ => {
                    return Err(ThermoError::Parse {
                        line: line_no,
                        message: "missing chemical name".to_string(),
                    });
                }
            };

            let values = fields
                .map(|field| {
                    field.parse::<f64>().map_err(|_| ThermoError::Parse {
                        line: line_no,
                        message: format!("'{field}' is not a number"),
                    })
                })
                .collect::<ThermoResult<Vec<f64>>>()?;

            let [a, b, c] = values[..] else {
                return Err(ThermoError::Parse {
                    line: line_no,
                    message: format!("expected 3 coefficients, found {}", values.len()),
                });
            };
            for (value, what) in [(a, "Antoine A"), (b, "Antoine B"), (c, "Antoine C")] {
                ensure_finite(value, what).map_err(|e| ThermoError::Parse {
                    line: line_no,
                    message: e.to_string(),
                })?;
            }

            table.insert(name, AntoineCoefficients::new(a, b, c));
        }

        Ok(table)
    }

    /// Read and parse a delimited coefficient file.
    pub fn from_path(path: &Path, delimiter: char, has_header: bool) -> ThermoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ThermoError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table = Self::parse_delimited(&content, delimiter, has_header)?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded coefficient table");
        Ok(table)
    }
}

impl CoefficientSource for AntoineTable {
    fn coefficients(&self, name: &str) -> Option<AntoineCoefficients> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.coefficients)
    }

    fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}
