//! YAML case files and design reports.
//!
//! A case names the chemical pair and the tower spec, and optionally a
//! delimited coefficient table to use instead of the built-in one:
//!
//! ```yaml
//! light: ethanol
//! heavy: n-nonane
//! tower:
//!   reflux_ratio: 2.5
//!   bottoms: 0.1
//!   feed: 0.4
//!   distillate: 0.95
//!   murphree: 0.95
//! coefficients:
//!   path: antoine.csv
//! ```

use std::path::{Path, PathBuf};

use mc_column::{OperatingLine, StageCount, StageStep, TowerSpec};
use mc_thermo::{AntoineTable, ChemicalPair, CoefficientSource, TemperatureBounds};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::session::DistillationSession;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    pub light: String,
    pub heavy: String,
    pub tower: TowerSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<TableDef>,
}

/// Delimited coefficient table reference. Relative paths resolve against
/// the case file's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub path: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_header")]
    pub has_header: bool,
}

fn default_delimiter() -> char {
    ','
}

fn default_header() -> bool {
    true
}

/// Load a case from a YAML file.
pub fn load_case(path: &Path) -> AppResult<CaseFile> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_case(&content)
}

pub fn parse_case(yaml: &str) -> AppResult<CaseFile> {
    serde_yaml::from_str(yaml).map_err(|e| AppError::Case(format!("Failed to parse case YAML: {}", e)))
}

/// Save a case to a YAML file.
pub fn save_case(path: &Path, case: &CaseFile) -> AppResult<()> {
    let content = serde_yaml::to_string(case)
        .map_err(|e| AppError::Case(format!("Failed to serialize case: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

impl CaseFile {
    /// Coefficient source for this case; `base_dir` anchors relative table paths.
    pub fn coefficient_source(&self, base_dir: &Path) -> AppResult<Box<dyn CoefficientSource>> {
        match &self.coefficients {
            Some(table) => {
                let path = if table.path.is_absolute() {
                    table.path.clone()
                } else {
                    base_dir.join(&table.path)
                };
                let loaded = AntoineTable::from_path(&path, table.delimiter, table.has_header)?;
                Ok(Box::new(loaded))
            }
            None => Ok(Box::new(AntoineTable::builtin())),
        }
    }

    pub fn session(&self, base_dir: &Path) -> AppResult<DistillationSession> {
        DistillationSession::new(
            self.coefficient_source(base_dir)?,
            ChemicalPair::new(&self.light, &self.heavy),
            self.tower,
        )
    }
}

/// Serializable summary of one design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignReport {
    pub chemicals: ChemicalPair,
    pub temperature_bounds: TemperatureBounds,
    pub tower: TowerSpec,
    pub operating_line: OperatingLine,
    pub stages: StageCount,
    pub feed_step: usize,
    pub trace: Vec<StageStep>,
}

impl DesignReport {
    pub fn from_session(session: &DistillationSession) -> Self {
        let result = session.last_result();
        Self {
            chemicals: session.current_chemicals().clone(),
            temperature_bounds: session.temperature_bounds(),
            tower: session.tower_spec(),
            operating_line: *session.operating_line(),
            stages: result.steps,
            feed_step: result.feed_step,
            trace: result.trace.clone(),
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load a case file and design its column.
pub fn run_case(path: &Path) -> AppResult<DesignReport> {
    let case = load_case(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let session = case.session(base_dir)?;
    tracing::debug!(path = %path.display(), stages = %session.last_result().steps, "case evaluated");
    Ok(DesignReport::from_session(&session))
}
