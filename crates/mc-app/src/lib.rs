//! Shared application service layer for McCabe-Thiele design.
//!
//! Front ends drive a [`DistillationSession`] for interactive edits, or load
//! a YAML [`CaseFile`] and get back a serializable [`DesignReport`].

pub mod case;
pub mod error;
pub mod session;

pub use case::{CaseFile, DesignReport, TableDef, load_case, parse_case, run_case, save_case};
pub use error::{AppError, AppResult};
pub use session::DistillationSession;
