//! Core functionality for the pyward Python analyser
//!
//! This crate provides:
//! - parsing of Python sources into a position-annotated tree
//! - the catalog of optimization and security checks
//! - diagnostic generation (`analyze`)
//! - automatic fixes (`fix`)

pub mod check;
pub mod diagnostic;
pub mod error;
pub mod fix;
pub mod lints;
pub mod options;
pub mod registry;
pub mod source;
pub mod utils_ast;


pub use check::{analyze, analyze_diagnostics};
pub use diagnostic::{Diagnostic, Fix, Violation, ViolationData};
pub use error::Error;
pub use fix::{FixResult, fix};
pub use options::AnalysisOptions;
pub use registry::{ALL_CHECKS, Category, Check, resolve_alias, resolve_aliases};
pub use source::SourceModel;
