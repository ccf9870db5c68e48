pub use crate::errors::{ErrorCategory, ErrorKind, GraftError};
pub use crate::pipeline::{generated_name, run_unit, run_unit_with, GeneratedSource};

pub mod annotations;
pub mod ast;
pub mod cli;
pub mod errors;
pub mod passes;
pub mod pipeline;
pub mod render;
pub mod semantics;
