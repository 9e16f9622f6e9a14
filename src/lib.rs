//! Stored procedure scaffolding core.
//!
//! Provides:
//! - `plugin`: generated proto definitions for the request/response wire format
//! - `scaffolder`: result-type and facade generation over a procedure model
//! - `runtime`: helper functions for running the scaffolder as a plugin

pub mod emitter;
pub mod error;
pub mod facade;
pub mod ident;
pub mod model;
pub mod options;
pub mod plugin;
pub mod result_type;
pub mod runtime;
pub mod scaffolder;
pub mod types;

pub mod prelude {
    pub use crate::error::{Result, ScaffoldError};
    pub use crate::model::*;
    pub use crate::options::ProcedureScaffolderOptions;
    pub use crate::runtime::*;
    pub use crate::scaffolder::*;
    pub use crate::types::{SqlServerTypeMapper, TypeReference, TypeResolver};
    pub use prost::Message;
}
