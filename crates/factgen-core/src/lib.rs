//! Core contracts for factgen.
//!
//! This crate owns the targets corpus model, its JSON Schema, the loader that
//! turns `targets.json` into [`Target`] records, the generator configuration
//! and the [`AttributePool`] built from both.

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod pool;
pub mod schema;

pub use config::{GeneratorConfig, load_config};
pub use error::{Error, Result};
pub use loader::{load_targets, parse_targets};
pub use model::{Rule, Scalar, ScalarKind, Target};
pub use pool::AttributePool;
pub use schema::{SchemaIssue, targets_json_schema, validate_targets_json};
