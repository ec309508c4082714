//! Fact generation engine for factgen.
//!
//! This crate consumes an [`AttributePool`](factgen_core::AttributePool) and a
//! [`GeneratorConfig`](factgen_core::GeneratorConfig) to produce a
//! deterministic stream of JSON Lines facts.

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod sampler;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use model::{Fact, FactValue, GenerationReport};
pub use output::jsonl::{FactWriter, WriteSummary};
pub use sampler::FactSampler;
