use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::Scalar;

/// Seed of the fact sampler's random stream.
pub const DEFAULT_SEED: u64 = 1984;
/// Number of facts emitted per run.
pub const DEFAULT_COUNT: u64 = 10_000;

/// Generator configuration: run size, seed, the max-cardinality table and
/// the per-attribute merge lists.
///
/// Every field falls back to its built-in default when omitted from a TOML
/// file. A table given in the file replaces the built-in table as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub count: u64,
    /// Max number of distinct values a fact carries per attribute.
    /// Attributes not listed default to 1 (a single scalar).
    pub max_values: BTreeMap<String, u32>,
    /// Values appended verbatim to an attribute's pool after sorting and
    /// deduplication. Repeats are kept and bias sampling.
    pub merge_values: BTreeMap<String, Vec<Scalar>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let max_values = [("rcat", 50), ("vcat", 50), ("infq", 5), ("kws", 10)]
            .into_iter()
            .map(|(name, cap)| (name.to_string(), cap))
            .collect();

        let mut merge_values = BTreeMap::new();
        merge_values.insert("dev".to_string(), repeat("oth", 6));
        merge_values.insert(
            "bwsm".to_string(),
            ["ff", "sf", "op", "ng", "kq", "an", "ms", "kk", "mo"]
                .into_iter()
                .map(Scalar::from)
                .collect(),
        );
        merge_values.insert(
            "pos".to_string(),
            [2, 4, 5, 6, 7].into_iter().map(Scalar::Int).collect(),
        );
        merge_values.insert("mob".to_string(), vec![Scalar::Int(0); 8]);
        let mut loc = repeat("en", 12);
        loc.extend(repeat("es", 4));
        merge_values.insert("loc".to_string(), loc);

        Self {
            seed: DEFAULT_SEED,
            count: DEFAULT_COUNT,
            max_values,
            merge_values,
        }
    }
}

impl GeneratorConfig {
    /// Cap for `attr`; 1 unless the table lists it.
    pub fn max_cardinality(&self, attr: &str) -> u32 {
        self.max_values.get(attr).copied().unwrap_or(1)
    }

    /// Merge list for `attr`, empty when none is configured.
    pub fn merge_list(&self, attr: &str) -> &[Scalar] {
        self.merge_values
            .get(attr)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((attr, _)) = self.max_values.iter().find(|(_, cap)| **cap == 0) {
            return Err(Error::Config(format!(
                "max_values.{attr} must be a positive integer"
            )));
        }
        Ok(())
    }
}

/// Load a generator configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: GeneratorConfig = toml::from_str(&content)?;
    config.validate()?;
    info!(
        event = "config_loaded",
        path = %path.display(),
        seed = config.seed,
        count = config.count
    );
    Ok(config)
}

fn repeat(value: &str, times: usize) -> Vec<Scalar> {
    vec![Scalar::from(value); times]
}
