use std::collections::HashMap;

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::model::{Scalar, ScalarKind, Target};

/// Per-attribute universe of legal values, in attribute discovery order.
///
/// Built once from the corpus and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributePool {
    entries: Vec<PoolEntry>,
}

#[derive(Debug, Clone, PartialEq)]
struct PoolEntry {
    name: String,
    values: Vec<Scalar>,
}

struct Accumulator {
    name: String,
    values: Vec<Scalar>,
    kind: Option<(ScalarKind, String)>,
}

impl AttributePool {
    /// Fold every rule of every target into a pool.
    ///
    /// Values are sorted and deduplicated per attribute, then the configured
    /// merge list is appended as-is. Merge lists of attributes that no rule
    /// mentions are ignored.
    pub fn build(targets: &[Target], config: &GeneratorConfig) -> Result<Self> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut discovered: Vec<Accumulator> = Vec::new();

        for (target_idx, target) in targets.iter().enumerate() {
            for (rule_idx, rule) in target.rules.iter().enumerate() {
                let slot = *index.entry(rule.attr.as_str()).or_insert_with(|| {
                    discovered.push(Accumulator {
                        name: rule.attr.clone(),
                        values: Vec::new(),
                        kind: None,
                    });
                    discovered.len() - 1
                });
                let acc = &mut discovered[slot];

                for (value_idx, value) in rule.values.iter().enumerate() {
                    let path = || format!("/{target_idx}/rules/{rule_idx}/values/{value_idx}");
                    if let Some((kind, first_path)) = &acc.kind {
                        if *kind != value.kind() {
                            return Err(Error::schema(
                                path(),
                                format!(
                                    "attribute '{}' mixes {} and {} values (first at {})",
                                    rule.attr,
                                    kind,
                                    value.kind(),
                                    first_path
                                ),
                            ));
                        }
                    } else {
                        acc.kind = Some((value.kind(), path()));
                    }
                    acc.values.push(value.clone());
                }
            }
        }

        let mut entries = Vec::with_capacity(discovered.len());
        for Accumulator {
            name, mut values, ..
        } in discovered
        {
            values.sort();
            values.dedup();
            let unique = values.len();
            values.extend_from_slice(config.merge_list(&name));

            if values.is_empty() {
                return Err(Error::schema(
                    "/",
                    format!("attribute '{name}' has no values to sample"),
                ));
            }

            debug!(
                event = "pool_entry_built",
                attr = %name,
                discovered = unique,
                merged = values.len() - unique
            );
            entries.push(PoolEntry { name, values });
        }

        Ok(Self { entries })
    }

    /// Attribute names in order of first sight.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Attribute names paired with their values, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Scalar])> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    pub fn values(&self, attr: &str) -> Option<&[Scalar]> {
        self.entries
            .iter()
            .find(|entry| entry.name == attr)
            .map(|entry| entry.values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
