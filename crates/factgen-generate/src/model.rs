use std::path::PathBuf;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use factgen_core::Scalar;

/// Sampled value of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FactValue<'a> {
    /// Attribute with a max cardinality of 1.
    Single(&'a Scalar),
    /// Distinct pool members, in drawn order.
    Many(Vec<&'a Scalar>),
}

impl FactValue<'_> {
    pub fn as_single(&self) -> Option<&Scalar> {
        match self {
            FactValue::Single(value) => Some(*value),
            FactValue::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[&Scalar]> {
        match self {
            FactValue::Single(_) => None,
            FactValue::Many(values) => Some(values.as_slice()),
        }
    }
}

impl Serialize for FactValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FactValue::Single(value) => value.serialize(serializer),
            FactValue::Many(values) => values.serialize(serializer),
        }
    }
}

/// One generated record: every pool attribute mapped to a sampled value.
///
/// Fields borrow from the attribute pool and keep discovery order, which is
/// also the key order of the serialized JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fact<'a> {
    fields: Vec<(&'a str, FactValue<'a>)>,
}

impl<'a> Fact<'a> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, attr: &'a str, value: FactValue<'a>) {
        self.fields.push((attr, value));
    }

    pub fn get(&self, attr: &str) -> Option<&FactValue<'a>> {
        self.fields
            .iter()
            .find(|(name, _)| *name == attr)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(&'a str, FactValue<'a>)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Fact<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (attr, value) in &self.fields {
            map.serialize_entry(attr, value)?;
        }
        map.end()
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub out_path: PathBuf,
    pub seed: u64,
    pub facts_written: u64,
    /// Discovered attribute names, in discovery order.
    pub attributes: Vec<String>,
    pub bytes_written: u64,
    /// Hex SHA-256 of the output artifact.
    pub sha256: String,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_serializes_in_insertion_order() {
        let pos = Scalar::Int(4);
        let dev = Scalar::from("oth");
        let kws = [Scalar::from("b"), Scalar::from("a")];

        let mut fact = Fact::with_capacity(3);
        fact.push("pos", FactValue::Single(&pos));
        fact.push("kws", FactValue::Many(kws.iter().collect()));
        fact.push("dev", FactValue::Single(&dev));

        let json = serde_json::to_string(&fact).expect("serialize fact");
        assert_eq!(json, r#"{"pos":4,"kws":["b","a"],"dev":"oth"}"#);
    }
}
