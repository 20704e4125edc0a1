//! Final documents keyed by canonical identifier.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::variant::NormalizedVariant;

/// Descriptive fields copied from the first member when merging a group.
pub const MERGED_SCALAR_FIELDS: [&str; 5] = ["gene", "region", "pos", "context", "rsid"];

/// A document ready for loading, keyed by its canonical identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub gwascatalog: Value,
}

impl ResolvedDocument {
    /// Document for a group with a single member.
    ///
    /// The content is the member's own cleaned document with `_id` replaced
    /// by the canonical id.
    pub fn from_variant(id: impl Into<String>, variant: &NormalizedVariant) -> Self {
        Self {
            id: id.into(),
            gwascatalog: variant.gwascatalog(),
        }
    }

    /// Merge several variants that resolved to the same canonical id.
    ///
    /// Merge policy:
    /// - `associations` lists every member's association in member order
    /// - `gene`, `region`, `pos`, `context` and `rsid` come from the first
    ///   member only; later members' values for these fields are discarded
    /// - all other per-variant fields (e.g. `chrom`) are not carried over
    ///
    /// Returns `None` for an empty slice. A single member is handled like
    /// [`Self::from_variant`].
    pub fn merge(id: impl Into<String>, members: &[NormalizedVariant]) -> Option<Self> {
        let id = id.into();
        match members {
            [] => None,
            [single] => Some(Self::from_variant(id, single)),
            [first, ..] => {
                let lead = first.gwascatalog();
                let mut section = Map::new();
                for field in MERGED_SCALAR_FIELDS {
                    if let Some(value) = lead.get(field) {
                        section.insert(field.to_string(), value.clone());
                    }
                }

                let associations: Vec<Value> = members
                    .iter()
                    .map(|member| match member.gwascatalog() {
                        Value::Object(mut catalog) => catalog
                            .remove("associations")
                            .unwrap_or_else(|| Value::Object(Map::new())),
                        _ => Value::Object(Map::new()),
                    })
                    .collect();
                section.insert("associations".to_string(), Value::Array(associations));

                Some(Self {
                    id,
                    gwascatalog: Value::Object(section),
                })
            }
        }
    }

    /// Number of associations carried by this document.
    pub fn association_count(&self) -> usize {
        match self.gwascatalog.get("associations") {
            Some(Value::Array(items)) => items.len(),
            Some(_) => 1,
            None => 0,
        }
    }

    /// The document as a JSON value, `_id` first.
    pub fn to_value(&self) -> Value {
        json!({
            "_id": self.id,
            "gwascatalog": self.gwascatalog,
        })
    }
}
