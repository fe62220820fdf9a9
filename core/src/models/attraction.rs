use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable identifier of an attraction.
///
/// Catalog entries use either numeric or textual ids, so both JSON forms are
/// accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttractionId {
    Int(i64),
    Text(String),
}

impl fmt::Display for AttractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttractionId::Int(n) => write!(f, "{}", n),
            AttractionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for AttractionId {
    fn from(value: i64) -> Self {
        AttractionId::Int(value)
    }
}

impl From<&str> for AttractionId {
    fn from(value: &str) -> Self {
        AttractionId::Text(value.to_string())
    }
}

impl From<String> for AttractionId {
    fn from(value: String) -> Self {
        AttractionId::Text(value)
    }
}

/// A catalog entry. Everything besides `id` is carried as opaque attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: AttractionId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Attraction {
    /// Create an attraction with no attributes
    pub fn new(id: impl Into<AttractionId>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        text_attribute(&self.attributes, "title")
    }

    pub fn description(&self) -> Option<&str> {
        text_attribute(&self.attributes, "description")
    }

    pub fn category(&self) -> Option<&str> {
        text_attribute(&self.attributes, "category")
    }

    /// Human readable name, falling back to the id
    pub fn label(&self) -> String {
        self.title()
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

pub(crate) fn text_attribute<'a>(attributes: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    attributes.get(key).and_then(Value::as_str)
}
