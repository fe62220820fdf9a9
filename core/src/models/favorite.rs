use super::attraction::{text_attribute, Attraction, AttractionId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys owned by the favorite record itself; never copied from attributes.
const RESERVED_KEYS: [&str; 2] = ["id", "dateAdded"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteItem {
    pub id: AttractionId,
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FavoriteItem {
    /// Create a favorite from an attraction, stamped with the current time
    pub fn new(attraction: &Attraction) -> Self {
        Self::added_at(attraction, Utc::now())
    }

    /// Create a favorite with an explicit insertion time
    pub fn added_at(attraction: &Attraction, date_added: DateTime<Utc>) -> Self {
        let attributes = attraction
            .attributes
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self {
            id: attraction.id.clone(),
            date_added,
            attributes,
        }
    }

    /// Rebuild the attraction this favorite was copied from
    pub fn to_attraction(&self) -> Attraction {
        Attraction {
            id: self.id.clone(),
            attributes: self.attributes.clone(),
        }
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

    pub fn label(&self) -> String {
        self.title()
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Whether the favorite was added within `days` of `now`
    pub fn is_recent(&self, now: DateTime<Utc>, days: i64) -> bool {
        now.signed_duration_since(self.date_added) <= Duration::days(days)
    }
}
