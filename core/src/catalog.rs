use crate::favorites::SearchFilter;
use crate::models::{Attraction, AttractionId};
use crate::{Error, Result};

/// Category ids used by the bundled catalog, with display labels
pub const CATEGORIES: [(&str, &str); 3] = [
    ("mountain", "Sierras"),
    ("water", "Water"),
    ("nature", "Nature"),
];

/// Display label for a category id
pub fn category_label(id: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(category, _)| *category == id)
        .map(|(_, label)| *label)
}

/// Read-only list of attractions shown by the guide
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    attractions: Vec<Attraction>,
}

impl Catalog {
    /// Parse a JSON array of attractions. Ids must be unique.
    pub fn from_json(json: &str) -> Result<Self> {
        let attractions: Vec<Attraction> = serde_json::from_str(json)?;
        for (i, attraction) in attractions.iter().enumerate() {
            if attractions[..i].iter().any(|other| other.id == attraction.id) {
                return Err(Error::InvalidInput(format!(
                    "Duplicate attraction id: {}",
                    attraction.id
                )));
            }
        }
        Ok(Self { attractions })
    }

    /// The catalog bundled with the crate
    pub fn load_embedded() -> Result<Self> {
        Self::from_json(include_str!("../catalog.json"))
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }

    pub fn find(&self, id: &AttractionId) -> Option<&Attraction> {
        self.attractions.iter().find(|a| &a.id == id)
    }

    pub fn filter(&self, filter: &SearchFilter) -> Vec<&Attraction> {
        self.attractions
            .iter()
            .filter(|a| filter.matches_attraction(a))
            .collect()
    }
}
