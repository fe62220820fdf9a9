use crate::models::{Attraction, FavoriteItem};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Favorites added within this many days count as recent
pub const RECENT_DAYS: i64 = 7;

/// Text search plus optional category restriction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub search: String,
    pub category: Option<String>,
}

impl SearchFilter {
    pub fn new(search: impl Into<String>, category: Option<String>) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category.is_none()
    }

    /// Case-insensitive match on title or description, and exact category match
    pub fn matches(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        category: Option<&str>,
    ) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = [title, description]
            .iter()
            .any(|field| field.unwrap_or("").to_lowercase().contains(&needle));
        let matches_category = match &self.category {
            Some(wanted) => category == Some(wanted.as_str()),
            None => true,
        };
        matches_search && matches_category
    }

    pub fn matches_favorite(&self, item: &FavoriteItem) -> bool {
        self.matches(item.title(), item.description(), item.category())
    }

    pub fn matches_attraction(&self, attraction: &Attraction) -> bool {
        self.matches(
            attraction.title(),
            attraction.description(),
            attraction.category(),
        )
    }

    /// Favorites passing the filter, in their original order
    pub fn apply<'a>(&self, items: &'a [FavoriteItem]) -> Vec<&'a FavoriteItem> {
        items.iter().filter(|item| self.matches_favorite(item)).collect()
    }
}

/// Summary counts over a favorites list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesStats {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub recent: usize,
}

impl FavoritesStats {
    pub fn compute(items: &[FavoriteItem], now: DateTime<Utc>) -> Self {
        let mut by_category = BTreeMap::new();
        for item in items {
            if let Some(category) = item.category() {
                *by_category.entry(category.to_string()).or_insert(0) += 1;
            }
        }
        Self {
            total: items.len(),
            by_category,
            recent: items
                .iter()
                .filter(|item| item.is_recent(now, RECENT_DAYS))
                .count(),
        }
    }

    pub fn category_count(&self, category: &str) -> usize {
        self.by_category.get(category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn item(id: i64, title: &str, description: &str, category: &str, added: DateTime<Utc>) -> FavoriteItem {
        let attraction = Attraction::new(id)
            .with_attribute("title", title)
            .with_attribute("description", description)
            .with_attribute("category", category);
        FavoriteItem::added_at(&attraction, added)
    }

    fn sample(now: DateTime<Utc>) -> Vec<FavoriteItem> {
        vec![
            item(1, "Salto de la Moneda", "Cascada entre sierras", "water", now - Duration::days(1)),
            item(2, "Cerro de la Cruz", "Ascenso con vista al dique", "mountain", now - Duration::days(30)),
            item(3, "Dique Potrero", "Espejo de agua", "water", now - Duration::days(3)),
        ]
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let items = sample(now);
        let filter = SearchFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&items).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let items = sample(now);

        let by_title = SearchFilter::new("SALTO", None);
        assert_eq!(by_title.apply(&items).len(), 1);

        let by_description = SearchFilter::new("dique", None);
        let ids: Vec<String> = by_description.apply(&items).iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_category_filter() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let items = sample(now);

        let water = SearchFilter::new("", Some("water".to_string()));
        assert_eq!(water.apply(&items).len(), 2);

        let water_dique = SearchFilter::new("dique", Some("water".to_string()));
        assert_eq!(water_dique.apply(&items).len(), 1);

        let missing = SearchFilter::new("", Some("nature".to_string()));
        assert!(missing.apply(&items).is_empty());
    }

    #[test]
    fn test_stats() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let stats = FavoritesStats::compute(&sample(now), now);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.category_count("water"), 2);
        assert_eq!(stats.category_count("mountain"), 1);
        assert_eq!(stats.category_count("nature"), 0);
        assert_eq!(stats.recent, 2);
    }
}
