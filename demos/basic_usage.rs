// Example: Basic usage of the potrero-core library
use std::fs;
use std::time::Instant;

use potrero_core::catalog::Catalog;
use potrero_core::favorites::{FavoritesStats, FavoritesStore, SearchFilter};
use potrero_core::models::AttractionId;
use potrero_core::notification::Notification;
use potrero_core::storage::SqliteStore;
use chrono::Utc;

fn main() -> anyhow::Result<()> {
    let db_path = "basic_usage_potrero.db";
    fs::remove_file(db_path).ok(); // Clean up previous run

    println!("--- Basic Usage of potrero-core ---");

    // ========== Catalog ==========
    println!("\n1. Loading the catalog...");
    let catalog = Catalog::load_embedded()?;
    for attraction in catalog.attractions() {
        println!("   - {} [{}]", attraction.label(), attraction.category().unwrap_or("-"));
    }

    // ========== Favorites ==========
    println!("\n2. Opening favorites...");
    let mut store = FavoritesStore::new(SqliteStore::open(db_path)?);
    store.load();
    println!("   ✓ Loaded {} favorites", store.len());

    let mut notification = Notification::default();
    let salto_id = AttractionId::from("salto-moneda");
    let salto = catalog
        .find(&salto_id)
        .ok_or_else(|| anyhow::anyhow!("salto-moneda missing from catalog"))?;

    let toggled = store.toggle(salto);
    notification.show_toggled(&toggled, Instant::now());
    if let Some(toast) = notification.current() {
        println!("   ✓ {} {}", toast.message(), toast.label);
    }

    // ========== Undo ==========
    println!("\n3. Undoing...");
    notification.undo(&mut store, Instant::now());
    println!("   ✓ Is favorite after undo: {}", store.is_favorite(&salto_id));

    // ========== Filter & Stats ==========
    println!("\n4. Favoriting every water attraction...");
    let water = SearchFilter::new("", Some("water".to_string()));
    for attraction in catalog.filter(&water) {
        store.add(attraction);
    }
    let stats = FavoritesStats::compute(store.items(), Utc::now());
    println!("   ✓ {} favorites, {} added this week", stats.total, stats.recent);

    // ========== Restart ==========
    println!("\n5. Reopening the database...");
    let mut reopened = FavoritesStore::new(SqliteStore::open(db_path)?);
    reopened.load();
    for item in reopened.items() {
        println!("   ⭐ {} (added {})", item.label(), item.date_added.format("%Y-%m-%d %H:%M"));
    }

    reopened.clear_all();
    println!("\n   ✓ Cleared, {} favorites left", reopened.len());

    fs::remove_file(db_path).ok();
    Ok(())
}
