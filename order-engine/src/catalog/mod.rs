//! Menu catalog and composed-menu rules
//!
//! - [`Catalog`]: read-only snapshot of categories and items pushed by the
//!   catalog provider
//! - [`MenuRules`]: composed-menu registry and portion mapping, loaded from
//!   the menu rules document
//! - [`resolve_step_options`]: concrete options of a wizard step

pub mod resolver;
pub mod rules;

pub use resolver::resolve_step_options;
pub use rules::{MenuRules, MenuRulesDocument, RulesError, RulesResult};

use shared::models::{MenuCategory, MenuItem};
use std::collections::HashMap;

/// Catalog snapshot
///
/// The engine never writes it; a newer snapshot simply replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
    item_index: HashMap<String, usize>,
    category_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(categories: Vec<MenuCategory>, items: Vec<MenuItem>) -> Self {
        let item_index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();
        let category_index = categories
            .iter()
            .enumerate()
            .map(|(i, cat)| (cat.id.clone(), i))
            .collect();
        Self {
            categories,
            items,
            item_index,
            category_index,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.item_index.get(id).map(|&i| &self.items[i])
    }

    pub fn category(&self, id: &str) -> Option<&MenuCategory> {
        self.category_index.get(id).map(|&i| &self.categories[i])
    }

    /// Emoji of the item's category, empty when unknown
    pub fn category_emoji(&self, category_id: &str) -> &str {
        self.category(category_id)
            .map(|c| c.emoji.as_str())
            .unwrap_or_default()
    }

    /// Available items of active categories, ordered by category then item display order
    pub fn orderable_items(&self) -> Vec<&MenuItem> {
        let mut items: Vec<(&MenuCategory, &MenuItem)> = self
            .items
            .iter()
            .filter(|item| item.available)
            .filter_map(|item| {
                self.category(&item.category_id)
                    .filter(|c| c.active)
                    .map(|c| (c, item))
            })
            .collect();
        items.sort_by_key(|(c, item)| (c.display_order, item.display_order));
        items.into_iter().map(|(_, item)| item).collect()
    }

    /// Available items of one category, sorted by display order
    pub fn available_in_category(&self, category_id: &str) -> Vec<&MenuItem> {
        let mut items: Vec<&MenuItem> = self
            .items
            .iter()
            .filter(|item| item.category_id == category_id && item.available)
            .collect();
        items.sort_by_key(|item| item.display_order);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut hidden = MenuCategory::new("hidden", "Hidden", "🙈").with_display_order(0);
        hidden.active = false;
        Catalog::new(
            vec![
                MenuCategory::new("mains", "Plats", "🍽️").with_display_order(2),
                MenuCategory::new("drinks", "Boissons", "🥤").with_display_order(1),
                hidden,
            ],
            vec![
                MenuItem::new("m2", "Kefta", 14.0, "mains").with_display_order(2),
                MenuItem::new("m1", "Chawarma", 12.0, "mains").with_display_order(1),
                MenuItem::new("d1", "Ayran", 3.0, "drinks"),
                MenuItem::new("d2", "Jallab", 4.0, "drinks").unavailable(),
                MenuItem::new("h1", "Secret", 1.0, "hidden"),
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();
        assert_eq!(catalog.item("m1").unwrap().name, "Chawarma");
        assert!(catalog.item("nope").is_none());
        assert_eq!(catalog.category_emoji("drinks"), "🥤");
        assert_eq!(catalog.category_emoji("nope"), "");
    }

    #[test]
    fn test_orderable_items_order_and_filter() {
        let catalog = sample();
        let ids: Vec<&str> = catalog
            .orderable_items()
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["d1", "m1", "m2"]);
    }

    #[test]
    fn test_available_in_category() {
        let catalog = sample();
        let ids: Vec<&str> = catalog
            .available_in_category("mains")
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert!(catalog.available_in_category("drinks").len() == 1);
    }
}
