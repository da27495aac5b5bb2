//! Shared fixtures: a small Lebanese menu and the bundled rules document

#![allow(dead_code)]

use async_trait::async_trait;
use order_engine::printing::{PrintError, PrintResult, TicketPayload};
use order_engine::{Catalog, MenuRules, TicketPrinter};
use parking_lot::Mutex;
use shared::models::{MenuCategory, MenuItem};
use std::path::PathBuf;

pub fn rules_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/menu_rules.json")
}

pub fn rules() -> MenuRules {
    MenuRules::load(rules_path()).expect("bundled menu rules load")
}

pub fn catalog() -> Catalog {
    Catalog::new(
        vec![
            MenuCategory::new("menus", "Menus", "🍱").with_display_order(0),
            MenuCategory::new("sandwichs", "Sandwichs", "🥙").with_display_order(1),
            MenuCategory::new("entrees-froides", "Entrées froides", "🥗").with_display_order(2),
            MenuCategory::new("entrees-chaudes", "Entrées chaudes", "🔥").with_display_order(3),
            MenuCategory::new("boissons", "Boissons", "🥤").with_display_order(4),
            MenuCategory::new("desserts", "Desserts", "🍮").with_display_order(5),
        ],
        vec![
            MenuItem::new("menu-express", "Menu Talya express", 15.9, "menus"),
            MenuItem::new("menu-talya", "Menu Talya", 24.0, "menus"),
            MenuItem::new("chawarma", "Chawarma poulet", 9.5, "sandwichs").with_display_order(1),
            MenuItem::new("kafta", "Kafta", 9.0, "sandwichs").with_display_order(2),
            MenuItem::new("houmous", "Houmous", 6.5, "entrees-froides").with_display_order(1),
            MenuItem::new("moutabal", "Moutabal", 7.0, "entrees-froides").with_display_order(2),
            MenuItem::new("taboule", "Taboulé", 7.5, "entrees-froides").with_display_order(3),
            MenuItem::new("falafel", "Falafel", 5.0, "entrees-chaudes").with_display_order(1),
            MenuItem::new("rkakat", "Rkakat", 6.0, "entrees-chaudes").with_display_order(2),
            MenuItem::new("sambousek", "Sambousek", 6.5, "entrees-chaudes").with_display_order(3),
            MenuItem::new("ayran", "Ayran", 3.0, "boissons").with_display_order(1),
            MenuItem::new("jallab", "Jallab", 4.0, "boissons").with_display_order(2),
            MenuItem::new("baklava", "Baklava", 4.5, "desserts"),
            MenuItem::new("mouhalabieh", "Mouhalabieh", 5.0, "desserts").unavailable(),
        ],
    )
}

/// Printer that records payloads, optionally failing every call
#[derive(Default)]
pub struct RecordingPrinter {
    pub fail: bool,
    pub printed: Mutex<Vec<TicketPayload>>,
}

impl RecordingPrinter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl TicketPrinter for RecordingPrinter {
    async fn print(&self, payload: &TicketPayload) -> PrintResult<()> {
        if self.fail {
            return Err(PrintError::Network("connection refused".into()));
        }
        self.printed.lock().push(payload.clone());
        Ok(())
    }
}
