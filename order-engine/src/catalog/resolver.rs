//! Step option resolution
//!
//! Turns a [`MenuStep`] into the concrete options the wizard offers.
//! Categories mapped to a reduced portion yield two options per item: the
//! normal one and a `<itemId>-piece` / `<itemId>-demi` variant whose price
//! adjustment brings the base price down to the portion price.

use super::{Catalog, MenuRules};
use crate::orders::money;
use shared::models::{MenuItem, MenuStep, MenuStepOption, SourceType};
use shared::order::PortionType;

/// Resolve the selectable options of a step against the current catalog
pub fn resolve_step_options(
    step: &MenuStep,
    catalog: &Catalog,
    rules: &MenuRules,
) -> Vec<MenuStepOption> {
    match step.source_type {
        SourceType::Custom => step.custom_options.clone().unwrap_or_default(),
        SourceType::Items => step
            .source_item_ids
            .iter()
            .flatten()
            .filter_map(|id| catalog.item(id))
            .filter(|item| item.available)
            .map(|item| item_option(item, catalog))
            .collect(),
        SourceType::Category => {
            let Some(category_id) = step.source_category_id.as_deref() else {
                return Vec::new();
            };
            let variant = rules.portion_variant(category_id);
            let mut options = Vec::new();
            for item in catalog.available_in_category(category_id) {
                options.push(item_option(item, catalog));
                if let Some(portion) = variant {
                    options.push(portion_option(item, portion, catalog));
                }
            }
            options
        }
        SourceType::Unknown => {
            tracing::debug!(step_id = %step.id, "Unknown step source type, no options");
            Vec::new()
        }
    }
}

fn item_option(item: &MenuItem, catalog: &Catalog) -> MenuStepOption {
    let emoji = catalog.category_emoji(&item.category_id);
    MenuStepOption {
        id: item.id.clone(),
        label: item.name.clone(),
        description: (!item.description.is_empty()).then(|| item.description.clone()),
        price_adjustment: 0.0,
        emoji: (!emoji.is_empty()).then(|| emoji.to_string()),
    }
}

fn portion_option(item: &MenuItem, portion: PortionType, catalog: &Catalog) -> MenuStepOption {
    let mut option = item_option(item, catalog);
    option.id = portion_option_id(&item.id, portion);
    option.label = format!("{}{}", item.name, portion.suffix());
    option.price_adjustment = money::portion_adjustment(item.price, portion);
    option
}

/// Option id of a portion variant (`<itemId>-piece`, `<itemId>-demi`)
pub fn portion_option_id(item_id: &str, portion: PortionType) -> String {
    format!("{item_id}{}", portion.option_id_suffix().unwrap_or_default())
}

/// Split a variant option id back into its item id and portion
///
/// Ids without a variant suffix come back as the normal portion.
pub fn parse_option_id(option_id: &str) -> (&str, PortionType) {
    for portion in [PortionType::Piece, PortionType::Demi] {
        if let Some(suffix) = portion.option_id_suffix()
            && let Some(base) = option_id.strip_suffix(suffix)
            && !base.is_empty()
        {
            return (base, portion);
        }
    }
    (option_id, PortionType::Normal)
}
