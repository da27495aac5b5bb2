use crate::catalog::Catalog;
use crate::catalog::resolver::parse_option_id;
use crate::orders::money;
use shared::models::{ComposedMenuConfig, MenuItem, MenuStep, MenuStepOption};
use shared::order::{CartLineItem, MenuSelection, SelectedItem, StepBreakdown};

/// Composed cart line from the wizard selections
///
/// `unit_price` stays the listed menu price; option adjustments are only
/// recorded in the breakdown.
pub(super) fn composed_line(
    item: &MenuItem,
    config: &ComposedMenuConfig,
    options: &[Vec<MenuStepOption>],
    selections: &[MenuSelection],
    emoji: &str,
    catalog: &Catalog,
) -> CartLineItem {
    let mut ordered_selections = Vec::new();
    let mut breakdown = Vec::new();

    for (step, step_options) in config.steps.iter().zip(options) {
        let Some(selection) = selections.iter().find(|s| s.step_id == step.id) else {
            continue;
        };
        ordered_selections.push(selection.clone());

        let items: Vec<SelectedItem> = selection
            .selected_item_ids
            .iter()
            .filter_map(|id| resolve_catalog_choice(id, step, step_options, catalog))
            .chain(
                selection
                    .selected_custom_options
                    .iter()
                    .filter_map(|id| resolve_custom_choice(id, step, step_options)),
            )
            .collect();

        if items.is_empty() && selection.custom_note.is_none() {
            continue;
        }
        breakdown.push(StepBreakdown {
            step_id: step.id.clone(),
            step_label: step.label.clone(),
            items,
            note: selection.custom_note.clone(),
        });
    }

    CartLineItem {
        line_id: uuid::Uuid::new_v4().to_string(),
        item_id: item.id.clone(),
        display_name: item.name.clone(),
        unit_price: item.price,
        quantity: 1,
        note: None,
        emoji: emoji.to_string(),
        portion_type: None,
        original_price: Some(item.price),
        is_composed: true,
        selections: ordered_selections,
        selected_items_breakdown: breakdown,
    }
}

fn from_option(option: &MenuStepOption) -> SelectedItem {
    SelectedItem {
        id: option.id.clone(),
        name: option.label.clone(),
        price_adjustment: option.price_adjustment,
    }
}

/// Catalog choice: resolved options first, then the live catalog
fn resolve_catalog_choice(
    id: &str,
    step: &MenuStep,
    step_options: &[MenuStepOption],
    catalog: &Catalog,
) -> Option<SelectedItem> {
    if let Some(option) = step_options.iter().find(|o| o.id == id) {
        return Some(from_option(option));
    }
    if let Some(item) = catalog.item(id) {
        return Some(SelectedItem {
            id: item.id.clone(),
            name: item.name.clone(),
            price_adjustment: 0.0,
        });
    }
    let (base_id, portion) = parse_option_id(id);
    if !portion.is_normal()
        && let Some(item) = catalog.item(base_id)
    {
        return Some(SelectedItem {
            id: id.to_string(),
            name: format!("{}{}", item.name, portion.suffix()),
            price_adjustment: money::portion_adjustment(item.price, portion),
        });
    }
    tracing::warn!(step_id = %step.id, option_id = %id, "Dropping unresolved wizard selection");
    None
}

fn resolve_custom_choice(
    id: &str,
    step: &MenuStep,
    step_options: &[MenuStepOption],
) -> Option<SelectedItem> {
    let found = step_options
        .iter()
        .chain(step.custom_options.iter().flatten())
        .find(|o| o.id == id);
    if found.is_none() {
        tracing::warn!(step_id = %step.id, option_id = %id, "Dropping unresolved custom option");
    }
    found.map(from_option)
}
