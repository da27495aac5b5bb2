//! Cart reducer
//!
//! Every mutation of an [`ActiveOrder`] is a [`CartCommand`] applied by
//! [`reduce`], a pure function returning the next state. The total is
//! recomputed from the lines after every command.

use super::{CartError, CartResult};
use crate::catalog::{Catalog, MenuRules};
use crate::orders::money;
use shared::order::{ActiveOrder, CartLineItem, OrderMode, PortionType};
use shared::util::normalize_text;
use tracing::debug;

/// Read-only data a command is checked against
#[derive(Debug, Clone, Copy)]
pub struct CartContext<'a> {
    pub catalog: &'a Catalog,
    pub rules: &'a MenuRules,
}

impl<'a> CartContext<'a> {
    pub fn new(catalog: &'a Catalog, rules: &'a MenuRules) -> Self {
        Self { catalog, rules }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add one unit of a plain catalog item
    AddSimple {
        item_id: String,
        portion: PortionType,
        override_price: Option<f64>,
    },
    /// Append a finalized composed line
    AddComposed(CartLineItem),
    /// Remove one unit of `(item_id, portion)`; no-op when absent
    RemoveOne { item_id: String, portion: PortionType },
    RemoveLine { line_id: String },
    SetLineNote { line_id: String, note: Option<String> },
    Clear,
    SetOrderType(OrderMode),
    SetTableNumber(Option<String>),
    SetClientNumber(Option<String>),
    SetGlobalNote(Option<String>),
    Rename(String),
}

impl CartCommand {
    pub fn add(item_id: impl Into<String>) -> Self {
        Self::AddSimple {
            item_id: item_id.into(),
            portion: PortionType::Normal,
            override_price: None,
        }
    }

    pub fn add_portion(item_id: impl Into<String>, portion: PortionType) -> Self {
        Self::AddSimple {
            item_id: item_id.into(),
            portion,
            override_price: None,
        }
    }

    pub fn remove_one(item_id: impl Into<String>, portion: PortionType) -> Self {
        Self::RemoveOne {
            item_id: item_id.into(),
            portion,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::AddSimple { .. } => "add_simple",
            Self::AddComposed(_) => "add_composed",
            Self::RemoveOne { .. } => "remove_one",
            Self::RemoveLine { .. } => "remove_line",
            Self::SetLineNote { .. } => "set_line_note",
            Self::Clear => "clear",
            Self::SetOrderType(_) => "set_order_type",
            Self::SetTableNumber(_) => "set_table_number",
            Self::SetClientNumber(_) => "set_client_number",
            Self::SetGlobalNote(_) => "set_global_note",
            Self::Rename(_) => "rename",
        }
    }
}

/// Apply `command` to `order`, returning the next state
pub fn reduce(
    order: &ActiveOrder,
    command: CartCommand,
    ctx: &CartContext<'_>,
) -> CartResult<ActiveOrder> {
    debug!(order_id = %order.id, command = command.name(), "Applying cart command");
    let mut next = order.clone();

    match command {
        CartCommand::AddSimple {
            item_id,
            portion,
            override_price,
        } => add_simple(&mut next, &item_id, portion, override_price, ctx)?,
        CartCommand::AddComposed(line) => add_composed(&mut next, line)?,
        CartCommand::RemoveOne { item_id, portion } => remove_one(&mut next, &item_id, portion),
        CartCommand::RemoveLine { line_id } => {
            let index = line_index(&next, &line_id)?;
            next.items.remove(index);
        }
        CartCommand::SetLineNote { line_id, note } => {
            let index = line_index(&next, &line_id)?;
            next.items[index].note = normalize_text(note);
        }
        CartCommand::Clear => next.items.clear(),
        CartCommand::SetOrderType(mode) => {
            if next.order_type != mode {
                next.order_type = mode;
                match mode {
                    OrderMode::DineIn => next.client_number = None,
                    OrderMode::Takeaway => next.table_number = None,
                }
            }
        }
        CartCommand::SetTableNumber(table) => {
            if next.order_type != OrderMode::DineIn {
                return Err(CartError::ModeMismatch {
                    field: "table number",
                    mode: next.order_type,
                });
            }
            next.table_number = normalize_text(table);
        }
        CartCommand::SetClientNumber(client) => {
            if next.order_type != OrderMode::Takeaway {
                return Err(CartError::ModeMismatch {
                    field: "client number",
                    mode: next.order_type,
                });
            }
            next.client_number = normalize_text(client);
        }
        CartCommand::SetGlobalNote(note) => next.global_note = normalize_text(note),
        CartCommand::Rename(name) => next.name = name.trim().to_string(),
    }

    next.total = money::cart_total(&next.items);
    Ok(next)
}

fn add_simple(
    order: &mut ActiveOrder,
    item_id: &str,
    portion: PortionType,
    override_price: Option<f64>,
    ctx: &CartContext<'_>,
) -> CartResult<()> {
    let item = ctx
        .catalog
        .item(item_id)
        .ok_or_else(|| CartError::ItemNotFound(item_id.to_string()))?;
    if ctx.rules.is_composed_menu(&item.name) {
        return Err(CartError::RequiresWizard(item.name.clone()));
    }
    if !item.available {
        return Err(CartError::ItemUnavailable(item.id.clone()));
    }
    if !ctx.rules.offers_portion(&item.category_id, portion) {
        return Err(CartError::PortionNotOffered {
            item_id: item.id.clone(),
            portion,
        });
    }
    money::validate_price(item.price, "price")?;
    if let Some(price) = override_price {
        money::validate_price(price, "override_price")?;
    }

    if let Some(line) = order
        .items
        .iter_mut()
        .find(|l| l.merge_key() == Some((item_id, portion)))
    {
        line.quantity += 1;
        return Ok(());
    }

    order.items.push(CartLineItem {
        line_id: uuid::Uuid::new_v4().to_string(),
        item_id: item.id.clone(),
        display_name: format!("{}{}", item.name, portion.suffix()),
        unit_price: override_price.unwrap_or_else(|| money::portion_price(item.price, portion)),
        quantity: 1,
        note: None,
        emoji: ctx.catalog.category_emoji(&item.category_id).to_string(),
        portion_type: Some(portion),
        original_price: Some(item.price),
        is_composed: false,
        selections: Vec::new(),
        selected_items_breakdown: Vec::new(),
    });
    Ok(())
}

fn add_composed(order: &mut ActiveOrder, mut line: CartLineItem) -> CartResult<()> {
    if !line.is_composed {
        return Err(CartError::NotComposedLine);
    }
    money::validate_price(line.unit_price, "unit_price")?;
    if line.line_id.is_empty() || order.items.iter().any(|l| l.line_id == line.line_id) {
        line.line_id = uuid::Uuid::new_v4().to_string();
    }
    line.quantity = line.quantity.max(1);
    order.items.push(line);
    Ok(())
}

fn remove_one(order: &mut ActiveOrder, item_id: &str, portion: PortionType) {
    let Some(index) = order
        .items
        .iter()
        .position(|l| l.merge_key() == Some((item_id, portion)))
    else {
        return;
    };
    if order.items[index].quantity > 1 {
        order.items[index].quantity -= 1;
    } else {
        order.items.remove(index);
    }
}

fn line_index(order: &ActiveOrder, line_id: &str) -> CartResult<usize> {
    order
        .items
        .iter()
        .position(|l| l.line_id == line_id)
        .ok_or_else(|| CartError::LineNotFound(line_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{MenuCategory, MenuItem};

    fn fixture() -> (Catalog, MenuRules) {
        let catalog = Catalog::new(
            vec![
                MenuCategory::new("cold", "Entrées froides", "🥗"),
                MenuCategory::new("hot", "Entrées chaudes", "🔥"),
                MenuCategory::new("menus", "Menus", "🍱"),
            ],
            vec![
                MenuItem::new("houmous", "Houmous", 10.0, "cold"),
                MenuItem::new("falafel", "Falafel", 7.0, "hot"),
                MenuItem::new("kebbe", "Kebbé", 8.0, "hot").unavailable(),
                MenuItem::new("menu", "Menu Talya express", 15.9, "menus"),
            ],
        );
        let rules = MenuRules::from_json_str(
            r#"{
                "portionCategories": { "cold": "piece", "hot": "demi" },
                "composedMenus": [{ "id": "express", "name": "Menu Talya express",
                    "steps": [{ "id": "s", "label": "S", "sourceType": "items", "sourceItemIds": [] }] }]
            }"#,
        )
        .unwrap();
        (catalog, rules)
    }

    fn composed_line(price: f64) -> CartLineItem {
        CartLineItem {
            line_id: String::new(),
            item_id: "menu".into(),
            display_name: "Menu Talya express".into(),
            unit_price: price,
            quantity: 1,
            note: None,
            emoji: "🍱".into(),
            portion_type: None,
            original_price: Some(price),
            is_composed: true,
            selections: vec![],
            selected_items_breakdown: vec![],
        }
    }

    #[test]
    fn test_add_same_item_merges() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let order = ActiveOrder::new();
        let order = reduce(&order, CartCommand::add("houmous"), &ctx).unwrap();
        let order = reduce(&order, CartCommand::add("houmous"), &ctx).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].emoji, "🥗");
        assert_eq!(order.total, 20.0);
    }

    #[test]
    fn test_portions_are_distinct_lines() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let order = ActiveOrder::new();
        let order = reduce(&order, CartCommand::add("houmous"), &ctx).unwrap();
        let order = reduce(
            &order,
            CartCommand::add_portion("houmous", PortionType::Piece),
            &ctx,
        )
        .unwrap();
        assert_eq!(order.items.len(), 2);
        let piece = &order.items[1];
        assert_eq!(piece.display_name, "Houmous (piece)");
        assert_eq!(piece.unit_price, 3.0);
        assert_eq!(piece.original_price, Some(10.0));
        assert_eq!(order.total, 13.0);
    }

    #[test]
    fn test_override_price() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let cmd = CartCommand::AddSimple {
            item_id: "falafel".into(),
            portion: PortionType::Normal,
            override_price: Some(5.5),
        };
        let order = reduce(&ActiveOrder::new(), cmd, &ctx).unwrap();
        assert_eq!(order.items[0].unit_price, 5.5);
        assert_eq!(order.items[0].original_price, Some(7.0));

        let cmd = CartCommand::AddSimple {
            item_id: "falafel".into(),
            portion: PortionType::Normal,
            override_price: Some(-1.0),
        };
        assert!(matches!(
            reduce(&ActiveOrder::new(), cmd, &ctx),
            Err(CartError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_rejections() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let order = ActiveOrder::new();
        assert_eq!(
            reduce(&order, CartCommand::add("menu"), &ctx),
            Err(CartError::RequiresWizard("Menu Talya express".into()))
        );
        assert_eq!(
            reduce(&order, CartCommand::add("kebbe"), &ctx),
            Err(CartError::ItemUnavailable("kebbe".into()))
        );
        assert_eq!(
            reduce(&order, CartCommand::add("ghost"), &ctx),
            Err(CartError::ItemNotFound("ghost".into()))
        );
        assert!(matches!(
            reduce(
                &order,
                CartCommand::add_portion("falafel", PortionType::Piece),
                &ctx
            ),
            Err(CartError::PortionNotOffered { .. })
        ));
    }

    #[test]
    fn test_composed_lines_never_merge() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let order = ActiveOrder::new();
        let order = reduce(&order, CartCommand::AddComposed(composed_line(15.9)), &ctx).unwrap();
        let order = reduce(&order, CartCommand::AddComposed(composed_line(15.9)), &ctx).unwrap();
        assert_eq!(order.items.len(), 2);
        assert_ne!(order.items[0].line_id, order.items[1].line_id);
        assert_eq!(order.total, 31.8);

        // remove_one never touches composed rows
        let same = reduce(&order, CartCommand::remove_one("menu", PortionType::Normal), &ctx).unwrap();
        assert_eq!(same.items.len(), 2);

        let line_id = order.items[0].line_id.clone();
        let order = reduce(&order, CartCommand::RemoveLine { line_id }, &ctx).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, 15.9);
    }

    #[test]
    fn test_remove_one() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let mut order = ActiveOrder::new();
        for _ in 0..2 {
            order = reduce(&order, CartCommand::add("falafel"), &ctx).unwrap();
        }
        order = reduce(&order, CartCommand::remove_one("falafel", PortionType::Normal), &ctx).unwrap();
        assert_eq!(order.items[0].quantity, 1);
        order = reduce(&order, CartCommand::remove_one("falafel", PortionType::Demi), &ctx).unwrap();
        assert_eq!(order.items.len(), 1);
        order = reduce(&order, CartCommand::remove_one("falafel", PortionType::Normal), &ctx).unwrap();
        assert!(order.is_empty());
        assert_eq!(order.total, 0.0);
    }

    #[test]
    fn test_rejected_command_keeps_state() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let order = reduce(&ActiveOrder::new(), CartCommand::add("falafel"), &ctx).unwrap();
        let err = reduce(
            &order,
            CartCommand::SetLineNote {
                line_id: "nope".into(),
                note: Some("x".into()),
            },
            &ctx,
        );
        assert_eq!(err, Err(CartError::LineNotFound("nope".into())));
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_order_type_keeps_single_identifier() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let order = ActiveOrder::new();
        let order = reduce(&order, CartCommand::SetTableNumber(Some(" 12 ".into())), &ctx).unwrap();
        assert_eq!(order.table_number.as_deref(), Some("12"));
        assert!(matches!(
            reduce(&order, CartCommand::SetClientNumber(Some("7".into())), &ctx),
            Err(CartError::ModeMismatch { .. })
        ));

        let order = reduce(&order, CartCommand::SetOrderType(OrderMode::Takeaway), &ctx).unwrap();
        assert_eq!(order.table_number, None);
        let order = reduce(&order, CartCommand::SetClientNumber(Some("7".into())), &ctx).unwrap();
        assert_eq!(order.slot(), Some("7"));
    }

    #[test]
    fn test_notes_and_clear() {
        let (catalog, rules) = fixture();
        let ctx = CartContext::new(&catalog, &rules);
        let order = reduce(&ActiveOrder::new(), CartCommand::add("falafel"), &ctx).unwrap();
        let line_id = order.items[0].line_id.clone();
        let order = reduce(
            &order,
            CartCommand::SetLineNote {
                line_id,
                note: Some("sans piment".into()),
            },
            &ctx,
        )
        .unwrap();
        assert_eq!(order.items[0].note.as_deref(), Some("sans piment"));

        let order = reduce(&order, CartCommand::SetGlobalNote(Some("   ".into())), &ctx).unwrap();
        assert_eq!(order.global_note, None);
        let order = reduce(&order, CartCommand::Rename("Famille Haddad".into()), &ctx).unwrap();
        assert_eq!(order.name, "Famille Haddad");

        let order = reduce(&order, CartCommand::Clear, &ctx).unwrap();
        assert!(order.is_empty());
        assert_eq!(order.total, 0.0);
        assert_eq!(order.name, "Famille Haddad");
    }
}
