//! Composed-menu selection wizard
//!
//! Linear state machine over the steps of a [`ComposedMenuConfig`]:
//!
//! ```text
//! open ─► step 0 ─next─► step 1 ─next─► ... ─► step N-1 ─finalize─► CartLineItem
//!           ▲  │                                   │
//!           │  └─previous─► Cancelled (closed)     │
//!           └──────────────previous────────────────┘
//! ```
//!
//! Invalid navigation returns an error and leaves the state untouched.

mod finalize;

use crate::catalog::{Catalog, MenuRules, resolve_step_options};
use shared::error::{AppError, ErrorCode};
use shared::models::{ComposedMenuConfig, MenuItem, MenuStep, MenuStepOption, SelectionType};
use shared::order::{CartLineItem, MenuSelection};
use shared::util::normalize_text;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Wizard is not open")]
    NotOpen,

    #[error("Item is not a composed menu: {0}")]
    NotComposed(String),

    #[error("Step {step_id} does not satisfy its selection rules")]
    StepInvalid { step_id: String },

    #[error("Wizard is at step {current}, finalize requires step {last}")]
    NotAtLastStep { current: usize, last: usize },
}

pub type WizardResult<T> = Result<T, WizardError>;

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        let code = match &err {
            WizardError::NotOpen => ErrorCode::WizardNotOpen,
            WizardError::NotComposed(_) => ErrorCode::ComposedMenuNotFound,
            WizardError::StepInvalid { .. } => ErrorCode::WizardStepInvalid,
            WizardError::NotAtLastStep { .. } => ErrorCode::WizardNotAtLastStep,
        };
        let app = AppError::with_message(code, err.to_string());
        match err {
            WizardError::StepInvalid { step_id } => app.with_detail("stepId", step_id),
            _ => app,
        }
    }
}

/// Outcome of a backwards move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardNav {
    /// Now on this step index
    Step(usize),
    /// Moved back from the first step: the wizard closed
    Cancelled,
}

#[derive(Debug, Clone)]
struct WizardState {
    item: MenuItem,
    config: ComposedMenuConfig,
    emoji: String,
    /// Resolved options, one list per step
    options: Vec<Vec<MenuStepOption>>,
    current: usize,
    /// At most one record per step id
    selections: Vec<MenuSelection>,
}

impl WizardState {
    fn step(&self) -> &MenuStep {
        &self.config.steps[self.current]
    }

    fn last_index(&self) -> usize {
        self.config.steps.len().saturating_sub(1)
    }

    fn selection(&self, step_id: &str) -> Option<&MenuSelection> {
        self.selections.iter().find(|s| s.step_id == step_id)
    }

    fn selection_mut(&mut self, step_id: &str) -> &mut MenuSelection {
        let index = match self.selections.iter().position(|s| s.step_id == step_id) {
            Some(index) => index,
            None => {
                self.selections.push(MenuSelection::new(step_id));
                self.selections.len() - 1
            }
        };
        &mut self.selections[index]
    }

    fn is_step_valid(&self, step: &MenuStep) -> bool {
        is_selection_valid(step, self.selection(&step.id))
    }
}

/// Cardinality check of one step against its stored selection
pub fn is_selection_valid(step: &MenuStep, selection: Option<&MenuSelection>) -> bool {
    let Some(selection) = selection else {
        return !step.required;
    };
    let total = selection.total_selected();
    if step.required && total == 0 {
        return false;
    }
    if let Some(min) = step.effective_min()
        && total < min as usize
    {
        return false;
    }
    if let Some(max) = step.effective_max()
        && total > max as usize
    {
        return false;
    }
    true
}

/// Selection wizard for one composed menu item at a time
#[derive(Debug, Clone, Default)]
pub struct SelectionWizard {
    state: Option<WizardState>,
}

impl SelectionWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the wizard for `item`, discarding any previous state
    pub fn open(&mut self, item: &MenuItem, catalog: &Catalog, rules: &MenuRules) -> WizardResult<()> {
        self.state = None;
        let config = rules
            .composed_menu_config(&item.name)
            .ok_or_else(|| WizardError::NotComposed(item.name.clone()))?
            .clone();
        let options = config
            .steps
            .iter()
            .map(|step| resolve_step_options(step, catalog, rules))
            .collect();

        tracing::debug!(item_id = %item.id, menu = %config.id, steps = config.steps.len(), "Wizard opened");
        self.state = Some(WizardState {
            item: item.clone(),
            emoji: catalog.category_emoji(&item.category_id).to_string(),
            config,
            options,
            current: 0,
            selections: Vec::new(),
        });
        Ok(())
    }

    pub fn close(&mut self) {
        self.state = None;
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    fn state(&self) -> WizardResult<&WizardState> {
        self.state.as_ref().ok_or(WizardError::NotOpen)
    }

    fn state_mut(&mut self) -> WizardResult<&mut WizardState> {
        self.state.as_mut().ok_or(WizardError::NotOpen)
    }

    pub fn item(&self) -> Option<&MenuItem> {
        self.state.as_ref().map(|s| &s.item)
    }

    pub fn config(&self) -> Option<&ComposedMenuConfig> {
        self.state.as_ref().map(|s| &s.config)
    }

    pub fn current_step_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.current)
    }

    pub fn current_step(&self) -> Option<&MenuStep> {
        self.state.as_ref().map(WizardState::step)
    }

    /// Options of the current step, empty when closed
    pub fn current_options(&self) -> &[MenuStepOption] {
        self.state
            .as_ref()
            .map(|s| s.options[s.current].as_slice())
            .unwrap_or_default()
    }

    pub fn is_last_step(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.current == s.last_index())
    }

    pub fn selection(&self, step_id: &str) -> Option<&MenuSelection> {
        self.state.as_ref().and_then(|s| s.selection(step_id))
    }

    pub fn selections(&self) -> &[MenuSelection] {
        self.state
            .as_ref()
            .map(|s| s.selections.as_slice())
            .unwrap_or_default()
    }

    /// Select (or toggle) an option on the current step
    ///
    /// Single steps keep exactly the chosen id in the matching bucket.
    /// Multiple steps toggle membership; going over `maxSelections` evicts the
    /// oldest ids of that bucket.
    pub fn select(&mut self, option_id: &str, is_custom_option: bool) -> WizardResult<()> {
        let state = self.state_mut()?;
        let step = state.step().clone();
        let selection = state.selection_mut(&step.id);

        match step.selection_type {
            SelectionType::Single => {
                selection.selected_item_ids.clear();
                selection.selected_custom_options.clear();
                let bucket = if is_custom_option {
                    &mut selection.selected_custom_options
                } else {
                    &mut selection.selected_item_ids
                };
                bucket.push(option_id.to_string());
            }
            SelectionType::Multiple => {
                let bucket = if is_custom_option {
                    &mut selection.selected_custom_options
                } else {
                    &mut selection.selected_item_ids
                };
                if let Some(pos) = bucket.iter().position(|id| id == option_id) {
                    bucket.remove(pos);
                } else {
                    bucket.push(option_id.to_string());
                    if let Some(max) = step.max_selections {
                        let overflow = bucket.len().saturating_sub(max as usize);
                        if overflow > 0 {
                            let evicted: Vec<String> = bucket.drain(..overflow).collect();
                            tracing::debug!(step_id = %step.id, ?evicted, "Evicted oldest selections");
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Set or clear the free-text note of the current step
    pub fn set_note(&mut self, note: Option<String>) -> WizardResult<()> {
        let state = self.state_mut()?;
        let step_id = state.step().id.clone();
        state.selection_mut(&step_id).custom_note = normalize_text(note);
        Ok(())
    }

    pub fn is_current_step_valid(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.is_step_valid(s.step()))
    }

    /// Advance one step; stays on the last step once reached
    pub fn next(&mut self) -> WizardResult<usize> {
        let state = self.state_mut()?;
        if !state.is_step_valid(state.step()) {
            return Err(WizardError::StepInvalid {
                step_id: state.step().id.clone(),
            });
        }
        state.current = (state.current + 1).min(state.last_index());
        Ok(state.current)
    }

    /// Go back one step; from the first step this cancels the wizard
    pub fn previous(&mut self) -> WizardResult<WizardNav> {
        let state = self.state_mut()?;
        if state.current == 0 {
            self.state = None;
            tracing::debug!("Wizard cancelled");
            return Ok(WizardNav::Cancelled);
        }
        state.current -= 1;
        Ok(WizardNav::Step(state.current))
    }

    /// Build the composed cart line and close the wizard
    ///
    /// Option ids that no longer resolve are dropped from the breakdown.
    pub fn finalize(&mut self, catalog: &Catalog) -> WizardResult<CartLineItem> {
        let state = self.state()?;
        if state.current != state.last_index() {
            return Err(WizardError::NotAtLastStep {
                current: state.current,
                last: state.last_index(),
            });
        }
        if !state.is_step_valid(state.step()) {
            return Err(WizardError::StepInvalid {
                step_id: state.step().id.clone(),
            });
        }

        let line = finalize::composed_line(
            &state.item,
            &state.config,
            &state.options,
            &state.selections,
            &state.emoji,
            catalog,
        );
        tracing::info!(item_id = %state.item.id, line_id = %line.line_id, "Composed menu finalized");
        self.state = None;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MenuCategory;

    const RULES: &str = r#"{
        "portionCategories": { "hot": "demi" },
        "composedMenus": [{
            "id": "express",
            "name": "Menu Talya express",
            "steps": [
                { "id": "main", "label": "Plat", "selectionType": "single", "required": true,
                  "sourceType": "items", "sourceItemIds": ["chawarma", "kefta"] },
                { "id": "sides", "label": "Accompagnements", "selectionType": "multiple",
                  "required": true, "minSelections": 2, "maxSelections": 2,
                  "sourceType": "category", "sourceCategoryId": "hot" },
                { "id": "extras", "label": "Suppléments", "selectionType": "multiple",
                  "required": false, "sourceType": "custom",
                  "customOptions": [
                    { "id": "extra-sauce", "label": "Sauce", "priceAdjustment": 0.5 },
                    { "id": "no-onion", "label": "Sans oignon" }
                  ] }
            ]
        }]
    }"#;

    fn fixture() -> (Catalog, MenuRules, MenuItem) {
        let menu = MenuItem::new("menu-express", "Menu Talya express", 15.9, "menus");
        let catalog = Catalog::new(
            vec![
                MenuCategory::new("menus", "Menus", "🍱"),
                MenuCategory::new("hot", "Entrées chaudes", "🔥"),
                MenuCategory::new("mains", "Plats", "🍽️"),
            ],
            vec![
                menu.clone(),
                MenuItem::new("chawarma", "Chawarma", 12.0, "mains"),
                MenuItem::new("kefta", "Kefta", 13.0, "mains"),
                MenuItem::new("falafel", "Falafel", 5.0, "hot").with_display_order(1),
                MenuItem::new("fatayer", "Fatayer", 6.0, "hot").with_display_order(2),
                MenuItem::new("rkakat", "Rkakat", 4.0, "hot").with_display_order(3),
            ],
        );
        (catalog, MenuRules::from_json_str(RULES).unwrap(), menu)
    }

    fn opened() -> (SelectionWizard, Catalog) {
        let (catalog, rules, menu) = fixture();
        let mut wizard = SelectionWizard::new();
        wizard.open(&menu, &catalog, &rules).unwrap();
        (wizard, catalog)
    }

    #[test]
    fn test_open_plain_item_fails() {
        let (catalog, rules, _) = fixture();
        let mut wizard = SelectionWizard::new();
        let item = catalog.item("falafel").unwrap().clone();
        assert_eq!(
            wizard.open(&item, &catalog, &rules),
            Err(WizardError::NotComposed("Falafel".into()))
        );
        assert!(!wizard.is_open());
    }

    #[test]
    fn test_required_step_blocks_next() {
        let (mut wizard, _) = opened();
        assert!(!wizard.is_current_step_valid());
        assert!(matches!(wizard.next(), Err(WizardError::StepInvalid { .. })));
        assert_eq!(wizard.current_step_index(), Some(0));
    }

    #[test]
    fn test_single_select_replaces() {
        let (mut wizard, _) = opened();
        wizard.select("chawarma", false).unwrap();
        wizard.select("kefta", false).unwrap();
        let sel = wizard.selection("main").unwrap();
        assert_eq!(sel.selected_item_ids, vec!["kefta"]);
        assert!(sel.selected_custom_options.is_empty());

        wizard.select("custom-x", true).unwrap();
        let sel = wizard.selection("main").unwrap();
        assert!(sel.selected_item_ids.is_empty());
        assert_eq!(sel.selected_custom_options, vec!["custom-x"]);
        assert_eq!(wizard.selections().len(), 1);
    }

    #[test]
    fn test_multiple_fifo_eviction() {
        let (mut wizard, _) = opened();
        wizard.select("chawarma", false).unwrap();
        assert_eq!(wizard.next(), Ok(1));

        wizard.select("falafel", false).unwrap();
        assert!(!wizard.is_current_step_valid());
        wizard.select("fatayer", false).unwrap();
        assert!(wizard.is_current_step_valid());
        wizard.select("rkakat", false).unwrap();

        let sel = wizard.selection("sides").unwrap();
        assert_eq!(sel.selected_item_ids, vec!["fatayer", "rkakat"]);
        assert!(wizard.is_current_step_valid());

        // toggle off
        wizard.select("fatayer", false).unwrap();
        assert_eq!(
            wizard.selection("sides").unwrap().selected_item_ids,
            vec!["rkakat"]
        );
        assert!(!wizard.is_current_step_valid());
    }

    #[test]
    fn test_optional_step_without_selection_is_valid() {
        let (mut wizard, _) = opened();
        wizard.select("chawarma", false).unwrap();
        wizard.next().unwrap();
        wizard.select("falafel", false).unwrap();
        wizard.select("fatayer", false).unwrap();
        assert_eq!(wizard.next(), Ok(2));
        assert!(wizard.is_last_step());
        assert!(wizard.is_current_step_valid());
        // clamped at the last step
        assert_eq!(wizard.next(), Ok(2));
    }

    #[test]
    fn test_previous_from_first_step_cancels() {
        let (mut wizard, _) = opened();
        wizard.select("chawarma", false).unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.previous(), Ok(WizardNav::Step(0)));
        assert_eq!(wizard.previous(), Ok(WizardNav::Cancelled));
        assert!(!wizard.is_open());
        assert!(wizard.selections().is_empty());
        assert_eq!(wizard.previous(), Err(WizardError::NotOpen));
    }

    #[test]
    fn test_finalize_requires_last_step() {
        let (mut wizard, catalog) = opened();
        wizard.select("chawarma", false).unwrap();
        assert_eq!(
            wizard.finalize(&catalog),
            Err(WizardError::NotAtLastStep { current: 0, last: 2 })
        );
        assert!(wizard.is_open());
    }

    #[test]
    fn test_finalize_builds_composed_line() {
        let (mut wizard, catalog) = opened();
        wizard.select("kefta", false).unwrap();
        wizard.next().unwrap();
        wizard.select("falafel-demi", false).unwrap();
        wizard.select("fatayer", false).unwrap();
        wizard.next().unwrap();
        wizard.select("extra-sauce", true).unwrap();
        wizard.set_note(Some("  bien chaud ".into())).unwrap();

        let line = wizard.finalize(&catalog).unwrap();
        assert!(line.is_composed);
        assert_eq!(line.item_id, "menu-express");
        assert_eq!(line.unit_price, 15.9);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.emoji, "🍱");
        assert_eq!(line.portion_type, None);
        assert_eq!(line.selections.len(), 3);

        let breakdown = &line.selected_items_breakdown;
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[1].step_label, "Accompagnements");
        assert_eq!(breakdown[1].items[0].name, "Falafel (demi part)");
        assert_eq!(breakdown[1].items[0].price_adjustment, -2.5);
        assert_eq!(breakdown[2].items[0].price_adjustment, 0.5);
        assert_eq!(breakdown[2].note.as_deref(), Some("bien chaud"));

        assert!(!wizard.is_open());
    }

    #[test]
    fn test_reopen_resets_state() {
        let (catalog, rules, menu) = fixture();
        let mut wizard = SelectionWizard::new();
        wizard.open(&menu, &catalog, &rules).unwrap();
        wizard.select("chawarma", false).unwrap();
        wizard.next().unwrap();

        wizard.open(&menu, &catalog, &rules).unwrap();
        assert_eq!(wizard.current_step_index(), Some(0));
        assert!(wizard.selections().is_empty());
        assert_eq!(wizard.current_options().len(), 2);
    }

    #[test]
    fn test_error_codes() {
        let err: AppError = WizardError::StepInvalid {
            step_id: "sides".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::WizardStepInvalid);
        assert_eq!(err.details.unwrap()["stepId"], "sides");
        assert_eq!(
            AppError::from(WizardError::NotOpen).code,
            ErrorCode::WizardNotOpen
        );
    }
}
