//! Menu rules: composed-menu registry and portion mapping
//!
//! Both tables are data, loaded from a JSON document:
//!
//! ```json
//! {
//!   "portionCategories": { "cold-starters": "piece", "hot-starters": "demi" },
//!   "composedMenus": [ { "id": "...", "name": "Menu Talya express", "steps": [] } ]
//! }
//! ```
//!
//! Composed-menu lookup is a case-insensitive substring match of the
//! canonical names against the item's display name. When several names
//! match, the longest one wins.

use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{ComposedMenuConfig, MenuStep, SelectionType, SourceType};
use shared::order::PortionType;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the rules document
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read menu rules {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse menu rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid menu rules: {0}")]
    Invalid(String),
}

pub type RulesResult<T> = Result<T, RulesError>;

impl From<RulesError> for AppError {
    fn from(err: RulesError) -> Self {
        match err {
            RulesError::Io { .. } => AppError::with_message(ErrorCode::ConfigError, err.to_string()),
            RulesError::Parse(_) | RulesError::Invalid(_) => {
                AppError::with_message(ErrorCode::MenuRulesInvalid, err.to_string())
            }
        }
    }
}

/// Serialized form of the rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRulesDocument {
    /// Category id -> reduced portion offered alongside the normal one
    #[serde(default)]
    pub portion_categories: BTreeMap<String, PortionType>,
    #[serde(default)]
    pub composed_menus: Vec<ComposedMenuConfig>,
}

/// Validated, lookup-ready rules
#[derive(Debug, Clone, Default)]
pub struct MenuRules {
    portion_categories: HashMap<String, PortionType>,
    /// Sorted by canonical name length, longest first
    composed_menus: Vec<ComposedMenuConfig>,
    lowered_names: Vec<String>,
}

impl MenuRules {
    pub fn from_document(doc: MenuRulesDocument) -> RulesResult<Self> {
        validate_document(&doc)?;

        let mut composed_menus = doc.composed_menus;
        composed_menus.sort_by(|a, b| b.name.chars().count().cmp(&a.name.chars().count()));
        let lowered_names = composed_menus
            .iter()
            .map(|m| m.name.to_lowercase())
            .collect();

        Ok(Self {
            portion_categories: doc.portion_categories.into_iter().collect(),
            composed_menus,
            lowered_names,
        })
    }

    pub fn from_json_str(json: &str) -> RulesResult<Self> {
        let doc: MenuRulesDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Load and validate the rules document at `path`
    pub fn load(path: impl AsRef<Path>) -> RulesResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            composed_menus = rules.composed_menus.len(),
            portion_categories = rules.portion_categories.len(),
            "Menu rules loaded"
        );
        Ok(rules)
    }

    /// Whether an item with this display name must go through the wizard
    pub fn is_composed_menu(&self, item_name: &str) -> bool {
        self.composed_menu_config(item_name).is_some()
    }

    /// Configuration whose canonical name is contained in `item_name`
    pub fn composed_menu_config(&self, item_name: &str) -> Option<&ComposedMenuConfig> {
        let needle = item_name.to_lowercase();
        self.lowered_names
            .iter()
            .position(|name| needle.contains(name.as_str()))
            .map(|i| &self.composed_menus[i])
    }

    pub fn composed_menu_by_id(&self, id: &str) -> Option<&ComposedMenuConfig> {
        self.composed_menus.iter().find(|m| m.id == id)
    }

    pub fn composed_menus(&self) -> &[ComposedMenuConfig] {
        &self.composed_menus
    }

    /// Reduced portion offered for a category, if any
    pub fn portion_variant(&self, category_id: &str) -> Option<PortionType> {
        self.portion_categories.get(category_id).copied()
    }

    /// Portions offered for a category: always `Normal`, plus the mapped variant
    pub fn portions_for_category(&self, category_id: &str) -> Vec<PortionType> {
        let mut portions = vec![PortionType::Normal];
        portions.extend(self.portion_variant(category_id));
        portions
    }

    pub fn offers_portion(&self, category_id: &str, portion: PortionType) -> bool {
        portion.is_normal() || self.portion_variant(category_id) == Some(portion)
    }
}

fn validate_document(doc: &MenuRulesDocument) -> RulesResult<()> {
    for (category_id, portion) in &doc.portion_categories {
        if portion.is_normal() {
            return Err(RulesError::Invalid(format!(
                "portion category {category_id} maps to the normal portion"
            )));
        }
    }

    let mut menu_ids = HashSet::new();
    for menu in &doc.composed_menus {
        if menu.name.trim().is_empty() {
            return Err(RulesError::Invalid(format!(
                "composed menu {} has a blank name",
                menu.id
            )));
        }
        if !menu_ids.insert(menu.id.as_str()) {
            return Err(RulesError::Invalid(format!(
                "duplicate composed menu id {}",
                menu.id
            )));
        }
        if menu.steps.is_empty() {
            return Err(RulesError::Invalid(format!(
                "composed menu {} has no steps",
                menu.id
            )));
        }

        let mut step_ids = HashSet::new();
        for step in &menu.steps {
            if !step_ids.insert(step.id.as_str()) {
                return Err(RulesError::Invalid(format!(
                    "composed menu {} repeats step id {}",
                    menu.id, step.id
                )));
            }
            validate_step(&menu.id, step)?;
        }
    }
    Ok(())
}

fn validate_step(menu_id: &str, step: &MenuStep) -> RulesResult<()> {
    if step.selection_type == SelectionType::Multiple
        && let (Some(min), Some(max)) = (step.min_selections, step.max_selections)
        && min > max
    {
        return Err(RulesError::Invalid(format!(
            "step {menu_id}/{} has minSelections {min} > maxSelections {max}",
            step.id
        )));
    }

    match step.source_type {
        SourceType::Custom if step.custom_options.as_ref().is_none_or(Vec::is_empty) => {
            Err(RulesError::Invalid(format!(
                "custom step {menu_id}/{} has no customOptions",
                step.id
            )))
        }
        SourceType::Category if step.source_category_id.is_none() => Err(RulesError::Invalid(
            format!("category step {menu_id}/{} has no sourceCategoryId", step.id),
        )),
        _ => Ok(()),
    }
}
