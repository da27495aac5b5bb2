//! Engine configuration and bootstrap
//!
//! - [`EngineConfig`]: environment-driven settings
//! - [`Engine`]: rules, timezone and printer wired together from a config

pub mod config;

pub use config::EngineConfig;

use crate::catalog::MenuRules;
use crate::orders::{OrderService, OrderStore};
use crate::printing::{HttpTicketPrinter, TicketRenderer};
use crate::utils::logger::init_logger_with_file;
use shared::error::AppError;
use std::sync::Arc;

/// Loaded rules plus an order service over the HTTP printer
pub struct Engine<S: OrderStore> {
    pub config: EngineConfig,
    pub rules: Arc<MenuRules>,
    pub service: OrderService<S, HttpTicketPrinter>,
}

impl<S: OrderStore> Engine<S> {
    /// Initialize logging, load the menu rules and build the order service
    pub fn bootstrap(config: EngineConfig, store: Arc<S>) -> Result<Self, AppError> {
        init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())
            .map_err(|e| AppError::config(format!("Logger setup failed: {e}")))?;

        let rules = Arc::new(MenuRules::load(&config.menu_rules_path)?);
        let printer = HttpTicketPrinter::from_config(&config)?;
        let service = OrderService::new(
            store,
            Arc::new(printer),
            TicketRenderer::new(config.printer_address.clone()),
            config.timezone,
        );
        tracing::info!(
            timezone = %config.timezone,
            printer = %config.printer_service_url,
            "Order engine ready"
        );
        Ok(Self {
            config,
            rules,
            service,
        })
    }
}
