//! Ticket printer seam and its HTTP implementation

use super::types::TicketPayload;
use crate::core::EngineConfig;
use async_trait::async_trait;
use reqwest::Client;
use shared::error::{AppError, ErrorCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Print request timed out")]
    Timeout,

    #[error("Printer service unreachable: {0}")]
    Network(String),

    #[error("Printer service answered {0}")]
    Status(u16),

    #[error("Printer not available: {0}")]
    NotAvailable(String),
}

pub type PrintResult<T> = Result<T, PrintError>;

impl From<reqwest::Error> for PrintError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PrintError::Timeout
        } else if let Some(status) = err.status() {
            PrintError::Status(status.as_u16())
        } else {
            PrintError::Network(err.to_string())
        }
    }
}

impl From<PrintError> for AppError {
    fn from(err: PrintError) -> Self {
        let code = match &err {
            PrintError::Timeout => ErrorCode::TimeoutError,
            PrintError::Network(_) => ErrorCode::NetworkError,
            PrintError::Status(_) => ErrorCode::PrintFailed,
            PrintError::NotAvailable(_) => ErrorCode::PrinterNotAvailable,
        };
        AppError::with_message(code, err.to_string())
    }
}

#[async_trait]
pub trait TicketPrinter: Send + Sync {
    async fn print(&self, payload: &TicketPayload) -> PrintResult<()>;
}

/// Posts ticket payloads as JSON to the print service
///
/// Each attempt is bounded by the client timeout; failed attempts are retried
/// after `attempt × backoff`.
#[derive(Debug, Clone)]
pub struct HttpTicketPrinter {
    client: Client,
    url: String,
    max_attempts: u32,
    backoff: Duration,
}

impl HttpTicketPrinter {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        max_attempts: u32,
        backoff: Duration,
    ) -> PrintResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PrintError::NotAvailable(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            max_attempts: max_attempts.max(1),
            backoff,
        })
    }

    pub fn from_config(config: &EngineConfig) -> PrintResult<Self> {
        Self::new(
            config.printer_service_url.clone(),
            config.print_timeout,
            config.print_max_attempts,
            config.print_backoff,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send_once(&self, payload: &TicketPayload) -> PrintResult<()> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PrintError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl TicketPrinter for HttpTicketPrinter {
    #[instrument(skip(self, payload), fields(order_id = %payload.order_id))]
    async fn print(&self, payload: &TicketPayload) -> PrintResult<()> {
        let mut attempt = 1;
        loop {
            match self.send_once(payload).await {
                Ok(()) => {
                    info!(attempt, "Ticket printed");
                    return Ok(());
                }
                Err(e) if attempt < self.max_attempts => {
                    let delay = self.backoff * attempt;
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Print attempt failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
