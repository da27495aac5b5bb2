//! Money calculation utilities using rust_decimal for precision
//!
//! This module provides precise decimal arithmetic for monetary calculations.
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;
use shared::order::{CartLineItem, PortionType};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per item (€1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;

/// A monetary input that failed validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} {reason}, got {value}")]
pub struct InvalidAmount {
    pub field: &'static str,
    pub reason: &'static str,
    pub value: f64,
}

/// Validate a price: finite, non-negative, below the maximum
pub fn validate_price(value: f64, field: &'static str) -> Result<(), InvalidAmount> {
    let reason = if !value.is_finite() {
        "must be a finite number"
    } else if value < 0.0 {
        "must be non-negative"
    } else if value > MAX_PRICE {
        "exceeds maximum allowed"
    } else {
        return Ok(());
    };
    Err(InvalidAmount {
        field,
        reason,
        value,
    })
}

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round to 2 decimal places, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn multiplier(portion: PortionType) -> Decimal {
    Decimal::new(portion.multiplier_percent(), 2)
}

/// Price of a portion: `round(base × multiplier, 2)`
pub fn portion_price(base_price: f64, portion: PortionType) -> f64 {
    to_f64(to_decimal(base_price) * multiplier(portion))
}

/// Signed adjustment turning the base price into the portion price:
/// `-round(base × (1 - multiplier), 2)`; zero for the normal portion
pub fn portion_adjustment(base_price: f64, portion: PortionType) -> f64 {
    let reduction = Decimal::ONE - multiplier(portion);
    to_f64(-(to_decimal(base_price) * reduction))
}

/// Line total (unit_price × quantity)
pub fn line_total(line: &CartLineItem) -> Decimal {
    round_money(to_decimal(line.unit_price) * Decimal::from(line.quantity))
}

/// Cart total, recomputed from scratch over every line
pub fn cart_total(lines: &[CartLineItem]) -> f64 {
    to_f64(lines.iter().map(line_total).sum())
}

/// Compare two amounts within MONEY_TOLERANCE
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: f64, quantity: u32) -> CartLineItem {
        CartLineItem {
            line_id: "l".to_string(),
            item_id: "i".to_string(),
            display_name: "Item".to_string(),
            unit_price,
            quantity,
            note: None,
            emoji: String::new(),
            portion_type: Some(PortionType::Normal),
            original_price: None,
            is_composed: false,
            selections: vec![],
            selected_items_breakdown: vec![],
        }
    }

    #[test]
    fn test_to_decimal_precision() {
        let a = 0.1_f64;
        let b = 0.2_f64;
        assert_ne!(a + b, 0.3);

        let sum_dec = to_decimal(a) + to_decimal(b);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_portion_price_examples() {
        assert_eq!(portion_price(10.00, PortionType::Piece), 3.00);
        assert_eq!(portion_price(7.00, PortionType::Demi), 3.50);
        assert_eq!(portion_price(7.00, PortionType::Normal), 7.00);
        // 4.50 × 0.3 = 1.35, 3.25 × 0.5 = 1.625 -> half-up
        assert_eq!(portion_price(4.50, PortionType::Piece), 1.35);
        assert_eq!(portion_price(3.25, PortionType::Demi), 1.63);
    }

    #[test]
    fn test_portion_adjustment() {
        assert_eq!(portion_adjustment(5.00, PortionType::Demi), -2.50);
        assert_eq!(portion_adjustment(10.00, PortionType::Piece), -7.00);
        assert_eq!(portion_adjustment(10.00, PortionType::Normal), 0.0);
        // base + adjustment lands on the portion price
        let base = 12.90;
        let adjusted = to_decimal(base) + to_decimal(portion_adjustment(base, PortionType::Piece));
        assert_eq!(to_f64(adjusted), portion_price(base, PortionType::Piece));
    }

    #[test]
    fn test_cart_total() {
        let lines = vec![line(10.99, 3), line(0.1, 1), line(0.2, 1)];
        assert_eq!(cart_total(&lines), 33.27);
        assert_eq!(cart_total(&[]), 0.0);
    }

    #[test]
    fn test_accumulation_precision() {
        let lines: Vec<_> = (0..1000).map(|_| line(0.01, 1)).collect();
        assert_eq!(cart_total(&lines), 10.0);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(12.5, "price").is_ok());

        let err = validate_price(-1.0, "price").unwrap_err();
        assert_eq!(err.reason, "must be non-negative");
        assert!(validate_price(f64::NAN, "price").is_err());
        assert!(validate_price(f64::INFINITY, "price").is_err());
        assert!(validate_price(2_000_000.0, "price").is_err());
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }
}
