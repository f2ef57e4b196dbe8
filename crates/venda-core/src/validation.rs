//! # Validation Module
//!
//! Request-shape validation for Venda.
//!
//! ## Validation Strategy
//! Placement requests are validated in full *before* any transaction opens:
//! a malformed request must never touch storage, not even to roll back.
//! Database constraints (NOT NULL, CHECK, foreign keys) remain as a second
//! line of defense.

use crate::error::ValidationError;
use crate::types::PlaceOrderRequest;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted free-form note.
pub const MAX_NOTES_LEN: usize = 1000;

// =============================================================================
// Order Placement
// =============================================================================

/// Validates the shape of an order-placement request.
///
/// ## Rules
/// - `client_id` present and non-blank
/// - `items` non-empty; every line has a non-blank `product_id` and a
///   strictly positive quantity
/// - `discount_cents` / `tax_cents`, when present, are non-negative
/// - `notes`, when present, stays within [`MAX_NOTES_LEN`]
///
/// Existence of the client and products is NOT checked here; that happens
/// inside the transaction.
pub fn validate_place_order(req: &PlaceOrderRequest) -> ValidationResult<()> {
    if req.client_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "client_id".to_string(),
        });
    }

    if req.items.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    for (idx, item) in req.items.iter().enumerate() {
        if item.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: format!("items[{}].product_id", idx),
            });
        }
        if item.quantity_millis <= 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("items[{}].quantity", idx),
            });
        }
    }

    if req.discount_cents.unwrap_or(0) < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "discount".to_string(),
        });
    }

    if req.tax_cents.unwrap_or(0) < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "tax".to_string(),
        });
    }

    if let Some(notes) = &req.notes {
        if notes.len() > MAX_NOTES_LEN {
            return Err(ValidationError::TooLong {
                field: "notes".to_string(),
                max: MAX_NOTES_LEN,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Product Prices
// =============================================================================

/// Validates product price fields for inserts and updates.
///
/// ## Rules
/// - sale price strictly positive
/// - purchase price, when present, non-negative and strictly below the
///   sale price
/// - stock non-negative
pub fn validate_product_prices(
    price_cents: i64,
    purchase_price_cents: Option<i64>,
    stock_millis: i64,
) -> ValidationResult<()> {
    if price_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if let Some(purchase) = purchase_price_cents {
        if purchase < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "purchase_price".to_string(),
            });
        }
        if purchase >= price_cents {
            return Err(ValidationError::PurchaseAboveSale {
                purchase_cents: purchase,
                price_cents,
            });
        }
    }

    if stock_millis < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
