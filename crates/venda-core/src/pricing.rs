//! # Pricing Calculator
//!
//! Pure functions computing per-item and aggregate order pricing.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Pricing Calculation                          │
//! │                                                                 │
//! │  product snapshot {price, purchase_price} + quantity            │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  price_item() ──► ItemPricing { subtotal, purchase_cost,        │
//! │       │                         unit_profit, total_profit }     │
//! │       │  (one per requested line)                               │
//! │       ▼                                                         │
//! │  total_order(items, discount, tax)                              │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  OrderTotals { subtotal, total, total_purchase_cost,            │
//! │                total_profit, profit_margin_bps }                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `total_profit == subtotal − total_purchase_cost`, exactly. Line profit
//!   is derived from the line's rounded subtotal and purchase cost rather
//!   than rounded independently, so the identity survives fractional
//!   quantities.
//! - `profit_margin_bps ∈ [0, 10000]` whenever every purchase price is
//!   below its sale price; `== 10000` when no line has a purchase price.
//! - Discount and tax adjust the amount due (`total`) only; they never
//!   touch profit figures.

use crate::money::{Money, Quantity};

// =============================================================================
// Per-Item Pricing
// =============================================================================

/// Pricing figures for a single requested line.
///
/// Produced from the product snapshot captured *before* the stock decrement,
/// so the figures reflect the prices the caller saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPricing {
    /// Sale price per unit.
    pub unit_price: Money,
    /// Purchase price per unit (zero when unrecorded).
    pub unit_purchase_price: Money,
    /// `unit_price − unit_purchase_price`.
    pub unit_profit: Money,
    /// Requested quantity.
    pub quantity: Quantity,
    /// `unit_price × quantity`, rounded at the cent.
    pub subtotal: Money,
    /// `unit_purchase_price × quantity`, rounded at the cent.
    pub purchase_cost: Money,
    /// `subtotal − purchase_cost`.
    pub total_profit: Money,
}

/// Computes pricing for one line.
///
/// ## Arguments
/// * `unit_price` - product sale price at placement time
/// * `unit_purchase_price` - product purchase price, `None` treated as zero
/// * `quantity` - requested quantity (> 0)
///
/// ## Example
/// ```rust
/// use venda_core::money::{Money, Quantity};
/// use venda_core::pricing::price_item;
///
/// let line = price_item(
///     Money::from_cents(8000),
///     Some(Money::from_cents(5000)),
///     Quantity::from_units(2),
/// );
/// assert_eq!(line.subtotal.cents(), 16_000);
/// assert_eq!(line.total_profit.cents(), 6_000);
/// ```
pub fn price_item(
    unit_price: Money,
    unit_purchase_price: Option<Money>,
    quantity: Quantity,
) -> ItemPricing {
    let unit_purchase_price = unit_purchase_price.unwrap_or_else(Money::zero);
    let subtotal = unit_price.times(quantity);
    let purchase_cost = unit_purchase_price.times(quantity);

    ItemPricing {
        unit_price,
        unit_purchase_price,
        unit_profit: unit_price - unit_purchase_price,
        quantity,
        subtotal,
        purchase_cost,
        total_profit: subtotal - purchase_cost,
    }
}

// =============================================================================
// Aggregate Totals
// =============================================================================

/// Aggregate pricing figures for a whole order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Σ line subtotals.
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    /// `subtotal − discount + tax`.
    pub total: Money,
    /// Σ line purchase costs.
    pub total_purchase_cost: Money,
    /// `subtotal − total_purchase_cost`.
    pub total_profit: Money,
    /// Margin over subtotal in basis points; 0 when subtotal is 0.
    pub profit_margin_bps: i64,
}

/// Aggregates per-line pricing into order totals.
///
/// ## Arguments
/// * `items` - per-line results from [`price_item`]
/// * `discount` - informational discount (≥ 0)
/// * `tax` - informational tax (≥ 0)
pub fn total_order(items: &[ItemPricing], discount: Money, tax: Money) -> OrderTotals {
    let subtotal: Money = items.iter().map(|i| i.subtotal).sum();
    let total_purchase_cost: Money = items.iter().map(|i| i.purchase_cost).sum();
    let total_profit = subtotal - total_purchase_cost;

    OrderTotals {
        subtotal,
        discount,
        tax,
        total: subtotal - discount + tax,
        total_purchase_cost,
        total_profit,
        profit_margin_bps: total_profit.ratio_bps(subtotal),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn item_without_purchase_price_is_all_profit() {
        // price $50.00, no purchase price, qty 2
        let line = price_item(cents(5000), None, Quantity::from_units(2));

        assert_eq!(line.subtotal.cents(), 10_000);
        assert_eq!(line.unit_purchase_price.cents(), 0);
        assert_eq!(line.purchase_cost.cents(), 0);
        assert_eq!(line.unit_profit.cents(), 5000);
        assert_eq!(line.total_profit.cents(), 10_000);
    }

    #[test]
    fn item_with_purchase_price() {
        // price $80.00, purchase $50.00, qty 2
        let line = price_item(cents(8000), Some(cents(5000)), Quantity::from_units(2));

        assert_eq!(line.subtotal.cents(), 16_000);
        assert_eq!(line.purchase_cost.cents(), 10_000);
        assert_eq!(line.unit_profit.cents(), 3000);
        assert_eq!(line.total_profit.cents(), 6000);
    }

    #[test]
    fn item_with_fractional_quantity() {
        // price $7.90/kg, purchase $4.35/kg, 1.250 kg
        let line = price_item(cents(790), Some(cents(435)), Quantity::from_millis(1250));

        assert_eq!(line.subtotal.cents(), 988); // 9.875 → 9.88
        assert_eq!(line.purchase_cost.cents(), 544); // 5.4375 → 5.44
        assert_eq!(line.total_profit.cents(), 988 - 544);
    }

    #[test]
    fn totals_for_mixed_items() {
        // product A: price $50, no purchase price, qty 1
        // product B: price $80, purchase $50, qty 1
        let a = price_item(cents(5000), None, Quantity::from_units(1));
        let b = price_item(cents(8000), Some(cents(5000)), Quantity::from_units(1));

        let totals = total_order(&[a, b], Money::zero(), Money::zero());

        assert_eq!(totals.subtotal.cents(), 13_000);
        assert_eq!(totals.total_purchase_cost.cents(), 5_000);
        assert_eq!(totals.total_profit.cents(), 8_000);
        assert_eq!(totals.total.cents(), 13_000);
    }

    #[test]
    fn margin_is_full_without_purchase_prices() {
        let line = price_item(cents(5000), None, Quantity::from_units(2));
        let totals = total_order(&[line], Money::zero(), Money::zero());

        assert_eq!(totals.subtotal.cents(), 10_000);
        assert_eq!(totals.total_profit.cents(), 10_000);
        assert_eq!(totals.profit_margin_bps, 10_000); // 100%
    }

    #[test]
    fn margin_with_purchase_prices() {
        let line = price_item(cents(8000), Some(cents(5000)), Quantity::from_units(2));
        let totals = total_order(&[line], Money::zero(), Money::zero());

        assert_eq!(totals.subtotal.cents(), 16_000);
        assert_eq!(totals.total_purchase_cost.cents(), 10_000);
        assert_eq!(totals.total_profit.cents(), 6_000);
        assert_eq!(totals.profit_margin_bps, 3750); // 37.5%
    }

    #[test]
    fn discount_and_tax_only_touch_the_total() {
        let line = price_item(cents(10_000), Some(cents(4000)), Quantity::from_units(1));
        let totals = total_order(&[line], cents(500), cents(300));

        assert_eq!(totals.subtotal.cents(), 10_000);
        assert_eq!(totals.total.cents(), 9_800); // 100.00 − 5.00 + 3.00
        // Profit figures unchanged by discount/tax.
        assert_eq!(totals.total_profit.cents(), 6_000);
        assert_eq!(totals.profit_margin_bps, 6_000);
    }

    #[test]
    fn empty_order_totals_are_zero() {
        let totals = total_order(&[], Money::zero(), Money::zero());

        assert_eq!(totals.subtotal.cents(), 0);
        assert_eq!(totals.total_profit.cents(), 0);
        assert_eq!(totals.profit_margin_bps, 0);
    }

    #[test]
    fn profit_identity_holds_under_rounding() {
        // Crafted so independently-rounded line profit would drift by a
        // cent: $0.25 × 0.1 = $0.025 → $0.03, $0.02 × 0.1 = $0.002 → $0.00.
        let line = price_item(cents(25), Some(cents(2)), Quantity::from_millis(100));
        let totals = total_order(&[line], Money::zero(), Money::zero());

        assert_eq!(
            totals.total_profit.cents(),
            totals.subtotal.cents() - totals.total_purchase_cost.cents()
        );
        assert!(totals.total_profit <= totals.subtotal);
    }

    #[test]
    fn duplicate_product_lines_are_summed_independently() {
        let a = price_item(cents(5000), None, Quantity::from_units(1));
        let b = price_item(cents(5000), None, Quantity::from_units(3));
        let totals = total_order(&[a, b], Money::zero(), Money::zero());

        assert_eq!(totals.subtotal.cents(), 20_000);
    }
}
