//! # Price Aggregator
//!
//! `total = (base_price + option_delta) * quantity + Σ add_on_charges`
//!
//! Everything here is a pure function of its inputs, evaluated in cents. The
//! wizard calls it on every read instead of storing a total, and the order
//! actor calls the same code to check what the customer was shown.

use crate::model::{AddOn, CrustOption, Money, MoneyError, OrderDraft, OrderRequest};
use serde::Serialize;
use std::collections::BTreeSet;

/// The pieces of a total, for a receipt-style display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    /// Base price plus the option delta.
    pub unit_price: Money,
    pub quantity: u32,
    /// `unit_price * quantity`
    pub cakes_total: Money,
    pub add_ons_total: Money,
    pub total: Money,
}

/// Prices one order. A missing option prices as delta zero.
pub fn compute<'a>(
    base_price: Money,
    option: Option<CrustOption>,
    quantity: u32,
    add_ons: impl IntoIterator<Item = &'a AddOn>,
) -> Result<PriceBreakdown, MoneyError> {
    let delta = option.map_or(Money::ZERO, CrustOption::price_delta);
    let unit_price = base_price.checked_add(delta)?;
    let cakes_total = unit_price.checked_mul(quantity)?;
    let add_ons_total = add_ons
        .into_iter()
        .try_fold(Money::ZERO, |acc, a| acc.checked_add(a.charge()))?;
    let total = cakes_total.checked_add(add_ons_total)?;

    Ok(PriceBreakdown {
        unit_price,
        quantity,
        cakes_total,
        add_ons_total,
        total,
    })
}

pub fn for_draft(base_price: Money, draft: &OrderDraft) -> Result<PriceBreakdown, MoneyError> {
    compute(base_price, draft.option, draft.quantity, &draft.add_ons)
}

/// Prices a submitted request. Repeated add-ons are charged once, as they are
/// in the draft.
pub fn for_request(
    base_price: Money,
    request: &OrderRequest,
) -> Result<PriceBreakdown, MoneyError> {
    let add_ons: BTreeSet<AddOn> = request.add_ons.iter().copied().collect();
    compute(base_price, Some(request.option), request.quantity, &add_ons)
}
