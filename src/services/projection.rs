//! Recurring projection
//!
//! Forecasts the monthly and annual fixed-charge budget from the list of
//! recurring charges. Independent of what has actually been paid.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, ChargeId, Frequency, Money, RecurringCharge};

/// One charge as it appears in the forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedCharge {
    pub charge_id: ChargeId,
    pub name: String,
    pub category_id: CategoryId,
    pub amount: Money,
    pub frequency: Frequency,
    /// Monthly equivalent rounded to cents
    pub monthly_amount: Money,
}

/// Monthly and annual forecast of the fixed charges
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetSummary {
    pub total_monthly: Money,
    pub total_annual: Money,
    pub by_category: HashMap<CategoryId, Money>,
    pub items: Vec<ProjectedCharge>,
}

impl BudgetSummary {
    /// Categories by monthly total, largest first
    pub fn ranked_categories(&self) -> Vec<(CategoryId, Money)> {
        let mut ranked: Vec<_> = self.by_category.iter().map(|(k, v)| (*k, *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Project the active charges onto a monthly and annual budget
///
/// Inactive charges are skipped. A charge whose frequency cannot recur
/// fails the whole projection.
pub fn project<'c, I>(charges: I) -> BudgetResult<BudgetSummary>
where
    I: IntoIterator<Item = &'c RecurringCharge>,
{
    let mut summary = BudgetSummary::default();
    let mut skipped = 0usize;

    for charge in charges {
        if !charge.active {
            skipped += 1;
            continue;
        }

        if !charge.frequency.is_recurring() {
            return Err(BudgetError::InvalidChargeFrequency {
                charge: charge.id.to_string(),
                frequency: charge.frequency,
            });
        }
        if let Err(e) = charge.validate() {
            return Err(BudgetError::invalid_record(charge.id, e));
        }

        let monthly = charge.frequency.monthly_equivalent(charge.amount);
        summary.total_monthly += monthly;
        *summary.by_category.entry(charge.category_id).or_default() += monthly;
        summary.items.push(ProjectedCharge {
            charge_id: charge.id,
            name: charge.name.clone(),
            category_id: charge.category_id,
            amount: charge.amount,
            frequency: charge.frequency,
            monthly_amount: monthly.round_cents(),
        });
    }

    summary.total_annual = summary.total_monthly.times(12);

    debug!(
        charges = summary.items.len(),
        skipped,
        monthly = %summary.total_monthly,
        "projected recurring charges"
    );

    Ok(summary)
}

/// Monthly and annual forecast for `charges`
pub fn compute_monthly_projection(charges: &[RecurringCharge]) -> BudgetResult<BudgetSummary> {
    project(charges)
}
