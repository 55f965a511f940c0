//! Balance engine
//!
//! Compares what each partner paid with what they should have paid and
//! reduces the difference to a single signed amount.

use rust_decimal::Decimal;
use std::fmt;

use crate::error::BudgetResult;
use crate::models::{Account, Expense, Household, Money, PartnerRole, DEFAULT_CURRENCY_SYMBOL};
use crate::services::ledger::{Ledger, LedgerAggregate};

/// Default settle tolerance: one currency unit
pub const DEFAULT_SETTLE_TOLERANCE: Decimal = Decimal::ONE;

/// Who owes whom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Settled,
    User1Owes(Money),
    User2Owes(Money),
}

impl Settlement {
    /// The partner who owes money, if any
    pub fn debtor(&self) -> Option<PartnerRole> {
        match self {
            Self::Settled => None,
            Self::User1Owes(_) => Some(PartnerRole::User1),
            Self::User2Owes(_) => Some(PartnerRole::User2),
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            Self::Settled => Money::zero(),
            Self::User1Owes(amount) | Self::User2Owes(amount) => *amount,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

/// Net position between the two partners
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceResult {
    /// `should_pay_user1 - paid_by_user1`; positive means user1 owes user2
    pub net_balance: Money,
    pub paid_by_user1: Money,
    pub paid_by_user2: Money,
    pub should_pay_user1: Money,
    pub should_pay_user2: Money,
    pub settlement: Settlement,
    /// Human-readable summary, e.g. "Alice owes Bob €576.00"
    pub statement: String,
}

impl fmt::Display for BalanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statement)
    }
}

/// Turns a ledger aggregate into a settlement
#[derive(Debug, Clone)]
pub struct BalanceEngine {
    tolerance: Decimal,
    currency_symbol: String,
}

impl BalanceEngine {
    /// Balances whose magnitude is below `tolerance` count as settled
    pub fn new(tolerance: Decimal) -> Self {
        Self {
            tolerance: tolerance.abs(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    pub fn settle(&self, net_balance: Money) -> Settlement {
        if net_balance.is_zero() || net_balance.abs().amount() < self.tolerance {
            Settlement::Settled
        } else if net_balance.is_positive() {
            Settlement::User1Owes(net_balance)
        } else {
            Settlement::User2Owes(net_balance.abs())
        }
    }

    pub fn balance(&self, agg: &LedgerAggregate, household: &Household) -> BalanceResult {
        let net_balance = agg.should_pay_user1 - agg.paid_by_user1;
        let settlement = self.settle(net_balance);

        BalanceResult {
            net_balance,
            paid_by_user1: agg.paid_by_user1,
            paid_by_user2: agg.paid_by_user2,
            should_pay_user1: agg.should_pay_user1,
            should_pay_user2: agg.should_pay_user2,
            settlement,
            statement: self.statement(settlement, household),
        }
    }

    fn statement(&self, settlement: Settlement, household: &Household) -> String {
        match settlement.debtor() {
            None => "Accounts are settled".to_string(),
            Some(debtor) => format!(
                "{} owes {} {}",
                household.partner(debtor).name,
                household.partner(debtor.other()).name,
                settlement.amount().format_with_symbol(&self.currency_symbol)
            ),
        }
    }
}

impl Default for BalanceEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_TOLERANCE)
    }
}

/// Net balance between the partners over `expenses`
pub fn compute_balance(
    expenses: &[Expense],
    household: &Household,
    accounts: &[Account],
    tolerance: Decimal,
) -> BudgetResult<BalanceResult> {
    let agg = Ledger::new(household, accounts).aggregate(expenses)?;
    Ok(BalanceEngine::new(tolerance).balance(&agg, household))
}
