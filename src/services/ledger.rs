//! Ledger aggregator
//!
//! Folds expense records into category totals and into what each partner
//! paid versus what each partner should have paid.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Account, AccountId, AccountOwner, CategoryId, Expense, Household, IncomeRatio, Money,
    PartnerRole,
};
use crate::services::split::theoretical_shares;

/// Who a payment is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payer {
    /// Paid out of a partner's own pocket
    Partner(PartnerRole),
    /// Paid from the shared account; balance-neutral
    Joint,
}

/// Result of folding a set of expenses
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerAggregate {
    /// Sum of period costs
    pub total: Money,
    /// Sum of monthly equivalents (one-time expenses excluded)
    pub recurring_monthly: Money,
    pub by_category: HashMap<CategoryId, Money>,
    pub paid_by_user1: Money,
    pub paid_by_user2: Money,
    pub should_pay_user1: Money,
    pub should_pay_user2: Money,
    pub record_count: usize,
}

impl LedgerAggregate {
    /// Categories by total, largest first
    pub fn ranked_categories(&self) -> Vec<(CategoryId, Money)> {
        let mut ranked: Vec<_> = self.by_category.iter().map(|(k, v)| (*k, *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

/// Aggregates expenses against a household and its accounts
pub struct Ledger<'a> {
    household: &'a Household,
    owners: HashMap<AccountId, AccountOwner>,
    ratio: IncomeRatio,
}

impl<'a> Ledger<'a> {
    pub fn new(household: &'a Household, accounts: &[Account]) -> Self {
        Self {
            household,
            owners: accounts.iter().map(|a| (a.id, a.owner)).collect(),
            ratio: household.income_ratio(),
        }
    }

    pub fn income_ratio(&self) -> IncomeRatio {
        self.ratio
    }

    /// Work out who an expense should be attributed to
    ///
    /// The account decides joint versus personal; for personal accounts the
    /// recorded payer must be one of the two partners.
    pub fn resolve_payer(&self, expense: &Expense) -> BudgetResult<Payer> {
        let owner = self
            .owners
            .get(&expense.account_id)
            .ok_or_else(|| BudgetError::UnknownAccount {
                expense: expense.id.to_string(),
                account: expense.account_id.to_string(),
            })?;

        if owner.is_joint() {
            return Ok(Payer::Joint);
        }

        self.household
            .role_of(expense.payer_id)
            .map(Payer::Partner)
            .ok_or_else(|| BudgetError::UnknownPayer {
                expense: expense.id.to_string(),
                payer: expense.payer_id.to_string(),
            })
    }

    /// Fold `expenses` into a single aggregate
    ///
    /// Fails on an invalid household, and stops at the first invalid record;
    /// no partial result is returned.
    pub fn aggregate<'e, I>(&self, expenses: I) -> BudgetResult<LedgerAggregate>
    where
        I: IntoIterator<Item = &'e Expense>,
    {
        if let Err(e) = self.household.validate() {
            warn!("rejecting household: {}", e);
            return Err(BudgetError::Validation(e.to_string()));
        }

        let mut agg = LedgerAggregate::default();

        for expense in expenses {
            if let Err(e) = expense.validate() {
                warn!(expense = %expense.id, "rejecting expense: {}", e);
                return Err(BudgetError::invalid_record(expense.id, e));
            }

            let cost = expense.period_cost();
            agg.total += cost;
            agg.recurring_monthly += expense.monthly_equivalent();
            *agg.by_category.entry(expense.category_id).or_default() += cost;
            agg.record_count += 1;

            match self.resolve_payer(expense)? {
                Payer::Joint => {}
                Payer::Partner(role) => {
                    match role {
                        PartnerRole::User1 => agg.paid_by_user1 += cost,
                        PartnerRole::User2 => agg.paid_by_user2 += cost,
                    }
                    let shares = theoretical_shares(cost, expense.split_type, self.ratio);
                    agg.should_pay_user1 += shares.user1;
                    agg.should_pay_user2 += shares.user2;
                }
            }
        }

        debug!(
            records = agg.record_count,
            total = %agg.total,
            paid_user1 = %agg.paid_by_user1,
            paid_user2 = %agg.paid_by_user2,
            "aggregated ledger"
        );

        Ok(agg)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Frequency, Partner, SplitType, UserId};
    use chrono::NaiveDate;

    pub(crate) struct Fixture {
        pub household: Household,
        pub joint: Account,
        pub personal1: Account,
        pub personal2: Account,
        pub category: CategoryId,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                household: Household::new(
                    Partner::new("Alice", Money::from_units(2600)),
                    Partner::new("Bob", Money::from_units(2400)),
                ),
                joint: Account::joint("Joint"),
                personal1: Account::new("Alice current", AccountOwner::User1),
                personal2: Account::new("Bob current", AccountOwner::User2),
                category: CategoryId::new(),
            }
        }

        pub fn accounts(&self) -> Vec<Account> {
            vec![self.joint.clone(), self.personal1.clone(), self.personal2.clone()]
        }

        pub fn expense(&self, amount: i64, account: &Account, payer: PartnerRole) -> Expense {
            Expense::new(
                "Expense",
                Money::from_units(amount),
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                self.category,
                account.id,
                self.household.partner(payer).id,
            )
        }
    }

    #[test]
    fn test_personal_ratio_expense() {
        let fx = Fixture::new();
        let rent = fx
            .expense(1200, &fx.personal1, PartnerRole::User1)
            .with_frequency(Frequency::Monthly)
            .with_split(SplitType::Ratio);

        let accounts = fx.accounts();
        let agg = Ledger::new(&fx.household, &accounts).aggregate([&rent]).unwrap();

        assert_eq!(agg.total, Money::from_units(1200));
        assert_eq!(agg.recurring_monthly, Money::from_units(1200));
        assert_eq!(agg.paid_by_user1, Money::from_units(1200));
        assert_eq!(agg.paid_by_user2, Money::zero());
        assert_eq!(agg.should_pay_user1, Money::from_units(624));
        assert_eq!(agg.should_pay_user2, Money::from_units(576));
        assert_eq!(agg.by_category[&fx.category], Money::from_units(1200));
    }

    #[test]
    fn test_joint_expense_is_balance_neutral() {
        let fx = Fixture::new();
        let quarterly = fx
            .expense(300, &fx.joint, PartnerRole::User2)
            .with_frequency(Frequency::Quarterly);

        let accounts = fx.accounts();
        let agg = Ledger::new(&fx.household, &accounts)
            .aggregate([&quarterly])
            .unwrap();

        assert_eq!(agg.total, Money::from_units(100));
        assert_eq!(agg.paid_by_user1, Money::zero());
        assert_eq!(agg.paid_by_user2, Money::zero());
        assert_eq!(agg.should_pay_user1, Money::zero());
        assert_eq!(agg.should_pay_user2, Money::zero());
    }

    #[test]
    fn test_one_time_expense_counts_in_full() {
        let fx = Fixture::new();
        let sofa = fx.expense(900, &fx.personal2, PartnerRole::User2);

        let accounts = fx.accounts();
        let agg = Ledger::new(&fx.household, &accounts).aggregate([&sofa]).unwrap();

        assert_eq!(agg.total, Money::from_units(900));
        assert_eq!(agg.recurring_monthly, Money::zero());
        assert_eq!(agg.paid_by_user2, Money::from_units(900));
        assert_eq!(agg.should_pay_user1, Money::from_units(450));
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(1200, &fx.personal1, PartnerRole::User1)
                .with_frequency(Frequency::Monthly)
                .with_split(SplitType::Ratio),
            fx.expense(300, &fx.joint, PartnerRole::User1)
                .with_frequency(Frequency::Quarterly),
            fx.expense(600, &fx.personal2, PartnerRole::User2)
                .with_frequency(Frequency::Annual)
                .with_split(SplitType::TwoThirds),
            fx.expense(40, &fx.personal2, PartnerRole::User2)
                .with_split(SplitType::FullUser1),
        ];

        let accounts = fx.accounts();
        let ledger = Ledger::new(&fx.household, &accounts);
        let expected = ledger.aggregate(&records).unwrap();

        let orders: [[usize; 4]; 4] = [[3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1], [0, 2, 1, 3]];
        for order in orders {
            let permuted: Vec<&Expense> = order.iter().map(|i| &records[*i]).collect();
            assert_eq!(ledger.aggregate(permuted).unwrap(), expected);
        }
    }

    #[test]
    fn test_unknown_account_fails() {
        let fx = Fixture::new();
        let stray = Account::new("Closed", AccountOwner::User1);
        let expense = fx.expense(10, &stray, PartnerRole::User1);

        let accounts = fx.accounts();
        let err = Ledger::new(&fx.household, &accounts)
            .aggregate([&expense])
            .unwrap_err();
        assert!(matches!(err, BudgetError::UnknownAccount { .. }));
    }

    #[test]
    fn test_unknown_payer_fails() {
        let fx = Fixture::new();
        let mut expense = fx.expense(10, &fx.personal1, PartnerRole::User1);
        expense.payer_id = UserId::new();

        let accounts = fx.accounts();
        let err = Ledger::new(&fx.household, &accounts)
            .aggregate([&expense])
            .unwrap_err();
        assert!(matches!(err, BudgetError::UnknownPayer { .. }));
    }

    #[test]
    fn test_invalid_record_stops_the_fold() {
        let fx = Fixture::new();
        let good = fx.expense(10, &fx.personal1, PartnerRole::User1);
        let mut bad = fx.expense(10, &fx.personal1, PartnerRole::User1);
        bad.amount = Money::zero();

        let accounts = fx.accounts();
        let err = Ledger::new(&fx.household, &accounts)
            .aggregate([&good, &bad])
            .unwrap_err();
        match err {
            BudgetError::InvalidRecord { id, .. } => assert_eq!(id, bad.id.to_string()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_household_is_rejected() {
        let mut fx = Fixture::new();
        fx.household.user2.salary = Money::from_units(-1000);
        let groceries = fx
            .expense(100, &fx.personal1, PartnerRole::User1)
            .with_split(SplitType::Ratio);

        let accounts = fx.accounts();
        let err = Ledger::new(&fx.household, &accounts)
            .aggregate([&groceries])
            .unwrap_err();
        assert!(matches!(err, BudgetError::Validation(_)));
    }

    #[test]
    fn test_oversized_amounts_fail_instead_of_overflowing() {
        let fx = Fixture::new();
        let mut first = fx.expense(1, &fx.personal1, PartnerRole::User1);
        let mut second = fx.expense(1, &fx.personal2, PartnerRole::User2);
        first.amount = Money::new(rust_decimal::Decimal::MAX);
        second.amount = Money::new(rust_decimal::Decimal::MAX);

        let accounts = fx.accounts();
        let err = Ledger::new(&fx.household, &accounts)
            .aggregate([&first, &second])
            .unwrap_err();
        assert!(matches!(err, BudgetError::InvalidRecord { .. }));
    }

    #[test]
    fn test_joint_expense_leaves_balance_unchanged() {
        let fx = Fixture::new();
        let mut records = vec![
            fx.expense(1200, &fx.personal1, PartnerRole::User1)
                .with_frequency(Frequency::Monthly)
                .with_split(SplitType::Ratio),
            fx.expense(90, &fx.personal2, PartnerRole::User2)
                .with_split(SplitType::OneThird),
        ];

        let accounts = fx.accounts();
        let ledger = Ledger::new(&fx.household, &accounts);
        let before = ledger.aggregate(&records).unwrap();

        records.push(
            fx.expense(300, &fx.joint, PartnerRole::User1)
                .with_frequency(Frequency::Quarterly),
        );
        let after = ledger.aggregate(&records).unwrap();

        assert_eq!(after.paid_by_user1, before.paid_by_user1);
        assert_eq!(after.paid_by_user2, before.paid_by_user2);
        assert_eq!(after.should_pay_user1, before.should_pay_user1);
        assert_eq!(after.should_pay_user2, before.should_pay_user2);
        assert_eq!(after.total, before.total + Money::from_units(100));

        let engine = crate::services::BalanceEngine::default();
        assert_eq!(
            engine.balance(&after, &fx.household).net_balance,
            engine.balance(&before, &fx.household).net_balance
        );
    }

    #[test]
    fn test_ranked_categories() {
        let mut agg = LedgerAggregate::default();
        let small = CategoryId::new();
        let large = CategoryId::new();
        agg.by_category.insert(small, Money::from_units(5));
        agg.by_category.insert(large, Money::from_units(50));

        let ranked = agg.ranked_categories();
        assert_eq!(ranked[0].0, large);
        assert_eq!(ranked[1].0, small);
    }
}
