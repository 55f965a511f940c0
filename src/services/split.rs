//! Split resolver
//!
//! Turns a cost, a split policy and the household income ratio into the
//! share each partner is expected to carry.

use crate::models::{IncomeRatio, Money, PartnerRole, SplitType};

/// What each partner should carry for one cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shares {
    pub user1: Money,
    pub user2: Money,
}

impl Shares {
    pub fn new(user1: Money, user2: Money) -> Self {
        Self { user1, user2 }
    }

    pub fn of(&self, role: PartnerRole) -> Money {
        match role {
            PartnerRole::User1 => self.user1,
            PartnerRole::User2 => self.user2,
        }
    }

    /// Sum of both shares
    ///
    /// Equal to the cost for every policy except the fixed thirds.
    pub fn total(&self) -> Money {
        self.user1 + self.user2
    }
}

/// Each partner's theoretical share of `cost` under `split`
pub fn theoretical_shares(cost: Money, split: SplitType, ratio: IncomeRatio) -> Shares {
    match split.fixed_fractions() {
        Some((user1, user2)) => Shares::new(cost.scale(user1), cost.scale(user2)),
        None => Shares::new(cost.scale(ratio.value()), cost.scale(ratio.complement())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn ratio(pct: i64) -> IncomeRatio {
        IncomeRatio::new(Decimal::new(pct, 2)).unwrap()
    }

    #[test]
    fn test_policy_table() {
        let cost = Money::from_units(300);
        let r = ratio(52);

        let equal = theoretical_shares(cost, SplitType::Equal, r);
        assert_eq!(equal, Shares::new(Money::from_units(150), Money::from_units(150)));

        let by_income = theoretical_shares(cost, SplitType::Ratio, r);
        assert_eq!(by_income.user1, Money::from_units(156));
        assert_eq!(by_income.user2, Money::from_units(144));

        let third = theoretical_shares(cost, SplitType::OneThird, r);
        assert_eq!(third.user1, Money::from_units(99));
        assert_eq!(third.user2, Money::from_units(201));

        let two_thirds = theoretical_shares(cost, SplitType::TwoThirds, r);
        assert_eq!(two_thirds.user1, Money::from_units(201));
        assert_eq!(two_thirds.user2, Money::from_units(99));

        let full1 = theoretical_shares(cost, SplitType::FullUser1, r);
        assert_eq!(full1, Shares::new(cost, Money::zero()));

        let full2 = theoretical_shares(cost, SplitType::FullUser2, r);
        assert_eq!(full2, Shares::new(Money::zero(), cost));
        assert_eq!(full2.of(PartnerRole::User2), cost);
    }

    #[test]
    fn test_every_policy_conserves_cost() {
        let tolerance = Decimal::new(1, 6);
        let costs = [
            Money::from_cents(1),
            Money::from_cents(99_99),
            Money::from_units(1200),
            Money::from_units(100).divide(3),
        ];
        for split in SplitType::ALL {
            for pct in [0, 33, 52, 100] {
                for cost in costs {
                    let shares = theoretical_shares(cost, split, ratio(pct));
                    assert!(
                        shares.total().approx_eq(cost, tolerance),
                        "{:?} at {}% lost money on {}",
                        split,
                        pct,
                        cost
                    );
                }
            }
        }
    }

    #[test]
    fn test_fixed_thirds_stay_literal() {
        let cost = Money::from_units(100);
        let shares = theoretical_shares(cost, SplitType::OneThird, IncomeRatio::default());
        assert_eq!(shares.total(), Money::from_units(100));

        let odd = Money::from_cents(1);
        let shares = theoretical_shares(odd, SplitType::TwoThirds, IncomeRatio::default());
        assert_eq!(shares.user1.amount(), Decimal::new(67, 4));
    }

    #[test]
    fn test_ratio_uses_degenerate_fallback() {
        let cost = Money::from_units(80);
        let shares = theoretical_shares(cost, SplitType::Ratio, IncomeRatio::default());
        assert_eq!(shares.user1, Money::from_units(40));
        assert_eq!(shares.user2, Money::from_units(40));
    }
}
