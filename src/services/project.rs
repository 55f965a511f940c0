//! Savings project progress

use rust_decimal::Decimal;

use crate::models::{Expense, Household, Money, PartnerRole, ProjectId, SavingsProject};

/// Derived state of a savings project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectProgress {
    pub project_id: ProjectId,
    pub name: String,
    pub target: Money,
    pub current: Money,
    pub contributed_by_user1: Money,
    pub contributed_by_user2: Money,
    /// Sum of expenses tagged with the project
    pub spent: Money,
    /// What is still missing to reach the target, never negative
    pub remaining: Money,
    pub progress_percentage: Decimal,
    pub completed: bool,
}

impl ProjectProgress {
    pub fn for_project(
        project: &SavingsProject,
        household: &Household,
        expenses: &[Expense],
    ) -> Self {
        let current = project.current_amount();
        let spent = expenses
            .iter()
            .filter(|e| e.project_id == Some(project.id))
            .map(|e| e.amount)
            .sum();
        let remaining = if current >= project.target_amount {
            Money::zero()
        } else {
            project.target_amount - current
        };

        Self {
            project_id: project.id,
            name: project.name.clone(),
            target: project.target_amount,
            current,
            contributed_by_user1: project.contributed_by(household.user1.id),
            contributed_by_user2: project.contributed_by(household.user2.id),
            spent,
            remaining,
            progress_percentage: project.progress_percentage(),
            completed: project.is_completed(),
        }
    }

    pub fn contributed_by(&self, role: PartnerRole) -> Money {
        match role {
            PartnerRole::User1 => self.contributed_by_user1,
            PartnerRole::User2 => self.contributed_by_user2,
        }
    }
}

/// Progress of every project, in the order given
pub fn project_progress(
    projects: &[SavingsProject],
    household: &Household,
    expenses: &[Expense],
) -> Vec<ProjectProgress> {
    projects
        .iter()
        .map(|p| ProjectProgress::for_project(p, household, expenses))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, CategoryId, Partner};
    use chrono::NaiveDate;

    #[test]
    fn test_progress_with_tagged_expenses() {
        let household = Household::new(
            Partner::new("Alice", Money::from_units(2000)),
            Partner::new("Bob", Money::from_units(2000)),
        );
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

        let mut trip = SavingsProject::new("Lisbon", Money::from_units(1000));
        trip.add_contribution(household.user1.id, Money::from_units(250), date, "");
        trip.add_contribution(household.user2.id, Money::from_units(150), date, "");

        let flights = Expense::new(
            "Flights",
            Money::from_units(320),
            date,
            CategoryId::new(),
            AccountId::new(),
            household.user1.id,
        )
        .with_project(trip.id);
        let unrelated = Expense::new(
            "Bread",
            Money::from_units(3),
            date,
            CategoryId::new(),
            AccountId::new(),
            household.user2.id,
        );

        let progress = ProjectProgress::for_project(&trip, &household, &[flights, unrelated]);

        assert_eq!(progress.current, Money::from_units(400));
        assert_eq!(progress.contributed_by(PartnerRole::User1), Money::from_units(250));
        assert_eq!(progress.contributed_by_user2, Money::from_units(150));
        assert_eq!(progress.spent, Money::from_units(320));
        assert_eq!(progress.remaining, Money::from_units(600));
        assert_eq!(progress.progress_percentage, Decimal::new(400, 1));
        assert!(!progress.completed);
    }

    #[test]
    fn test_completed_project_has_nothing_remaining() {
        let household = Household::default();
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let mut fund = SavingsProject::new("Emergency", Money::from_units(100));
        fund.add_contribution(household.user1.id, Money::from_units(120), date, "");

        let all = project_progress(&[fund], &household, &[]);
        assert_eq!(all.len(), 1);
        assert!(all[0].completed);
        assert_eq!(all[0].remaining, Money::zero());
    }
}
