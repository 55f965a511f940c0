//! Typed record identifiers
//!
//! Each record kind gets its own UUID newtype, shown to users as a short
//! prefixed form (`exp-1a2b3c4d`) that the CLI accepts back as a lookup key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the hex part of the short form
const SHORT_LEN: usize = 8;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Prefixed short form, e.g. `exp-1a2b3c4d`
            pub fn short(&self) -> String {
                let hex = self.0.simple().to_string();
                format!("{}{}", Self::PREFIX, &hex[..SHORT_LEN])
            }

            /// Whether `query` ("exp-1a2b", "1a2b" or the full UUID) names this id
            pub fn matches_short(&self, query: &str) -> bool {
                let query = query.trim();
                let query = query.strip_prefix(Self::PREFIX).unwrap_or(query);
                !query.is_empty() && self.0.to_string().starts_with(query)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.short())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Full UUID, with or without the prefix
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Uuid::parse_str(s.strip_prefix(Self::PREFIX).unwrap_or(s)).map(Self)
            }
        }
    };
}

define_id!(
    /// An expense record
    ExpenseId,
    "exp-"
);
define_id!(
    /// A recurring charge in the budget
    ChargeId,
    "chg-"
);
define_id!(CategoryId, "cat-");
define_id!(AccountId, "acc-");
define_id!(
    /// One of the two partners
    UserId,
    "usr-"
);
define_id!(ProjectId, "prj-");
define_id!(
    /// A child or other dependent with a monthly allowance
    DependentId,
    "dep-"
);
define_id!(ChildExpenseId, "chx-");

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_short_form() {
        let id: ExpenseId = SAMPLE.parse().unwrap();
        assert_eq!(id.to_string(), "exp-550e8400");
        assert_eq!(AccountId::new().to_string().len(), 12);
    }

    #[test]
    fn test_parse_accepts_prefix() {
        let plain: ProjectId = SAMPLE.parse().unwrap();
        let prefixed: ProjectId = format!("prj-{}", SAMPLE).parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_uuid().to_string(), SAMPLE);
        assert!("prj-550e8400".parse::<ProjectId>().is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(CategoryId::new(), CategoryId::new());
    }

    #[test]
    fn test_serializes_as_plain_uuid() {
        let id: UserId = SAMPLE.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", SAMPLE));
        assert_eq!(serde_json::from_str::<UserId>(&json).unwrap(), id);
    }

    #[test]
    fn test_matches_short() {
        let id: ExpenseId = SAMPLE.parse().unwrap();
        assert!(id.matches_short("exp-550e8400"));
        assert!(id.matches_short("550e"));
        assert!(id.matches_short(SAMPLE));
        assert!(!id.matches_short("exp-"));
        assert!(!id.matches_short("deadbeef"));
    }
}
