//! Split calculator
//!
//! Turns a total and a set of selected participants into owed amounts,
//! either evenly or from per-person amounts the user typed in.

use std::collections::BTreeMap;

use crate::models::{Money, ParticipantShare, PersonId, SplitMethod};

/// How to divide an expense between its participants
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SplitStrategy {
    /// Everyone owes the same per-head amount
    #[default]
    Equal,
    /// Everyone owes what was entered for them; missing entries owe zero
    Custom(BTreeMap<PersonId, Money>),
}

impl SplitStrategy {
    /// Build a custom split from raw user input, coercing garbage to zero
    pub fn custom_from_raw<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PersonId, &'a str)>,
    {
        Self::Custom(
            entries
                .into_iter()
                .map(|(id, raw)| (id, Money::coerce(raw)))
                .collect(),
        )
    }

    /// The wire tag for this strategy
    pub fn method(&self) -> SplitMethod {
        match self {
            Self::Equal => SplitMethod::Equal,
            Self::Custom(_) => SplitMethod::Custom,
        }
    }
}

/// The result of applying a strategy
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// One pending share per selected participant, in selection order
    pub shares: Vec<ParticipantShare>,
    /// The equal per-head value (zero when nobody is selected)
    pub per_head: Money,
    /// Sum of the owed amounts that were produced
    pub entered: Money,
    /// Whether the split may be submitted
    pub is_valid: bool,
}

/// Equal share of `total` across `count` participants; zero when `count` is zero
pub fn per_head(total: Money, count: usize) -> Money {
    total.split_evenly(count)
}

/// A custom split is valid when its amounts sum to the total within 0.01
pub fn custom_split_is_valid<I>(total: Money, amounts: I) -> bool
where
    I: IntoIterator<Item = Money>,
{
    let entered: Money = amounts.into_iter().sum();
    entered.approx_eq(total)
}

/// Apply `strategy` to `total` for the selected `participants`
///
/// Entries in a custom map for people who are not selected are ignored.
pub fn calculate(
    total: Money,
    participants: &[PersonId],
    strategy: &SplitStrategy,
) -> SplitOutcome {
    let per_head = per_head(total, participants.len());

    let shares: Vec<ParticipantShare> = match strategy {
        SplitStrategy::Equal => participants
            .iter()
            .map(|id| ParticipantShare::new(*id, per_head))
            .collect(),
        SplitStrategy::Custom(amounts) => participants
            .iter()
            .map(|id| {
                let owed = amounts.get(id).copied().unwrap_or_default();
                ParticipantShare::new(*id, owed)
            })
            .collect(),
    };

    let entered: Money = shares.iter().map(|s| s.amount_owed).sum();

    let is_valid = !participants.is_empty()
        && match strategy {
            SplitStrategy::Equal => total.is_positive(),
            SplitStrategy::Custom(_) => {
                custom_split_is_valid(total, shares.iter().map(|s| s.amount_owed))
            }
        };

    SplitOutcome {
        shares,
        per_head,
        entered,
        is_valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<PersonId> {
        raw.iter().map(|r| PersonId::new(*r)).collect()
    }

    #[test]
    fn test_equal_split_of_600_between_three() {
        let outcome = calculate(Money::new(600.0), &ids(&[1, 2, 3]), &SplitStrategy::Equal);

        assert!(outcome.is_valid);
        assert_eq!(outcome.per_head, Money::new(200.0));
        assert_eq!(outcome.shares.len(), 3);
        for share in &outcome.shares {
            assert_eq!(share.amount_owed.to_string(), "200.00");
            assert!(!share.is_settled);
        }
    }

    #[test]
    fn test_equal_split_uses_one_shared_per_head_value() {
        for (total, count) in [(100.0, 3usize), (10.0, 7), (0.05, 2), (1234.56, 9)] {
            let people: Vec<PersonId> = (1..=count as u64).map(PersonId::new).collect();
            let outcome = calculate(Money::new(total), &people, &SplitStrategy::Equal);

            assert!(outcome.is_valid);
            assert!(outcome.shares.iter().all(|s| s.amount_owed == outcome.per_head));
            let reassembled = outcome.per_head.value() * count as f64;
            assert!((reassembled - total).abs() < 0.01);
        }
    }

    #[test]
    fn test_zero_participants_is_invalid_without_dividing() {
        let outcome = calculate(Money::new(50.0), &[], &SplitStrategy::Equal);
        assert!(!outcome.is_valid);
        assert!(outcome.per_head.is_zero());
        assert!(outcome.shares.is_empty());
    }

    #[test]
    fn test_equal_split_requires_positive_total() {
        let outcome = calculate(Money::zero(), &ids(&[1, 2]), &SplitStrategy::Equal);
        assert!(!outcome.is_valid);

        let outcome = calculate(Money::new(f64::NAN), &ids(&[1, 2]), &SplitStrategy::Equal);
        assert!(!outcome.is_valid);
    }

    #[test]
    fn test_custom_split_that_adds_up() {
        let strategy = SplitStrategy::custom_from_raw([
            (PersonId::new(1), "40"),
            (PersonId::new(2), "60"),
        ]);
        let outcome = calculate(Money::new(100.0), &ids(&[1, 2]), &strategy);

        assert!(outcome.is_valid);
        assert_eq!(outcome.entered, Money::new(100.0));
        assert_eq!(outcome.shares[0].amount_owed, Money::new(40.0));
        assert_eq!(outcome.shares[1].amount_owed, Money::new(60.0));
        assert_eq!(strategy.method(), SplitMethod::Custom);
    }

    #[test]
    fn test_custom_split_that_falls_short_is_invalid() {
        let strategy = SplitStrategy::custom_from_raw([
            (PersonId::new(1), "40"),
            (PersonId::new(2), "50"),
        ]);
        let outcome = calculate(Money::new(100.0), &ids(&[1, 2]), &strategy);

        assert!(!outcome.is_valid);
        assert_eq!(outcome.entered, Money::new(90.0));
    }

    #[test]
    fn test_custom_validity_tolerance() {
        let total = Money::new(100.0);
        assert!(custom_split_is_valid(total, [Money::new(33.34), Money::new(66.66)]));
        assert!(custom_split_is_valid(total, [Money::new(100.005)]));
        assert!(!custom_split_is_valid(total, [Money::new(100.02)]));
        assert!(!custom_split_is_valid(total, [Money::new(99.0)]));
    }

    #[test]
    fn test_custom_split_missing_and_garbage_entries_count_as_zero() {
        let strategy = SplitStrategy::custom_from_raw([
            (PersonId::new(1), "100"),
            (PersonId::new(2), "lots"),
            (PersonId::new(9), "25"),
        ]);
        let outcome = calculate(Money::new(100.0), &ids(&[1, 2, 3]), &strategy);

        assert!(outcome.is_valid);
        assert!(outcome.shares[1].amount_owed.is_zero());
        assert!(outcome.shares[2].amount_owed.is_zero());
        assert_eq!(outcome.entered, Money::new(100.0));
    }
}
