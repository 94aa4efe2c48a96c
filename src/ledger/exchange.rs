//! Who pays whom
//!
//! Two views of the same debts: the naive pairwise netting (one transfer
//! per pair of people that share expenses) and a simplified list that
//! matches the biggest debtors with the biggest creditors. `settle_up`
//! returns whichever needs fewer transfers.

use std::collections::BTreeMap;

use serde::Serialize;

use super::balance::{contributes, Balances, ShareScope};
use crate::models::{Expense, Money, PersonId};

/// A single payment that moves money from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub from: PersonId,
    pub to: PersonId,
    pub amount: Money,
}

/// Net debt between every pair of people, one transfer per pair
///
/// Pairs are keyed in id order so debts in both directions cancel out.
/// Pairs that net to within 0.01 of zero are dropped.
pub fn pairwise_debts(expenses: &[Expense], scope: ShareScope) -> Vec<Transfer> {
    // (low, high) -> amount `high` owes `low`; negative means `low` owes `high`
    let mut pairs: BTreeMap<(PersonId, PersonId), Money> = BTreeMap::new();

    for expense in expenses {
        let payer = expense.paid_by;
        for share in &expense.participants {
            let debtor = share.person_id;
            if debtor == payer || !contributes(share) || !scope.includes(share) {
                continue;
            }

            if payer < debtor {
                *pairs.entry((payer, debtor)).or_default() += share.amount_owed;
            } else {
                *pairs.entry((debtor, payer)).or_default() -= share.amount_owed;
            }
        }
    }

    pairs
        .into_iter()
        .filter(|(_, net)| net.is_outstanding())
        .map(|((low, high), net)| {
            if net.is_positive() {
                Transfer {
                    from: high,
                    to: low,
                    amount: net,
                }
            } else {
                Transfer {
                    from: low,
                    to: high,
                    amount: net.abs(),
                }
            }
        })
        .collect()
}

/// Greedy simplification over net balances
///
/// Repeatedly pays the largest remaining creditor from the largest
/// remaining debtor. Leftovers within 0.01 of zero are treated as settled.
pub fn suggest_transfers(balances: &Balances) -> Vec<Transfer> {
    let mut creditors = balances.creditors();
    let mut debtors = balances.debtors();
    let mut transfers = Vec::new();

    let (mut ci, mut di) = (0, 0);
    while ci < creditors.len() && di < debtors.len() {
        let (to, owed_to) = creditors[ci];
        let (from, owed_by) = debtors[di];

        let amount = if owed_to.value() < owed_by.value() {
            owed_to
        } else {
            owed_by
        };
        transfers.push(Transfer {
            from,
            to,
            amount: Money::new(amount.rounded()),
        });

        creditors[ci].1 = owed_to - amount;
        debtors[di].1 = owed_by - amount;

        if !creditors[ci].1.is_outstanding() {
            ci += 1;
        }
        if !debtors[di].1.is_outstanding() {
            di += 1;
        }
    }

    transfers
}

/// The shorter of the pairwise and the simplified transfer lists
pub fn settle_up(expenses: &[Expense], scope: ShareScope) -> Vec<Transfer> {
    let naive = pairwise_debts(expenses, scope);

    let mut balances = Balances::default();
    balances.apply(expenses, scope);
    let simplified = suggest_transfers(&balances);

    if simplified.len() < naive.len() {
        simplified
    } else {
        naive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::balance::compute_balances;
    use crate::models::{Category, ExpenseId, NewExpense, ParticipantShare, DEFAULT_CURRENCY};
    use chrono::NaiveDate;

    const A: PersonId = PersonId::new(1);
    const B: PersonId = PersonId::new(2);
    const C: PersonId = PersonId::new(3);

    fn expense(id: u64, payer: PersonId, shares: &[(PersonId, f64)]) -> Expense {
        let participants: Vec<_> = shares
            .iter()
            .map(|(p, owed)| ParticipantShare::new(*p, Money::new(*owed)))
            .collect();
        NewExpense {
            title: format!("e{}", id),
            description: None,
            total_amount: participants.iter().map(|p| p.amount_owed).sum(),
            currency: DEFAULT_CURRENCY.into(),
            paid_by: payer,
            split_method: None,
            category: Category::Other,
            expense_date: None,
            participants,
        }
        .into_expense(
            ExpenseId::new(id),
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    fn transfer(from: PersonId, to: PersonId, amount: f64) -> Transfer {
        Transfer {
            from,
            to,
            amount: Money::new(amount),
        }
    }

    #[test]
    fn test_pairwise_nets_opposite_debts() {
        let expenses = vec![
            expense(1, A, &[(A, 10.0), (B, 30.0)]),
            expense(2, B, &[(B, 5.0), (A, 10.0)]),
        ];

        assert_eq!(
            pairwise_debts(&expenses, ShareScope::All),
            vec![transfer(B, A, 20.0)]
        );
    }

    #[test]
    fn test_pairwise_drops_even_pairs() {
        let expenses = vec![
            expense(1, A, &[(B, 15.0)]),
            expense(2, B, &[(A, 15.0)]),
        ];
        assert!(pairwise_debts(&expenses, ShareScope::All).is_empty());
    }

    #[test]
    fn test_suggestions_clear_every_balance() {
        let expenses = vec![
            expense(1, A, &[(A, 200.0), (B, 200.0), (C, 200.0)]),
            expense(2, B, &[(A, 50.0), (C, 50.0)]),
        ];
        let balances = compute_balances(&expenses);
        let transfers = suggest_transfers(&balances);

        assert_eq!(
            transfers,
            vec![transfer(C, A, 250.0), transfer(B, A, 100.0)]
        );

        let mut remaining: BTreeMap<PersonId, f64> =
            balances.iter().map(|(id, b)| (id, b.value())).collect();
        for t in &transfers {
            *remaining.entry(t.from).or_default() += t.amount.value();
            *remaining.entry(t.to).or_default() -= t.amount.value();
        }
        assert!(remaining.values().all(|v| v.abs() < 0.01));
    }

    #[test]
    fn test_chain_is_simplified() {
        // A pays for B, B pays for C: C can pay A directly
        let expenses = vec![
            expense(1, A, &[(B, 40.0)]),
            expense(2, B, &[(C, 40.0)]),
        ];

        assert_eq!(pairwise_debts(&expenses, ShareScope::All).len(), 2);
        assert_eq!(
            settle_up(&expenses, ShareScope::All),
            vec![transfer(C, A, 40.0)]
        );
    }

    #[test]
    fn test_settle_up_prefers_naive_when_not_shorter() {
        let expenses = vec![expense(1, A, &[(B, 12.5), (C, 7.5)])];
        let naive = pairwise_debts(&expenses, ShareScope::All);
        assert_eq!(settle_up(&expenses, ShareScope::All), naive);
    }

    #[test]
    fn test_pending_scope() {
        let mut settled = expense(1, A, &[(B, 40.0)]);
        settled.participants[0].is_settled = true;
        let expenses = vec![settled, expense(2, A, &[(C, 10.0)])];

        assert_eq!(
            pairwise_debts(&expenses, ShareScope::Pending),
            vec![transfer(C, A, 10.0)]
        );
    }
}
