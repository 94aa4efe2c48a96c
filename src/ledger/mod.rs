//! Pure ledger computations
//!
//! Everything here takes the currently loaded people and expenses as
//! arguments and returns derived values. Nothing reads from or writes to a
//! store, so the same functions serve the local and the remote backends.
//!
//! - `split`: equal and custom split calculation and validity
//! - `balance`: net balance per person
//! - `settlement`: flipping settlement flags on participant shares
//! - `exchange`: pairwise debts and settle-up suggestions

pub mod balance;
pub mod exchange;
pub mod settlement;
pub mod split;

pub use balance::{
    compute_balances, compute_balances_for, compute_pending_balances, contributions, Balances,
    ShareScope,
};
pub use exchange::{pairwise_debts, settle_up, suggest_transfers, Transfer};
pub use settlement::{set_settlement, toggle_settlement, SettlementSummary};
pub use split::{calculate, custom_split_is_valid, per_head, SplitOutcome, SplitStrategy};
