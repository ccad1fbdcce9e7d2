//! Shared-expense balance engine.
//!
//! Given a roster of [`Member`]s, the [`Expense`]s they shared and the
//! [`Settlement`]s already recorded, the engine computes each member's
//! [`Balance`] and a short list of [`SettlementSuggestion`]s that clears them.
//! Everything here is pure: no I/O, no shared state.

pub use balances::{Balance, SplitPolicy, compute_balances};
pub use currency::Currency;
pub use error::EngineError;
pub use expenses::Expense;
pub use members::{Member, MemberId};
pub use money::Money;
pub use report::{BalanceEngine, BalanceEngineBuilder, BalanceReport};
pub use settlements::{Settlement, SettlementSuggestion};
pub use simplify::{SettlementPolicy, simplify_settlements};
pub use snapshot::Snapshot;

mod balances;
mod currency;
mod error;
mod expenses;
mod members;
mod money;
mod report;
mod settlements;
mod simplify;
mod snapshot;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
