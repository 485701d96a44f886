//! Single-table blackjack rules engine: cards, shoe, hands, betting,
//! and round resolution. Rendering and input handling live in the
//! caller; this crate only exposes the queries and commands a
//! presentation layer needs to drive a round.

mod account;
mod card;
mod error;
mod hand;
mod round;
mod rules;
mod shoe;

pub use account::{DealerAccount, PlayerAccount};
pub use card::{Card, Rank, Suit};
pub use error::EngineError;
pub use hand::{hand_value, Hand, HandState};
pub use round::{Action, Table};
pub use rules::{push_payout, twenty_one_payout, win_payout, TableRules};
pub use shoe::Shoe;
