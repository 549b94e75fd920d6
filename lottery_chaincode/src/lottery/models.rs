//! Lottery data models.

use crate::ledger::Balance;
use serde::{Deserialize, Serialize};

/// Result of one wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    PartialWin,
    Loss,
}

impl Outcome {
    /// Payload returned to the player
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Win => "you win! game over!",
            Outcome::PartialWin => "congratulation!!!!",
            Outcome::Loss => "Good Luck Next Time!",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::PartialWin => write!(f, "partial_win"),
            Outcome::Loss => write!(f, "loss"),
        }
    }
}

/// Account receiving the post-wager credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditTarget {
    Player,
    Pool,
}

/// Decision taken for a pool and wager, before any state is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub outcome: Outcome,
    pub target: CreditTarget,
    /// Credit amount; wider than `Balance` because a hit pays `wager + pool`
    pub amount: i128,
}

/// Record of a settled wager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryReceipt {
    pub account: String,
    pub wager: Balance,
    /// Pool balance observed after the debit
    pub pool: Balance,
    pub resolution: Resolution,
    /// False when the credit step failed and was skipped
    pub credit_applied: bool,
}
