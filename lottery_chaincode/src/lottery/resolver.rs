//! Wager resolution.

use super::models::{CreditTarget, LotteryReceipt, Outcome, Resolution};
use crate::config::ChaincodeConfig;
use crate::errors::{ChaincodeError, ChaincodeResult};
use crate::ledger::{Balance, BalanceLedger};
use crate::state::StateStore;
use log::{info, warn};

/// Decide the outcome of `wager` against a pool of `pool`.
///
/// The near-miss window is `(pool/4, pool/4 + pool/8)`, exclusive on both
/// ends, using floor division. Arithmetic is done in `i128` so no input
/// pair can overflow.
///
/// ```
/// use lottery_chaincode::lottery::{CreditTarget, Outcome, resolve};
///
/// let near_miss = resolve(1000, 700);
/// assert_eq!(near_miss.outcome, Outcome::PartialWin);
/// assert_eq!(near_miss.amount, 350);
///
/// let miss = resolve(1000, 600);
/// assert_eq!(miss.outcome, Outcome::Loss);
/// assert_eq!(miss.target, CreditTarget::Pool);
/// ```
pub fn resolve(pool: Balance, wager: Balance) -> Resolution {
    let pool = i128::from(pool);
    let wager = i128::from(wager);

    if wager - pool == 0 {
        return Resolution {
            outcome: Outcome::Win,
            target: CreditTarget::Player,
            amount: wager + pool,
        };
    }

    let quarter = pool.div_euclid(4);
    let eighth = pool.div_euclid(8);
    let gap = pool - wager;

    if gap > quarter && gap < quarter + eighth {
        Resolution {
            outcome: Outcome::PartialWin,
            target: CreditTarget::Player,
            amount: wager.div_euclid(2),
        }
    } else {
        Resolution {
            outcome: Outcome::Loss,
            target: CreditTarget::Pool,
            amount: wager,
        }
    }
}

/// Settles wagers against the pool
pub struct WagerResolver<'c> {
    config: &'c ChaincodeConfig,
}

impl<'c> WagerResolver<'c> {
    pub fn new(config: &'c ChaincodeConfig) -> Self {
        Self { config }
    }

    /// Play one round for `account`
    ///
    /// The hit branch pays the player without debiting the pool, and a
    /// failed credit is logged and skipped rather than failing the round.
    /// Both are long-standing behaviours of the deployed chaincode; the
    /// receipt's `credit_applied` records the second.
    ///
    /// # Errors
    ///
    /// * `ChaincodeError::InsufficientFunds` - Wager exceeds the player's balance
    /// * `ChaincodeError::DebitFailed` - Player has no account or an unreadable balance
    /// * `ChaincodeError::PoolUnavailable` - Pool record missing or unreadable
    pub fn lottery(
        &self,
        store: &mut dyn StateStore,
        account: &str,
        wager: Balance,
    ) -> ChaincodeResult<LotteryReceipt> {
        let mut ledger = BalanceLedger::new(store);

        let debit = wager.checked_neg().ok_or_else(|| ChaincodeError::Overflow {
            key: account.to_string(),
        })?;
        ledger.adjust(account, debit).map_err(|err| {
            if err.is_unreadable() {
                ChaincodeError::DebitFailed(Box::new(err))
            } else {
                err
            }
        })?;

        let pool = ledger
            .get(&self.config.pool_key)
            .map_err(|err| ChaincodeError::PoolUnavailable(Box::new(err)))?;

        let resolution = resolve(pool, wager);
        let key = match resolution.target {
            CreditTarget::Player => account,
            CreditTarget::Pool => self.config.pool_key.as_str(),
        };

        let credit = Balance::try_from(resolution.amount)
            .map_err(|_| ChaincodeError::Overflow {
                key: key.to_string(),
            })
            .and_then(|amount| ledger.adjust(key, amount));

        let credit_applied = match credit {
            Ok(_) => true,
            Err(err) => {
                warn!(
                    "credit of {} to {key} skipped after {} for {account}: {err}",
                    resolution.amount, resolution.outcome
                );
                false
            }
        };

        info!(
            "lottery {account}: wager {wager} against pool {pool} -> {}",
            resolution.outcome
        );

        Ok(LotteryReceipt {
            account: account.to_string(),
            wager,
            pool,
            resolution,
            credit_applied,
        })
    }
}
