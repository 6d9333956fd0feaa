//! Per-wallet purchase window and activity counters.

use soroban_sdk::{contracttype, Address, Env};

use crate::keys::DataKey;
use crate::ContractError;

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// `last_purchase_day` of a wallet that has never bought mVote.
pub const NO_PURCHASE_DAY: i64 = i64::MIN;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStats {
    pub wallet: Address,
    /// mVote bought during `last_purchase_day`.
    pub tokens_purchased_today: i128,
    /// Epoch-day index of the most recent purchase, or [`NO_PURCHASE_DAY`].
    pub last_purchase_day: i64,
    pub total_tokens_purchased: i128,
    pub polls_created: u64,
    pub votes_cast: u64,
}

impl UserStats {
    pub fn new(wallet: Address) -> Self {
        Self {
            wallet,
            tokens_purchased_today: 0,
            last_purchase_day: NO_PURCHASE_DAY,
            total_tokens_purchased: 0,
            polls_created: 0,
            votes_cast: 0,
        }
    }

    /// Start a fresh purchase window when `today` differs from the stored day.
    pub fn roll_window(&mut self, today: i64) {
        if today != self.last_purchase_day {
            self.tokens_purchased_today = 0;
            self.last_purchase_day = today;
        }
    }

    /// Amount already bought today plus `amount`, if it fits under `limit`.
    pub fn purchased_after(&self, amount: i128, limit: i128) -> Result<i128, ContractError> {
        let total = self
            .tokens_purchased_today
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        if total > limit {
            return Err(ContractError::DailyLimitExceeded);
        }
        Ok(total)
    }

    pub fn record_purchase(&mut self, amount: i128) -> Result<(), ContractError> {
        self.tokens_purchased_today = self
            .tokens_purchased_today
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        self.total_tokens_purchased = self
            .total_tokens_purchased
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    pub fn record_poll(&mut self) -> Result<(), ContractError> {
        self.polls_created = self
            .polls_created
            .checked_add(1)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    pub fn record_vote(&mut self) -> Result<(), ContractError> {
        self.votes_cast = self
            .votes_cast
            .checked_add(1)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn load(env: &Env, wallet: &Address) -> Option<UserStats> {
    env.storage()
        .persistent()
        .get(&DataKey::UserStats(wallet.clone()))
}

/// Load the wallet's stats, creating an empty record on first contact.
pub(crate) fn load_or_new(env: &Env, wallet: &Address) -> UserStats {
    load(env, wallet).unwrap_or_else(|| UserStats::new(wallet.clone()))
}

pub(crate) fn store(env: &Env, stats: &UserStats) {
    let key = DataKey::UserStats(stats.wallet.clone());
    env.storage().persistent().set(&key, stats);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
