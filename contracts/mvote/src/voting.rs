//! Ballot weighting and the one-ballot-per-wallet guard.
//!
//! ## Weight and charge by mode
//! ```text
//! FairVote     weight = 1             charge = vote_cost
//! HoldingVote  weight = token_amount  charge = token_amount   (token_amount > 0)
//! ```

use soroban_sdk::{contracttype, Address, Env};

use crate::keys::DataKey;
use crate::poll::VoteMode;
use crate::ContractError;

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Durable proof that `voter` has voted on `poll_id`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRecord {
    pub voter: Address,
    pub poll_id: u64,
    pub option_index: u32,
    pub tokens_spent: i128,
    pub voted_at: u64,
}

/// What a single ballot adds to the tally and what it costs the voter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BallotCost {
    pub weight: i128,
    pub charge: i128,
}

/// Resolve a ballot's weight and charge.
///
/// FairVote ignores `token_amount` entirely. HoldingVote requires a positive
/// stake; whether the voter can cover the charge is checked separately
/// against their balance.
pub fn vote_weight(
    mode: VoteMode,
    token_amount: i128,
    vote_cost: i128,
) -> Result<BallotCost, ContractError> {
    match mode {
        VoteMode::FairVote => Ok(BallotCost {
            weight: 1,
            charge: vote_cost,
        }),
        VoteMode::HoldingVote => {
            if token_amount <= 0 {
                return Err(ContractError::InsufficientTokens);
            }
            Ok(BallotCost {
                weight: token_amount,
                charge: token_amount,
            })
        }
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn record_key(poll_id: u64, voter: &Address) -> DataKey {
    DataKey::VoteRecord(poll_id, voter.clone())
}

pub(crate) fn has_voted(env: &Env, poll_id: u64, voter: &Address) -> bool {
    env.storage().persistent().has(&record_key(poll_id, voter))
}

pub(crate) fn load(env: &Env, poll_id: u64, voter: &Address) -> Option<VoteRecord> {
    env.storage().persistent().get(&record_key(poll_id, voter))
}

/// Insert `record` unless one already exists for the same (poll, voter).
pub(crate) fn insert_if_absent(env: &Env, record: &VoteRecord) -> Result<(), ContractError> {
    let key = record_key(record.poll_id, &record.voter);
    if env.storage().persistent().has(&key) {
        return Err(ContractError::AlreadyVoted);
    }
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}
