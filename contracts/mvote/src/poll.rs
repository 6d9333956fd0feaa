//! Poll records, lifecycle and tallies.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::keys::DataKey;
use crate::ContractError;

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// How a ballot is weighted and charged.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoteMode {
    /// One wallet, one unit of weight, fixed `vote_cost` charge.
    FairVote,
    /// Weight equals the amount of mVote the voter stakes.
    HoldingVote,
}

/// Presentation hint for clients. Not enforced by the contract.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VotingStyle {
    Binary,
    MultipleChoice,
}

/// Derived lifecycle state of a poll.
///
/// ```text
/// Open ──► Expired   (ledger time reaches end_time)
///   │
///   └────► Closed    (creator calls close_poll)
/// ```
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PollStatus {
    Open,
    Expired,
    Closed,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Poll {
    pub id: u64,
    pub creator: Address,
    pub question: String,
    pub options: Vec<String>,
    /// One counter per option, index-aligned with `options`.
    pub vote_counts: Vec<i128>,
    pub vote_mode: VoteMode,
    pub voting_style: VotingStyle,
    pub start_time: u64,
    pub end_time: u64,
    /// Number of ballots cast.
    pub total_votes: u64,
    /// mVote charged across all ballots; excludes the creation fee.
    pub total_tokens_spent: i128,
    pub is_active: bool,
}

impl Poll {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        env: &Env,
        id: u64,
        creator: Address,
        question: String,
        options: Vec<String>,
        vote_mode: VoteMode,
        voting_style: VotingStyle,
        start_time: u64,
        end_time: u64,
    ) -> Self {
        let mut vote_counts = Vec::new(env);
        for _ in 0..options.len() {
            vote_counts.push_back(0i128);
        }
        Self {
            id,
            creator,
            question,
            options,
            vote_counts,
            vote_mode,
            voting_style,
            start_time,
            end_time,
            total_votes: 0,
            total_tokens_spent: 0,
            is_active: true,
        }
    }

    pub fn status(&self, now: u64) -> PollStatus {
        if !self.is_active {
            PollStatus::Closed
        } else if now >= self.end_time {
            PollStatus::Expired
        } else {
            PollStatus::Open
        }
    }

    /// Apply one ballot to the tallies.
    pub fn tally(
        &mut self,
        option_index: u32,
        weight: i128,
        tokens_spent: i128,
    ) -> Result<(), ContractError> {
        let current = self
            .vote_counts
            .get(option_index)
            .ok_or(ContractError::InvalidOption)?;
        let updated = current
            .checked_add(weight)
            .ok_or(ContractError::Overflow)?;
        let total_votes = self
            .total_votes
            .checked_add(1)
            .ok_or(ContractError::Overflow)?;
        let total_tokens_spent = self
            .total_tokens_spent
            .checked_add(tokens_spent)
            .ok_or(ContractError::Overflow)?;

        self.vote_counts.set(option_index, updated);
        self.total_votes = total_votes;
        self.total_tokens_spent = total_tokens_spent;
        Ok(())
    }

    /// Sum of every option's tally.
    pub fn tally_sum(&self) -> i128 {
        self.vote_counts
            .iter()
            .fold(0i128, |acc, count| acc.saturating_add(count))
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn store(env: &Env, poll: &Poll) {
    let key = DataKey::Poll(poll.id);
    env.storage().persistent().set(&key, poll);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Result<Poll, ContractError> {
    env.storage()
        .persistent()
        .get(&DataKey::Poll(id))
        .ok_or(ContractError::PollNotFound)
}
