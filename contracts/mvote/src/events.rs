//! Events emitted by the mVote contract.
//!
//! Every successful transition publishes exactly one event under the
//! `("MVOTE", <topic>)` topic pair. Failed invocations publish nothing.

use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, Symbol, Val};

use crate::poll::{Poll, VoteMode};

fn emit<T: IntoVal<Env, Val>>(env: &Env, topic: Symbol, data: T) {
    #[allow(deprecated)]
    env.events().publish((symbol_short!("MVOTE"), topic), data);
}

// ── Event payloads ────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token_mint: Address,
    pub vault: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PurchaseEvent {
    pub buyer: Address,
    pub amount: i128,
    pub native_cost: i128,
    pub purchased_today: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PollCreatedEvent {
    pub poll_id: u64,
    pub creator: Address,
    pub vote_mode: VoteMode,
    pub option_count: u32,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub poll_id: u64,
    pub voter: Address,
    pub option_index: u32,
    pub weight: i128,
    pub tokens_spent: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PollClosedEvent {
    pub poll_id: u64,
    pub closed_by: Address,
    pub total_votes: u64,
}

// ── Publishers ────────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: &Address, token_mint: &Address, vault: &Address) {
    emit(
        env,
        symbol_short!("INIT"),
        InitializedEvent {
            admin: admin.clone(),
            token_mint: token_mint.clone(),
            vault: vault.clone(),
        },
    );
}

pub fn publish_purchase(
    env: &Env,
    buyer: &Address,
    amount: i128,
    native_cost: i128,
    purchased_today: i128,
) {
    emit(
        env,
        symbol_short!("PURCHASE"),
        PurchaseEvent {
            buyer: buyer.clone(),
            amount,
            native_cost,
            purchased_today,
        },
    );
}

pub fn publish_poll_created(env: &Env, poll: &Poll) {
    emit(
        env,
        symbol_short!("POLL_NEW"),
        PollCreatedEvent {
            poll_id: poll.id,
            creator: poll.creator.clone(),
            vote_mode: poll.vote_mode,
            option_count: poll.options.len(),
            end_time: poll.end_time,
        },
    );
}

pub fn publish_vote_cast(
    env: &Env,
    poll_id: u64,
    voter: &Address,
    option_index: u32,
    weight: i128,
    tokens_spent: i128,
) {
    emit(
        env,
        symbol_short!("VOTE"),
        VoteCastEvent {
            poll_id,
            voter: voter.clone(),
            option_index,
            weight,
            tokens_spent,
        },
    );
}

pub fn publish_poll_closed(env: &Env, poll: &Poll, closed_by: &Address) {
    emit(
        env,
        symbol_short!("POLL_CLS"),
        PollClosedEvent {
            poll_id: poll.id,
            closed_by: closed_by.clone(),
            total_votes: poll.total_votes,
        },
    );
}
