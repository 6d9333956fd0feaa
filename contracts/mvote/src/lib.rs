#![no_std]

//! # mVote
//!
//! Token-gated polling on Soroban. Wallets buy the mVote token with native
//! currency, burn it to open polls, and burn or stake it to vote.
//!
//! - **Purchase**: capped per wallet per epoch day; the day boundary is shifted
//!   by a configurable offset (UTC+8 by default).
//! - **Polls**: 2–4 options, 10–1440 minute lifetime, sequential ids from 0.
//! - **Voting modes**: `FairVote` (one unit per wallet, fixed cost) and
//!   `HoldingVote` (weight equals the mVote staked).
//! - **One ballot per wallet per poll**, enforced by an insert-if-absent
//!   `VoteRecord`.
//!
//! Every entry point validates all preconditions before writing; any error
//! aborts the invocation and the host discards its writes and token calls.

pub mod config;
pub mod events;
pub mod keys;
pub mod poll;
pub mod token_ledger;
pub mod user_stats;
pub mod validation;
pub mod voting;

use soroban_sdk::{contract, contracterror, contractimpl, Address, BytesN, Env, String, Vec};

pub use config::{Config, ProtocolParams};
pub use keys::DataKey;
pub use poll::{Poll, PollStatus, VoteMode, VotingStyle};
pub use user_stats::UserStats;
pub use voting::VoteRecord;

// ── Error codes ───────────────────────────────────────────────────────────────

/// Stable error codes surfaced to callers.
///
/// | Range   | Purpose                     |
/// |---------|-----------------------------|
/// | 1 – 9   | Lifecycle & authorisation   |
/// | 10 – 19 | Purchases & balances        |
/// | 20 – 29 | Poll creation input         |
/// | 30 – 39 | Voting & poll state         |
/// | 40+     | Arithmetic                  |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidConfig = 4,
    InvalidAmount = 10,
    DailyLimitExceeded = 11,
    InsufficientFunds = 12,
    InsufficientTokens = 13,
    InvalidQuestionLength = 20,
    InvalidOptionCount = 21,
    InvalidOptionLength = 22,
    InvalidDuration = 23,
    PollNotFound = 30,
    PollNotActive = 31,
    InvalidOption = 32,
    AlreadyVoted = 33,
    Overflow = 40,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct MvoteContract;

#[contractimpl]
impl MvoteContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Create the configuration singleton.
    ///
    /// * `token_mint`  : mVote Stellar Asset Contract; its admin must already
    ///                    be this contract so purchases can mint.
    /// * `native_token`: token contract buyers pay with (the XLM SAC).
    /// * `params`      : protocol parameters; `None` uses the defaults.
    ///
    /// The contract's own address becomes the native-currency vault.
    pub fn initialize(
        env: Env,
        admin: Address,
        token_mint: Address,
        native_token: Address,
        params: Option<ProtocolParams>,
    ) -> Result<(), ContractError> {
        admin.require_auth();

        if config::exists(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        let params = params.unwrap_or_default();
        params.validate()?;
        token_ledger::require_mint_authority(&env, &token_mint, &native_token)?;

        let vault = env.current_contract_address();
        let cfg = Config::new(admin.clone(), token_mint.clone(), native_token, vault.clone(), params);
        config::store(&env, &cfg);

        events::publish_initialized(&env, &admin, &token_mint, &vault);
        Ok(())
    }

    // ── Purchases ─────────────────────────────────────────────────────────────

    /// Buy `amount` mVote micro-units with native currency.
    ///
    /// Returns the native cost charged, in stroops.
    pub fn purchase_tokens(env: Env, buyer: Address, amount: i128) -> Result<i128, ContractError> {
        buyer.require_auth();
        let cfg = config::load(&env)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let today = validation::epoch_day(env.ledger().timestamp(), cfg.day_offset_secs);
        let mut stats = user_stats::load_or_new(&env, &buyer);
        stats.roll_window(today);
        stats.purchased_after(amount, cfg.daily_purchase_limit)?;

        let cost = cfg.native_cost(amount)?;
        token_ledger::require_native_balance(&env, &cfg, &buyer, cost)?;
        stats.record_purchase(amount)?;

        token_ledger::collect_native(&env, &cfg, &buyer, cost);
        token_ledger::mint_tokens(&env, &cfg, &buyer, amount);
        user_stats::store(&env, &stats);

        events::publish_purchase(&env, &buyer, amount, cost, stats.tokens_purchased_today);
        Ok(cost)
    }

    // ── Polls ─────────────────────────────────────────────────────────────────

    /// Open a new poll, burning `poll_creation_cost` from the creator.
    ///
    /// Returns the new poll's id.
    pub fn create_poll(
        env: Env,
        creator: Address,
        question: String,
        options: Vec<String>,
        vote_mode: VoteMode,
        voting_style: VotingStyle,
        duration_minutes: u32,
    ) -> Result<u64, ContractError> {
        creator.require_auth();
        let mut cfg = config::load(&env)?;

        validation::check_question(&question)?;
        validation::check_options(&options)?;
        validation::check_duration(&cfg, duration_minutes)?;
        token_ledger::require_token_balance(&env, &cfg, &creator, cfg.poll_creation_cost)?;

        let now = env.ledger().timestamp();
        let end_time = validation::end_time(now, duration_minutes)?;
        let mut stats = user_stats::load_or_new(&env, &creator);
        stats.record_poll()?;

        token_ledger::burn_tokens(&env, &cfg, &creator, cfg.poll_creation_cost);
        let id = config::next_poll_id(&env, &mut cfg)?;
        let new_poll = Poll::new(
            &env,
            id,
            creator,
            question,
            options,
            vote_mode,
            voting_style,
            now,
            end_time,
        );
        poll::store(&env, &new_poll);
        user_stats::store(&env, &stats);

        events::publish_poll_created(&env, &new_poll);
        Ok(id)
    }

    /// Cast a ballot on `poll_id` for `option_index`.
    ///
    /// `token_amount` is the stake under `HoldingVote` and is ignored under
    /// `FairVote`. Returns the weight added to the chosen option.
    pub fn vote(
        env: Env,
        voter: Address,
        poll_id: u64,
        option_index: u32,
        token_amount: i128,
    ) -> Result<i128, ContractError> {
        voter.require_auth();
        let cfg = config::load(&env)?;
        let now = env.ledger().timestamp();

        let mut target = poll::load(&env, poll_id)?;
        validation::require_open(&target, now)?;
        validation::require_option(&target, option_index)?;
        if voting::has_voted(&env, poll_id, &voter) {
            return Err(ContractError::AlreadyVoted);
        }

        let ballot = voting::vote_weight(target.vote_mode, token_amount, cfg.vote_cost)?;
        token_ledger::require_token_balance(&env, &cfg, &voter, ballot.charge)?;

        target.tally(option_index, ballot.weight, ballot.charge)?;
        let mut stats = user_stats::load_or_new(&env, &voter);
        stats.record_vote()?;

        token_ledger::burn_tokens(&env, &cfg, &voter, ballot.charge);
        voting::insert_if_absent(
            &env,
            &VoteRecord {
                voter: voter.clone(),
                poll_id,
                option_index,
                tokens_spent: ballot.charge,
                voted_at: now,
            },
        )?;
        poll::store(&env, &target);
        user_stats::store(&env, &stats);

        events::publish_vote_cast(&env, poll_id, &voter, option_index, ballot.weight, ballot.charge);
        Ok(ballot.weight)
    }

    /// Close a poll early. Only its creator may do this, and only once.
    pub fn close_poll(env: Env, creator: Address, poll_id: u64) -> Result<(), ContractError> {
        creator.require_auth();

        let mut target = poll::load(&env, poll_id)?;
        validation::require_creator(&target, &creator)?;
        if !target.is_active {
            return Err(ContractError::PollNotActive);
        }

        target.is_active = false;
        poll::store(&env, &target);

        events::publish_poll_closed(&env, &target, &creator);
        Ok(())
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        config::load(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::exists(&env)
    }

    pub fn total_polls(env: Env) -> Result<u64, ContractError> {
        Ok(config::load(&env)?.total_polls_created)
    }

    pub fn get_poll(env: Env, poll_id: u64) -> Result<Poll, ContractError> {
        poll::load(&env, poll_id)
    }

    pub fn poll_status(env: Env, poll_id: u64) -> Result<PollStatus, ContractError> {
        Ok(poll::load(&env, poll_id)?.status(env.ledger().timestamp()))
    }

    pub fn get_user_stats(env: Env, wallet: Address) -> Option<UserStats> {
        user_stats::load(&env, &wallet)
    }

    pub fn get_vote_record(env: Env, poll_id: u64, voter: Address) -> Option<VoteRecord> {
        voting::load(&env, poll_id, &voter)
    }

    pub fn has_voted(env: Env, poll_id: u64, voter: Address) -> bool {
        voting::has_voted(&env, poll_id, &voter)
    }

    pub fn token_balance(env: Env, wallet: Address) -> Result<i128, ContractError> {
        let cfg = config::load(&env)?;
        Ok(token_ledger::token_balance(&env, &cfg, &wallet))
    }

    /// Native cost, in stroops, of buying `amount` mVote micro-units.
    pub fn quote_purchase(env: Env, amount: i128) -> Result<i128, ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        config::load(&env)?.native_cost(amount)
    }

    /// Derived 32-byte address of the record stored under `key`.
    pub fn account_address(env: Env, key: DataKey) -> BytesN<32> {
        keys::derive_address(&env, &key)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
