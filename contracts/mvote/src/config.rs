//! Protocol configuration singleton.

use soroban_sdk::{contracttype, Address, Env};

use crate::keys::DataKey;
use crate::ContractError;

// TTL: ~300 days at 5s/ledger
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// mVote micro-units per whole token.
pub const TOKEN_UNIT: i128 = 1_000_000;
/// Stroops per whole unit of native currency.
pub const NATIVE_UNIT: i128 = 10_000_000;
/// Cents per USD; `native_usd_rate` is quoted in cents.
const CENTS_PER_USD: i128 = 100;

pub const DEFAULT_NATIVE_USD_RATE: i128 = 12; // $0.12 per XLM
pub const DEFAULT_TOKENS_PER_USD: i128 = TOKEN_UNIT;
pub const DEFAULT_DAILY_PURCHASE_LIMIT: i128 = 100 * TOKEN_UNIT;
pub const DEFAULT_POLL_CREATION_COST: i128 = 10 * TOKEN_UNIT;
pub const DEFAULT_VOTE_COST: i128 = TOKEN_UNIT;
pub const DEFAULT_MIN_DURATION_MINUTES: u32 = 10;
pub const DEFAULT_MAX_DURATION_MINUTES: u32 = 1_440;
/// Purchase limits reset at 00:00 UTC+8 unless configured otherwise.
pub const DEFAULT_DAY_OFFSET_SECS: i64 = 8 * 60 * 60;

pub const SECS_PER_DAY: i64 = 86_400;

/// Tunable protocol parameters supplied at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolParams {
    /// Price of one whole native unit, in USD cents.
    pub native_usd_rate: i128,
    /// mVote micro-units bought by one USD.
    pub tokens_per_usd: i128,
    pub daily_purchase_limit: i128,
    pub poll_creation_cost: i128,
    pub vote_cost: i128,
    pub min_duration_minutes: u32,
    pub max_duration_minutes: u32,
    /// Shift applied to ledger time before computing the epoch day.
    pub day_offset_secs: i64,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            native_usd_rate: DEFAULT_NATIVE_USD_RATE,
            tokens_per_usd: DEFAULT_TOKENS_PER_USD,
            daily_purchase_limit: DEFAULT_DAILY_PURCHASE_LIMIT,
            poll_creation_cost: DEFAULT_POLL_CREATION_COST,
            vote_cost: DEFAULT_VOTE_COST,
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            day_offset_secs: DEFAULT_DAY_OFFSET_SECS,
        }
    }
}

impl ProtocolParams {
    pub fn validate(&self) -> Result<(), ContractError> {
        let positive = self.native_usd_rate > 0
            && self.tokens_per_usd > 0
            && self.daily_purchase_limit > 0
            && self.poll_creation_cost > 0
            && self.vote_cost > 0;
        let durations =
            self.min_duration_minutes > 0 && self.min_duration_minutes <= self.max_duration_minutes;
        let offset = self.day_offset_secs.abs() < SECS_PER_DAY;

        if positive && durations && offset {
            Ok(())
        } else {
            Err(ContractError::InvalidConfig)
        }
    }
}

/// The deployment-wide configuration record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// mVote token contract; this contract holds its mint authority.
    pub token_mint: Address,
    /// Token contract of the currency buyers pay with.
    pub native_token: Address,
    /// Collection vault for purchase proceeds.
    pub vault: Address,
    pub native_usd_rate: i128,
    pub tokens_per_usd: i128,
    pub daily_purchase_limit: i128,
    pub poll_creation_cost: i128,
    pub vote_cost: i128,
    pub min_duration_minutes: u32,
    pub max_duration_minutes: u32,
    pub day_offset_secs: i64,
    /// Number of polls ever created; also the id of the next poll.
    pub total_polls_created: u64,
}

impl Config {
    pub fn new(
        admin: Address,
        token_mint: Address,
        native_token: Address,
        vault: Address,
        params: ProtocolParams,
    ) -> Self {
        Self {
            admin,
            token_mint,
            native_token,
            vault,
            native_usd_rate: params.native_usd_rate,
            tokens_per_usd: params.tokens_per_usd,
            daily_purchase_limit: params.daily_purchase_limit,
            poll_creation_cost: params.poll_creation_cost,
            vote_cost: params.vote_cost,
            min_duration_minutes: params.min_duration_minutes,
            max_duration_minutes: params.max_duration_minutes,
            day_offset_secs: params.day_offset_secs,
            total_polls_created: 0,
        }
    }

    /// Native-currency cost, in stroops, of `amount` mVote micro-units.
    ///
    /// ```text
    /// usd     = amount / tokens_per_usd
    /// native  = usd * 100 / native_usd_rate
    /// stroops = amount * NATIVE_UNIT * 100 / (native_usd_rate * tokens_per_usd)
    /// ```
    /// Rounds down.
    pub fn native_cost(&self, amount: i128) -> Result<i128, ContractError> {
        let numerator = amount
            .checked_mul(NATIVE_UNIT)
            .and_then(|v| v.checked_mul(CENTS_PER_USD))
            .ok_or(ContractError::Overflow)?;
        let denominator = self
            .native_usd_rate
            .checked_mul(self.tokens_per_usd)
            .ok_or(ContractError::Overflow)?;
        numerator
            .checked_div(denominator)
            .ok_or(ContractError::Overflow)
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn exists(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub(crate) fn load(env: &Env) -> Result<Config, ContractError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)?;
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(config)
}

pub(crate) fn store(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Hand out the next poll id and advance the counter.
///
/// The read and the write land on the same instance entry within one
/// invocation, so concurrent callers are serialised by the host and can
/// never observe the same id.
pub(crate) fn next_poll_id(env: &Env, config: &mut Config) -> Result<u64, ContractError> {
    let id = config.total_polls_created;
    config.total_polls_created = id.checked_add(1).ok_or(ContractError::Overflow)?;
    store(env, config);
    Ok(id)
}
