//! Delegation to the external token contracts.
//!
//! The mVote token is a Stellar Asset Contract whose admin is this contract,
//! which is what lets `mint` succeed. Burns and transfers are authorised by
//! the wallet that signed the outer invocation.

use soroban_sdk::{
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

use crate::config::Config;
use crate::ContractError;

/// Fail with `InvalidConfig` unless `token_mint` is a distinct asset that
/// this contract administers.
pub fn require_mint_authority(
    env: &Env,
    token_mint: &Address,
    native_token: &Address,
) -> Result<(), ContractError> {
    if token_mint == native_token {
        return Err(ContractError::InvalidConfig);
    }
    match StellarAssetClient::new(env, token_mint).try_admin() {
        Ok(Ok(admin)) if admin == env.current_contract_address() => Ok(()),
        _ => Err(ContractError::InvalidConfig),
    }
}

pub fn token_balance(env: &Env, config: &Config, owner: &Address) -> i128 {
    TokenClient::new(env, &config.token_mint).balance(owner)
}

pub fn native_balance(env: &Env, config: &Config, owner: &Address) -> i128 {
    TokenClient::new(env, &config.native_token).balance(owner)
}

pub fn mint_tokens(env: &Env, config: &Config, to: &Address, amount: i128) {
    StellarAssetClient::new(env, &config.token_mint).mint(to, &amount);
}

pub fn burn_tokens(env: &Env, config: &Config, from: &Address, amount: i128) {
    TokenClient::new(env, &config.token_mint).burn(from, &amount);
}

/// Move `amount` of native currency from `from` into the vault.
pub fn collect_native(env: &Env, config: &Config, from: &Address, amount: i128) {
    if amount > 0 {
        TokenClient::new(env, &config.native_token).transfer(from, &config.vault, &amount);
    }
}

/// Fail with `InsufficientTokens` unless `owner` holds at least `amount` mVote.
pub fn require_token_balance(
    env: &Env,
    config: &Config,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if token_balance(env, config, owner) < amount {
        return Err(ContractError::InsufficientTokens);
    }
    Ok(())
}

/// Fail with `InsufficientFunds` unless `owner` can pay `amount` in native currency.
pub fn require_native_balance(
    env: &Env,
    config: &Config,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if native_balance(env, config, owner) < amount {
        return Err(ContractError::InsufficientFunds);
    }
    Ok(())
}
