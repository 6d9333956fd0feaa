//! Precondition checks shared by the entry points.
//!
//! Every check here is pure: it inspects values already loaded by the caller
//! and returns the error code the caller should surface. None of them write.

use soroban_sdk::{Address, String, Vec};

use crate::config::{Config, SECS_PER_DAY};
use crate::poll::{Poll, PollStatus};
use crate::ContractError;

pub const MAX_QUESTION_LEN: u32 = 280;
pub const MAX_OPTION_LEN: u32 = 100;
pub const MIN_OPTIONS: u32 = 2;
pub const MAX_OPTIONS: u32 = 4;

const SECS_PER_MINUTE: u64 = 60;

/// Epoch-day index of `timestamp` after shifting by `offset_secs`.
///
/// Uses floor division so that a negative offset near the epoch still
/// yields a well-ordered index.
pub fn epoch_day(timestamp: u64, offset_secs: i64) -> i64 {
    let shifted = (timestamp as i128) + (offset_secs as i128);
    shifted.div_euclid(SECS_PER_DAY as i128) as i64
}

/// Question length is measured in bytes.
pub fn check_question(question: &String) -> Result<(), ContractError> {
    let len = question.len();
    if len == 0 || len > MAX_QUESTION_LEN {
        return Err(ContractError::InvalidQuestionLength);
    }
    Ok(())
}

pub fn check_options(options: &Vec<String>) -> Result<(), ContractError> {
    let count = options.len();
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
        return Err(ContractError::InvalidOptionCount);
    }
    for option in options.iter() {
        let len = option.len();
        if len == 0 || len > MAX_OPTION_LEN {
            return Err(ContractError::InvalidOptionLength);
        }
    }
    Ok(())
}

pub fn check_duration(config: &Config, duration_minutes: u32) -> Result<(), ContractError> {
    if duration_minutes < config.min_duration_minutes
        || duration_minutes > config.max_duration_minutes
    {
        return Err(ContractError::InvalidDuration);
    }
    Ok(())
}

/// End timestamp of a poll opened at `now` for `duration_minutes`.
pub fn end_time(now: u64, duration_minutes: u32) -> Result<u64, ContractError> {
    (duration_minutes as u64)
        .checked_mul(SECS_PER_MINUTE)
        .and_then(|secs| now.checked_add(secs))
        .ok_or(ContractError::Overflow)
}

/// A poll accepts ballots only while active and strictly before `end_time`.
pub fn require_open(poll: &Poll, now: u64) -> Result<(), ContractError> {
    match poll.status(now) {
        PollStatus::Open => Ok(()),
        PollStatus::Expired | PollStatus::Closed => Err(ContractError::PollNotActive),
    }
}

pub fn require_option(poll: &Poll, option_index: u32) -> Result<(), ContractError> {
    if option_index >= poll.options.len() {
        return Err(ContractError::InvalidOption);
    }
    Ok(())
}

pub fn require_creator(poll: &Poll, caller: &Address) -> Result<(), ContractError> {
    if poll.creator != *caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
