#![no_main]

//! Fuzz harness for the `mvote` contract.
//!
//! # What is fuzzed
//!
//! | Target            | What we are looking for                                |
//! |-------------------|--------------------------------------------------------|
//! | `purchase_tokens` | Same-day purchases never exceed the daily limit        |
//! | `create_poll`     | Ids stay sequential, counters match the options        |
//! | `vote`            | Tallies match the mode's running total, one ballot per |
//! |                   | wallet per poll                                        |
//! | `close_poll`      | Closed polls never reopen                              |
//!
//! Any host-level failure (as opposed to a contract error code) is a bug.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mvote::{
    config::{NATIVE_UNIT, TOKEN_UNIT},
    MvoteContract, MvoteContractClient, VoteMode, VotingStyle,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env, String, Vec,
};

const LABELS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

/// Actions covering every state-changing entry point plus the clock.
///
/// Amounts are scaled so that a useful share of inputs lands on both sides
/// of each limit.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Purchase { amount: u32 },
    CreatePoll { holding: bool, options: u8, duration: u16 },
    Vote { poll: u8, option: u8, stake: u32 },
    Close { poll: u8, as_creator: bool },
    AdvanceTime { delta: u32 },
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MvoteContract, ());
    let client = MvoteContractClient::new(&env, &contract_id);
    let token = env.register_stellar_asset_contract_v2(contract_id.clone()).address();
    let native = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let admin = Address::generate(&env);

    if client.try_initialize(&admin, &token, &native, &None).is_err() {
        return;
    }
    let limit = client.get_config().daily_purchase_limit;

    let mut users = std::vec::Vec::new();
    for _ in 0..4 {
        let u = Address::generate(&env);
        StellarAssetClient::new(&env, &native).mint(&u, &(1_000_000 * NATIVE_UNIT));
        users.push(u);
    }

    let mut closed = std::collections::HashSet::new();

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        let total = client.total_polls();
        let pick = |p: u8| if total == 0 { p as u64 } else { p as u64 % total };

        let host_error = match action {
            FuzzAction::Purchase { amount } => {
                // Below 150 tokens, straddling the daily limit.
                let amt = amount as i128 % (150 * TOKEN_UNIT);
                matches!(client.try_purchase_tokens(caller, &amt), Err(Err(_)))
            }
            FuzzAction::CreatePoll { holding, options, duration } => {
                let mut opts = Vec::new(&env);
                for label in LABELS.iter().take(options as usize % 7) {
                    opts.push_back(String::from_str(&env, label));
                }
                let mode = if holding { VoteMode::HoldingVote } else { VoteMode::FairVote };
                matches!(
                    client.try_create_poll(
                        caller,
                        &String::from_str(&env, "fuzz?"),
                        &opts,
                        &mode,
                        &VotingStyle::MultipleChoice,
                        &(duration as u32 % 1_500),
                    ),
                    Err(Err(_))
                )
            }
            FuzzAction::Vote { poll, option, stake } => {
                let amt = stake as i128 % (20 * TOKEN_UNIT);
                matches!(
                    client.try_vote(caller, &pick(poll), &(option as u32 % 5), &amt),
                    Err(Err(_))
                )
            }
            FuzzAction::Close { poll, as_creator } => {
                let id = pick(poll);
                let closer = match client.try_get_poll(&id) {
                    Ok(Ok(p)) if as_creator => p.creator,
                    _ => caller.clone(),
                };
                matches!(client.try_close_poll(&closer, &id), Err(Err(_)))
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64 % 200_000);
                env.ledger().set_timestamp(ts);
                false
            }
        };
        assert!(!host_error, "INVARIANT VIOLATION: host error on action #{}", i);

        // ── Post-action invariant checks ──
        let total = client.total_polls();
        for id in 0..total {
            let p = client.get_poll(&id);
            assert_eq!(p.id, id, "INVARIANT VIOLATION: poll id gap");
            assert_eq!(
                p.vote_counts.len(),
                p.options.len(),
                "INVARIANT VIOLATION: counters do not match options"
            );
            let expected = match p.vote_mode {
                VoteMode::FairVote => p.total_votes as i128,
                VoteMode::HoldingVote => p.total_tokens_spent,
            };
            assert_eq!(p.tally_sum(), expected, "INVARIANT VIOLATION: tally mismatch");

            let ballots = users
                .iter()
                .filter(|u| client.has_voted(&id, u))
                .count() as u64;
            assert_eq!(ballots, p.total_votes, "INVARIANT VIOLATION: ballots != records");

            if closed.contains(&id) {
                assert!(!p.is_active, "INVARIANT VIOLATION: poll reopened");
            } else if !p.is_active {
                closed.insert(id);
            }
        }

        for u in &users {
            if let Some(stats) = client.get_user_stats(u) {
                assert!(
                    stats.tokens_purchased_today <= limit,
                    "INVARIANT VIOLATION: daily limit exceeded"
                );
            }
            assert!(client.token_balance(u) >= 0, "INVARIANT VIOLATION: negative balance");
        }
    }
});
