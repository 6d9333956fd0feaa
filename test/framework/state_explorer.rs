//! # State Space Explorer
//!
//! Executes mVote action sequences and verifies state and transition
//! invariants after every step.
//!
//! ## Design
//!
//! Each explored state is an `MvoteSnapshot`; edges are `MvoteAction`s.
//! Actions pick wallets and polls by modular index so any generated sequence
//! is executable; the contract decides whether each call succeeds.
//!
//! ## Complexity
//!
//! - Time: O(S × (I + P × W)) for S steps, I invariants, P polls and W wallets,
//!   dominated by snapshotting.
//! - Space: O(P × W) per recorded snapshot.

extern crate std;

use soroban_sdk::Address;
use std::string::String;
use std::vec::Vec;

use super::generators::MvoteAction;
use super::invariants::{InvariantSet, TransitionInvariantSet};
use super::{ActionOutcome, MvoteSnapshot, PollingTestHarness, TestRunSummary};
use mvote::{ContractError, VotingStyle};

// ── Explorer Configuration ───────────────────────────────────────────────────

/// Configuration for state-space exploration.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Maximum number of actions to execute in a single exploration run.
    pub max_steps: usize,
    /// Whether to halt on the first invariant violation (fail-fast).
    pub fail_fast: bool,
    /// Whether to record snapshots for later analysis.
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

// ── Exploration Result ───────────────────────────────────────────────────────

/// Full result of an exploration run.
#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<MvoteSnapshot>,
    pub action_log: Vec<(MvoteAction, ActionOutcome)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Number of actions the contract accepted.
    pub fn successes(&self) -> usize {
        self.action_log
            .iter()
            .filter(|(_, o)| matches!(o, ActionOutcome::Ok))
            .count()
    }

    /// Number of actions that failed with `code`.
    pub fn failures_with(&self, code: u32) -> usize {
        self.action_log
            .iter()
            .filter(|(_, o)| matches!(o, ActionOutcome::ExpectedError(c) if *c == code))
            .count()
    }
}

// ── State Space Explorer ─────────────────────────────────────────────────────

/// Executes action sequences against the mVote contract, checking invariants
/// after every transition.
pub struct StateExplorer<'a> {
    harness: &'a PollingTestHarness<'a>,
    invariants: InvariantSet,
    transitions: TransitionInvariantSet,
    config: ExplorerConfig,
    users: Vec<Address>,
}

impl<'a> StateExplorer<'a> {
    /// Create an explorer for the given harness and wallet pool.
    pub fn new(
        harness: &'a PollingTestHarness<'a>,
        invariants: InvariantSet,
        config: ExplorerConfig,
        users: Vec<Address>,
    ) -> Self {
        Self {
            harness,
            invariants,
            transitions: TransitionInvariantSet::mvote_defaults(),
            config,
            users,
        }
    }

    /// Create an explorer with default configuration and built-in invariants.
    pub fn with_defaults(harness: &'a PollingTestHarness<'a>, users: Vec<Address>) -> Self {
        Self::new(
            harness,
            InvariantSet::mvote_defaults(),
            ExplorerConfig::default(),
            users,
        )
    }

    /// Execute a sequence of actions, checking invariants after each.
    pub fn explore(&mut self, actions: &[MvoteAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();

        let mut previous = self.harness.snapshot(&self.users);
        if self.config.record_snapshots {
            snapshots.push(previous.clone());
        }

        let steps = actions.len().min(self.config.max_steps);

        for action in actions.iter().take(steps) {
            let outcome = self.execute_action(action);
            summary.entry_points_hit.insert(action_entry_point(action));
            summary.actions_executed += 1;
            summary.transitions_observed += 1;

            action_log.push((action.clone(), outcome));

            let snapshot = self.harness.snapshot(&self.users);
            let mut violations = self.invariants.check_all(&snapshot);
            violations.extend(self.transitions.check_all(&previous, &snapshot));
            summary.invariant_checks += 1;

            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed,
                    action,
                    name,
                    msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(snapshot.clone());
            }
            if self.config.fail_fast && !summary.passed() {
                break;
            }
            previous = snapshot;
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
        }
    }

    fn user(&self, index: usize) -> &Address {
        &self.users[index % self.users.len()]
    }

    /// Map a generated poll index onto an existing poll, or past the end
    /// when none exist yet.
    fn poll_id(&self, index: u64) -> u64 {
        match self.harness.total_polls() {
            0 => index,
            total => index % total,
        }
    }

    /// Execute a single action against the harness, returning the outcome.
    fn execute_action(&self, action: &MvoteAction) -> ActionOutcome {
        let client = &self.harness.client;
        match action {
            MvoteAction::Purchase { user_index, amount } => {
                outcome(client.try_purchase_tokens(self.user(*user_index), amount))
            }
            MvoteAction::CreatePoll {
                user_index,
                mode,
                option_count,
                duration_minutes,
            } => outcome(client.try_create_poll(
                self.user(*user_index),
                &self.harness.question(),
                &self.harness.options(*option_count),
                mode,
                &VotingStyle::MultipleChoice,
                duration_minutes,
            )),
            MvoteAction::Vote {
                user_index,
                poll_index,
                option_index,
                stake,
            } => outcome(client.try_vote(
                self.user(*user_index),
                &self.poll_id(*poll_index),
                option_index,
                stake,
            )),
            MvoteAction::ClosePoll {
                user_index,
                poll_index,
                by_creator,
            } => {
                let poll_id = self.poll_id(*poll_index);
                let caller = match (*by_creator, client.try_get_poll(&poll_id)) {
                    (true, Ok(Ok(poll))) => poll.creator,
                    _ => self.user(*user_index).clone(),
                };
                outcome(client.try_close_poll(&caller, &poll_id))
            }
            MvoteAction::AdvanceTime { delta } => {
                self.harness.env.advance_time(*delta);
                ActionOutcome::Ok
            }
        }
    }
}

/// Collapse a `try_*` client result into an `ActionOutcome`.
fn outcome<T, C, I>(result: Result<Result<T, C>, Result<ContractError, I>>) -> ActionOutcome
where
    C: core::fmt::Debug,
    I: core::fmt::Debug,
{
    match result {
        Ok(Ok(_)) => ActionOutcome::Ok,
        Ok(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
        Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
        Err(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
    }
}

/// Map an mVote action to its entry point name for coverage tracking.
fn action_entry_point(action: &MvoteAction) -> String {
    match action {
        MvoteAction::Purchase { .. } => "purchase_tokens".into(),
        MvoteAction::CreatePoll { .. } => "create_poll".into(),
        MvoteAction::Vote { .. } => "vote".into(),
        MvoteAction::ClosePoll { .. } => "close_poll".into(),
        MvoteAction::AdvanceTime { .. } => "advance_time".into(),
    }
}

/// The state-changing mVote entry points, for coverage calculation.
pub const MVOTE_ENTRY_POINTS: &[&str] = &["purchase_tokens", "create_poll", "vote", "close_poll"];
