mod betray;
mod propose;
mod session;
mod tracker;
mod vote;

pub use betray::{BetrayalDecision, BetrayalPlanner};
pub use propose::ProposalPlanner;
pub use session::GameSession;
pub use tracker::{FORCED_APPROVAL_AFTER, GameStateTracker};
pub use vote::{VoteDecision, VotePlanner, VoteReason};

use resistance_core::belief::SuspicionReport;

/// Runtime switches read from the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentOptions {
    seed: Option<u64>,
    decision_logs: bool,
}

impl AgentOptions {
    pub const fn new(seed: Option<u64>, decision_logs: bool) -> Self {
        Self {
            seed,
            decision_logs,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    /// Seed for the proposal shuffle; `None` draws from OS entropy.
    pub const fn seed(self) -> Option<u64> {
        self.seed
    }

    pub const fn decision_logs_enabled(self) -> bool {
        self.decision_logs
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let seed = read("RESIST_AGENT_SEED").and_then(|raw| raw.trim().parse::<u64>().ok());

        let decision_logs = read("RESIST_DECISION_LOGS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);

        Self {
            seed,
            decision_logs,
        }
    }
}

/// Read-only view handed to the planners: the session plus a freshly ranked suspicion
/// report for its current belief.
#[derive(Debug, Clone)]
pub struct DecisionContext<'a> {
    session: &'a GameSession,
    suspicion: SuspicionReport,
}

impl<'a> DecisionContext<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            suspicion: session.suspicion(),
            session,
        }
    }

    pub fn session(&self) -> &'a GameSession {
        self.session
    }

    pub fn suspicion(&self) -> &SuspicionReport {
        &self.suspicion
    }
}
