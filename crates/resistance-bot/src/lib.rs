pub mod bot;
pub mod error;
pub mod policy;

pub use bot::{
    AgentOptions, BetrayalDecision, BetrayalPlanner, DecisionContext, GameSession,
    GameStateTracker, ProposalPlanner, VoteDecision, VotePlanner, VoteReason,
};
pub use error::AgentError;
pub use policy::{Agent, BayesAgent};
