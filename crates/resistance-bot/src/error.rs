use resistance_core::belief::BeliefError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error(transparent)]
    Belief(#[from] BeliefError),
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
    #[error("no fails-required entry for {player_count} players at mission {mission_index}")]
    MissingConfiguration {
        player_count: usize,
        mission_index: usize,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("agent has not been dealt into a game")]
    NotStarted,
}

impl AgentError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        AgentError::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn input(message: impl Into<String>) -> Self {
        AgentError::InvalidInput {
            message: message.into(),
        }
    }

    /// True when a mission outcome contradicted every hypothesis.
    pub fn is_degenerate_evidence(&self) -> bool {
        matches!(
            self,
            AgentError::Belief(BeliefError::DegenerateEvidence { .. })
        )
    }
}
