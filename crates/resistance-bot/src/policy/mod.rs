mod bayes;

pub use bayes::BayesAgent;

use crate::error::AgentError;
use resistance_core::model::player::PlayerId;

/// Call-and-response contract between a game orchestrator and one seated agent.
///
/// The orchestrator drives every call strictly in turn order
/// (propose → vote → vote_outcome → betray → mission_outcome).
pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Deals the agent into a fresh game. `known_spies` is empty for resistance
    /// players and names every spy (self included) for a spy.
    fn new_game(
        &mut self,
        player_count: usize,
        me: PlayerId,
        known_spies: &[PlayerId],
    ) -> Result<(), AgentError>;

    /// Returns exactly `team_size` distinct players, self included.
    fn propose_mission(
        &mut self,
        team_size: usize,
        betrayals_required: usize,
    ) -> Result<Vec<PlayerId>, AgentError>;

    /// Never fails; anything the agent cannot evaluate is rejected.
    fn vote(&mut self, mission: &[PlayerId], proposer: PlayerId) -> bool;

    fn vote_outcome(&mut self, mission: &[PlayerId], proposer: PlayerId, votes_in_favor: &[PlayerId]);

    /// Only called while the agent is on `mission`.
    fn betray(&mut self, mission: &[PlayerId], proposer: PlayerId) -> Result<bool, AgentError>;

    /// Feeds the sabotage count into the belief. Contradictory evidence is reported
    /// as an error and leaves the previous belief untouched.
    fn mission_outcome(
        &mut self,
        mission: &[PlayerId],
        proposer: PlayerId,
        betrayals: usize,
        success: bool,
    ) -> Result<(), AgentError>;

    fn round_outcome(&mut self, _rounds_complete: usize, _missions_failed: usize) {}

    fn game_outcome(&mut self, _spies_won: bool, _spies: &[PlayerId]) {}
}
