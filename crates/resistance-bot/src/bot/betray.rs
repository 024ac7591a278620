use super::DecisionContext;
use crate::error::AgentError;
use resistance_core::model::player::PlayerSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetrayalDecision {
    pub betray: bool,
    pub spies_on_mission: usize,
    pub required: usize,
    /// One more failed mission wins the game for the spies.
    pub decisive: bool,
}

impl BetrayalDecision {
    const fn pass() -> Self {
        Self {
            betray: false,
            spies_on_mission: 0,
            required: 0,
            decisive: false,
        }
    }
}

/// Deterministic sabotage threshold: betray only when enough spies are present to
/// actually fail the current mission.
pub struct BetrayalPlanner;

impl BetrayalPlanner {
    pub fn decide(
        ctx: &DecisionContext<'_>,
        mission: PlayerSet,
    ) -> Result<BetrayalDecision, AgentError> {
        let session = ctx.session();
        if !session.is_spy() || !mission.contains(session.me()) {
            return Ok(BetrayalDecision::pass());
        }

        let tracker = session.tracker();
        let spies_on_mission = mission.intersection(session.known_spies()).len();
        let required = session.fails_required(tracker.mission_index())?;

        Ok(BetrayalDecision {
            betray: spies_on_mission >= required,
            spies_on_mission,
            required,
            decisive: tracker.spies_one_from_victory(),
        })
    }
}
