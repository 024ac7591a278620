use super::tracker::GameStateTracker;
use crate::error::AgentError;
use resistance_core::belief::{
    BeliefUpdater, SuspicionRanker, SuspicionReport, UpdateOutcome, WorldModel,
};
use resistance_core::model::player::{PlayerId, PlayerSet};
use resistance_core::model::rules::GameRules;

/// Everything the agent knows about the game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    player_count: usize,
    me: PlayerId,
    known_spies: PlayerSet,
    spy_count: usize,
    fails_required: Option<Vec<usize>>,
    belief: WorldModel,
    tracker: GameStateTracker,
}

impl GameSession {
    /// Validates the seating and builds a uniform belief.
    ///
    /// `known_spies` is empty for a resistance agent; for a spy it must name every spy,
    /// including the agent itself. A spy also needs a fails-required row for the table.
    pub fn start(
        rules: &GameRules,
        player_count: usize,
        me: PlayerId,
        known_spies: &[PlayerId],
    ) -> Result<Self, AgentError> {
        let spy_count = rules.spy_count(player_count).ok_or_else(|| {
            AgentError::configuration(format!("no spy count configured for {player_count} players"))
        })?;
        if me.index() >= player_count {
            return Err(AgentError::configuration(format!(
                "player {me} is not seated at a table of {player_count}"
            )));
        }

        let known_spies = PlayerSet::from_slice(known_spies, player_count)
            .map_err(|err| AgentError::configuration(format!("spy list: {err}")))?;
        if !known_spies.is_empty() {
            if known_spies.len() != spy_count {
                return Err(AgentError::configuration(format!(
                    "spy list names {} players but {player_count}-player games have {spy_count}",
                    known_spies.len()
                )));
            }
            if !known_spies.contains(me) {
                return Err(AgentError::configuration(format!(
                    "spy list {known_spies} does not include player {me}"
                )));
            }
        }

        let fails_required = rules.fails_row(player_count).map(<[usize]>::to_vec);
        if !known_spies.is_empty() && fails_required.is_none() {
            return Err(AgentError::MissingConfiguration {
                player_count,
                mission_index: 0,
            });
        }

        let belief = WorldModel::initialize(player_count, spy_count)?;

        Ok(Self {
            player_count,
            me,
            known_spies,
            spy_count,
            fails_required,
            belief,
            tracker: GameStateTracker::new(),
        })
    }

    /// Swaps in a prepared belief state of matching dimensions.
    pub fn with_belief(mut self, belief: WorldModel) -> Result<Self, AgentError> {
        if belief.player_count() != self.player_count || belief.spy_count() != self.spy_count {
            return Err(AgentError::configuration(format!(
                "belief covers {} players / {} spies, session has {} / {}",
                belief.player_count(),
                belief.spy_count(),
                self.player_count,
                self.spy_count
            )));
        }
        self.belief = belief;
        Ok(self)
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn me(&self) -> PlayerId {
        self.me
    }

    pub fn known_spies(&self) -> PlayerSet {
        self.known_spies
    }

    pub fn is_spy(&self) -> bool {
        self.known_spies.contains(self.me)
    }

    pub fn spy_count(&self) -> usize {
        self.spy_count
    }

    pub fn resistance_count(&self) -> usize {
        self.player_count - self.spy_count
    }

    pub fn belief(&self) -> &WorldModel {
        &self.belief
    }

    pub fn tracker(&self) -> &GameStateTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut GameStateTracker {
        &mut self.tracker
    }

    pub fn suspicion(&self) -> SuspicionReport {
        SuspicionRanker::rank(&self.belief)
    }

    /// Betrayals needed to fail mission `mission_index` at this table.
    pub fn fails_required(&self, mission_index: usize) -> Result<usize, AgentError> {
        self.fails_required
            .as_ref()
            .and_then(|row| row.get(mission_index))
            .copied()
            .ok_or(AgentError::MissingConfiguration {
                player_count: self.player_count,
                mission_index,
            })
    }

    pub fn mission(&self, mission: &[PlayerId]) -> Result<PlayerSet, AgentError> {
        PlayerSet::from_slice(mission, self.player_count)
            .map_err(|err| AgentError::input(format!("mission: {err}")))
    }

    pub fn seated(&self, player: PlayerId) -> Result<PlayerId, AgentError> {
        if player.index() < self.player_count {
            Ok(player)
        } else {
            Err(AgentError::input(format!(
                "player {player} is not seated at a table of {}",
                self.player_count
            )))
        }
    }

    /// Feeds a completed mission into the belief. The prior survives any error.
    pub fn observe_mission(
        &mut self,
        mission: PlayerSet,
        betrayals: usize,
    ) -> Result<UpdateOutcome, AgentError> {
        Ok(BeliefUpdater::apply(&mut self.belief, mission, betrayals)?)
    }
}
