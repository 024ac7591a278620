use super::Agent;
use crate::bot::{
    AgentOptions, BetrayalDecision, BetrayalPlanner, DecisionContext, GameSession,
    ProposalPlanner, VoteDecision, VotePlanner,
};
use crate::error::AgentError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use resistance_core::belief::telemetry::BeliefMetrics;
use resistance_core::belief::{BeliefSnapshot, UpdateOutcome};
use resistance_core::model::player::{PlayerId, PlayerSet};
use resistance_core::model::rules::GameRules;
use tracing::{Level, event};

/// Agent that keeps a Bayesian belief over every possible spy assignment and
/// plays the suspicion-threshold policies against it.
pub struct BayesAgent {
    name: String,
    rules: GameRules,
    options: AgentOptions,
    rng: StdRng,
    session: Option<GameSession>,
}

impl BayesAgent {
    pub fn new(name: impl Into<String>, rules: GameRules, options: AgentOptions) -> Self {
        let rng = match options.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            name: name.into(),
            rules,
            options,
            rng,
            session: None,
        }
    }

    /// Standard rules with options read from the environment.
    pub fn from_env(name: impl Into<String>) -> Self {
        Self::new(name, GameRules::standard(), AgentOptions::from_env())
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn options(&self) -> AgentOptions {
        self.options
    }

    /// The game in progress, if any.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<BeliefSnapshot> {
        self.session
            .as_ref()
            .map(|session| BeliefSnapshot::capture(session.belief()))
    }

    fn session_ref(&self) -> Result<&GameSession, AgentError> {
        self.session.as_ref().ok_or(AgentError::NotStarted)
    }

    fn session_mut(&mut self) -> Result<&mut GameSession, AgentError> {
        self.session.as_mut().ok_or(AgentError::NotStarted)
    }

    fn decide_vote(&self, mission: &[PlayerId], proposer: PlayerId) -> Result<VoteDecision, AgentError> {
        let session = self.session_ref()?;
        let mission = session.mission(mission)?;
        let proposer = session.seated(proposer)?;
        let ctx = DecisionContext::new(session);
        let decision = VotePlanner::decide(&ctx, mission, proposer);
        if self.options.decision_logs_enabled() {
            log_vote_decision(&ctx, mission, proposer, decision);
        }
        Ok(decision)
    }
}

impl Agent for BayesAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(
        &mut self,
        player_count: usize,
        me: PlayerId,
        known_spies: &[PlayerId],
    ) -> Result<(), AgentError> {
        self.session = None;
        let session = GameSession::start(&self.rules, player_count, me, known_spies)?;
        event!(
            target: "resistance_bot::belief",
            Level::DEBUG,
            agent = %self.name,
            player_count,
            me = %me,
            spy = session.is_spy(),
            worlds = session.belief().len(),
            "new game"
        );
        self.session = Some(session);
        Ok(())
    }

    fn propose_mission(
        &mut self,
        team_size: usize,
        betrayals_required: usize,
    ) -> Result<Vec<PlayerId>, AgentError> {
        let session = self.session.as_ref().ok_or(AgentError::NotStarted)?;
        let ctx = DecisionContext::new(session);
        let team = ProposalPlanner::choose(&ctx, team_size, betrayals_required, &mut self.rng)?;
        if self.options.decision_logs_enabled() {
            log_proposal(&ctx, &team, betrayals_required);
        }
        Ok(team)
    }

    fn vote(&mut self, mission: &[PlayerId], proposer: PlayerId) -> bool {
        match self.decide_vote(mission, proposer) {
            Ok(decision) => decision.approve,
            Err(err) => {
                tracing::warn!(
                    target: "resistance_bot::vote",
                    agent = %self.name,
                    proposer = %proposer,
                    error = %err,
                    "rejecting proposal that cannot be evaluated"
                );
                false
            }
        }
    }

    fn vote_outcome(&mut self, mission: &[PlayerId], proposer: PlayerId, votes_in_favor: &[PlayerId]) {
        let Some(session) = self.session.as_mut() else {
            tracing::warn!(
                target: "resistance_bot::vote",
                agent = %self.name,
                "vote outcome before new_game"
            );
            return;
        };
        let player_count = session.player_count();
        let approved = session
            .tracker_mut()
            .note_vote_outcome(votes_in_favor.len(), player_count);
        event!(
            target: "resistance_bot::vote",
            Level::DEBUG,
            agent = %self.name,
            proposer = %proposer,
            team_size = mission.len(),
            in_favor = votes_in_favor.len(),
            approved,
            failures = session.tracker().vote_failures(),
        );
    }

    fn betray(&mut self, mission: &[PlayerId], proposer: PlayerId) -> Result<bool, AgentError> {
        let session = self.session_ref()?;
        let mission = session.mission(mission)?;
        let ctx = DecisionContext::new(session);
        let decision = BetrayalPlanner::decide(&ctx, mission)?;
        if self.options.decision_logs_enabled() {
            log_betrayal(&ctx, mission, proposer, decision);
        }
        Ok(decision.betray)
    }

    fn mission_outcome(
        &mut self,
        mission: &[PlayerId],
        proposer: PlayerId,
        betrayals: usize,
        success: bool,
    ) -> Result<(), AgentError> {
        let session = self.session.as_mut().ok_or(AgentError::NotStarted)?;
        session.tracker_mut().note_mission_complete(success);

        let mission = session.mission(mission)?;
        match session.observe_mission(mission, betrayals) {
            Ok(UpdateOutcome::Skipped) => Ok(()),
            Ok(UpdateOutcome::Applied { evidence }) => {
                log_belief_update(&self.name, session, mission, proposer, betrayals, evidence);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    target: "resistance_bot::belief",
                    agent = %self.name,
                    mission = %mission,
                    betrayals,
                    error = %err,
                    "mission outcome rejected; keeping prior belief"
                );
                Err(err)
            }
        }
    }

    fn round_outcome(&mut self, rounds_complete: usize, missions_failed: usize) {
        if let Some(session) = self.session.as_mut() {
            session.tracker_mut().sync_round(rounds_complete, missions_failed);
        }
    }

    fn game_outcome(&mut self, spies_won: bool, spies: &[PlayerId]) {
        let Some(session) = self.session.take() else {
            return;
        };
        if !tracing::enabled!(Level::INFO) {
            return;
        }

        let revealed: PlayerSet = spies.iter().copied().collect();
        let believed = session
            .belief()
            .probability(revealed)
            .unwrap_or(0.0);
        event!(
            target: "resistance_bot::belief",
            Level::INFO,
            agent = %self.name,
            spies_won,
            spies = %revealed,
            believed,
            spy = session.is_spy(),
            "game over"
        );
    }
}

fn log_vote_decision(
    ctx: &DecisionContext<'_>,
    mission: PlayerSet,
    proposer: PlayerId,
    decision: VoteDecision,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let session = ctx.session();
    let suspicion = ctx.suspicion();
    event!(
        target: "resistance_bot::vote",
        Level::INFO,
        me = %session.me(),
        spy = session.is_spy(),
        mission = %mission,
        proposer = %proposer,
        proposer_score = suspicion.score(proposer).unwrap_or(0.0),
        average = suspicion.average(),
        failures = session.tracker().vote_failures(),
        approve = decision.approve,
        reason = decision.reason.as_str(),
    );
}

fn log_proposal(ctx: &DecisionContext<'_>, team: &[PlayerId], betrayals_required: usize) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let session = ctx.session();
    let team = team
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    event!(
        target: "resistance_bot::propose",
        Level::INFO,
        me = %session.me(),
        spy = session.is_spy(),
        mission_index = session.tracker().mission_index(),
        betrayals_required,
        team = %team,
    );
}

fn log_betrayal(
    ctx: &DecisionContext<'_>,
    mission: PlayerSet,
    proposer: PlayerId,
    decision: BetrayalDecision,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let session = ctx.session();
    event!(
        target: "resistance_bot::betray",
        Level::INFO,
        me = %session.me(),
        mission = %mission,
        proposer = %proposer,
        mission_index = session.tracker().mission_index(),
        spies_on_mission = decision.spies_on_mission,
        required = decision.required,
        decisive = decision.decisive,
        betray = decision.betray,
    );
}

fn log_belief_update(
    agent: &str,
    session: &GameSession,
    mission: PlayerSet,
    proposer: PlayerId,
    betrayals: usize,
    evidence: f64,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let metrics = BeliefMetrics::from_model(session.belief());
    let most_likely = metrics
        .most_likely
        .map(|world| world.spies().to_string())
        .unwrap_or_default();
    event!(
        target: "resistance_bot::belief",
        Level::DEBUG,
        agent,
        mission = %mission,
        proposer = %proposer,
        betrayals,
        evidence,
        support = metrics.support,
        worlds = metrics.worlds,
        entropy = metrics.entropy,
        max_probability = metrics.max_probability,
        most_likely = %most_likely,
    );
}
