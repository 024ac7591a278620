use super::DecisionContext;
use resistance_core::model::player::{PlayerId, PlayerSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteReason {
    /// The failure counter is at its limit; another rejection only hurts.
    ForcedApproval,
    /// A resistance-sized team that leaves us out must carry a spy.
    ExcludedFromFullTeam,
    TrustedProposer,
    SuspiciousProposer,
    SuspiciousMember,
    /// Every spy on one team would expose the whole cell.
    AllSpyTeam,
    Cleared,
}

impl VoteReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            VoteReason::ForcedApproval => "forced_approval",
            VoteReason::ExcludedFromFullTeam => "excluded_from_full_team",
            VoteReason::TrustedProposer => "trusted_proposer",
            VoteReason::SuspiciousProposer => "suspicious_proposer",
            VoteReason::SuspiciousMember => "suspicious_member",
            VoteReason::AllSpyTeam => "all_spy_team",
            VoteReason::Cleared => "cleared",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteDecision {
    pub approve: bool,
    pub reason: VoteReason,
}

impl VoteDecision {
    const fn approve(reason: VoteReason) -> Self {
        Self {
            approve: true,
            reason,
        }
    }

    const fn reject(reason: VoteReason) -> Self {
        Self {
            approve: false,
            reason,
        }
    }
}

pub struct VotePlanner;

impl VotePlanner {
    /// Rules are checked in priority order; the first that applies decides.
    pub fn decide(ctx: &DecisionContext<'_>, mission: PlayerSet, proposer: PlayerId) -> VoteDecision {
        let session = ctx.session();
        let suspicion = ctx.suspicion();

        if session.tracker().forced_approval() {
            return VoteDecision::approve(VoteReason::ForcedApproval);
        }

        if !session.is_spy()
            && mission.len() == session.resistance_count()
            && !mission.contains(session.me())
        {
            return VoteDecision::reject(VoteReason::ExcludedFromFullTeam);
        }

        if suspicion.score(proposer) == Some(0.0) {
            return VoteDecision::approve(VoteReason::TrustedProposer);
        }

        if suspicion.above_average(proposer) {
            return VoteDecision::reject(VoteReason::SuspiciousProposer);
        }

        if suspicion.any_above_average(mission) {
            return VoteDecision::reject(VoteReason::SuspiciousMember);
        }

        if session.is_spy() && mission == session.known_spies() {
            return VoteDecision::reject(VoteReason::AllSpyTeam);
        }

        VoteDecision::approve(VoteReason::Cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::GameSession;
    use resistance_core::belief::WorldModel;
    use resistance_core::model::rules::GameRules;

    fn set(raw: &[u8]) -> PlayerSet {
        raw.iter().copied().map(PlayerId::new).collect()
    }

    fn ids(raw: &[u8]) -> Vec<PlayerId> {
        raw.iter().copied().map(PlayerId::new).collect()
    }

    fn session(me: u8, spies: &[u8]) -> GameSession {
        GameSession::start(&GameRules::standard(), 5, PlayerId::new(me), &ids(spies)).unwrap()
    }

    /// Player 4 is the obvious suspect and player 3 has been cleared.
    fn skewed(session: GameSession) -> GameSession {
        let belief = WorldModel::from_weights(5, 2, |world| {
            if world.contains(PlayerId::new(3)) {
                0.0
            } else if world.contains(PlayerId::new(4)) {
                9.0
            } else {
                1.0
            }
        })
        .unwrap();
        session.with_belief(belief).unwrap()
    }

    #[test]
    fn forced_approval_overrides_everything() {
        let mut session = skewed(session(0, &[]));
        for _ in 0..4 {
            session.tracker_mut().note_vote_outcome(1, 5);
        }
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[1, 2, 4]), PlayerId::new(4));
        assert_eq!(decision, VoteDecision::approve(VoteReason::ForcedApproval));
    }

    #[test]
    fn resistance_rejects_full_team_without_self() {
        let session = session(0, &[]);
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[1, 2, 3]), PlayerId::new(1));
        assert_eq!(decision.reason, VoteReason::ExcludedFromFullTeam);
        assert!(!decision.approve);
    }

    #[test]
    fn spy_ignores_full_team_guard() {
        let session = session(0, &[0, 4]);
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[1, 2, 3]), PlayerId::new(1));
        assert!(decision.approve);
        assert_eq!(decision.reason, VoteReason::Cleared);
    }

    #[test]
    fn cleared_proposer_is_trusted() {
        let session = skewed(session(0, &[]));
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[3, 4]), PlayerId::new(3));
        assert_eq!(decision, VoteDecision::approve(VoteReason::TrustedProposer));
    }

    #[test]
    fn suspicious_proposer_is_rejected() {
        let session = skewed(session(0, &[]));
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[0, 1]), PlayerId::new(4));
        assert_eq!(decision, VoteDecision::reject(VoteReason::SuspiciousProposer));
    }

    #[test]
    fn suspicious_member_is_rejected() {
        let session = skewed(session(0, &[]));
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[0, 4]), PlayerId::new(1));
        assert_eq!(decision, VoteDecision::reject(VoteReason::SuspiciousMember));
    }

    #[test]
    fn quiet_team_is_approved() {
        let session = skewed(session(0, &[]));
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[0, 1]), PlayerId::new(2));
        assert_eq!(decision, VoteDecision::approve(VoteReason::Cleared));
    }

    #[test]
    fn cleared_proposer_outranks_all_spy_guard() {
        let session = session(1, &[1, 2]);
        let belief = WorldModel::from_weights(5, 2, |world| {
            if world.contains(PlayerId::new(3)) { 0.0 } else { 1.0 }
        })
        .unwrap();
        let session = session.with_belief(belief).unwrap();
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[1, 2]), PlayerId::new(3));
        assert_eq!(decision, VoteDecision::approve(VoteReason::TrustedProposer));
    }

    #[test]
    fn spy_rejects_all_spy_team() {
        let session = session(1, &[1, 2]);
        let ctx = DecisionContext::new(&session);
        let decision = VotePlanner::decide(&ctx, set(&[1, 2]), PlayerId::new(0));
        assert_eq!(decision, VoteDecision::reject(VoteReason::AllSpyTeam));
    }
}
