use super::DecisionContext;
use crate::error::AgentError;
use rand::Rng;
use rand::seq::SliceRandom;
use resistance_core::model::player::{PlayerId, PlayerSet};

/// Builds mission teams from the least suspicious players.
pub struct ProposalPlanner;

impl ProposalPlanner {
    /// Returns exactly `team_size` distinct players, self included, in shuffled order.
    ///
    /// A spy brings along up to `betrayals_required - 1` fellow spies (the least
    /// suspicious ones) so the mission can still be failed, then fills with the
    /// least suspicious resistance players. Everyone else just picks the least
    /// suspicious table.
    pub fn choose<R: Rng + ?Sized>(
        ctx: &DecisionContext<'_>,
        team_size: usize,
        betrayals_required: usize,
        rng: &mut R,
    ) -> Result<Vec<PlayerId>, AgentError> {
        let session = ctx.session();
        if team_size == 0 || team_size > session.player_count() {
            return Err(AgentError::input(format!(
                "team size {team_size} does not fit a table of {}",
                session.player_count()
            )));
        }

        let me = session.me();
        let candidates: Vec<PlayerId> = ctx
            .suspicion()
            .least_suspicious_first()
            .filter(|&player| player != me)
            .collect();

        let mut team = Vec::with_capacity(team_size);
        team.push(me);

        if session.is_spy() {
            let spies = session.known_spies();
            let extra_spies = betrayals_required.saturating_sub(1).min(team_size - 1);
            team.extend(
                candidates
                    .iter()
                    .copied()
                    .filter(|&player| spies.contains(player))
                    .take(extra_spies),
            );
            let open = team_size - team.len();
            team.extend(
                candidates
                    .iter()
                    .copied()
                    .filter(|&player| !spies.contains(player))
                    .take(open),
            );
            if team.len() < team_size {
                // Not enough resistance players left; top up with the remaining spies.
                let chosen: PlayerSet = team.iter().copied().collect();
                let open = team_size - team.len();
                team.extend(
                    candidates
                        .iter()
                        .copied()
                        .filter(|&player| !chosen.contains(player))
                        .take(open),
                );
            }
        } else {
            team.extend(candidates.iter().copied().take(team_size - 1));
        }

        team.shuffle(rng);
        Ok(team)
    }
}
