//! Bayesian revision of the world model from observed mission sabotage.

use super::model::{BeliefError, WorldModel};
use super::world::{World, binomial};
use crate::model::player::{PlayerId, PlayerSet};

/// Result of feeding one mission outcome into the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// A clean mission carries no discriminating information; nothing changed.
    Skipped,
    /// The posterior was committed. `evidence` is the normaliser `Σ L(W)·P(W)`.
    Applied { evidence: f64 },
}

impl UpdateOutcome {
    pub fn applied(self) -> bool {
        matches!(self, UpdateOutcome::Applied { .. })
    }
}

/// Applies mission observations to a [`WorldModel`].
#[derive(Debug, Default)]
pub struct BeliefUpdater;

impl BeliefUpdater {
    /// `P(betrayals | world)`: ways to pick the saboteurs among the world's spies on the
    /// mission, over every pass/fail assignment of the whole mission (`2^|mission|`).
    pub fn likelihood(world: World, mission: PlayerSet, betrayals: usize) -> f64 {
        let ways = binomial(world.overlap(mission).len(), betrayals) as f64;
        let outcomes = 2f64.powi(mission.len() as i32);
        ways / outcomes
    }

    /// Updates from an orchestrator-supplied participant list.
    pub fn observe(
        model: &mut WorldModel,
        mission: &[PlayerId],
        betrayals: usize,
    ) -> Result<UpdateOutcome, BeliefError> {
        let mission = PlayerSet::from_slice(mission, model.player_count())
            .map_err(|err| BeliefError::input(err.to_string()))?;
        Self::apply(model, mission, betrayals)
    }

    /// Revises `model` in place. On error the prior is left untouched.
    pub fn apply(
        model: &mut WorldModel,
        mission: PlayerSet,
        betrayals: usize,
    ) -> Result<UpdateOutcome, BeliefError> {
        if !mission.fits(model.player_count()) {
            return Err(BeliefError::input(format!(
                "mission {mission} references players outside a table of {}",
                model.player_count()
            )));
        }
        if betrayals == 0 {
            return Ok(UpdateOutcome::Skipped);
        }
        if betrayals > mission.len() {
            return Err(BeliefError::input(format!(
                "{betrayals} betrayals reported on a mission of {}",
                mission.len()
            )));
        }

        let mut posterior: Vec<f64> = model
            .iter()
            .map(|(world, prior)| Self::likelihood(world, mission, betrayals) * prior)
            .collect();
        let evidence: f64 = posterior.iter().sum();
        if evidence <= 0.0 || !evidence.is_finite() {
            return Err(BeliefError::DegenerateEvidence { mission, betrayals });
        }

        for prob in &mut posterior {
            *prob /= evidence;
        }
        model.commit(posterior);
        Ok(UpdateOutcome::Applied { evidence })
    }
}
