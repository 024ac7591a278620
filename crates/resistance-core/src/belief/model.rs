//! Hypothesis space and the probability mass assigned to each hypothesis.

use super::world::{World, binomial, enumerate_worlds};
use crate::model::player::{MAX_PLAYERS, PlayerSet};
use thiserror::Error;

/// Tolerance used when checking that a distribution sums to one.
pub const MASS_EPSILON: f64 = 1e-9;

/// Discrete belief over every possible spy assignment for one game.
///
/// The hypothesis list is fixed at construction (`C(n, k)` entries); only the parallel
/// probability vector changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldModel {
    player_count: usize,
    spy_count: usize,
    worlds: Vec<World>,
    probs: Vec<f64>,
}

impl WorldModel {
    /// Enumerates every size-`spy_count` subset of the table with uniform mass.
    pub fn initialize(player_count: usize, spy_count: usize) -> Result<Self, BeliefError> {
        if player_count > MAX_PLAYERS {
            return Err(BeliefError::configuration(format!(
                "{player_count} players exceeds the supported maximum of {MAX_PLAYERS}"
            )));
        }
        if spy_count == 0 || spy_count > player_count {
            return Err(BeliefError::configuration(format!(
                "cannot place {spy_count} spies among {player_count} players"
            )));
        }

        let worlds = enumerate_worlds(player_count, spy_count);
        let uniform = 1.0 / binomial(player_count, spy_count) as f64;
        let probs = vec![uniform; worlds.len()];
        Ok(Self {
            player_count,
            spy_count,
            worlds,
            probs,
        })
    }

    /// Builds a model whose mass is proportional to `weight(world)`.
    ///
    /// Handy for exercising policies against a hand-crafted belief state.
    pub fn from_weights<F>(
        player_count: usize,
        spy_count: usize,
        mut weight: F,
    ) -> Result<Self, BeliefError>
    where
        F: FnMut(World) -> f64,
    {
        let mut model = Self::initialize(player_count, spy_count)?;
        let weights: Vec<f64> = model.worlds.iter().map(|world| weight(*world)).collect();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(BeliefError::configuration(
                "world weights must be finite and non-negative",
            ));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(BeliefError::configuration(
                "world weights must not all be zero",
            ));
        }
        model.probs = weights.into_iter().map(|w| w / total).collect();
        Ok(model)
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn spy_count(&self) -> usize {
        self.spy_count
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probs
    }

    pub fn iter(&self) -> impl Iterator<Item = (World, f64)> + '_ {
        self.worlds.iter().copied().zip(self.probs.iter().copied())
    }

    /// Probability of the hypothesis naming exactly `spies`, if it is in the space.
    pub fn probability(&self, spies: PlayerSet) -> Option<f64> {
        self.position(World::new(spies)).map(|idx| self.probs[idx])
    }

    pub fn total_mass(&self) -> f64 {
        self.probs.iter().sum()
    }

    pub fn is_normalized(&self) -> bool {
        (self.total_mass() - 1.0).abs() <= MASS_EPSILON
    }

    /// Number of hypotheses still carrying non-zero mass.
    pub fn support(&self) -> usize {
        self.probs.iter().filter(|p| **p > 0.0).count()
    }

    /// Highest-probability hypothesis; ties resolve to the first in storage order.
    pub fn most_likely(&self) -> Option<(World, f64)> {
        self.iter().fold(None, |best, (world, prob)| match best {
            Some((_, best_prob)) if best_prob >= prob => best,
            _ => Some((world, prob)),
        })
    }

    pub(crate) fn position(&self, world: World) -> Option<usize> {
        self.worlds.binary_search(&world).ok()
    }

    /// Replaces the distribution wholesale. Callers hand over a normalised vector of
    /// the same length.
    pub(crate) fn commit(&mut self, posterior: Vec<f64>) {
        debug_assert_eq!(posterior.len(), self.probs.len());
        self.probs = posterior;
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BeliefError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("{betrayals} betrayal(s) on mission {mission} contradict every hypothesis")]
    DegenerateEvidence { mission: PlayerSet, betrayals: usize },
}

impl BeliefError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        BeliefError::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn input(message: impl Into<String>) -> Self {
        BeliefError::InvalidInput {
            message: message.into(),
        }
    }
}
