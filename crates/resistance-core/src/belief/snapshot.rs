use super::model::{BeliefError, MASS_EPSILON, WorldModel};
use super::world::World;
use crate::model::player::{PlayerId, PlayerSet};
use serde::{Deserialize, Serialize};

/// Serializable copy of a [`WorldModel`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeliefSnapshot {
    pub player_count: usize,
    pub spy_count: usize,
    pub worlds: Vec<WorldEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldEntry {
    pub spies: Vec<PlayerId>,
    pub probability: f64,
}

impl BeliefSnapshot {
    pub fn capture(model: &WorldModel) -> Self {
        BeliefSnapshot {
            player_count: model.player_count(),
            spy_count: model.spy_count(),
            worlds: model
                .iter()
                .map(|(world, probability)| WorldEntry {
                    spies: world.spies().to_vec(),
                    probability,
                })
                .collect(),
        }
    }

    /// Rebuilds the model. Worlds missing from the snapshot get zero mass.
    pub fn restore(&self) -> Result<WorldModel, BeliefError> {
        let mut model = WorldModel::initialize(self.player_count, self.spy_count)?;
        let mut probs = vec![0.0; model.len()];

        for entry in &self.worlds {
            let spies = PlayerSet::from_slice(&entry.spies, self.player_count)
                .map_err(|err| BeliefError::input(err.to_string()))?;
            let idx = model.position(World::new(spies)).ok_or_else(|| {
                BeliefError::input(format!(
                    "world {spies} does not name exactly {} spies",
                    self.spy_count
                ))
            })?;
            if !entry.probability.is_finite() || entry.probability < 0.0 {
                return Err(BeliefError::input(format!(
                    "world {spies} has invalid probability {}",
                    entry.probability
                )));
            }
            probs[idx] = entry.probability;
        }

        let total: f64 = probs.iter().sum();
        if (total - 1.0).abs() > MASS_EPSILON {
            return Err(BeliefError::input(format!(
                "snapshot mass sums to {total}, expected 1"
            )));
        }
        model.commit(probs);
        Ok(model)
    }

    pub fn to_json(model: &WorldModel) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(model))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
