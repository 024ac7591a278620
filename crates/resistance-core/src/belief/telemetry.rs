//! Summary statistics over the belief distribution.

use super::model::WorldModel;
use super::world::World;

/// Summary statistics over a belief state, used for structured logging.
#[derive(Debug, Clone, PartialEq)]
pub struct BeliefMetrics {
    pub worlds: usize,
    pub support: usize,
    /// Shannon entropy of the distribution in nats.
    pub entropy: f64,
    pub max_probability: f64,
    pub most_likely: Option<World>,
}

impl BeliefMetrics {
    pub fn from_model(model: &WorldModel) -> Self {
        let entropy: f64 = model
            .probabilities()
            .iter()
            .filter(|p| **p > 0.0)
            .map(|p| -p * p.ln())
            .sum();
        let best = model.most_likely();

        Self {
            worlds: model.len(),
            support: model.support(),
            entropy,
            max_probability: best.map(|(_, prob)| prob).unwrap_or(0.0),
            most_likely: best.map(|(world, _)| world),
        }
    }
}
