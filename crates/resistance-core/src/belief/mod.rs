//! Probabilistic belief over which players are the spies.
//!
//! This module is composed of:
//! - `world`: hypotheses (`World`) and their combinatorial enumeration.
//! - `model`: the fixed hypothesis space with its probability mass (`WorldModel`).
//! - `update`: Bayesian revision from observed mission sabotage (`BeliefUpdater`).
//! - `suspicion`: per-player suspicion scores consumed by decision policies.
//! - `snapshot`: serde copy of a model for inspection and fixtures.

mod model;
mod snapshot;
mod suspicion;
pub mod telemetry;
mod update;
mod world;

pub use model::{BeliefError, MASS_EPSILON, WorldModel};
pub use snapshot::{BeliefSnapshot, WorldEntry};
pub use suspicion::{SCORE_TOLERANCE, SuspicionRanker, SuspicionReport};
pub use update::{BeliefUpdater, UpdateOutcome};
pub use world::{World, binomial};
