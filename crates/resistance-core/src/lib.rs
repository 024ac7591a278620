#![deny(warnings)]

//! Belief engine for a Resistance-style hidden-role game.
//!
//! `model` holds player identities and table rules; `belief` holds the hypothesis space
//! over spy assignments, the Bayesian mission update and the suspicion ranking.

pub mod belief;
pub mod model;

pub use belief::{BeliefError, SuspicionReport, WorldModel};
pub use model::player::{PlayerId, PlayerSet};
pub use model::rules::GameRules;
