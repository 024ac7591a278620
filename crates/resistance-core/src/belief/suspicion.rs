//! Per-player suspicion derived from the world model.
//!
//! A player's suspicion is the *mean* probability of the hypotheses that name them as a
//! spy, not the marginal `Σ P(W)`. Policy thresholds compare against the mean of these
//! scores, so the two must stay consistent.

use super::model::WorldModel;
use crate::model::player::{PlayerId, PlayerSet};

/// Slack allowed before a score counts as above the average. The average is always
/// `1 / C(n, k)`, so a near-uniform belief would otherwise split on rounding noise.
pub const SCORE_TOLERANCE: f64 = 1e-12;

/// Suspicion scores for one belief state, ranked most suspicious first.
#[derive(Debug, Clone, PartialEq)]
pub struct SuspicionReport {
    scores: Vec<f64>,
    ranking: Vec<PlayerId>,
    average: f64,
}

impl SuspicionReport {
    pub fn score(&self, player: PlayerId) -> Option<f64> {
        self.scores.get(player.index()).copied()
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Arithmetic mean of every player's score.
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Players in descending suspicion; equal scores keep ascending id order.
    pub fn ranking(&self) -> &[PlayerId] {
        &self.ranking
    }

    /// Exact reverse of [`Self::ranking`].
    pub fn least_suspicious_first(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.ranking.iter().rev().copied()
    }

    /// Unknown players count as above average.
    pub fn above_average(&self, player: PlayerId) -> bool {
        self.score(player)
            .is_none_or(|score| score > self.average + SCORE_TOLERANCE)
    }

    pub fn any_above_average(&self, players: PlayerSet) -> bool {
        players.iter().any(|player| self.above_average(player))
    }

    pub fn most_suspicious(&self) -> Option<PlayerId> {
        self.ranking.first().copied()
    }
}

/// Computes a fresh [`SuspicionReport`] on every call.
#[derive(Debug, Default)]
pub struct SuspicionRanker;

impl SuspicionRanker {
    pub fn rank(model: &WorldModel) -> SuspicionReport {
        let player_count = model.player_count();
        let mut sums = vec![0.0f64; player_count];
        let mut counts = vec![0usize; player_count];

        for (world, prob) in model.iter() {
            for spy in world.spies() {
                sums[spy.index()] += prob;
                counts[spy.index()] += 1;
            }
        }

        let scores: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| if count == 0 { 0.0 } else { sum / count as f64 })
            .collect();

        let mut ranking: Vec<PlayerId> = PlayerId::all(player_count).collect();
        ranking.sort_by(|a, b| scores[b.index()].total_cmp(&scores[a.index()]));

        let average = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        SuspicionReport {
            scores,
            ranking,
            average,
        }
    }
}
