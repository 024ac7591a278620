use resistance_core::model::rules::MISSIONS_TO_WIN;

/// Rejections in a row after which the next proposal is always approved.
pub const FORCED_APPROVAL_AFTER: u32 = 4;

/// Per-game counters threaded through the decision planners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStateTracker {
    vote_failures: u32,
    mission_index: usize,
    spy_score: usize,
}

impl GameStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a team vote. Returns whether the proposal was approved, i.e. at least
    /// half the table voted in favour.
    pub fn note_vote_outcome(&mut self, votes_in_favor: usize, player_count: usize) -> bool {
        let approved = votes_in_favor * 2 >= player_count;
        if approved {
            self.vote_failures = 0;
        } else {
            self.vote_failures += 1;
        }
        approved
    }

    /// A mission went ahead, so the rejection streak for it is over.
    pub fn note_mission_complete(&mut self, success: bool) {
        self.vote_failures = 0;
        self.mission_index += 1;
        if !success {
            self.spy_score += 1;
        }
    }

    /// Adopts the orchestrator's authoritative counts.
    pub fn sync_round(&mut self, rounds_complete: usize, missions_failed: usize) {
        self.vote_failures = 0;
        self.mission_index = rounds_complete;
        self.spy_score = missions_failed;
    }

    pub fn vote_failures(&self) -> u32 {
        self.vote_failures
    }

    /// Zero-based index of the mission currently being staffed.
    pub fn mission_index(&self) -> usize {
        self.mission_index
    }

    pub fn spy_score(&self) -> usize {
        self.spy_score
    }

    pub fn forced_approval(&self) -> bool {
        self.vote_failures >= FORCED_APPROVAL_AFTER
    }

    pub fn spies_one_from_victory(&self) -> bool {
        self.spy_score + 1 >= MISSIONS_TO_WIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minority_votes_accumulate_until_forced() {
        let mut tracker = GameStateTracker::new();
        for expected in 1..=4 {
            assert!(!tracker.note_vote_outcome(2, 5));
            assert_eq!(tracker.vote_failures(), expected);
        }
        assert!(tracker.forced_approval());
    }

    #[test]
    fn approval_resets_failures() {
        let mut tracker = GameStateTracker::new();
        tracker.note_vote_outcome(1, 6);
        tracker.note_vote_outcome(2, 6);
        assert_eq!(tracker.vote_failures(), 2);
        assert!(tracker.note_vote_outcome(3, 6));
        assert_eq!(tracker.vote_failures(), 0);
    }

    #[test]
    fn missions_advance_index_and_score() {
        let mut tracker = GameStateTracker::new();
        tracker.note_mission_complete(true);
        tracker.note_mission_complete(false);
        assert_eq!(tracker.mission_index(), 2);
        assert_eq!(tracker.spy_score(), 1);
        assert!(!tracker.spies_one_from_victory());
        tracker.note_mission_complete(false);
        assert!(tracker.spies_one_from_victory());

        tracker.sync_round(4, 1);
        assert_eq!(tracker.mission_index(), 4);
        assert_eq!(tracker.spy_score(), 1);
    }

    #[test]
    fn rejection_streak_ends_with_the_mission() {
        let mut tracker = GameStateTracker::new();
        for _ in 0..5 {
            tracker.note_vote_outcome(1, 5);
        }
        assert!(tracker.forced_approval());
        tracker.note_mission_complete(false);
        assert_eq!(tracker.vote_failures(), 0);
        assert!(!tracker.forced_approval());

        for _ in 0..3 {
            tracker.note_vote_outcome(2, 5);
        }
        tracker.sync_round(2, 1);
        assert_eq!(tracker.vote_failures(), 0);
    }
}
