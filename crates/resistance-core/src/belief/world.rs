//! Spy-assignment hypotheses and their enumeration.

use crate::model::player::{PlayerId, PlayerSet};

/// One hypothesis: exactly these players are the spies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct World {
    spies: PlayerSet,
}

impl World {
    pub const fn new(spies: PlayerSet) -> Self {
        Self { spies }
    }

    pub const fn spies(self) -> PlayerSet {
        self.spies
    }

    pub fn contains(self, player: PlayerId) -> bool {
        self.spies.contains(player)
    }

    pub const fn len(self) -> usize {
        self.spies.len()
    }

    pub const fn is_empty(self) -> bool {
        self.spies.is_empty()
    }

    /// Spies of this world who were present on `mission`.
    pub const fn overlap(self, mission: PlayerSet) -> PlayerSet {
        self.spies.intersection(mission)
    }
}

/// `C(n, k)`, zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc = 1u64;
    for i in 0..k {
        // acc == C(n, i) here, so the division is exact.
        acc = acc * (n - i) as u64 / (i + 1) as u64;
    }
    acc
}

/// Every size-`spy_count` subset of `0..player_count`, sorted by [`World`] ordering.
///
/// Callers guarantee `1 <= spy_count <= player_count <= MAX_PLAYERS`.
pub(crate) fn enumerate_worlds(player_count: usize, spy_count: usize) -> Vec<World> {
    let mut worlds = Vec::with_capacity(binomial(player_count, spy_count) as usize);
    let mut indices: Vec<usize> = (0..spy_count).collect();

    loop {
        let spies = indices
            .iter()
            .filter_map(|&index| PlayerId::from_index(index))
            .collect::<PlayerSet>();
        worlds.push(World::new(spies));

        let Some(pos) = (0..spy_count)
            .rev()
            .find(|&pos| indices[pos] < player_count - spy_count + pos)
        else {
            break;
        };
        indices[pos] += 1;
        for next in pos + 1..spy_count {
            indices[next] = indices[next - 1] + 1;
        }
    }

    worlds.sort_unstable();
    worlds
}
