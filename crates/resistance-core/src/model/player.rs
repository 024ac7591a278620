use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest table size representable by [`PlayerSet`].
pub const MAX_PLAYERS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < MAX_PLAYERS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates `0..player_count`, clamped to [`MAX_PLAYERS`].
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(MAX_PLAYERS)).map(|index| PlayerId(index as u8))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Set of players backed by a 16-bit mask. Iteration is in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PlayerSet(u16);

impl PlayerSet {
    pub const EMPTY: Self = Self(0);

    /// Builds a set, silently collapsing duplicates.
    pub fn from_players<I>(players: I) -> Self
    where
        I: IntoIterator<Item = PlayerId>,
    {
        players.into_iter().fold(Self::EMPTY, PlayerSet::with)
    }

    /// Builds a set from an orchestrator-supplied list, rejecting duplicates and ids
    /// outside `0..player_count`.
    pub fn from_slice(players: &[PlayerId], player_count: usize) -> Result<Self, PlayerSetError> {
        let mut set = Self::EMPTY;
        for &player in players {
            if player.index() >= player_count.min(MAX_PLAYERS) {
                return Err(PlayerSetError::OutOfRange {
                    player,
                    player_count,
                });
            }
            if set.contains(player) {
                return Err(PlayerSetError::Duplicate { player });
            }
            set = set.with(player);
        }
        Ok(set)
    }

    pub fn contains(self, player: PlayerId) -> bool {
        player.index() < MAX_PLAYERS && self.0 & (1 << player.0) != 0
    }

    pub fn with(self, player: PlayerId) -> Self {
        if player.index() >= MAX_PLAYERS {
            return self;
        }
        Self(self.0 | (1 << player.0))
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// True when every member has an id below `player_count`.
    pub fn fits(self, player_count: usize) -> bool {
        if player_count >= MAX_PLAYERS {
            return true;
        }
        self.0 >> player_count == 0
    }

    pub fn iter(self) -> PlayerSetIter {
        PlayerSetIter { bits: self.0 }
    }

    pub fn to_vec(self) -> Vec<PlayerId> {
        self.iter().collect()
    }
}

impl FromIterator<PlayerId> for PlayerSet {
    fn from_iter<I: IntoIterator<Item = PlayerId>>(iter: I) -> Self {
        Self::from_players(iter)
    }
}

impl IntoIterator for PlayerSet {
    type Item = PlayerId;
    type IntoIter = PlayerSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PlayerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, player) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", player.0)?;
        }
        f.write_str("}")
    }
}

#[derive(Debug, Clone)]
pub struct PlayerSetIter {
    bits: u16,
}

impl Iterator for PlayerSetIter {
    type Item = PlayerId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(PlayerId(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for PlayerSetIter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayerSetError {
    #[error("player {player} listed more than once")]
    Duplicate { player: PlayerId },
    #[error("player {player} is outside a table of {player_count}")]
    OutOfRange {
        player: PlayerId,
        player_count: usize,
    },
}
