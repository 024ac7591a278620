//! Table-size dependent game rules, loadable from YAML.

use super::player::MAX_PLAYERS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MISSIONS_PER_GAME: usize = 5;
pub const MISSIONS_TO_WIN: usize = 3;

/// Spy counts, mission sizes and sabotage thresholds keyed by player count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    pub spy_counts: BTreeMap<usize, usize>,
    #[serde(default)]
    pub mission_sizes: BTreeMap<usize, Vec<usize>>,
    /// Betrayals needed to fail each mission, indexed by mission number.
    #[serde(default)]
    pub fails_required: BTreeMap<usize, Vec<usize>>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameRules {
    /// The published 5–10 player table.
    pub fn standard() -> Self {
        let spy_counts = BTreeMap::from([(5, 2), (6, 2), (7, 3), (8, 3), (9, 3), (10, 4)]);
        let mission_sizes = BTreeMap::from([
            (5, vec![2, 3, 2, 3, 3]),
            (6, vec![2, 3, 4, 3, 4]),
            (7, vec![2, 3, 3, 4, 4]),
            (8, vec![3, 4, 4, 5, 5]),
            (9, vec![3, 4, 4, 5, 5]),
            (10, vec![3, 4, 4, 5, 5]),
        ]);
        let fails_required = BTreeMap::from([
            (5, vec![1, 1, 1, 1, 1]),
            (6, vec![1, 1, 1, 1, 1]),
            (7, vec![1, 1, 1, 2, 1]),
            (8, vec![1, 1, 1, 2, 1]),
            (9, vec![1, 1, 1, 2, 1]),
            (10, vec![1, 1, 1, 2, 1]),
        ]);
        Self {
            spy_counts,
            mission_sizes,
            fails_required,
        }
    }

    /// Load rules from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| RulesError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let rules: GameRules =
            serde_yaml::from_reader(reader).map_err(|source| RulesError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        rules.validate().map_err(|source| RulesError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(rules)
    }

    pub fn spy_count(&self, player_count: usize) -> Option<usize> {
        self.spy_counts.get(&player_count).copied()
    }

    pub fn resistance_count(&self, player_count: usize) -> Option<usize> {
        self.spy_count(player_count)
            .map(|spies| player_count.saturating_sub(spies))
    }

    pub fn mission_size(&self, player_count: usize, mission_index: usize) -> Option<usize> {
        self.mission_sizes
            .get(&player_count)
            .and_then(|row| row.get(mission_index))
            .copied()
    }

    pub fn fails_required(&self, player_count: usize, mission_index: usize) -> Option<usize> {
        self.fails_row(player_count)
            .and_then(|row| row.get(mission_index))
            .copied()
    }

    pub fn fails_row(&self, player_count: usize) -> Option<&[usize]> {
        self.fails_required.get(&player_count).map(Vec::as_slice)
    }

    /// Structural validation without I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.spy_counts.is_empty() {
            return Err(ValidationError::field(
                "spy_counts",
                "at least one player count must be configured",
            ));
        }

        for (&players, &spies) in &self.spy_counts {
            if players == 0 || players > MAX_PLAYERS {
                return Err(ValidationError::field(
                    format!("spy_counts.{players}"),
                    format!("player count must be between 1 and {MAX_PLAYERS}"),
                ));
            }
            if spies == 0 || spies >= players {
                return Err(ValidationError::field(
                    format!("spy_counts.{players}"),
                    format!("spy count {spies} must be between 1 and {}", players - 1),
                ));
            }
        }

        for (&players, sizes) in &self.mission_sizes {
            self.require_known_count("mission_sizes", players)?;
            require_row_length("mission_sizes", players, sizes)?;
            if let Some(&size) = sizes.iter().find(|&&size| size == 0 || size > players) {
                return Err(ValidationError::field(
                    format!("mission_sizes.{players}"),
                    format!("mission size {size} does not fit a table of {players}"),
                ));
            }
        }

        for (&players, row) in &self.fails_required {
            self.require_known_count("fails_required", players)?;
            require_row_length("fails_required", players, row)?;
            let spies = self.spy_count(players).unwrap_or(0);
            for (mission_index, &fails) in row.iter().enumerate() {
                if fails == 0 || fails > spies {
                    return Err(ValidationError::field(
                        format!("fails_required.{players}[{mission_index}]"),
                        format!("threshold {fails} must be between 1 and {spies}"),
                    ));
                }
                if let Some(size) = self
                    .mission_size(players, mission_index)
                    .filter(|&size| fails > size)
                {
                    return Err(ValidationError::field(
                        format!("fails_required.{players}[{mission_index}]"),
                        format!("threshold {fails} exceeds mission size {size}"),
                    ));
                }
            }
        }

        Ok(())
    }

    fn require_known_count(&self, table: &str, players: usize) -> Result<(), ValidationError> {
        if self.spy_counts.contains_key(&players) {
            return Ok(());
        }
        Err(ValidationError::field(
            format!("{table}.{players}"),
            "player count has no spy_counts entry",
        ))
    }
}

fn require_row_length(table: &str, players: usize, row: &[usize]) -> Result<(), ValidationError> {
    if row.len() == MISSIONS_PER_GAME {
        return Ok(());
    }
    Err(ValidationError::field(
        format!("{table}.{players}"),
        format!("expected {MISSIONS_PER_GAME} missions, found {}", row.len()),
    ))
}

/// Errors surfaced when loading rule files.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse rules {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid rules in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl RulesError {
    pub fn path(&self) -> &Path {
        match self {
            RulesError::Read { path, .. }
            | RulesError::Parse { path, .. }
            | RulesError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
