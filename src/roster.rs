// Player roster loading.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::reference::position_numeric;

/// Columns the roster file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "player_name",
    "position",
    "age",
    "player_height",
    "player_weight",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub player_name: String,
    pub position: String,
    pub age: f64,
    pub player_height: f64,
    pub player_weight: f64,
}

impl PlayerRecord {
    pub fn position_numeric(&self) -> f32 {
        position_numeric(&self.position)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("player data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read player data {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in player data: {0}")]
    Csv(#[from] csv::Error),

    #[error("player data is missing required column `{0}`")]
    MissingColumn(&'static str),
}

// Empty cells come through as `None` and are read as 0.
#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(default)]
    player_name: Option<String>,
    #[serde(default)]
    position: Option<String>,
    age: Option<f64>,
    player_height: Option<f64>,
    player_weight: Option<f64>,
}

impl From<RawPlayer> for PlayerRecord {
    fn from(raw: RawPlayer) -> Self {
        Self {
            player_name: raw.player_name.unwrap_or_default(),
            position: raw.position.unwrap_or_default(),
            age: raw.age.unwrap_or_default(),
            player_height: raw.player_height.unwrap_or_default(),
            player_weight: raw.player_weight.unwrap_or_default(),
        }
    }
}

/// Read-only table of player records.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<PlayerRecord>,
    // name -> index of the first row carrying it
    by_name: HashMap<String, usize>,
    names: Vec<String>,
}

impl Roster {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RosterError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::from_reader(file)?;
        debug!(
            "parsed {} rows ({} players) from {}",
            roster.len(),
            roster.player_names().len(),
            path.display()
        );
        Ok(roster)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, RosterError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(RosterError::MissingColumn(column));
            }
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<RawPlayer>() {
            records.push(PlayerRecord::from(row?));
        }
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        let mut by_name = HashMap::new();
        let mut names = BTreeSet::new();
        for (i, record) in records.iter().enumerate() {
            if record.player_name.trim().is_empty() {
                continue;
            }
            by_name.entry(record.player_name.clone()).or_insert(i);
            names.insert(record.player_name.clone());
        }

        Self {
            records,
            by_name,
            names: names.into_iter().collect(),
        }
    }

    /// Selectable player names: sorted, unique, blanks excluded.
    pub fn player_names(&self) -> &[String] {
        &self.names
    }

    /// First record stored under `name`.
    pub fn find(&self, name: &str) -> Option<&PlayerRecord> {
        self.by_name.get(name).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
