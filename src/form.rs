// Input collection: raw form fields + roster -> resolved form state.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::features::FeatureRecord;
use crate::reference::{clamp_days, InjuryType};
use crate::roster::{PlayerRecord, Roster};

/// Typed form input. Every field is optional; absent fields take the
/// defaults of the selected player and injury.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct FormInput {
    pub player: Option<String>,
    pub age: Option<f64>,
    pub player_height: Option<f64>,
    pub player_weight: Option<f64>,
    pub injury_type: Option<String>,
    pub days_injured: Option<i64>,
    pub injury_occurrences: Option<i64>,
    /// Player the stat overrides were entered for. When it differs from
    /// `player` the overrides are stale and the new player's values apply.
    pub stats_for: Option<String>,
    /// Injury the days value was entered for, same rule as `stats_for`.
    pub days_for: Option<String>,
}

/// Form fields exactly as the browser submits them (all text, possibly blank).
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FormParams {
    pub player: Option<String>,
    pub age: Option<String>,
    pub player_height: Option<String>,
    pub player_weight: Option<String>,
    pub injury_type: Option<String>,
    pub days_injured: Option<String>,
    pub injury_occurrences: Option<String>,
    pub stats_for: Option<String>,
    pub days_for: Option<String>,
}

impl FormParams {
    pub fn parse(self) -> Result<FormInput, CollectError> {
        Ok(FormInput {
            player: non_blank(self.player),
            age: parse_field("age", self.age)?,
            player_height: parse_field("player_height", self.player_height)?,
            player_weight: parse_field("player_weight", self.player_weight)?,
            injury_type: non_blank(self.injury_type),
            days_injured: parse_field("days_injured", self.days_injured)?,
            injury_occurrences: parse_field("injury_occurrences", self.injury_occurrences)?,
            stats_for: non_blank(self.stats_for),
            days_for: non_blank(self.days_for),
        })
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_field<T: FromStr>(field: &'static str, v: Option<String>) -> Result<Option<T>, CollectError> {
    match non_blank(v) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| CollectError::InvalidNumber { field, value: s }),
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectError {
    #[error("No players available in the dataset.")]
    EmptyRoster,

    #[error("Player details not found in the dataset: {0}")]
    PlayerNotFound(String),

    #[error("Unknown injury type: {0}")]
    UnknownInjury(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Fully resolved form: the values each control shows and the prediction
/// input they describe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub player: PlayerRecord,
    pub position_numeric: f32,
    pub age: f64,
    pub player_height: f64,
    pub player_weight: f64,
    pub injury_type: InjuryType,
    pub days_injured: u32,
    pub injury_occurrences: u32,
}

impl FormState {
    pub fn feature_record(&self) -> FeatureRecord {
        FeatureRecord {
            days_injured: self.days_injured,
            injury_occurrences: self.injury_occurrences,
            position: self.position_numeric,
            injury_type: self.injury_type,
            age: self.age,
            player_height: self.player_height,
            player_weight: self.player_weight,
        }
    }
}

/// Resolve `input` against the roster.
///
/// With no player given the first roster name is selected, as a dropdown
/// would. Fails without building anything when the roster is empty or the
/// player is unknown.
pub fn collect(roster: &Roster, input: &FormInput) -> Result<FormState, CollectError> {
    let name = match input.player.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name,
        None => roster
            .player_names()
            .first()
            .ok_or(CollectError::EmptyRoster)?
            .as_str(),
    };
    let player = roster
        .find(name)
        .ok_or_else(|| CollectError::PlayerNotFound(name.to_string()))?;

    let injury_type = match input.injury_type.as_deref() {
        None => InjuryType::default(),
        Some(label) => InjuryType::from_label(label)
            .ok_or_else(|| CollectError::UnknownInjury(label.to_string()))?,
    };

    let stats_apply = entered_for(input.stats_for.as_deref(), &player.player_name);
    let override_stat = |field: &'static str, v: Option<f64>, stored: f64| match v {
        Some(v) if stats_apply => finite(field, v),
        _ => Ok(stored),
    };
    let age = override_stat("age", input.age, player.age)?;
    let player_height = override_stat("player_height", input.player_height, player.player_height)?;
    let player_weight = override_stat("player_weight", input.player_weight, player.player_weight)?;

    let days_injured = match input.days_injured {
        Some(days) if entered_for(input.days_for.as_deref(), injury_type.label()) => clamp_days(days),
        _ => injury_type.default_days(),
    };
    let injury_occurrences = input
        .injury_occurrences
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(1);

    Ok(FormState {
        player: player.clone(),
        position_numeric: player.position_numeric(),
        age,
        player_height,
        player_weight,
        injury_type,
        days_injured,
        injury_occurrences,
    })
}

fn entered_for(tag: Option<&str>, current: &str) -> bool {
    tag.map_or(true, |t| t == current)
}

fn finite(field: &'static str, v: f64) -> Result<f64, CollectError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CollectError::InvalidNumber {
            field,
            value: v.to_string(),
        })
    }
}
