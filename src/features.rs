use serde::Serialize;

use crate::reference::InjuryType;

/// Column names of an encoded feature row, in the order they are produced.
pub const FEATURE_COLUMNS: [&str; 7] = [
    "days_injured",
    "injury_occurrences",
    "position",
    "injury_type",
    "age",
    "player_height",
    "player_weight",
];

/// Single-row model input assembled for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub days_injured: u32,
    pub injury_occurrences: u32,
    pub position: f32,
    pub injury_type: InjuryType,
    pub age: f64,
    pub player_height: f64,
    pub player_weight: f64,
}

impl FeatureRecord {
    /// Numeric row with the injury type replaced by its fixed code.
    pub fn encode(&self) -> Vec<(&'static str, f32)> {
        let values = [
            self.days_injured as f32,
            self.injury_occurrences as f32,
            self.position,
            self.injury_type.code() as f32,
            self.age as f32,
            self.player_height as f32,
            self.player_weight as f32,
        ];
        FEATURE_COLUMNS.into_iter().zip(values).collect()
    }
}

/// A row reordered to a model's feature list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alignment {
    /// Values in the model's column order.
    pub values: Vec<f32>,
    /// Expected columns the row did not have (sent as 0).
    pub zero_filled: Vec<String>,
    /// Row columns the model does not know about.
    pub dropped: Vec<String>,
}

/// Reorder `row` to `feat_list`: unknown columns are dropped, absent ones
/// become 0. Never fails.
pub fn reindex(row: &[(&str, f32)], feat_list: &[String]) -> Alignment {
    let mut values = Vec::with_capacity(feat_list.len());
    let mut zero_filled = Vec::new();
    for name in feat_list {
        match row.iter().find(|(col, _)| col == name) {
            Some((_, v)) => values.push(*v),
            None => {
                values.push(0.0);
                zero_filled.push(name.clone());
            }
        }
    }

    let dropped = row
        .iter()
        .filter(|(col, _)| !feat_list.iter().any(|name| name == col))
        .map(|(col, _)| col.to_string())
        .collect();

    Alignment {
        values,
        zero_filled,
        dropped,
    }
}
