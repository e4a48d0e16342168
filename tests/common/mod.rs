#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::Arc;

use nba_injury_predictor::{
    app::AppState,
    model::{InjuryModel, ModelError, OUTPUT_WIDTH},
    resource::Resource,
    roster::Roster,
};

pub const ROSTER_CSV: &str = "\
player_name,position,age,player_height,player_weight,season
Jane Doe,PG,25,190,85,2021-22
Ann Lee,C,31,208.28,110.5,2021-22
,SF,22,201,95,2021-22
Jane Doe,SG,26,190,86,2022-23
Bo Cruz,F,28,198,99,2022-23
";

/// Column order the test model was "trained" with; deliberately not the
/// order the form produces, and with one column the form never sends.
pub fn trained_schema() -> Vec<String> {
    [
        "age",
        "player_height",
        "player_weight",
        "position",
        "injury_type",
        "days_injured",
        "injury_occurrences",
        "team_pace",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Records every call and answers with a fixed triple.
pub struct MockModel {
    pub feat_list: Vec<String>,
    pub output: [f32; OUTPUT_WIDTH],
    pub calls: Mutex<Vec<Vec<Vec<f32>>>>,
}

impl MockModel {
    pub fn new(feat_list: Vec<String>, output: [f32; OUTPUT_WIDTH]) -> Self {
        Self {
            feat_list,
            output,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl InjuryModel for MockModel {
    fn feature_names(&self) -> &[String] {
        &self.feat_list
    }

    fn predict(&self, rows: &[Vec<f32>]) -> Result<Vec<[f32; OUTPUT_WIDTH]>, ModelError> {
        self.calls.lock().push(rows.to_vec());
        for row in rows {
            if row.len() != self.feat_list.len() {
                return Err(ModelError::FeatureLength {
                    got: row.len(),
                    expected: self.feat_list.len(),
                });
            }
        }
        Ok(vec![self.output; rows.len()])
    }
}

pub fn roster() -> Roster {
    Roster::from_reader(ROSTER_CSV.as_bytes()).expect("fixture roster parses")
}

pub fn state_with(model: Arc<MockModel>) -> AppState {
    let model: Arc<dyn InjuryModel> = model;
    AppState::new(
        Resource::ready("player data", Arc::new(roster())),
        Resource::ready("model", model),
    )
}

/// State whose model file is absent.
pub fn state_without_model() -> AppState {
    AppState::new(
        Resource::ready("player data", Arc::new(roster())),
        Resource::new("model", || {
            nba_injury_predictor::model::load_model(
                std::path::Path::new("does/not/exist.pt"),
                std::path::Path::new("does/not/exist.meta.json"),
            )
        }),
    )
}
