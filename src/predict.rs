use serde::Serialize;

use crate::features::{reindex, Alignment, FeatureRecord};
use crate::model::{InjuryModel, ModelError};

/// Result table headers, one per model output.
pub const PREDICTION_COLUMNS: [&str; 3] = [
    "Predicted Change in PTS",
    "Predicted Change in REB",
    "Predicted Change in AST",
];

/// Short metric names used as chart categories.
pub const METRIC_NAMES: [&str; 3] = ["PTS", "REB", "AST"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    #[serde(rename = "Predicted Change in PTS")]
    pub pts: f32,
    #[serde(rename = "Predicted Change in REB")]
    pub reb: f32,
    #[serde(rename = "Predicted Change in AST")]
    pub ast: f32,
}

impl Prediction {
    pub fn values(&self) -> [f32; 3] {
        [self.pts, self.reb, self.ast]
    }
}

impl From<[f32; 3]> for Prediction {
    fn from([pts, reb, ast]: [f32; 3]) -> Self {
        Self { pts, reb, ast }
    }
}

/// Everything produced by one prediction action.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub record: FeatureRecord,
    pub feature_names: Vec<String>,
    pub alignment: Alignment,
    pub prediction: Prediction,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Model file not found.")]
    ModelNotFound(#[source] ModelError),

    #[error("Error during prediction: {0}")]
    Model(#[source] ModelError),

    #[error("Error during prediction: model returned no rows")]
    NoOutput,
}

impl From<ModelError> for PredictError {
    fn from(e: ModelError) -> Self {
        if e.is_not_found() {
            PredictError::ModelNotFound(e)
        } else {
            PredictError::Model(e)
        }
    }
}

/// Align `record` to the model's columns and run one prediction.
pub fn predict(model: &dyn InjuryModel, record: &FeatureRecord) -> Result<PredictionReport, PredictError> {
    let feature_names = model.feature_names().to_vec();
    let alignment = reindex(&record.encode(), &feature_names);
    if !alignment.zero_filled.is_empty() || !alignment.dropped.is_empty() {
        tracing::debug!(
            "aligned features: zero_filled={:?} dropped={:?}",
            alignment.zero_filled,
            alignment.dropped
        );
    }

    let outputs = model.predict(std::slice::from_ref(&alignment.values))?;
    let first = outputs.first().copied().ok_or(PredictError::NoOutput)?;
    let prediction = Prediction::from(first);
    tracing::debug!(
        "predicted injury={} days={} -> {:?}",
        record.injury_type,
        record.days_injured,
        prediction.values()
    );

    Ok(PredictionReport {
        record: record.clone(),
        feature_names,
        alignment,
        prediction,
    })
}
