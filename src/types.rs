use serde::Serialize;

use crate::form::FormState;
use crate::predict::PredictionReport;
use crate::reference::InjuryType;
use crate::roster::PlayerRecord;

#[derive(Debug, Serialize)]
pub struct PlayerOut {
    #[serde(flatten)]
    pub record: PlayerRecord,
    pub position_numeric: f32,
}

impl From<&PlayerRecord> for PlayerOut {
    fn from(record: &PlayerRecord) -> Self {
        Self {
            record: record.clone(),
            position_numeric: record.position_numeric(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InjuryOut {
    pub label: &'static str,
    pub average_days: f64,
    pub default_days: u32,
    pub code: u32,
}

impl From<InjuryType> for InjuryOut {
    fn from(injury: InjuryType) -> Self {
        Self {
            label: injury.label(),
            average_days: injury.average_days(),
            default_days: injury.default_days(),
            code: injury.code(),
        }
    }
}

// Response of the JSON predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictOut {
    pub t: i64,
    pub form: FormState,
    #[serde(flatten)]
    pub report: PredictionReport,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub status: &'static str,
    pub roster_loaded: bool,
    pub model_loaded: bool,
}
