use axum::{
    extract::{Form, Json, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::AppState;
use crate::form::{collect, CollectError, FormInput, FormParams, FormState};
use crate::predict::{predict, PredictError, PredictionReport};
use crate::reference::InjuryType;
use crate::render::{self, Stage};
use crate::roster::RosterError;
use crate::types::{HealthOut, InjuryOut, PlayerOut, PredictOut};

// ---------- HTML form ----------

pub async fn index(State(state): State<AppState>, Query(params): Query<FormParams>) -> Html<String> {
    Html(render_page(&state, params, false))
}

pub async fn predict_form(State(state): State<AppState>, Form(params): Form<FormParams>) -> Html<String> {
    Html(render_page(&state, params, true))
}

fn render_page(state: &AppState, params: FormParams, run: bool) -> String {
    let roster = match state.roster.get() {
        Ok(roster) => roster,
        Err(e) => {
            let message = e.to_string();
            return render::page(&[], &Stage::Idle { message });
        }
    };
    let players = roster.player_names();

    let form = match params.parse().and_then(|input| collect(&roster, &input)) {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("input rejected: {}", e);
            let message = e.to_string();
            return render::page(players, &Stage::Idle { message });
        }
    };

    let stage = if run {
        let outcome = run_prediction(state, &form).map_err(|e| {
            tracing::warn!("prediction failed: {}", e);
            e.to_string()
        });
        Stage::Predicted { form, outcome }
    } else {
        Stage::PlayerChosen(form)
    };
    render::page(players, &stage)
}

fn run_prediction(state: &AppState, form: &FormState) -> Result<PredictionReport, PredictError> {
    let model = state.model.get()?;
    tracing::info!(
        "predict player={} injury={} days={} occurrences={}",
        form.player.player_name,
        form.injury_type,
        form.days_injured,
        form.injury_occurrences
    );
    predict(model.as_ref(), &form.feature_record())
}

// ---------- JSON API ----------

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<RosterError> for ApiError {
    fn from(e: RosterError) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: e.to_string(),
        }
    }
}

impl From<CollectError> for ApiError {
    fn from(e: CollectError) -> Self {
        let status = match e {
            CollectError::EmptyRoster | CollectError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            CollectError::UnknownInjury(_) | CollectError::InvalidNumber { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        let status = match e {
            PredictError::ModelNotFound(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let roster = state.roster.get()?;
    Ok(Json(roster.player_names().to_vec()))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerOut>, ApiError> {
    let roster = state.roster.get()?;
    let record = roster
        .find(&name)
        .ok_or(CollectError::PlayerNotFound(name.clone()))?;
    Ok(Json(PlayerOut::from(record)))
}

pub async fn list_injuries() -> Json<Vec<InjuryOut>> {
    Json(InjuryType::ALL.into_iter().map(InjuryOut::from).collect())
}

pub async fn predict_json(
    State(state): State<AppState>,
    Json(input): Json<FormInput>,
) -> Result<Json<PredictOut>, ApiError> {
    let roster = state.roster.get()?;
    let form = collect(&roster, &input)?;
    let report = run_prediction(&state, &form)?;

    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default();
    Ok(Json(PredictOut { t, form, report }))
}

pub async fn healthz(State(state): State<AppState>) -> Json<HealthOut> {
    Json(HealthOut {
        status: "ok",
        roster_loaded: state.roster.is_loaded(),
        model_loaded: state.model.is_loaded(),
    })
}
