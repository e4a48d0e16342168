use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::config::Config;
use crate::handler;
use crate::model::{load_model, InjuryModel, ModelError};
use crate::resource::Resource;
use crate::roster::{Roster, RosterError};

pub type RosterResource = Resource<Roster, RosterError>;
pub type ModelResource = Resource<dyn InjuryModel, ModelError>;

/// Shared read-only resources handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RosterResource>,
    pub model: Arc<ModelResource>,
}

impl AppState {
    pub fn new(roster: RosterResource, model: ModelResource) -> Self {
        Self {
            roster: Arc::new(roster),
            model: Arc::new(model),
        }
    }

    /// Resources backed by the files named in `config`, loaded on first use.
    pub fn from_config(config: &Config) -> Self {
        let data_path = config.player_data_path.clone();
        let roster = Resource::new("player data", move || Roster::load(&data_path).map(Arc::new));

        let model_path = config.model_path.clone();
        let meta_path = config.meta_path();
        let model = Resource::new("model", move || load_model(&model_path, &meta_path));

        Self::new(roster, model)
    }

    /// Load both resources up front so the first request does not pay for
    /// it. Failures are logged and retried on demand.
    pub fn warm_up(&self) {
        if let Ok(roster) = self.roster.get() {
            tracing::info!(
                "roster ready: {} rows, {} players",
                roster.len(),
                roster.player_names().len()
            );
        }
        let _ = self.model.get();
    }
}

pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/players", get(handler::list_players))
        .route("/players/:name", get(handler::get_player))
        .route("/injuries", get(handler::list_injuries))
        .route("/predict", post(handler::predict_json));

    Router::new()
        .route("/", get(handler::index))
        .route("/predict", post(handler::predict_form))
        .route("/healthz", get(handler::healthz))
        .nest("/api", api_routes)
        .with_state(app_state)
}
