/// Integration tests for collecting input and running a prediction
///
/// Run with: cargo test --test prediction_flow -- --nocapture

mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use common::MockModel;
use nba_injury_predictor::form::{collect, CollectError, FormInput};
use nba_injury_predictor::model::{load_model, ModelError, ModelMeta};
use nba_injury_predictor::predict::{predict, PredictError, Prediction, PREDICTION_COLUMNS};
use nba_injury_predictor::reference::InjuryType;
use nba_injury_predictor::render::{self, Stage};
use nba_injury_predictor::roster::Roster;

fn jane_input() -> FormInput {
    FormInput {
        player: Some("Jane Doe".into()),
        injury_type: Some("ankle sprain injury".into()),
        ..Default::default()
    }
}

#[test]
fn test_jane_doe_end_to_end() {
    println!("\n=== Test: Jane Doe End To End ===");
    let roster = common::roster();
    let model = MockModel::new(common::trained_schema(), [-1.5, 0.25, -0.75]);

    let form = collect(&roster, &jane_input()).expect("Jane Doe resolves");
    let record = form.feature_record();
    assert_eq!(record.days_injured, 231);
    assert_eq!(record.injury_occurrences, 1);
    assert_eq!(record.position, 1.0);
    assert_eq!(record.injury_type, InjuryType::AnkleSprain);
    assert_eq!(record.age, 25.0);
    assert_eq!(record.player_height, 190.0);
    assert_eq!(record.player_weight, 85.0);
    println!("✓ Record: {:?}", record);

    let report = predict(&model, &record).expect("prediction succeeds");
    assert_eq!(model.call_count(), 1, "predict must run exactly once");
    let calls = model.calls.lock();
    assert_eq!(calls[0].len(), 1, "a single row is sent");
    assert_eq!(calls[0][0], vec![25.0, 190.0, 85.0, 1.0, 11.0, 231.0, 1.0, 0.0]);
    drop(calls);

    assert_eq!(report.prediction, Prediction { pts: -1.5, reb: 0.25, ast: -0.75 });
    assert_eq!(report.feature_names, common::trained_schema());

    let html = render::page(
        roster.player_names(),
        &Stage::Predicted { form, outcome: Ok(report) },
    );
    for col in PREDICTION_COLUMNS {
        assert!(html.contains(col), "missing column {col}");
    }
    assert!(html.contains("<td>-1.5000</td><td>0.2500</td><td>-0.7500</td>"));
    assert!(html.contains("<svg"));
    println!("✓ Rendered table and chart");
}

#[test]
fn test_overrides_and_bounds() {
    println!("\n=== Test: Overrides ===");
    let roster = common::roster();
    let input = FormInput {
        age: Some(30.0),
        player_height: Some(191.5),
        player_weight: Some(90.0),
        days_injured: Some(500),
        injury_occurrences: Some(-3),
        ..jane_input()
    };
    let form = collect(&roster, &input).unwrap();
    assert_eq!(form.age, 30.0);
    assert_eq!(form.player_height, 191.5);
    assert_eq!(form.player_weight, 90.0);
    assert_eq!(form.days_injured, 365, "days are clamped");
    assert_eq!(form.injury_occurrences, 0, "occurrences never go negative");

    let form = collect(&roster, &FormInput { days_injured: Some(-10), ..jane_input() }).unwrap();
    assert_eq!(form.days_injured, 0);
    println!("✓ Overrides applied, bounds enforced");
}

#[test]
fn test_defaults_without_selection() {
    let roster = common::roster();
    let form = collect(&roster, &FormInput::default()).unwrap();
    assert_eq!(form.player.player_name, "Ann Lee", "first sorted name is selected");
    assert_eq!(form.position_numeric, 5.0);
    assert_eq!(form.injury_type, InjuryType::FootFracture);
    assert_eq!(form.days_injured, 208);
    assert_eq!(form.injury_occurrences, 1);
}

#[test]
fn test_unknown_player_builds_no_record() {
    println!("\n=== Test: Unknown Player ===");
    let roster = common::roster();
    let input = FormInput {
        player: Some("Nobody Atall".into()),
        ..Default::default()
    };
    assert_eq!(
        collect(&roster, &input),
        Err(CollectError::PlayerNotFound("Nobody Atall".into()))
    );

    let empty = Roster::from_records(Vec::new());
    assert_eq!(collect(&empty, &FormInput::default()), Err(CollectError::EmptyRoster));
    println!("✓ Lookup misses reported");
}

#[test]
fn test_unknown_injury_rejected() {
    let roster = common::roster();
    let input = FormInput {
        injury_type: Some("paper cut".into()),
        ..jane_input()
    };
    assert_eq!(
        collect(&roster, &input),
        Err(CollectError::UnknownInjury("paper cut".into()))
    );
}

#[test]
fn test_model_file_absent() {
    println!("\n=== Test: Model File Absent ===");
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("rf_injury_change_model.pt");
    let meta_path = dir.path().join("rf_injury_change_model.meta.json");

    let err = load_model(&model_path, &meta_path).err().expect("load fails");
    assert!(err.is_not_found());

    let predict_err = PredictError::from(err);
    assert_eq!(predict_err.to_string(), "Model file not found.");
    println!("✓ Surfaced as: {}", predict_err);
}

#[test]
fn test_model_errors_are_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.bin");
    fs::write(&model_path, b"not a model").unwrap();
    let meta_path = dir.path().join("model.meta.json");

    // Schema sidecar missing
    let err = load_model(&model_path, &meta_path).err().unwrap();
    assert!(matches!(err, ModelError::NotFound { ref path } if path == &meta_path));

    // Schema sidecar not JSON
    fs::write(&meta_path, "feat_list = [age]").unwrap();
    let err = load_model(&model_path, &meta_path).err().unwrap();
    assert!(matches!(err, ModelError::Schema { .. }));
    assert!(!err.is_not_found());

    // Unknown format
    fs::write(&meta_path, r#"{"feat_list": ["age"]}"#).unwrap();
    let err = load_model(&model_path, &meta_path).err().unwrap();
    assert!(matches!(err, ModelError::Unsupported { .. }));
    assert!(PredictError::from(err)
        .to_string()
        .starts_with("Error during prediction: "));
}

#[test]
fn test_meta_sidecar_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let meta_path = dir.path().join("model.meta.json");
    fs::write(
        &meta_path,
        r#"{"feat_list": ["days_injured", "age"], "in_dim": 3, "outputs": ["pts", "reb", "ast"]}"#,
    )
    .unwrap();

    let meta = ModelMeta::load(&meta_path).unwrap();
    assert_eq!(meta.feat_list, vec!["days_injured", "age"]);
    assert_eq!(meta.in_dim(), 2, "feat_list wins over in_dim");
    assert_eq!(meta.outputs.len(), 3);
    assert!(ModelMeta::load(Path::new("missing.meta.json")).unwrap_err().is_not_found());
}

#[test]
fn test_schema_mismatch_reported_not_panicking() {
    struct ShortModel(MockModel);
    impl nba_injury_predictor::model::InjuryModel for ShortModel {
        fn feature_names(&self) -> &[String] {
            &self.0.feat_list
        }
        fn predict(
            &self,
            _rows: &[Vec<f32>],
        ) -> Result<Vec<[f32; 3]>, ModelError> {
            Err(ModelError::Shape(vec![1, 2]))
        }
    }

    let model = Arc::new(ShortModel(MockModel::new(common::trained_schema(), [0.0; 3])));
    let form = collect(&common::roster(), &jane_input()).unwrap();
    let err = predict(model.as_ref(), &form.feature_record()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error during prediction: unexpected model output size: [1, 2]"
    );
}
