use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "torch")]
mod torchscript;

#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
#[cfg(feature = "torch")]
pub use torchscript::TorchScriptModel;

/// Values produced per row: change in points, rebounds, assists.
pub const OUTPUT_WIDTH: usize = 3;

/// A pre-trained regressor consumed as a black box.
pub trait InjuryModel: Send + Sync {
    /// Ordered input columns the model was trained on.
    fn feature_names(&self) -> &[String];

    /// One output triple per input row. Each row must be
    /// `feature_names().len()` long.
    fn predict(&self, rows: &[Vec<f32>]) -> Result<Vec<[f32; OUTPUT_WIDTH]>, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read model schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid model schema {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to load model {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("unsupported model {}: {reason}", path.display())]
    Unsupported { path: PathBuf, reason: String },

    #[error("feature length mismatch: got {got}, expected {expected}")]
    FeatureLength { got: usize, expected: usize },

    #[error("unexpected model output size: {0:?}")]
    Shape(Vec<usize>),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl ModelError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound { .. })
    }
}

/// Schema sidecar written next to the exported model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMeta {
    pub feat_list: Vec<String>,
    pub in_dim: Option<usize>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl ModelMeta {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let txt = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let meta: ModelMeta = serde_json::from_str(&txt).map_err(|source| ModelError::Schema {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(in_dim) = meta.in_dim {
            if in_dim != meta.feat_list.len() {
                tracing::warn!(
                    "meta.in_dim ({}) != feat_list.len() ({}); using feat_list.len()",
                    in_dim,
                    meta.feat_list.len()
                );
            }
        }
        Ok(meta)
    }

    pub fn in_dim(&self) -> usize {
        self.feat_list.len()
    }
}

/// Load the model at `model_path` with its schema at `meta_path`.
///
/// The adapter is chosen by file extension: `.pt`/`.ts` for TorchScript,
/// `.onnx` for ONNX. Missing files are reported as [`ModelError::NotFound`].
pub fn load_model(model_path: &Path, meta_path: &Path) -> Result<Arc<dyn InjuryModel>, ModelError> {
    if !model_path.exists() {
        return Err(ModelError::NotFound {
            path: model_path.to_path_buf(),
        });
    }
    let meta = ModelMeta::load(meta_path)?;

    let ext = model_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let model: Arc<dyn InjuryModel> = match ext.as_str() {
        "pt" | "ts" => load_torchscript(model_path, meta)?,
        "onnx" => load_onnx(model_path, meta)?,
        _ => {
            return Err(ModelError::Unsupported {
                path: model_path.to_path_buf(),
                reason: format!("unknown model extension `{ext}`"),
            })
        }
    };

    tracing::info!(
        "loaded model {}; feat_list[{}]: {:?}",
        model_path.display(),
        model.feature_names().len(),
        model.feature_names()
    );
    Ok(model)
}

#[cfg(feature = "torch")]
fn load_torchscript(path: &Path, meta: ModelMeta) -> Result<Arc<dyn InjuryModel>, ModelError> {
    Ok(Arc::new(TorchScriptModel::load(path, meta)?))
}

#[cfg(not(feature = "torch"))]
fn load_torchscript(path: &Path, _meta: ModelMeta) -> Result<Arc<dyn InjuryModel>, ModelError> {
    Err(ModelError::Unsupported {
        path: path.to_path_buf(),
        reason: "built without the `torch` feature".to_string(),
    })
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path, meta: ModelMeta) -> Result<Arc<dyn InjuryModel>, ModelError> {
    Ok(Arc::new(OnnxModel::load(path, meta)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path, _meta: ModelMeta) -> Result<Arc<dyn InjuryModel>, ModelError> {
    Err(ModelError::Unsupported {
        path: path.to_path_buf(),
        reason: "built without the `onnx` feature".to_string(),
    })
}

/// Check every row against the expected input width.
pub(crate) fn check_rows(rows: &[Vec<f32>], in_dim: usize) -> Result<(), ModelError> {
    match rows.iter().find(|row| row.len() != in_dim) {
        Some(row) => Err(ModelError::FeatureLength {
            got: row.len(),
            expected: in_dim,
        }),
        None => Ok(()),
    }
}

/// Split a flat `[n_rows * OUTPUT_WIDTH]` buffer into per-row triples.
pub(crate) fn split_outputs(
    flat: &[f32],
    n_rows: usize,
    shape: Vec<usize>,
) -> Result<Vec<[f32; OUTPUT_WIDTH]>, ModelError> {
    if flat.len() != n_rows * OUTPUT_WIDTH {
        return Err(ModelError::Shape(shape));
    }
    Ok(flat
        .chunks_exact(OUTPUT_WIDTH)
        .map(|c| [c[0], c[1], c[2]])
        .collect())
}
