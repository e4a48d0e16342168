//! ONNX adapter (pure Rust via `tract-onnx`), the usual target when a
//! scikit-learn regressor is exported with skl2onnx.

use std::path::Path;
use tract_onnx::prelude::*;

use super::{check_rows, split_outputs, InjuryModel, ModelError, ModelMeta, OUTPUT_WIDTH};

pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
    feat_list: Vec<String>,
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("feat_list", &self.feat_list)
            .finish()
    }
}

impl OnnxModel {
    /// Load the graph and specialize it to a `[1, in_dim]` f32 input.
    pub fn load(model_path: &Path, meta: ModelMeta) -> Result<Self, ModelError> {
        let in_dim = meta.in_dim();
        if in_dim == 0 {
            return Err(ModelError::Load {
                path: model_path.to_path_buf(),
                message: "feat_list is empty".to_string(),
            });
        }
        let load_err = |stage: &str, e: TractError| ModelError::Load {
            path: model_path.to_path_buf(),
            message: format!("onnx {stage} failed: {e}"),
        };

        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .map_err(|e| load_err("load", e))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, in_dim)),
            )
            .map_err(|e| load_err("input fact", e))?
            .into_optimized()
            .map_err(|e| load_err("optimize", e))?
            .into_runnable()
            .map_err(|e| load_err("runnable", e))?;

        let mdl = Self {
            plan,
            feat_list: meta.feat_list,
        };

        // Dummy forward to confirm the output carries three values.
        mdl.predict(&[vec![0.0; in_dim]])?;
        tracing::info!("warmup forward ok");

        Ok(mdl)
    }

    fn run_row(&self, row: &[f32]) -> Result<[f32; OUTPUT_WIDTH], ModelError> {
        let tensor = tract_ndarray::ArrayD::<f32>::from_shape_vec(
            tract_ndarray::IxDyn(&[1, row.len()]),
            row.to_vec(),
        )
        .map_err(|e| ModelError::Inference(format!("onnx input reshape failed: {e}")))?
        .into_tvalue();

        let outputs = self
            .plan
            .run(tvec!(tensor))
            .map_err(|e| ModelError::Inference(format!("onnx run failed: {e}")))?;
        let Some(out0) = outputs.first() else {
            return Err(ModelError::Inference("onnx produced no outputs".to_string()));
        };

        let arr = out0
            .to_array_view::<f32>()
            .map_err(|e| ModelError::Inference(format!("onnx output decode failed: {e}")))?;
        let values: Vec<f32> = arr.iter().copied().collect();
        let mut triples = split_outputs(&values, 1, arr.shape().to_vec())?;
        Ok(triples.remove(0))
    }
}

impl InjuryModel for OnnxModel {
    fn feature_names(&self) -> &[String] {
        &self.feat_list
    }

    fn predict(&self, rows: &[Vec<f32>]) -> Result<Vec<[f32; OUTPUT_WIDTH]>, ModelError> {
        check_rows(rows, self.feat_list.len())?;
        rows.iter().map(|row| self.run_row(row)).collect()
    }
}
