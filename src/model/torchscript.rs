use std::path::Path;
use tch::{kind::Kind, CModule, Device, Tensor};

use super::{check_rows, split_outputs, InjuryModel, ModelError, ModelMeta, OUTPUT_WIDTH};

/// Regressor exported to TorchScript (e.g. a random forest converted with
/// hummingbird). Input `[B, in_dim]` f32, output `[B, 3]`.
pub struct TorchScriptModel {
    model: CModule,
    device: Device,
    feat_list: Vec<String>,
}

impl TorchScriptModel {
    pub fn load(model_path: &Path, meta: ModelMeta) -> Result<Self, ModelError> {
        let device = Device::Cpu;

        let model = CModule::load_on_device(model_path, device).map_err(|e| ModelError::Load {
            path: model_path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mdl = Self {
            model,
            device,
            feat_list: meta.feat_list,
        };

        // Probe output size with a dummy forward; expect [1, 3]
        let dummy = vec![0.0; mdl.feat_list.len()];
        mdl.predict(&[dummy])?;
        tracing::info!("warmup forward ok");

        Ok(mdl)
    }
}

impl InjuryModel for TorchScriptModel {
    fn feature_names(&self) -> &[String] {
        &self.feat_list
    }

    fn predict(&self, rows: &[Vec<f32>]) -> Result<Vec<[f32; OUTPUT_WIDTH]>, ModelError> {
        let in_dim = self.feat_list.len();
        check_rows(rows, in_dim)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        let input = Tensor::from_slice(&flat)
            .reshape([rows.len() as i64, in_dim as i64])
            .to_device(self.device);

        let out = self
            .model
            .forward_ts(&[input])
            .map_err(|e| ModelError::Inference(e.to_string()))?
            .to_kind(Kind::Float)
            .to_device(Device::Cpu);

        let shape: Vec<usize> = out.size().iter().map(|d| *d as usize).collect();
        let numel: usize = shape.iter().product();
        let out = out.reshape([-1]);
        let values: Vec<f32> = (0..numel as i64)
            .map(|i| out.double_value(&[i]) as f32)
            .collect();

        split_outputs(&values, rows.len(), shape)
    }
}
