//! The bundled ONNX toxicity provider.
//!
//! Wraps a pre-trained multi-head toxicity classifier: a `tokenizers` tokenizer
//! plus an ONNX Runtime session whose single output is one logit per label.
//! The provider fetches the files through [`ModelManager`] on load, so a cold
//! `load()` behaves like the original model library's CDN fetch.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use ndarray::{Array1, Array2};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;

use super::{LabelPrediction, PredictionResult, ToxicityError, ToxicityModel, ToxicityProvider};
use crate::model_manager::ModelManager;
use crate::models::{BuiltinModel, ModelCharacteristics};
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Loads [`OnnxToxicityModel`]s from a built-in pre-trained model.
pub struct OnnxToxicityProvider {
    manager: ModelManager,
    model: BuiltinModel,
    runtime_config: RuntimeConfig,
}

impl OnnxToxicityProvider {
    pub fn new(manager: ModelManager, model: BuiltinModel) -> Self {
        Self {
            manager,
            model,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Creates a provider for `model` backed by the default cache directory.
    pub fn builtin(model: BuiltinModel) -> Result<Self, ToxicityError> {
        let manager = ModelManager::new_default()
            .map_err(|e| ToxicityError::Load(format!("Failed to create model manager: {}", e)))?;
        Ok(Self::new(manager, model))
    }

    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Validates that the model has the expected input/output structure
    fn validate_model(session: &Session) -> Result<(), ToxicityError> {
        // Check inputs
        let inputs = &session.inputs;
        if inputs.len() < 2 {
            return Err(ToxicityError::Model(format!(
                "Model must have at least 2 inputs (input_ids and attention_mask), found {}",
                inputs.len()
            )));
        }

        // Check outputs
        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(ToxicityError::Model(
                "Model must have at least 1 output for label logits".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl ToxicityProvider for OnnxToxicityProvider {
    type Model = OnnxToxicityModel;

    async fn load(&self, threshold: f32) -> Result<OnnxToxicityModel, ToxicityError> {
        if !(0.0..=1.0).contains(&threshold) || threshold == 0.0 {
            return Err(ToxicityError::Validation(format!(
                "Threshold must lie in (0, 1], got {}",
                threshold
            )));
        }

        self.manager
            .ensure_model_downloaded(self.model)
            .await
            .map_err(|e| ToxicityError::Load(e.to_string()))?;

        let model_path = self.manager.get_model_path(self.model);
        let tokenizer_path = self.manager.get_tokenizer_path(self.model);

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            log::error!("Failed to load tokenizer: {}", e);
            ToxicityError::Load(format!("Failed to load tokenizer: {}", e))
        })?;
        info!("Tokenizer loaded successfully");

        // Create session using the singleton environment
        let session = create_session_builder(&self.runtime_config)
            .map_err(|e| ToxicityError::Load(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e| ToxicityError::Load(e.to_string()))?;

        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        Ok(OnnxToxicityModel {
            tokenizer: Arc::new(tokenizer),
            session: Arc::new(session),
            labels: self.model.labels(),
            characteristics: self.model.characteristics(),
            threshold,
        })
    }
}

/// A loaded toxicity model handle.
///
/// Automatically `Send + Sync`: the tokenizer and session are shared through
/// `Arc`, everything else is plain data.
#[derive(Debug)]
pub struct OnnxToxicityModel {
    tokenizer: Arc<Tokenizer>,
    session: Arc<Session>,
    labels: &'static [&'static str],
    characteristics: ModelCharacteristics,
    threshold: f32,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<OnnxToxicityModel>();
    }
};

impl OnnxToxicityModel {
    /// The confidence threshold this model was configured with at load time.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Converts text into token IDs suitable for model input, truncated to the
    /// model's maximum sequence length.
    fn tokenize(&self, text: &str) -> Result<Vec<u32>, ToxicityError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ToxicityError::Tokenizer(e.to_string()))?;
        let token_ids = encoding.get_ids();

        let max_length = self.characteristics.max_sequence_length;
        let token_ids = if token_ids.len() > max_length {
            &token_ids[..max_length]
        } else {
            token_ids
        };

        Ok(token_ids.to_vec())
    }

    /// Runs the session over the token IDs and returns one sigmoid probability
    /// per label, in label order.
    fn run_inference(&self, tokens: &[u32]) -> Result<Vec<f32>, ToxicityError> {
        let input_array = Array2::from_shape_vec(
            (1, tokens.len()),
            tokens.iter().map(|&x| x as i64).collect(),
        )
        .map_err(|e| ToxicityError::Inference(format!("Failed to create input array: {}", e)))?;
        let input_dyn = input_array.into_dyn();
        let input_ids = input_dyn.as_standard_layout();

        let mask_array = Array2::from_shape_vec((1, tokens.len()), attention_mask(tokens))
            .map_err(|e| ToxicityError::Inference(format!("Failed to create mask array: {}", e)))?;
        let mask_dyn = mask_array.into_dyn();
        let attention_mask = mask_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            "input_ids",
            Tensor::from_array(&input_ids).map_err(|e| {
                ToxicityError::Inference(format!("Failed to create input tensor: {}", e))
            })?,
        );
        input_tensors.insert(
            "attention_mask",
            Tensor::from_array(&attention_mask).map_err(|e| {
                ToxicityError::Inference(format!("Failed to create mask tensor: {}", e))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ToxicityError::Inference(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ToxicityError::Inference(format!("Failed to extract output tensor: {}", e))
        })?;

        let logits = output_tensor.slice(ndarray::s![0, ..]);
        let scores: Array1<f32> = logits.iter().map(|&x| sigmoid(x)).collect();

        if scores.len() != self.labels.len() {
            return Err(ToxicityError::Inference(format!(
                "Model produced {} scores for {} labels",
                scores.len(),
                self.labels.len()
            )));
        }

        Ok(scores.to_vec())
    }
}

#[async_trait]
impl ToxicityModel for OnnxToxicityModel {
    async fn classify(&self, text: &str) -> Result<Vec<LabelPrediction>, ToxicityError> {
        if text.trim().is_empty() {
            return Err(ToxicityError::Validation(
                "Input text cannot be empty".into(),
            ));
        }

        let tokens = self.tokenize(text)?;
        let scores = self.run_inference(&tokens)?;

        Ok(self
            .labels
            .iter()
            .zip(scores)
            .map(|(label, score)| LabelPrediction {
                label: (*label).to_string(),
                results: vec![PredictionResult {
                    probabilities: [1.0 - score, score],
                }],
            })
            .collect())
    }
}

/// Attention mask over a single unpadded sequence: every position is real.
///
/// Token id 0 is `<s>` in this vocabulary, not padding, so the mask must not
/// be derived from token ids.
fn attention_mask(tokens: &[u32]) -> Vec<i64> {
    vec![1i64; tokens.len()]
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attention_mask_keeps_bos_token() {
        // A RoBERTa encoding starts with <s> (id 0); it must stay attended
        let tokens = vec![0u32, 3592, 2];
        assert_eq!(attention_mask(&tokens), vec![1i64, 1, 1]);
    }

    #[test]
    fn test_attention_mask_length() {
        assert!(attention_mask(&[]).is_empty());
        assert_eq!(attention_mask(&[5, 0, 7, 0]), vec![1i64; 4]);
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }
}
