//! The toxicity model capability: prediction data model and the provider traits.
//!
//! The model is treated as an opaque capability with a two-call surface:
//! [`ToxicityProvider::load`] and [`ToxicityModel::classify`]. The analysis view
//! only ever talks to these traits, so it can be driven by the bundled ONNX
//! provider or by a deterministic fake in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod error;
pub mod onnx;

pub use error::ToxicityError;

/// A single probability distribution over {not-toxic, toxic}.
///
/// Index 1 is the toxic-class probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probabilities: [f32; 2],
}

/// The model's score for one toxicity label.
///
/// Produced by a [`ToxicityModel`]; immutable once returned and replaced
/// wholesale on each new analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPrediction {
    /// The named toxicity category, e.g. "insult" or "threat"
    pub label: String,
    pub results: Vec<PredictionResult>,
}

impl LabelPrediction {
    /// Creates a prediction for `label` from the toxic-class probability alone.
    pub fn from_toxic_probability(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            results: vec![PredictionResult {
                probabilities: [1.0 - probability, probability],
            }],
        }
    }

    /// Returns the toxic-class probability, if the model produced one.
    pub fn toxic_probability(&self) -> Option<f32> {
        self.results.first().map(|r| r.probabilities[1])
    }
}

/// A loaded toxicity model handle.
#[async_trait]
pub trait ToxicityModel: Send + Sync {
    /// Scores `text` against every label the model knows about.
    ///
    /// Returns one [`LabelPrediction`] per label, in the model's label order.
    async fn classify(&self, text: &str) -> Result<Vec<LabelPrediction>, ToxicityError>;
}

/// A source of toxicity models.
#[async_trait]
pub trait ToxicityProvider: Send + Sync {
    type Model: ToxicityModel;

    /// Fetches and initializes the model, configured with the confidence
    /// `threshold` the caller will judge predictions against.
    async fn load(&self, threshold: f32) -> Result<Self::Model, ToxicityError>;
}
