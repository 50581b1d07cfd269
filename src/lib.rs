//! A text toxicity analyzer: an injectable pre-trained model provider plus a
//! self-contained analysis view.
//!
//! The view loads the model once on mount, classifies free-text input on
//! demand, and derives a toxic/not-toxic verdict per label by comparing the
//! toxic-class probability against a single configured threshold.
//!
//! # Basic Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use amygdala::{
//!     result_rows, AnalysisConfig, AnalysisSession, BuiltinModel, OnnxToxicityProvider,
//! };
//!
//! let provider = OnnxToxicityProvider::builtin(BuiltinModel::ToxicRoberta)?;
//! let config = AnalysisConfig::default();
//! let mut session = AnalysisSession::new(provider, config);
//!
//! session.mount().await;
//! session.set_input("you are all wonderful people");
//! session.analyze().await;
//!
//! for row in result_rows(session.state().predictions(), config.threshold) {
//!     println!("{}", row);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Testability
//!
//! The view only talks to the [`ToxicityProvider`] and [`ToxicityModel`]
//! traits, so it can be driven by a deterministic fake provider in tests. All
//! rendering decisions (verdict, percentage text, status line, layout) are
//! pure functions of the view state.

pub mod analysis;
pub mod config;
pub mod model_manager;
pub mod models;
mod runtime;
pub mod toxicity;

pub use analysis::{
    action_label, display_label, format_percentage, result_row, result_rows, status_line,
    verdict, viewport_width, AnalysisEvent, AnalysisPhase, AnalysisSession, AnalysisState,
    LayoutParams, Verdict, DEFAULT_VIEWPORT_WIDTH, MOBILE_BREAKPOINT,
};
pub use config::{AnalysisConfig, DEFAULT_THRESHOLD};
pub use model_manager::{ModelError, ModelManager};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo, TOXICITY_LABELS};
pub use runtime::{create_session_builder, RuntimeConfig};
pub use toxicity::onnx::{OnnxToxicityModel, OnnxToxicityProvider};
pub use toxicity::{
    LabelPrediction, PredictionResult, ToxicityError, ToxicityModel, ToxicityProvider,
};

pub fn init_logger() {
    env_logger::init();
}
