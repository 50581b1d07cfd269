use serde::{Deserialize, Serialize};

/// The default confidence threshold above which the toxic-class probability is
/// treated as a positive verdict.
pub const DEFAULT_THRESHOLD: f32 = 0.8;

/// Analysis configuration shared between the model provider and the renderer.
///
/// The same `threshold` value configures the provider at load time and decides
/// the toxic/not-toxic verdict at render time. Keeping it in one place makes
/// that coupling an explicit invariant instead of a shared literal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub threshold: f32,
}

impl AnalysisConfig {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
