use log::error;

use super::state::{AnalysisEvent, AnalysisPhase, AnalysisState};
use crate::config::AnalysisConfig;
use crate::toxicity::{ToxicityModel, ToxicityProvider};

/// The analysis view: mediates between user input, the injected model provider
/// and the rendered state.
///
/// Load and classify failures are logged and swallowed; no error ever escapes
/// this boundary. The only observable effects of a failure are a diagnostic
/// log entry and the loading flag returning to false.
pub struct AnalysisSession<P: ToxicityProvider> {
    provider: P,
    config: AnalysisConfig,
    state: AnalysisState,
    model: Option<P::Model>,
}

impl<P: ToxicityProvider> AnalysisSession<P> {
    pub fn new(provider: P, config: AnalysisConfig) -> Self {
        Self {
            provider,
            config,
            state: AnalysisState::new(),
            model: None,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    /// Loads the model. Acts exactly once: every call after the first, in any
    /// phase, is a no-op, so re-invoking mount on re-render never re-triggers
    /// the load.
    pub async fn mount(&mut self) {
        if self.state.phase() != AnalysisPhase::Initial {
            return;
        }

        let epoch = self.state.epoch();
        self.state.apply(epoch, AnalysisEvent::LoadStarted);

        match self.provider.load(self.config.threshold).await {
            Ok(model) => {
                if self.state.apply(epoch, AnalysisEvent::LoadResolved) {
                    self.model = Some(model);
                }
            }
            Err(e) => {
                error!("Failed to load toxicity model: {}", e);
                self.state.apply(epoch, AnalysisEvent::LoadRejected);
            }
        }
    }

    /// Classifies the current input. A no-op unless the model is present, the
    /// trimmed input is non-empty and nothing is in flight.
    pub async fn analyze(&mut self) {
        if !self.state.analyze_enabled() {
            return;
        }
        let Some(model) = self.model.as_ref() else {
            return;
        };

        let epoch = self.state.epoch();
        self.state.apply(epoch, AnalysisEvent::AnalyzeStarted);
        let text = self.state.input().to_string();

        match model.classify(&text).await {
            Ok(predictions) => {
                self.state
                    .apply(epoch, AnalysisEvent::ClassifyResolved(predictions));
            }
            Err(e) => {
                error!("Toxicity analysis failed: {}", e);
                self.state.apply(epoch, AnalysisEvent::ClassifyRejected);
            }
        }
    }

    /// Tears the view down: any completion still outstanding is invalidated
    /// and the model handle is dropped.
    pub fn teardown(&mut self) {
        self.state.invalidate();
        self.model = None;
    }
}
