//! The analysis view's state machine.
//!
//! Phases encode the full modelHandle-present x isLoading combination, so the
//! derived render logic never inspects more than the phase, the input text and
//! the prediction list. Asynchronous completions carry the epoch they were
//! started under; a completion whose epoch no longer matches (the view was torn
//! down in between) is discarded instead of applied.

use crate::toxicity::LabelPrediction;

/// Where the view is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// Mounted but the model load has not started yet
    Initial,
    /// The model load is in flight
    LoadingModel,
    /// Model handle present, no operation in flight
    Ready,
    /// A classify call is in flight
    Analyzing,
    /// The model load was rejected; analyze stays disabled until a full reload
    LoadFailed,
}

/// Events that drive the state machine. Started events are emitted
/// synchronously; Resolved/Rejected events arrive from asynchronous
/// completions.
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    LoadStarted,
    LoadResolved,
    LoadRejected,
    AnalyzeStarted,
    ClassifyResolved(Vec<LabelPrediction>),
    ClassifyRejected,
}

#[derive(Debug)]
pub struct AnalysisState {
    phase: AnalysisPhase,
    input: String,
    predictions: Vec<LabelPrediction>,
    epoch: u64,
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisState {
    pub fn new() -> Self {
        Self {
            phase: AnalysisPhase::Initial,
            input: String::new(),
            predictions: Vec::new(),
            epoch: 0,
        }
    }

    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    /// The epoch asynchronous completions must present to be applied.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn predictions(&self) -> &[LabelPrediction] {
        &self.predictions
    }

    /// Whether a model handle is held.
    pub fn model_present(&self) -> bool {
        matches!(self.phase, AnalysisPhase::Ready | AnalysisPhase::Analyzing)
    }

    /// Whether a load or classify call is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            AnalysisPhase::LoadingModel | AnalysisPhase::Analyzing
        )
    }

    /// Whether the analyze action would do anything. Mirrors the enabled state
    /// of the analyze control: model present, nothing in flight, and the
    /// trimmed input non-empty.
    pub fn analyze_enabled(&self) -> bool {
        self.phase == AnalysisPhase::Ready && !self.input.trim().is_empty()
    }

    /// Invalidates every outstanding asynchronous completion. Called on
    /// teardown so late-arriving results are discarded.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }

    /// Applies `event` if `epoch` is current and the transition is valid.
    /// Returns whether the event was applied; stale or invalid events leave
    /// the state untouched.
    pub fn apply(&mut self, epoch: u64, event: AnalysisEvent) -> bool {
        if epoch != self.epoch {
            log::debug!("Discarding stale {:?} (epoch {} != {})", event, epoch, self.epoch);
            return false;
        }

        match (self.phase, event) {
            (AnalysisPhase::Initial, AnalysisEvent::LoadStarted) => {
                self.phase = AnalysisPhase::LoadingModel;
            }
            (AnalysisPhase::LoadingModel, AnalysisEvent::LoadResolved) => {
                self.phase = AnalysisPhase::Ready;
            }
            (AnalysisPhase::LoadingModel, AnalysisEvent::LoadRejected) => {
                self.phase = AnalysisPhase::LoadFailed;
            }
            (AnalysisPhase::Ready, AnalysisEvent::AnalyzeStarted) => {
                self.phase = AnalysisPhase::Analyzing;
            }
            (AnalysisPhase::Analyzing, AnalysisEvent::ClassifyResolved(predictions)) => {
                // Replaced wholesale, never merged
                self.predictions = predictions;
                self.phase = AnalysisPhase::Ready;
            }
            (AnalysisPhase::Analyzing, AnalysisEvent::ClassifyRejected) => {
                // Prior predictions stay on display
                self.phase = AnalysisPhase::Ready;
            }
            (phase, event) => {
                log::debug!("Ignoring {:?} in phase {:?}", event, phase);
                return false;
            }
        }
        true
    }
}
