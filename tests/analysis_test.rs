use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use amygdala::{
    result_rows, status_line, AnalysisConfig, AnalysisPhase, AnalysisSession, LabelPrediction,
    ToxicityError, ToxicityModel, ToxicityProvider,
};

/// What a scripted classify call should produce.
enum MockOutcome {
    Predictions(Vec<LabelPrediction>),
    Failure,
}

#[derive(Clone, Default)]
struct MockStats {
    load_calls: Arc<AtomicUsize>,
    classify_calls: Arc<AtomicUsize>,
    thresholds: Arc<Mutex<Vec<f32>>>,
}

impl MockStats {
    fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }
}

/// Deterministic provider: optionally fails the load, otherwise hands out a
/// model that replays a script of classify outcomes and then settles on the
/// default prediction list.
struct MockProvider {
    stats: MockStats,
    fail_load: bool,
    default_predictions: Vec<LabelPrediction>,
    script: Arc<Mutex<VecDeque<MockOutcome>>>,
}

impl MockProvider {
    fn new(default_predictions: Vec<LabelPrediction>) -> Self {
        Self {
            stats: MockStats::default(),
            fail_load: false,
            default_predictions,
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    fn failing_load() -> Self {
        let mut provider = Self::new(vec![]);
        provider.fail_load = true;
        provider
    }

    fn stats(&self) -> MockStats {
        self.stats.clone()
    }

    fn push_outcome(&self, outcome: MockOutcome) {
        self.script.lock().unwrap().push_back(outcome);
    }
}

struct MockModel {
    stats: MockStats,
    default_predictions: Vec<LabelPrediction>,
    script: Arc<Mutex<VecDeque<MockOutcome>>>,
}

#[async_trait]
impl ToxicityModel for MockModel {
    async fn classify(&self, _text: &str) -> Result<Vec<LabelPrediction>, ToxicityError> {
        self.stats.classify_calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(MockOutcome::Predictions(predictions)) => Ok(predictions),
            Some(MockOutcome::Failure) => {
                Err(ToxicityError::Inference("mock inference failure".into()))
            }
            None => Ok(self.default_predictions.clone()),
        }
    }
}

#[async_trait]
impl ToxicityProvider for MockProvider {
    type Model = MockModel;

    async fn load(&self, threshold: f32) -> Result<MockModel, ToxicityError> {
        self.stats.load_calls.fetch_add(1, Ordering::SeqCst);
        self.stats.thresholds.lock().unwrap().push(threshold);
        if self.fail_load {
            return Err(ToxicityError::Load("mock load failure".into()));
        }
        Ok(MockModel {
            stats: self.stats.clone(),
            default_predictions: self.default_predictions.clone(),
            script: Arc::clone(&self.script),
        })
    }
}

fn sample_predictions() -> Vec<LabelPrediction> {
    vec![
        LabelPrediction::from_toxic_probability("identity_attack", 0.95),
        LabelPrediction::from_toxic_probability("insult", 0.10),
    ]
}

fn ready_session(provider: MockProvider) -> AnalysisSession<MockProvider> {
    AnalysisSession::new(provider, AnalysisConfig::default())
}

#[tokio::test]
async fn test_mount_loads_model_exactly_once() {
    let provider = MockProvider::new(sample_predictions());
    let stats = provider.stats();
    let mut session = ready_session(provider);

    session.mount().await;
    session.mount().await;
    session.mount().await;

    assert_eq!(stats.load_calls(), 1);
    assert_eq!(session.state().phase(), AnalysisPhase::Ready);
}

#[tokio::test]
async fn test_mount_passes_configured_threshold() {
    let provider = MockProvider::new(sample_predictions());
    let stats = provider.stats();
    let mut session = AnalysisSession::new(provider, AnalysisConfig::new(0.65));

    session.mount().await;

    assert_eq!(*stats.thresholds.lock().unwrap(), vec![0.65]);
}

#[tokio::test]
async fn test_analyze_is_noop_without_model() {
    let provider = MockProvider::new(sample_predictions());
    let stats = provider.stats();
    let mut session = ready_session(provider);

    session.set_input("some text");
    session.analyze().await;

    assert_eq!(stats.classify_calls(), 0);
    assert_eq!(session.state().phase(), AnalysisPhase::Initial);
    assert!(session.state().predictions().is_empty());
}

#[tokio::test]
async fn test_analyze_is_noop_for_blank_input() {
    let provider = MockProvider::new(sample_predictions());
    let stats = provider.stats();
    let mut session = ready_session(provider);
    session.mount().await;

    session.analyze().await;
    session.set_input("   \t  ");
    session.analyze().await;

    assert_eq!(stats.classify_calls(), 0);
    assert!(session.state().predictions().is_empty());
}

#[tokio::test]
async fn test_load_failure_disables_analyze_permanently() {
    let provider = MockProvider::failing_load();
    let stats = provider.stats();
    let mut session = ready_session(provider);

    session.mount().await;
    assert_eq!(session.state().phase(), AnalysisPhase::LoadFailed);
    assert!(!session.state().model_present());

    session.set_input("clearly toxic text");
    session.analyze().await;
    assert_eq!(stats.classify_calls(), 0);

    // Re-mounting does not retry either; recovery requires a full reload
    session.mount().await;
    assert_eq!(stats.load_calls(), 1);
    assert_eq!(session.state().phase(), AnalysisPhase::LoadFailed);

    // The UI keeps showing the model-loading text, never an error
    assert_eq!(status_line(session.state()), Some("Loading toxicity model..."));
}

#[tokio::test]
async fn test_classify_success_replaces_predictions_wholesale() {
    let provider = MockProvider::new(sample_predictions());
    let replacement = vec![LabelPrediction::from_toxic_probability("threat", 0.42)];
    provider.push_outcome(MockOutcome::Predictions(sample_predictions()));
    provider.push_outcome(MockOutcome::Predictions(replacement.clone()));
    let mut session = ready_session(provider);
    session.mount().await;

    session.set_input("first");
    session.analyze().await;
    assert_eq!(session.state().predictions().len(), 2);

    session.set_input("second");
    session.analyze().await;
    assert_eq!(session.state().predictions(), replacement.as_slice());
}

#[tokio::test]
async fn test_classify_failure_keeps_prior_predictions() {
    let provider = MockProvider::new(sample_predictions());
    provider.push_outcome(MockOutcome::Predictions(sample_predictions()));
    provider.push_outcome(MockOutcome::Failure);
    let mut session = ready_session(provider);
    session.mount().await;

    session.set_input("first");
    session.analyze().await;
    let before = session.state().predictions().to_vec();
    assert!(!before.is_empty());

    session.set_input("second");
    session.analyze().await;

    assert_eq!(session.state().predictions(), before.as_slice());
    assert!(!session.state().is_loading());
    assert_eq!(session.state().phase(), AnalysisPhase::Ready);
}

#[tokio::test]
async fn test_repeated_analyze_is_idempotent() {
    let provider = MockProvider::new(sample_predictions());
    let mut session = ready_session(provider);
    session.mount().await;
    session.set_input("the same text every time");

    session.analyze().await;
    let first = session.state().predictions().to_vec();
    session.analyze().await;

    assert_eq!(session.state().predictions(), first.as_slice());
}

#[tokio::test]
async fn test_rendered_rows_for_sample_predictions() {
    let provider = MockProvider::new(sample_predictions());
    let mut session = ready_session(provider);
    session.mount().await;
    session.set_input("some text");
    session.analyze().await;

    let rows = result_rows(
        session.state().predictions(),
        session.config().threshold,
    );
    assert_eq!(
        rows,
        vec![
            "Identity_attack: Toxic (95.00%)".to_string(),
            "Insult: Not Toxic (10.00%)".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_teardown_drops_model_and_invalidates() {
    let provider = MockProvider::new(sample_predictions());
    let stats = provider.stats();
    let mut session = ready_session(provider);
    session.mount().await;
    session.set_input("text");

    session.teardown();
    session.analyze().await;

    assert_eq!(stats.classify_calls(), 0);
}
