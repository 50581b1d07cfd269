//! Derived rendering logic: pure functions of the analysis state, never stored.

use std::fmt;

use super::state::AnalysisState;
use crate::toxicity::LabelPrediction;

/// The toxic/not-toxic decision for one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Toxic,
    NotToxic,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Toxic => write!(f, "Toxic"),
            Verdict::NotToxic => write!(f, "Not Toxic"),
        }
    }
}

/// Judges a toxic-class probability against the threshold.
pub fn verdict(probability: f32, threshold: f32) -> Verdict {
    if probability > threshold {
        Verdict::Toxic
    } else {
        Verdict::NotToxic
    }
}

/// Formats a probability as a percentage with two decimal places: "95.00".
pub fn format_percentage(probability: f32) -> String {
    format!("{:.2}", probability * 100.0)
}

/// Upper-cases only the first character of a label: "identity_attack" becomes
/// "Identity_attack".
pub fn display_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders one result row, e.g. "Identity_attack: Toxic (95.00%)".
///
/// Returns `None` when the model produced no probabilities for the label.
pub fn result_row(prediction: &LabelPrediction, threshold: f32) -> Option<String> {
    let probability = prediction.toxic_probability()?;
    Some(format!(
        "{}: {} ({}%)",
        display_label(&prediction.label),
        verdict(probability, threshold),
        format_percentage(probability)
    ))
}

/// Renders the result rows in the order the provider returned them.
pub fn result_rows(predictions: &[LabelPrediction], threshold: f32) -> Vec<String> {
    predictions
        .iter()
        .filter_map(|p| result_row(p, threshold))
        .collect()
}

/// The single status line, or nothing.
pub fn status_line(state: &AnalysisState) -> Option<&'static str> {
    if !state.model_present() {
        Some("Loading toxicity model...")
    } else if state.is_loading() {
        Some("Analyzing text...")
    } else {
        None
    }
}

/// Label for the analyze control.
pub fn action_label(state: &AnalysisState) -> &'static str {
    if state.is_loading() {
        "Processing..."
    } else {
        "Analyze Toxicity"
    }
}
