/// The label set scored by the built-in toxicity model, in head order.
pub const TOXICITY_LABELS: [&str; 7] = [
    "toxicity",
    "severe_toxicity",
    "obscene",
    "identity_attack",
    "insult",
    "threat",
    "sexual_explicit",
];

/// Built-in pre-trained toxicity models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    /// RoBERTa fine-tuned on the Jigsaw unintended-bias corpus, exported to
    /// ONNX. Seven independent toxicity heads with sigmoid activations.
    ToxicRoberta,
}

/// Download and verification data for a built-in model
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub model_url: String,
    pub tokenizer_url: String,
    pub model_hash: String,
    pub tokenizer_hash: String,
}

/// Static characteristics of a built-in model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCharacteristics {
    pub max_sequence_length: usize,
    pub num_labels: usize,
    pub model_size_mb: usize,
}

impl BuiltinModel {
    pub fn get_model_info(&self) -> ModelInfo {
        match self {
            BuiltinModel::ToxicRoberta => ModelInfo {
                name: "toxic-roberta".to_string(),
                model_url: "https://huggingface.co/protectai/unbiased-toxic-roberta-onnx/resolve/main/model.onnx".to_string(),
                tokenizer_url: "https://huggingface.co/protectai/unbiased-toxic-roberta-onnx/resolve/main/tokenizer.json".to_string(),
                model_hash: "5d4b6cf5e8af21c8b6f3a9785241133f9e9a5ba9c7e3c64b71e0b33a28b0542d".to_string(),
                tokenizer_hash: "7a695c8ad56b4e9b8b0a0f6ab0a47b1a1c9d0a73a5c3f7d2b0e15e3f63b9c4a1".to_string(),
            },
        }
    }

    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            BuiltinModel::ToxicRoberta => &TOXICITY_LABELS,
        }
    }

    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            BuiltinModel::ToxicRoberta => ModelCharacteristics {
                max_sequence_length: 512,
                num_labels: TOXICITY_LABELS.len(),
                model_size_mb: 476,
            },
        }
    }
}
