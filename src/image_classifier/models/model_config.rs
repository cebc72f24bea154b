use crate::image_preprocessor::TargetSize;
use std::path::PathBuf;

// Only the tract backend reads these.
#[cfg_attr(not(feature = "backend-tract"), allow(dead_code))]
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Normalization {
    pub fn imagenet() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }
}

#[cfg_attr(not(feature = "backend-tract"), allow(dead_code))]
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    pub labels_path: PathBuf,
    pub input_size: TargetSize,
    pub normalization: Normalization,
    /// Set when the model emits logits rather than probabilities.
    pub apply_softmax: bool,
    pub top_k: usize,
}

impl ModelConfig {
    pub fn mobilenet_v2(onnx_model_path: PathBuf, labels_path: PathBuf) -> Self {
        Self {
            onnx_model_path,
            labels_path,
            input_size: TargetSize::square(224),
            normalization: Normalization::imagenet(),
            apply_softmax: true,
            top_k: 5,
        }
    }
}
