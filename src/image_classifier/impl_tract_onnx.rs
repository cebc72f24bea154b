use crate::error::ClassificationError;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::ranking::{rank, softmax};
use crate::image_classifier::tract::image::image_to_tensor;
use crate::library::logger::interface::Logger;
use crate::photo::Image;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("classifier").with_namespace("tract");

        logger.info(&format!(
            "Loading model from {}",
            config.onnx_model_path.display()
        ))?;

        let labels = load_labels(&config.labels_path)?;

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    f32::datum_type(),
                    tvec!(
                        1,
                        3,
                        config.input_size.height as usize,
                        config.input_size.width as usize
                    ),
                ),
            )?
            .into_optimized()?
            .into_runnable()?;

        logger.info(&format!("Model ready with {} labels", labels.len()))?;

        Ok(Self {
            model,
            labels,
            config,
            logger,
        })
    }

    fn scores(&self, image: &Image) -> Result<Vec<f32>, ClassificationError> {
        let input = image_to_tensor(image.pixels(), &self.config.normalization);
        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassificationError::ServiceFailure(e.to_string()))?;

        let output = outputs.first().ok_or_else(|| {
            ClassificationError::ServiceFailure("model produced no outputs".to_string())
        })?;

        let view = output
            .to_array_view::<f32>()
            .map_err(|e| ClassificationError::ServiceFailure(e.to_string()))?;

        Ok(view.iter().cloned().collect())
    }
}

fn load_labels(path: &Path) -> Result<Vec<String>, std::io::Error> {
    Ok(std::fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &Image) -> Result<Vec<Classification>, ClassificationError> {
        let expected = self.config.input_size;
        if image.width() != expected.width || image.height() != expected.height {
            return Err(ClassificationError::ServiceFailure(format!(
                "image size {}x{} does not match model input {}x{}",
                image.width(),
                image.height(),
                expected.width,
                expected.height
            )));
        }

        let scores = self.scores(image)?;

        let scores = if self.config.apply_softmax {
            softmax(&scores)
        } else {
            scores
        };

        let classifications = rank(&scores, &self.labels, self.config.top_k);

        let _ = self
            .logger
            .debug(&format!("Classifications: {:?}", classifications));

        Ok(classifications)
    }
}
