use crate::classification_pipeline::ClassificationPipeline;
use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use crate::photo_classifier::core::{Effect, Event};
use crate::results_drawer::SelectionDelegate;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pipeline: ClassificationPipeline,
    selection_delegate: Arc<dyn SelectionDelegate + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        pipeline: ClassificationPipeline,
        selection_delegate: Arc<dyn SelectionDelegate + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            logger,
            device_camera,
            pipeline,
            selection_delegate,
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::CheckCamera => {
                let available = self.device_camera.is_available();
                let _ = self.event_sender.send(Event::CameraChecked(available));
            }
            Effect::CapturePhoto { request } => {
                let result = self.device_camera.capture_photo();
                let _ = self
                    .event_sender
                    .send(Event::CaptureDone { request, result });
            }
            Effect::Classify {
                request,
                photo,
                session,
            } => {
                let event_sender = self.event_sender.clone();
                self.pipeline
                    .classify_in_background(session, photo, move |result| {
                        let _ = event_sender.send(Event::ClassifyDone { request, result });
                    });
            }
            Effect::NotifySelection { label } => {
                self.selection_delegate.on_item_selected(&label);
            }
        }
    }
}
