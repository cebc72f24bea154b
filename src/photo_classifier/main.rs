use crate::classification_pipeline::ClassificationPipeline;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use crate::photo_classifier::core::{init, transition, Effect, Event};
use crate::photo_classifier::render::Render;
use crate::photo_classifier::run_effect::RunEffect;
use crate::results_drawer::SelectionDelegate;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

pub struct PhotoClassifier {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    event_sender: Sender<Event>,
    event_receiver: Receiver<Event>,
    run_effect: RunEffect,
    render: Render,
}

impl PhotoClassifier {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        pipeline: ClassificationPipeline,
        selection_delegate: Arc<dyn SelectionDelegate + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let logger = logger.with_namespace("app");

        let run_effect = RunEffect::new(
            logger.clone(),
            device_camera,
            pipeline,
            selection_delegate,
            event_sender.clone(),
        );

        let render = Render::new(device_display, config.clone());

        Self {
            config,
            logger,
            event_sender,
            event_receiver,
            run_effect,
            render,
        }
    }

    /// Handle for posting user input into the loop.
    pub fn sender(&self) -> Sender<Event> {
        self.event_sender.clone()
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    /// Own the state and apply events one at a time until `Event::Quit`.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (mut state, effects) = init();

        self.render.render(&state)?;
        self.spawn_effects(effects);

        loop {
            let event = self.event_receiver.recv()?;

            if matches!(event, Event::Quit) {
                self.logger.info("Quitting")?;
                return Ok(());
            }

            self.logger.debug(&format!(
                "\nold state:\n\t{}\n\nevent:\n\t{}",
                state.to_display_string(),
                event.to_display_string(),
            ))?;

            let (new_state, effects) = transition(&self.config, state, event);

            self.logger.debug(&format!(
                "\nnew state:\n\t{}\n\neffects:\n\t{:?}",
                new_state.to_display_string(),
                effects
                    .iter()
                    .map(|effect| effect.to_display_string())
                    .collect::<Vec<_>>()
            ))?;

            state = new_state;

            self.render.render(&state)?;

            self.spawn_effects(effects);
        }
    }
}
