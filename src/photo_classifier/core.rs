use crate::classification_pipeline::session::ClassificationSession;
use crate::config::Config;
use crate::error::PipelineError;
use crate::photo::Image;
use crate::results_drawer::{DrawerPosition, ResultsDrawer};

/// Identifies one capture. Completions carrying an older id are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

/// The cached classification and the drawer showing it. Carried from state
/// to state so each capture overwrites the previous results.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub session: ClassificationSession,
    pub drawer: ResultsDrawer,
}

impl ResultsView {
    pub fn new(max_rows: usize) -> Self {
        Self {
            session: ClassificationSession::new(),
            drawer: ResultsDrawer::new(max_rows),
        }
    }
}

#[derive(Debug, Clone)]
pub enum State {
    Starting,
    CameraUnavailable,
    Idle {
        last_request: RequestId,
        view: ResultsView,
    },
    Capturing {
        request: RequestId,
        view: ResultsView,
    },
    Classifying {
        request: RequestId,
        photo: Image,
        view: ResultsView,
    },
    Displaying {
        request: RequestId,
        photo: Image,
        view: ResultsView,
    },
    Failed {
        request: RequestId,
        message: String,
        view: ResultsView,
    },
}

#[derive(Debug)]
pub enum Event {
    CameraChecked(bool),
    CaptureRequested,
    CaptureDone {
        request: RequestId,
        result: Result<Image, Box<dyn std::error::Error + Send + Sync>>,
    },
    /// Carries the session the worker classified into.
    ClassifyDone {
        request: RequestId,
        result: Result<ClassificationSession, PipelineError>,
    },
    ItemSelected(usize),
    DrawerMoved(DrawerPosition),
    ResetRequested,
    Quit,
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::CaptureDone { request, result } => match result {
                Ok(photo) => format!(
                    "CaptureDone({:?}, Ok({}x{}))",
                    request,
                    photo.width(),
                    photo.height()
                ),
                Err(e) => format!("CaptureDone({:?}, Err({}))", request, e),
            },
            Event::ClassifyDone { request, result } => match result {
                Ok(session) => format!("ClassifyDone({:?}, Ok({:?}))", request, session.original()),
                Err(e) => format!("ClassifyDone({:?}, Err({}))", request, e),
            },
            event => format!("{:?}", event),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Effect {
    CheckCamera,
    CapturePhoto {
        request: RequestId,
    },
    /// Classify `photo` into a copy of `session`.
    Classify {
        request: RequestId,
        photo: Image,
        session: ClassificationSession,
    },
    NotifySelection {
        label: String,
    },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Classify { request, photo, .. } => format!(
                "Classify({:?}, {}x{})",
                request,
                photo.width(),
                photo.height()
            ),
            effect => format!("{:?}", effect),
        }
    }
}

impl State {
    pub fn to_display_string(&self) -> String {
        match self {
            State::Starting => "Starting".to_string(),
            State::CameraUnavailable => "CameraUnavailable".to_string(),
            State::Idle { last_request, .. } => format!("Idle({:?})", last_request),
            State::Capturing { request, .. } => format!("Capturing({:?})", request),
            State::Classifying { request, .. } => format!("Classifying({:?})", request),
            State::Displaying { request, view, .. } => format!(
                "Displaying({:?}, input {:?}, {:?})",
                request,
                view.session.preprocessed().map(|p| (p.width(), p.height())),
                view.session.results()
            ),
            State::Failed {
                request, message, ..
            } => format!("Failed({:?}, {})", request, message),
        }
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (State::Starting, vec![Effect::CheckCamera])
}

pub fn transition(config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        // Startup
        (State::Starting, Event::CameraChecked(true)) => (
            State::Idle {
                last_request: RequestId::default(),
                view: ResultsView::new(config.max_displayed_results),
            },
            vec![],
        ),
        (State::Starting, Event::CameraChecked(false)) => (State::CameraUnavailable, vec![]),

        // Capture is only accepted while idle
        (State::Idle { last_request, view }, Event::CaptureRequested) => {
            let request = last_request.next();
            (
                State::Capturing { request, view },
                vec![Effect::CapturePhoto { request }],
            )
        }

        (State::Capturing { request, view }, Event::CaptureDone { request: done, result })
            if done == request =>
        {
            match result {
                Ok(photo) => (
                    State::Classifying {
                        request,
                        photo: photo.clone(),
                        view: view.clone(),
                    },
                    vec![Effect::Classify {
                        request,
                        photo,
                        session: view.session,
                    }],
                ),
                Err(e) => (
                    State::Failed {
                        request,
                        message: format!("Could not capture photo: {}", e),
                        view,
                    },
                    vec![],
                ),
            }
        }

        (
            State::Classifying {
                request,
                photo,
                mut view,
            },
            Event::ClassifyDone {
                request: done,
                result,
            },
        ) if done == request => match result {
            Ok(session) => {
                view.drawer
                    .push(session.results().to_vec(), DrawerPosition::PartiallyRevealed);
                view.session = session;
                (
                    State::Displaying {
                        request,
                        photo,
                        view,
                    },
                    vec![],
                )
            }
            Err(e) => (
                State::Failed {
                    request,
                    message: e.to_string(),
                    view,
                },
                vec![],
            ),
        },

        // Results drawer
        (
            State::Displaying {
                request,
                photo,
                view,
            },
            Event::ItemSelected(index),
        ) => {
            let effects = match view.drawer.select(index) {
                Some(label) => vec![Effect::NotifySelection {
                    label: label.to_string(),
                }],
                None => vec![],
            };
            (
                State::Displaying {
                    request,
                    photo,
                    view,
                },
                effects,
            )
        }
        (
            State::Displaying {
                request,
                photo,
                mut view,
            },
            Event::DrawerMoved(position),
        ) => {
            view.drawer.set_position(position);
            (
                State::Displaying {
                    request,
                    photo,
                    view,
                },
                vec![],
            )
        }

        // Reset
        (State::Displaying { request, view, .. }, Event::ResetRequested)
        | (State::Failed { request, view, .. }, Event::ResetRequested) => {
            let mut view = view;
            view.drawer.dismiss();
            (
                State::Idle {
                    last_request: request,
                    view,
                },
                vec![],
            )
        }

        // Rejected captures, stale completions and anything else
        (state, _) => (state, vec![]),
    }
}
