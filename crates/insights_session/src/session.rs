use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use insight_logging::{insight_info, insight_warn};
use insights_client::{
    ClientEvent, ClientHandle, ClientSettings, FailureKind, InsightsApi, InsightsError,
    GENERIC_FETCH_ERROR,
};
use insights_core::{update, AppState, AppViewModel, Effect, Failure, FetchStatus, Msg};
use serde_json::Value;

const IDLE_POLL: Duration = Duration::from_millis(20);

/// Observer the session pushes fresh view models to.
pub trait ViewSink: Send + Sync {
    fn view_changed(&self, view: AppViewModel);
}

/// View-facing facade over the request controller.
///
/// The state lives on a dedicated controller thread; the public surface
/// only enqueues messages and reads the latest published view model, so
/// callers never block on a fetch in flight.
pub struct Session {
    msg_tx: mpsc::Sender<Msg>,
    published: Arc<Mutex<AppViewModel>>,
}

impl Session {
    /// Starts a session over the real HTTP client.
    pub fn spawn(settings: ClientSettings, sink: Arc<dyn ViewSink>) -> Result<Self, InsightsError> {
        let client = ClientHandle::new(settings)?;
        Ok(Self::with_client(client, sink))
    }

    /// Same as [`Session::spawn`] but over an injected transport.
    pub fn spawn_with_api(api: Arc<dyn InsightsApi>, sink: Arc<dyn ViewSink>) -> Self {
        Self::with_client(ClientHandle::with_api(api), sink)
    }

    fn with_client(client: ClientHandle, sink: Arc<dyn ViewSink>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let published = Arc::new(Mutex::new(AppState::new().view()));
        spawn_controller_loop(client, sink, msg_rx, published.clone());
        Self { msg_tx, published }
    }

    /// Stores a new input value. Non-blocking; always succeeds.
    pub fn set_input(&self, value: impl Into<String>) {
        let _ = self.msg_tx.send(Msg::InputChanged(value.into()));
    }

    /// Requests a fetch for the current input. A no-op while an
    /// operation is already pending.
    pub fn submit(&self) {
        let _ = self.msg_tx.send(Msg::FetchClicked);
    }

    /// Latest published view model.
    pub fn view(&self) -> AppViewModel {
        self.published.lock().expect("published view lock").clone()
    }

    pub fn status(&self) -> FetchStatus {
        self.view().status
    }

    pub fn result(&self) -> Option<Value> {
        self.view().result
    }

    pub fn error(&self) -> Option<String> {
        self.view().error
    }
}

fn spawn_controller_loop(
    client: ClientHandle,
    sink: Arc<dyn ViewSink>,
    msg_rx: mpsc::Receiver<Msg>,
    published: Arc<Mutex<AppViewModel>>,
) {
    thread::spawn(move || {
        let mut state = AppState::new();
        loop {
            let mut inbox = Vec::new();
            loop {
                match msg_rx.try_recv() {
                    Ok(msg) => inbox.push(msg),
                    Err(mpsc::TryRecvError::Empty) => break,
                    // Session dropped; the state dies with it.
                    Err(mpsc::TryRecvError::Disconnected) => return,
                }
            }
            while let Some(event) = client.try_recv() {
                inbox.push(msg_from_event(event));
            }

            if inbox.is_empty() {
                thread::sleep(IDLE_POLL);
                continue;
            }

            for msg in inbox {
                let (next, effects) = update(std::mem::take(&mut state), msg);
                state = next;
                run_effects(&client, effects);

                let view = state.view();
                if state.consume_dirty() {
                    *published.lock().expect("published view lock") = view.clone();
                    sink.view_changed(view);
                }
            }
        }
    });
}

fn run_effects(client: &ClientHandle, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::FetchInsights { op, website_url } => {
                insight_info!("FetchInsights op={} url_len={}", op, website_url.len());
                client.fetch(op, website_url);
            }
        }
    }
}

fn msg_from_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::FetchCompleted { op, result } => match result {
            Ok(payload) => {
                insight_info!("operation {} succeeded", op);
                Msg::FetchSucceeded { op, payload }
            }
            Err(err) => {
                insight_warn!("operation {} failed: {}", op, err);
                Msg::FetchFailed {
                    op,
                    failure: failure_from(&err),
                }
            }
        },
    }
}

// Transport internals never reach the user; only a service-supplied
// detail message does.
fn failure_from(err: &InsightsError) -> Failure {
    match err.kind {
        FailureKind::HttpStatus(code) => Failure {
            message: err.message.clone(),
            code: Some(code),
        },
        _ => Failure {
            message: GENERIC_FETCH_ERROR.to_string(),
            code: None,
        },
    }
}
