use std::sync::{mpsc, Arc};
use std::thread;

use insight_logging::insight_debug;

use crate::fetch::{ClientSettings, HttpInsightsClient, InsightsApi};
use crate::{ClientEvent, InsightsError, OpId};

enum ClientCommand {
    Fetch { op: OpId, website_url: String },
}

/// Bridge between the synchronous controller loop and the async client.
///
/// Owns a dedicated thread with a tokio runtime. Commands go in over a
/// channel, each request runs as a spawned task, and every completion
/// comes back exactly once via [`ClientHandle::try_recv`].
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    /// Spawns the bridge over the real HTTP client.
    pub fn new(settings: ClientSettings) -> Result<Self, InsightsError> {
        let api = HttpInsightsClient::new(settings)?;
        Ok(Self::with_api(Arc::new(api)))
    }

    /// Spawns the bridge over any transport implementation.
    pub fn with_api(api: Arc<dyn InsightsApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch(&self, op: OpId, website_url: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::Fetch {
            op,
            website_url: website_url.into(),
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn InsightsApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Fetch { op, website_url } => {
            insight_debug!("fetch op={} url_len={}", op, website_url.len());
            let result = api.fetch_insights(&website_url).await;
            let _ = event_tx.send(ClientEvent::FetchCompleted { op, result });
        }
    }
}
