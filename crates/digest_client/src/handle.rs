use std::sync::{mpsc, Arc};
use std::thread;

use digest_logging::{digest_debug, digest_error};

use crate::api::{ApiSettings, NewspaperApi, ReqwestApi};
use crate::{ApiError, ClientEvent, RequestId};

enum ClientCommand {
    List {
        request_id: RequestId,
        page: u32,
        page_size: u32,
    },
    Detail {
        request_id: RequestId,
        filename: String,
    },
}

/// Receives request completions from the client thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs API requests on a background tokio runtime.
///
/// Requests are independent tasks: nothing is cancelled or de-duplicated, and
/// completions arrive in whatever order the server answers.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn spawn(settings: ApiSettings, sink: Arc<dyn EventSink>) -> Result<Self, ApiError> {
        let api = Arc::new(ReqwestApi::new(settings)?);
        Ok(Self::with_api(api, sink))
    }

    pub fn with_api(api: Arc<dyn NewspaperApi>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    digest_error!("Failed to start client runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, sink.as_ref()).await;
                });
            }
            digest_debug!("Client command channel closed");
        });

        Self { cmd_tx }
    }

    pub fn list(&self, request_id: RequestId, page: u32, page_size: u32) {
        let _ = self.cmd_tx.send(ClientCommand::List {
            request_id,
            page,
            page_size,
        });
    }

    pub fn detail(&self, request_id: RequestId, filename: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::Detail {
            request_id,
            filename: filename.into(),
        });
    }
}

async fn handle_command(api: &dyn NewspaperApi, command: ClientCommand, sink: &dyn EventSink) {
    match command {
        ClientCommand::List {
            request_id,
            page,
            page_size,
        } => {
            let result = api.list(page, page_size).await;
            sink.emit(ClientEvent::ListCompleted { request_id, result });
        }
        ClientCommand::Detail {
            request_id,
            filename,
        } => {
            let result = api.detail(&filename).await;
            sink.emit(ClientEvent::DetailCompleted {
                request_id,
                filename,
                result,
            });
        }
    }
}
