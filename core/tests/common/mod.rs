#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use rest_core::{Headers, HttpRequest, HttpResponse, Transport, TransportError};
use serde::{Deserialize, Serialize};
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Client-side view of a widget. Every field is optional so the same shape
/// works for payloads (no id yet) and for sparse responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Widget {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Start the mock server on a random port and return its base URL.
pub async fn spawn_server() -> String {
    init_tracing();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener).await });
    info!(%addr, "mock server started");
    format!("http://{addr}")
}

/// What a `ScriptedTransport` does when asked to send.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond { status: u16, body: String },
    Fail(String),
    Hang,
}

/// Test double that answers every request the same way and records what it
/// was sent.
#[derive(Debug)]
pub struct ScriptedTransport {
    reply: Reply,
    sent: Mutex<Vec<HttpRequest>>,
    abandoned: AtomicBool,
}

/// Flags a hanging send whose future was dropped before it finished.
struct SetOnDrop<'a>(&'a AtomicBool);

impl Drop for SetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl ScriptedTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
            abandoned: AtomicBool::new(false),
        }
    }

    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Self::new(Reply::Respond {
            status,
            body: body.into(),
        })
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Whether a `Reply::Hang` send was dropped mid-flight.
    pub fn abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        match &self.reply {
            Reply::Respond { status, body } => Ok(HttpResponse {
                status: *status,
                headers: Headers::from([("x-scripted".to_string(), "yes".to_string())]),
                body: Bytes::from(body.clone()),
            }),
            Reply::Fail(message) => Err(TransportError::Other(message.clone())),
            Reply::Hang => {
                let _guard = SetOnDrop(&self.abandoned);
                std::future::pending().await
            }
        }
    }
}
