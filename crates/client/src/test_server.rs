//! A local HTTP server that records every request, for client tests.

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use serde_json::Value;

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Builds the response for a method and path.
pub(crate) type Responder = fn(&str, &str) -> Response;

#[derive(Clone)]
struct Shared {
    log: Arc<Mutex<Vec<Recorded>>>,
    respond: Responder,
}

/// A running server bound to an ephemeral port.
pub(crate) struct TestServer {
    pub url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    /// Starts a server that answers every request with `respond`.
    pub async fn spawn(respond: Responder) -> Self {
        let log = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(record).with_state(Shared {
            log: Arc::clone(&log),
            respond,
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            url: format!("http://{addr}"),
            log,
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().expect("log lock").clone()
    }
}

async fn record(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    shared.log.lock().expect("log lock").push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization,
        body: serde_json::from_str(&body).ok(),
    });
    (shared.respond)(method.as_str(), uri.path())
}
