//! A local stand-in for the research service, served by axum on an
//! ephemeral port.
#![allow(dead_code)]

use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Canned response for one endpoint.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Running test server. Request bodies are recorded per endpoint.
pub struct TestServer {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request bodies received so far, as `(path, body)`.
    pub async fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().await.clone()
    }
}

/// Serve `research` on `/research` and `ideas` on `/innovation/generate`.
pub async fn spawn_server(research: Reply, ideas: Reply) -> TestServer {
    let requests: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));

    let research_log = requests.clone();
    let ideas_log = requests.clone();
    let app = Router::new()
        .route(
            "/research",
            post(move |body: String| {
                let reply = research.clone();
                let log = research_log.clone();
                async move {
                    log.lock().await.push(("/research".to_string(), body));
                    (reply.status, reply.body)
                }
            }),
        )
        .route(
            "/innovation/generate",
            post(move |body: String| {
                let reply = ideas.clone();
                let log = ideas_log.clone();
                async move {
                    log.lock().await.push(("/innovation/generate".to_string(), body));
                    (reply.status, reply.body)
                }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer { addr, requests }
}
