//! In-process fake camera for integration tests.
//!
//! Serves canned replies keyed by path-and-query (no leading slash, e.g.
//! `ctrl/get?k=iso`) and records every request it sees. Unknown paths get 404.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zcam::{ClientConfig, ZCam};

#[derive(Clone, Debug)]
pub struct Reply {
    status: StatusCode,
    body: Vec<u8>,
    delay: Option<Duration>,
    cut_short: bool,
}

impl Reply {
    pub fn json(value: serde_json::Value) -> Self {
        Self::bytes(value.to_string())
    }

    pub fn ok() -> Self {
        Self::json(serde_json::json!({ "code": 0 }))
    }

    pub fn bytes(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            delay: None,
            cut_short: false,
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap(),
            body: b"not json at all".to_vec(),
            delay: None,
            cut_short: false,
        }
    }

    /// Send `first` as a chunk of a streamed body, then abort the connection.
    pub fn cut_short(first: impl Into<Vec<u8>>) -> Self {
        Self {
            cut_short: true,
            ..Self::bytes(first)
        }
    }

    /// Hold the response back for `delay` before sending headers.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

struct Shared {
    routes: HashMap<String, Reply>,
    hits: Mutex<Vec<String>>,
}

#[derive(Default)]
pub struct MockCamera {
    routes: HashMap<String, Reply>,
    folders: Vec<String>,
}

impl MockCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path_and_query: &str, reply: Reply) -> Self {
        self.routes.insert(path_and_query.to_string(), reply);
        self
    }

    /// A `DCIM/` folder: its listing plus a body per file. Folders are listed
    /// under `DCIM/` in the order added unless that route is set explicitly.
    pub fn folder(mut self, dir: &str, files: &[&str]) -> Self {
        self.folders.push(dir.to_string());
        self = self.route(
            &format!("DCIM/{}", dir),
            Reply::json(serde_json::json!({ "files": files })),
        );
        for file in files {
            self = self.route(
                &format!("DCIM/{}/{}", dir, file),
                Reply::bytes(format!("contents of {}", file)),
            );
        }
        self
    }

    pub async fn start(mut self) -> RunningCamera {
        if !self.folders.is_empty() {
            let listing = Reply::json(serde_json::json!({ "files": self.folders }));
            self.routes.entry("DCIM/".to_string()).or_insert(listing);
        }

        let shared = Arc::new(Shared {
            routes: self.routes,
            hits: Mutex::new(Vec::new()),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = axum::Router::new()
            .fallback(serve)
            .with_state(Arc::clone(&shared));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningCamera { addr, shared }
    }
}

pub struct RunningCamera {
    pub addr: SocketAddr,
    shared: Arc<Shared>,
}

impl RunningCamera {
    pub fn client(&self) -> ZCam {
        ZCam::new(self.addr.to_string())
    }

    pub fn client_with_timeout(&self, timeout: Option<Duration>) -> ZCam {
        ZCam::with_config(ClientConfig {
            address: self.addr.to_string(),
            timeout,
        })
    }

    /// Paths requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.shared.hits.lock().unwrap().clone()
    }
}

async fn serve(State(shared): State<Arc<Shared>>, uri: Uri) -> Response {
    let key = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .trim_start_matches('/')
        .to_string();
    shared.hits.lock().unwrap().push(key.clone());

    let Some(reply) = shared.routes.get(&key).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    if reply.cut_short {
        let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
            Ok(reply.body),
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "card pulled")),
        ];
        let body = Body::from_stream(futures_util::stream::iter(chunks));
        return (reply.status, body).into_response();
    }
    (reply.status, reply.body).into_response()
}

/// An address nothing is listening on.
pub async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
