//! In-process fake of the meme API, image host and Mastodon endpoints.

#![allow(dead_code)]

use axum::{
    Form, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

/// Canned response for one endpoint.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap(),
            body: body.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Replies {
    pub metadata: Reply,
    pub image: Reply,
    pub media: Reply,
    pub status: Reply,
}

impl Replies {
    /// Every endpoint succeeds; the metadata points at `/img/x.png` on the fake.
    pub fn happy(base: &str) -> Self {
        Self {
            metadata: Reply::ok(metadata_json(base, false)),
            image: Reply::ok(vec![0xFF, 0xD8]),
            media: Reply::ok(r#"{"id":"m1"}"#),
            status: Reply::ok("{}"),
        }
    }
}

pub fn metadata_json(base: &str, nsfw: bool) -> String {
    format!(
        r#"{{"url":"{}/img/x.png","author":"bob","postLink":"http://p","title":"t","nsfw":{}}}"#,
        base, nsfw
    )
}

#[derive(Clone, Debug)]
pub struct Upload {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Default, Debug)]
pub struct Recorded {
    pub hits: Vec<String>,
    pub authorization: Vec<Option<String>>,
    pub uploads: Vec<Upload>,
    pub statuses: Vec<HashMap<String, String>>,
}

struct FakeState {
    replies: Replies,
    recorded: Mutex<Recorded>,
}

impl FakeState {
    fn hit(&self, what: String) {
        self.recorded.lock().unwrap().hits.push(what);
    }

    fn auth(&self, headers: &HeaderMap) {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.recorded.lock().unwrap().authorization.push(value);
    }
}

pub struct FakeServer {
    pub addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeServer {
    /// Starts the fake; `replies` receives the server's base URL.
    pub async fn spawn(replies: impl FnOnce(&str) -> Replies) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base = format!("http://{}", addr);

        let state = Arc::new(FakeState {
            replies: replies(&base),
            recorded: Mutex::new(Recorded::default()),
        });

        let app = Router::new()
            .route("/gimme", get(metadata))
            .route("/img/{name}", get(image))
            .route("/api/v1/media", post(media))
            .route("/api/v1/statuses", post(status))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn metadata_url(&self) -> url::Url {
        url::Url::parse(&format!("{}/gimme", self.base_url())).unwrap()
    }

    pub fn hits(&self) -> Vec<String> {
        self.state.recorded.lock().unwrap().hits.clone()
    }

    pub fn authorization(&self) -> Vec<Option<String>> {
        self.state.recorded.lock().unwrap().authorization.clone()
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.state.recorded.lock().unwrap().uploads.clone()
    }

    pub fn statuses(&self) -> Vec<HashMap<String, String>> {
        self.state.recorded.lock().unwrap().statuses.clone()
    }
}

async fn metadata(State(state): State<Arc<FakeState>>) -> (StatusCode, Vec<u8>) {
    state.hit("GET /gimme".into());
    let reply = state.replies.metadata.clone();
    (reply.status, reply.body)
}

async fn image(State(state): State<Arc<FakeState>>, Path(name): Path<String>) -> (StatusCode, Vec<u8>) {
    state.hit(format!("GET /img/{}", name));
    let reply = state.replies.image.clone();
    (reply.status, reply.body)
}

async fn media(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Vec<u8>) {
    state.hit("POST /api/v1/media".into());
    state.auth(&headers);
    while let Some(field) = multipart.next_field().await.unwrap() {
        let upload = Upload {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            bytes: field.bytes().await.unwrap().to_vec(),
        };
        state.recorded.lock().unwrap().uploads.push(upload);
    }
    let reply = state.replies.media.clone();
    (reply.status, reply.body)
}

async fn status(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Vec<u8>) {
    state.hit("POST /api/v1/statuses".into());
    state.auth(&headers);
    state.recorded.lock().unwrap().statuses.push(form);
    let reply = state.replies.status.clone();
    (reply.status, reply.body)
}
