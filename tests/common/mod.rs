#![allow(dead_code)]
//! Stand-in Ollama server bound to an ephemeral local port.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Debug)]
pub enum Behavior {
    /// 200 with the given JSON body.
    Reply(Value),
    /// The given status for every route.
    Status(u16),
    /// Wait, then reply 200 with the given body.
    Slow(Duration, Value),
}

pub struct FakeOllama {
    pub url: String,
    pub last_body: Arc<Mutex<Option<Value>>>,
}

impl FakeOllama {
    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }
}

async fn respond(behavior: &Behavior) -> Response {
    match behavior {
        Behavior::Reply(body) => Json(body.clone()).into_response(),
        Behavior::Status(code) => {
            let status = StatusCode::from_u16(*code).unwrap();
            (status, Json(json!({ "error": "simulated failure" }))).into_response()
        }
        Behavior::Slow(delay, body) => {
            tokio::time::sleep(*delay).await;
            Json(body.clone()).into_response()
        }
    }
}

fn tags(behavior: &Behavior) -> Response {
    match behavior {
        Behavior::Status(code) => StatusCode::from_u16(*code).unwrap().into_response(),
        _ => Json(json!({ "models": [{ "name": "llama3.2:1b" }] })).into_response(),
    }
}

pub async fn spawn_fake_ollama(behavior: Behavior) -> FakeOllama {
    let last_body = Arc::new(Mutex::new(None));
    let captured = last_body.clone();
    let behavior = Arc::new(behavior);
    let for_tags = behavior.clone();

    let app = Router::new()
        .route(
            "/api/generate",
            post(move |Json(body): Json<Value>| {
                let behavior = behavior.clone();
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    respond(&behavior).await
                }
            }),
        )
        .route(
            "/api/tags",
            get(move || {
                let behavior = for_tags.clone();
                async move { tags(&behavior) }
            }),
        );

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    FakeOllama { url: format!("http://{}", addr), last_body }
}

/// A local URL with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
