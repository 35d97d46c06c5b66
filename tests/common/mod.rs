#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url_shortener_client::application::notice::{Notice, Notifier};
use url_shortener_client::infrastructure::http::HttpUrlRepository;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn repository(base_url: &str) -> Arc<HttpUrlRepository> {
    Arc::new(HttpUrlRepository::new(base_url, None, None).unwrap())
}

pub fn url_json(id: i64, created: &str, visits: i64) -> Value {
    json!({
        "id": id,
        "shortUrl": format!("http://sho.rt/url/{id:05}"),
        "redirectUrl": format!("https://example.com/{id}"),
        "created": created,
        "lastIP": "127.0.0.1",
        "visits": visits
    })
}

/// Notifier that keeps every notice for later inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_error())
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
