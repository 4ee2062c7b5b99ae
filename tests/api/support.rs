//! Test app: in-memory store seeded with fixtures, ids handed out on demand.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use butterfly_api::{
    router, ButterflyService, Document, IdGenerator, MemoryBackend, UuidGenerator,
};
use serde_json::json;

/// Returns queued ids first, then random ones.
#[derive(Clone, Default)]
pub struct QueuedIds(Arc<Mutex<VecDeque<String>>>);

impl QueuedIds {
    pub fn push(&self, id: &str) {
        self.0.lock().unwrap().push_back(id.to_string());
    }
}

impl IdGenerator for QueuedIds {
    fn generate(&self) -> String {
        self.0
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| UuidGenerator.generate())
    }
}

pub struct TestApp {
    pub base: String,
    pub client: reqwest::Client,
    pub ids: QueuedIds,
    pub service: Arc<ButterflyService<MemoryBackend>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

pub fn fixture() -> Document {
    serde_json::from_value(json!({
        "butterflies": [
            {
                "id": "wxyz9876",
                "commonName": "test-butterfly",
                "species": "Testium butterflius",
                "article": "https://example.com/testium_butterflius"
            }
        ],
        "users": [
            { "id": "abcd1234", "username": "test-user" }
        ]
    }))
    .unwrap()
}

/// Bind to port 0 and serve a freshly seeded app.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(fixture()).await
}

pub async fn spawn_app_with(document: Document) -> TestApp {
    let ids = QueuedIds::default();
    let service = Arc::new(
        ButterflyService::open(MemoryBackend::with_document(document))
            .unwrap()
            .with_id_generator(ids.clone()),
    );

    let app = router(service.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
        ids,
        service,
    }
}
