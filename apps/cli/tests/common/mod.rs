//! Mock quiz backend for client tests.
//!
//! Serves the deck and pronunciation endpoints from memory on an ephemeral
//! port. `/wakeup` answers 503 until it has been hit `wake_after` times.
//! Uploaded CSV files are parsed and stored alongside the seeded decks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

pub struct MockBackend {
    pub wake_after: usize,
    pub wakeup_hits: AtomicUsize,
    /// directory -> filename -> cards (as raw JSON, so tests can send odd shapes)
    pub decks: Mutex<HashMap<String, HashMap<String, Value>>>,
}

impl MockBackend {
    pub fn new(wake_after: usize) -> Self {
        let mut mmaforays = HashMap::new();
        mmaforays.insert(
            "Spring2024Maine.csv".to_string(),
            json!([
                {
                    "id": "67594",
                    "scientific_name": "Flammulina velutipes",
                    "common_name": "Velvet Foot",
                    "image_url": "https://static.inaturalist.org/photos/98124470/medium.jpg",
                    "attribution": "(c) Melissa Beth Dude Duhaime, all rights reserved",
                    "taxa_url": "https://www.inaturalist.org/taxa/67594"
                },
                {
                    "scientific_name": "Trichaptum biforme",
                    "common_name": "violet-toothed polypore",
                    "image_url": "https://inaturalist-open-data.s3.amazonaws.com/photos/412458489/medium.jpeg",
                    "attribution": "(c) Kerri McCabe, some rights reserved (CC BY-NC)",
                    "taxa_url": "https://www.inaturalist.org/taxa/125705"
                },
                {
                    "scientific_name": "",
                    "common_name": "nameless"
                }
            ]),
        );
        mmaforays.insert("empty.csv".to_string(), json!([]));

        let mut decks = HashMap::new();
        decks.insert("mmaforays".to_string(), mmaforays);
        decks.insert("uploads".to_string(), HashMap::new());

        Self {
            wake_after,
            wakeup_hits: AtomicUsize::new(0),
            decks: Mutex::new(decks),
        }
    }
}

#[derive(Deserialize)]
struct DirectoryQuery {
    directory: Option<String>,
}

#[derive(Deserialize)]
struct LoadCardsBody {
    filename: String,
    directory: Option<String>,
}

#[derive(Deserialize)]
struct PronounceBody {
    scientific_name: String,
}

async fn wakeup(State(state): State<Arc<MockBackend>>) -> (StatusCode, &'static str) {
    let hits = state.wakeup_hits.fetch_add(1, Ordering::SeqCst) + 1;
    if hits > state.wake_after {
        (StatusCode::OK, "awake")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "starting")
    }
}

async fn list_csv_files(
    State(state): State<Arc<MockBackend>>,
    Query(query): Query<DirectoryQuery>,
) -> Json<Value> {
    let directory = query.directory.unwrap_or_else(|| "mmaforays".to_string());
    let mut files: Vec<String> = state
        .decks
        .lock()
        .unwrap()
        .get(&directory)
        .map(|d| d.keys().cloned().collect())
        .unwrap_or_default();
    files.sort_by_key(|f| f.to_lowercase());
    Json(json!({ "files": files }))
}

async fn load_cards(
    State(state): State<Arc<MockBackend>>,
    Json(body): Json<LoadCardsBody>,
) -> (StatusCode, Json<Value>) {
    let directory = body.directory.unwrap_or_else(|| "mmaforays".to_string());
    let cards = state
        .decks
        .lock()
        .unwrap()
        .get(&directory)
        .and_then(|d| d.get(&body.filename))
        .cloned();
    match cards {
        Some(cards) => (StatusCode::OK, Json(cards)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "File not found" })),
        ),
    }
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

async fn upload_csv(
    State(state): State<Arc<MockBackend>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut upload: Option<(String, String)> = None;
    let mut directory = "uploads".to_string();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content = field.text().await.unwrap_or_default();
                upload = Some((filename, content));
            }
            "directory" => directory = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    let Some((filename, content)) = upload else {
        return bad_request("No file part");
    };
    if !filename.ends_with(".csv") {
        return bad_request("Invalid file type");
    }
    let cards = match mycoquiz_core::parse_cards_csv(&content) {
        Ok(cards) => cards,
        Err(e) => return bad_request(&e.to_string()),
    };

    state
        .decks
        .lock()
        .unwrap()
        .entry(directory)
        .or_default()
        .insert(filename.clone(), json!(cards));

    (
        StatusCode::OK,
        Json(json!({
            "message": "File uploaded and modified successfully",
            "filename": filename
        })),
    )
}

async fn pronounce_name(Json(body): Json<PronounceBody>) -> (StatusCode, Json<Value>) {
    if body.scientific_name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Scientific name is required" })),
        );
    }
    let spoken = body.scientific_name.to_uppercase().replace(' ', "-");
    (StatusCode::OK, Json(json!({ "pronunciation": spoken })))
}

/// Start the mock and return its base URL.
pub async fn spawn_backend(state: Arc<MockBackend>) -> String {
    let app = Router::new()
        .route("/wakeup", get(wakeup))
        .route("/list_csv_files", get(list_csv_files))
        .route("/load_cards", post(load_cards))
        .route("/pronounce_name", post(pronounce_name))
        .route("/upload_csv", post(upload_csv))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });

    format!("http://{addr}")
}

/// An address nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind unused port");
    let addr = listener.local_addr().expect("unused port address");
    drop(listener);
    format!("http://{addr}")
}
