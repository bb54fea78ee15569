//! HTTP clients for the deck source and pronunciation service.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use mycoquiz_core::Card;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Supplies decks: directory listings and the cards in one deck file.
#[async_trait]
pub trait DeckSource: Send + Sync {
    async fn list_files(&self, directory: &str) -> Result<Vec<String>, SourceError>;

    async fn fetch_cards(&self, filename: &str, directory: &str) -> Result<Vec<Card>, SourceError>;

    /// Store a local CSV file in `directory` on the server. Returns the name it was saved under.
    async fn upload_file(&self, path: &Path, directory: &str) -> Result<String, SourceError>;
}

/// Turns a scientific name into a spoken-form spelling.
#[async_trait]
pub trait PronunciationService: Send + Sync {
    async fn pronounce(&self, scientific_name: &str) -> Result<String, SourceError>;

    /// Single readiness check made before a lookup. `Ok(false)` means the server answered but is not ready.
    async fn ping(&self) -> Result<bool, SourceError>;
}

// === API Request/Response Types ===

#[derive(Debug, Deserialize)]
struct ListFilesResponse {
    files: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LoadCardsRequest<'a> {
    filename: &'a str,
    directory: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    filename: String,
}

#[derive(Debug, Serialize)]
struct PronounceRequest<'a> {
    scientific_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct PronounceResponse {
    pronunciation: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the quiz backend, which serves both decks and pronunciations.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Poll `/wakeup` until it answers 200, at most `retries` times with
    /// `delay` between tries. Returns whether the server woke up.
    pub async fn wake_up(&self, retries: u32, delay: Duration) -> bool {
        for attempt in 1..=retries {
            match self.ping().await {
                Ok(true) => {
                    tracing::info!(attempt, "server is awake");
                    return true;
                }
                Ok(false) => tracing::debug!(attempt, "server not ready"),
                Err(e) => tracing::debug!(attempt, error = %e, "wake-up request failed"),
            }

            if attempt < retries {
                tracing::info!("Retrying in {} ms...", delay.as_millis());
                tokio::time::sleep(delay).await;
            }
        }

        tracing::warn!(retries, "failed to wake up server");
        false
    }
}

/// Map a non-success response to `SourceError::Backend`, preferring the
/// backend's `{"error": ...}` message when present.
async fn check_status(resp: Response) -> Result<Response, SourceError> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(SourceError::Backend { status, message })
}

#[async_trait]
impl DeckSource for HttpBackend {
    async fn list_files(&self, directory: &str) -> Result<Vec<String>, SourceError> {
        let resp = self
            .client
            .get(self.url("/list_csv_files"))
            .query(&[("directory", directory)])
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let response: ListFilesResponse = check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(response.files)
    }

    async fn fetch_cards(&self, filename: &str, directory: &str) -> Result<Vec<Card>, SourceError> {
        let request = LoadCardsRequest {
            filename,
            directory,
        };

        let resp = self
            .client
            .post(self.url("/load_cards"))
            .json(&request)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let cards: Vec<Card> = check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        // A card without a scientific name cannot be quizzed.
        let total = cards.len();
        let cards: Vec<Card> = cards
            .into_iter()
            .filter(|c| !c.scientific_name.trim().is_empty())
            .collect();
        if cards.len() < total {
            tracing::warn!(dropped = total - cards.len(), "skipped cards without a scientific name");
        }

        tracing::debug!(filename, directory, cards = cards.len(), "fetched deck");
        Ok(cards)
    }

    async fn upload_file(&self, path: &Path, directory: &str) -> Result<String, SourceError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| SourceError::File(format!("{} is not a file", path.display())))?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SourceError::File(format!("{}: {e}", path.display())))?;

        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str("text/csv")
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        let form = Form::new()
            .percent_encode_noop()
            .part("file", part)
            .text("directory", directory.to_string());

        let resp = self
            .client
            .post(self.url("/upload_csv"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let response: UploadResponse = check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        tracing::info!(filename = %response.filename, directory, "uploaded deck");
        Ok(response.filename)
    }
}

#[async_trait]
impl PronunciationService for HttpBackend {
    async fn pronounce(&self, scientific_name: &str) -> Result<String, SourceError> {
        let resp = self
            .client
            .post(self.url("/pronounce_name"))
            .json(&PronounceRequest { scientific_name })
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let response: PronounceResponse = check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(response.pronunciation)
    }

    async fn ping(&self) -> Result<bool, SourceError> {
        match self.client.get(self.url("/wakeup")).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => Err(SourceError::Network(e.to_string())),
        }
    }
}
