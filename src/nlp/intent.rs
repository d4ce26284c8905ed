// src/nlp/intent.rs
// Remote intent classification via a hosted Gradio Space.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::Intent;

/// The Space replies with a single formatted string, e.g.
/// `"Intent: play_music (Score: 0.9987)"`.
const REPLY_MARKER: &str = "Intent: ";

#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("intent endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed reply from intent endpoint")]
    MalformedReply,

    #[error("invalid Space URL '{0}': expected https://huggingface.co/spaces/<owner>/<name> or a direct endpoint")]
    InvalidSpaceUrl(String),
}

/// Classifies a raw command into an intent. Faults are absorbed: a failed
/// or unparseable classification is an absent intent, never an error.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Option<Intent>;
}

/// Resolve a Hugging Face Space page URL to its runtime endpoint.
///
/// `https://huggingface.co/spaces/<owner>/<name>` becomes
/// `https://<owner>-<name>.hf.space`; any other host is taken as a direct
/// endpoint as-is. Malformed URLs are a configuration error.
pub fn space_endpoint_from_url(raw: &str) -> Result<String, IntentError> {
    let invalid = || IntentError::InvalidSpaceUrl(raw.to_string());
    let parsed = Url::parse(raw.trim()).map_err(|_| invalid())?;
    let host = parsed.host_str().ok_or_else(invalid)?;

    if host != "huggingface.co" {
        return Ok(raw.trim().trim_end_matches('/').to_string());
    }

    let segments: Vec<&str> = parsed
        .path()
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        ["spaces", owner, name] => {
            // Space subdomains are lowercased with '.' and '_' folded to '-'.
            let fold = |s: &str| s.to_lowercase().replace(['.', '_'], "-");
            Ok(format!("https://{}-{}.hf.space", fold(owner), fold(name)))
        }
        _ => Err(invalid()),
    }
}

/// Pull the intent label out of the classifier's reply string.
///
/// The wire format is magic-string coupling, so it is isolated here: a reply
/// without the marker, or with an empty label after stripping it, is absent.
pub fn parse_intent_reply(reply: &str) -> Option<Intent> {
    let idx = reply.find(REPLY_MARKER)?;
    let rest = &reply[idx + REPLY_MARKER.len()..];
    let label = rest.split(" (").next().unwrap_or("").trim();
    if label.is_empty() {
        return None;
    }
    Some(Intent::from_label(label))
}

/// Production classifier backed by the hosted Space's Gradio prediction route.
pub struct SpaceIntentClassifier {
    endpoint: String,
    http: Client,
}

#[derive(Deserialize)]
struct PredictReply {
    data: Vec<serde_json::Value>,
}

impl SpaceIntentClassifier {
    pub fn new(space_url: &str, timeout: Duration) -> Result<Self, IntentError> {
        let endpoint = space_endpoint_from_url(space_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("carmind/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn predict(&self, text: &str) -> Result<String, IntentError> {
        let url = format!("{}/run/predict", self.endpoint);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "data": [text] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IntentError::Status(response.status()));
        }

        let reply: PredictReply = response.json().await?;
        reply
            .data
            .into_iter()
            .next()
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or(IntentError::MalformedReply)
    }
}

#[async_trait]
impl IntentClassifier for SpaceIntentClassifier {
    async fn classify(&self, text: &str) -> Option<Intent> {
        if text.trim().is_empty() {
            return None;
        }

        match self.predict(text).await {
            Ok(reply) => {
                debug!("Intent classifier reply: {}", reply);
                let intent = parse_intent_reply(&reply);
                if intent.is_none() {
                    warn!("Unexpected reply from intent endpoint: {}", reply);
                }
                intent
            }
            Err(err) => {
                warn!("Intent classification failed: {}", err);
                None
            }
        }
    }
}
