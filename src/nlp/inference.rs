// src/nlp/inference.rs
// Hosted NER and emotion pipelines (Hugging Face Inference API).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

pub const NER_MODEL: &str = "dslim/bert-base-NER";
pub const EMOTION_MODEL: &str = "bhadresh-savani/bert-base-go-emotion";

const INFERENCE_API_BASE: &str = "https://api-inference.huggingface.co/models";

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("inference API returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// One aggregated token group from the NER pipeline, in text order.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityGroup {
    pub entity_group: String,
    pub word: String,
    #[serde(default)]
    pub score: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f32,
}

/// Named-entity recognition collaborator: text in, tagged groups out.
#[async_trait]
pub trait TokenClassifier: Send + Sync {
    async fn entities(&self, text: &str) -> Result<Vec<EntityGroup>, InferenceError>;
}

/// Emotion classification collaborator: text in, scored labels out.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn emotions(&self, text: &str) -> Result<Vec<EmotionScore>, InferenceError>;
}

struct HfApi {
    http: Client,
    token: String,
}

impl HfApi {
    fn new(token: &str, timeout: Duration) -> Result<Self, InferenceError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("carmind/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            token: token.to_string(),
        })
    }

    async fn query<T: DeserializeOwned>(&self, model: &str, text: &str) -> Result<T, InferenceError> {
        let url = format!("{}/{}", INFERENCE_API_BASE, model);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "inputs": text, "options": { "wait_for_model": true } }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(InferenceError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

pub struct HfNerPipeline {
    api: HfApi,
}

impl HfNerPipeline {
    pub fn new(token: &str, timeout: Duration) -> Result<Self, InferenceError> {
        Ok(Self {
            api: HfApi::new(token, timeout)?,
        })
    }
}

#[async_trait]
impl TokenClassifier for HfNerPipeline {
    async fn entities(&self, text: &str) -> Result<Vec<EntityGroup>, InferenceError> {
        // Aggregated NER replies are a flat array of entity groups.
        self.api.query(NER_MODEL, text).await
    }
}

pub struct HfEmotionPipeline {
    api: HfApi,
}

impl HfEmotionPipeline {
    pub fn new(token: &str, timeout: Duration) -> Result<Self, InferenceError> {
        Ok(Self {
            api: HfApi::new(token, timeout)?,
        })
    }
}

#[async_trait]
impl EmotionClassifier for HfEmotionPipeline {
    async fn emotions(&self, text: &str) -> Result<Vec<EmotionScore>, InferenceError> {
        // Text-classification replies nest one scored sequence per input.
        let mut nested: Vec<Vec<EmotionScore>> = self.api.query(EMOTION_MODEL, text).await?;
        if nested.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(nested.remove(0))
        }
    }
}
