// tests/common/mod.rs
// In-process fake collaborators for pipeline tests. No network anywhere.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use carmind::handlers::music::MusicHandler;
use carmind::handlers::spotify::{Playlist, PlaylistSearch, SpotifyError};
use carmind::handlers::weather::{WeatherHandler, WeatherProvider, WeatherReport, WeatherError};
use carmind::nlp::entities::EntityExtractor;
use carmind::nlp::inference::{
    EmotionClassifier, EmotionScore, EntityGroup, InferenceError, TokenClassifier,
};
use carmind::nlp::intent::IntentClassifier;
use carmind::nlp::{EntitySet, Intent};
use carmind::state::AppState;

/// Classifier that always returns the same intent (or none).
pub struct FixedIntent(pub Option<Intent>);

#[async_trait]
impl IntentClassifier for FixedIntent {
    async fn classify(&self, _text: &str) -> Option<Intent> {
        self.0.clone()
    }
}

/// Classifier that runs the production reply parser over a canned wire string,
/// exercising the same path a real Space reply would take.
pub struct WireReplyIntent(pub String);

#[async_trait]
impl IntentClassifier for WireReplyIntent {
    async fn classify(&self, _text: &str) -> Option<Intent> {
        carmind::nlp::intent::parse_intent_reply(&self.0)
    }
}

pub struct FixedNer(pub Vec<EntityGroup>);

#[async_trait]
impl TokenClassifier for FixedNer {
    async fn entities(&self, _text: &str) -> Result<Vec<EntityGroup>, InferenceError> {
        Ok(self.0.clone())
    }
}

pub struct FixedEmotions(pub Vec<EmotionScore>);

#[async_trait]
impl EmotionClassifier for FixedEmotions {
    async fn emotions(&self, _text: &str) -> Result<Vec<EmotionScore>, InferenceError> {
        Ok(self.0.clone())
    }
}

/// Records every search query and answers with a canned playlist.
pub struct RecordingSearch {
    pub queries: Mutex<Vec<String>>,
    pub result: Option<Playlist>,
}

impl RecordingSearch {
    pub fn with_playlist(name: &str) -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
            result: Some(Playlist {
                name: name.to_string(),
                external_url: format!("https://open.spotify.com/playlist/{}", name.len()),
            }),
        }
    }
}

#[async_trait]
impl PlaylistSearch for RecordingSearch {
    async fn find_playlist(&self, query: &str) -> Result<Option<Playlist>, SpotifyError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.result.clone())
    }
}

pub struct FailingSearch;

#[async_trait]
impl PlaylistSearch for FailingSearch {
    async fn find_playlist(&self, _query: &str) -> Result<Option<Playlist>, SpotifyError> {
        Err(SpotifyError::Status(reqwest::StatusCode::BAD_GATEWAY))
    }
}

pub struct FixedWeather(pub WeatherReport);

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current_weather(&self, _location: &str) -> Result<WeatherReport, WeatherError> {
        Ok(self.0.clone())
    }
}

pub struct FailingWeather(pub reqwest::StatusCode);

#[async_trait]
impl WeatherProvider for FailingWeather {
    async fn current_weather(&self, _location: &str) -> Result<WeatherReport, WeatherError> {
        Err(WeatherError::Status(self.0))
    }
}

pub fn emotion(label: &str, score: f32) -> EmotionScore {
    EmotionScore {
        label: label.to_string(),
        score,
    }
}

pub fn entity_group(tag: &str, word: &str) -> EntityGroup {
    EntityGroup {
        entity_group: tag.to_string(),
        word: word.to_string(),
        score: 0.99,
    }
}

pub struct StateBuilder {
    pub intent: Arc<dyn IntentClassifier>,
    pub ner: Option<Arc<dyn TokenClassifier>>,
    pub emotion: Option<Arc<dyn EmotionClassifier>>,
    pub search: Option<Arc<dyn PlaylistSearch>>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl StateBuilder {
    pub fn new(intent: Option<Intent>) -> Self {
        Self {
            intent: Arc::new(FixedIntent(intent)),
            ner: None,
            emotion: None,
            search: Some(Arc::new(RecordingSearch::with_playlist("Test Playlist"))),
            weather: Arc::new(FixedWeather(WeatherReport::default())),
        }
    }

    pub fn build(self) -> AppState {
        AppState {
            intent_classifier: self.intent,
            entity_extractor: EntityExtractor::new(self.ner, self.emotion),
            music: MusicHandler::new(self.search, false),
            weather: WeatherHandler::new(self.weather, "Guwahati"),
        }
    }
}

pub fn default_entities() -> EntitySet {
    EntitySet::default()
}
