// src/state.rs
// Collaborator handles built once at startup and shared read-only.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::handlers::music::MusicHandler;
use crate::handlers::spotify::{PlaylistSearch, SpotifyClient};
use crate::handlers::weather::{OpenWeatherClient, WeatherHandler, WeatherProvider};
use crate::nlp::entities::EntityExtractor;
use crate::nlp::inference::{
    EmotionClassifier, HfEmotionPipeline, HfNerPipeline, TokenClassifier,
};
use crate::nlp::intent::{IntentClassifier, SpaceIntentClassifier};

pub struct AppState {
    pub intent_classifier: Arc<dyn IntentClassifier>,
    pub entity_extractor: EntityExtractor,
    pub music: MusicHandler,
    pub weather: WeatherHandler,
}

impl AppState {
    /// Wire the production collaborators. Missing required credentials were
    /// already rejected by `Config::validate`; the optional NER/emotion and
    /// Spotify capabilities degrade to absent when their setup fails.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout);

        let classifier = SpaceIntentClassifier::new(&config.hf_space_url, timeout)?;
        info!("Intent classifier endpoint: {}", classifier.endpoint());
        let intent_classifier: Arc<dyn IntentClassifier> = Arc::new(classifier);

        let (ner, emotion) = match config.hf_api_token.as_deref() {
            Some(token) => {
                let ner: Option<Arc<dyn TokenClassifier>> =
                    match HfNerPipeline::new(token, timeout) {
                        Ok(pipeline) => Some(Arc::new(pipeline) as Arc<dyn TokenClassifier>),
                        Err(err) => {
                            error!("Failed to initialize NER pipeline: {}", err);
                            None
                        }
                    };
                let emotion: Option<Arc<dyn EmotionClassifier>> =
                    match HfEmotionPipeline::new(token, timeout) {
                        Ok(pipeline) => Some(Arc::new(pipeline) as Arc<dyn EmotionClassifier>),
                        Err(err) => {
                            error!("Failed to initialize emotion pipeline: {}", err);
                            None
                        }
                    };
                (ner, emotion)
            }
            None => {
                warn!("HF_API_TOKEN not set; NER and emotion extraction disabled");
                (None, None)
            }
        };
        let entity_extractor = EntityExtractor::new(ner, emotion);

        let playlist_search: Option<Arc<dyn PlaylistSearch>> = match SpotifyClient::new(
            &config.spotify_client_id,
            &config.spotify_client_secret,
            timeout,
        ) {
            Ok(client) => {
                info!("Spotify client initialized");
                Some(Arc::new(client))
            }
            Err(err) => {
                error!("Error initializing Spotify client: {}", err);
                None
            }
        };
        let music = MusicHandler::new(playlist_search, config.open_playlist_links);

        let weather_provider: Arc<dyn WeatherProvider> =
            Arc::new(OpenWeatherClient::new(&config.openweather_api_key, timeout)?);
        let weather = WeatherHandler::new(weather_provider, config.default_city.clone());

        Ok(Self {
            intent_classifier,
            entity_extractor,
            music,
            weather,
        })
    }
}
