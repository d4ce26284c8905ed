// src/nlp/entities.rs
// Maps raw pipeline output into the five fixed entity slots.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

use super::inference::{EmotionClassifier, TokenClassifier};
use super::{EntitySet, Intent};

/// Languages the music search understands, scanned in order; first match wins.
const SUPPORTED_LANGUAGES: [&str; 6] = [
    "hindi",
    "english",
    "punjabi",
    "gujarati",
    "bhojpuri",
    "spanish",
];

const PERSON_TAG: &str = "PER";
const LOCATION_TAG: &str = "LOC";

static LANGUAGE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| {
            let pattern = Regex::new(&format!(r"\b{}\b", lang)).expect("valid language pattern");
            (*lang, pattern)
        })
        .collect()
});

/// Collapse the emotion model's fine-grained labels into the moods the music
/// handler understands. Unmapped labels fall back to neutral.
fn mood_for_emotion(label: &str) -> &'static str {
    match label {
        "admiration" | "amusement" | "approval" | "gratitude" | "joy" | "love" | "optimism"
        | "pride" => "happy",
        "caring" | "relief" => "relaxed",
        "desire" | "excitement" => "excited",
        "anger" | "annoyance" | "disapproval" | "disgust" => "angry",
        "grief" | "sadness" | "disappointment" | "embarrassment" | "fear" | "remorse" => "sad",
        _ => "neutral",
    }
}

/// Word-boundary scan for a supported language name, case-insensitive.
fn detect_language(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    LANGUAGE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lowered))
        .map(|(lang, _)| *lang)
}

/// Fills entity slots for a classified command.
///
/// Both pipeline handles are optional: a handle that failed to initialize
/// leaves its dependent slots absent, it never raises.
pub struct EntityExtractor {
    ner: Option<Arc<dyn TokenClassifier>>,
    emotion: Option<Arc<dyn EmotionClassifier>>,
}

impl EntityExtractor {
    pub fn new(
        ner: Option<Arc<dyn TokenClassifier>>,
        emotion: Option<Arc<dyn EmotionClassifier>>,
    ) -> Self {
        Self { ner, emotion }
    }

    pub fn ner_available(&self) -> bool {
        self.ner.is_some()
    }

    pub fn emotion_available(&self) -> bool {
        self.emotion.is_some()
    }

    pub async fn extract(&self, text: &str, intent: &Intent) -> EntitySet {
        let mut entities = EntitySet::default();
        if text.trim().is_empty() {
            return entities;
        }

        match intent {
            Intent::PlayMusic => {
                entities.language = detect_language(text).map(str::to_string);
                entities.artist = self.first_tagged(text, PERSON_TAG).await;
                entities.mood = self.top_mood(text).await;
            }
            Intent::GetWeather | Intent::Navigate => {
                entities.location = self.first_tagged(text, LOCATION_TAG).await;
            }
            Intent::CallPerson => {
                entities.contact_name = self.first_tagged(text, PERSON_TAG).await;
            }
            Intent::AdjustTemperature | Intent::Other(_) => {}
        }

        debug!("Extracted entities: {:?}", entities);
        entities
    }

    /// First NER group carrying the wanted tag, in text order.
    async fn first_tagged(&self, text: &str, tag: &str) -> Option<String> {
        let ner = self.ner.as_ref()?;
        match ner.entities(text).await {
            Ok(groups) => groups
                .into_iter()
                .find(|group| group.entity_group == tag)
                .map(|group| group.word),
            Err(err) => {
                warn!("NER lookup failed: {}", err);
                None
            }
        }
    }

    async fn top_mood(&self, text: &str) -> Option<String> {
        let emotion = self.emotion.as_ref()?;
        match emotion.emotions(text).await {
            Ok(scores) => scores
                .into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
                .map(|top| mood_for_emotion(&top.label).to_string()),
            Err(err) => {
                warn!("Emotion lookup failed: {}", err);
                None
            }
        }
    }
}
