// src/nlp/mod.rs

pub mod entities;
pub mod inference;
pub mod intent;

use serde::Serialize;

/// Command intents the dispatcher knows how to route.
///
/// The label set is owned by the remote classifier; labels without a handler
/// are carried through as `Other` so the dispatcher can answer honestly
/// instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    PlayMusic,
    GetWeather,
    Navigate,
    AdjustTemperature,
    CallPerson,
    Other(String),
}

impl Intent {
    pub fn from_label(label: &str) -> Self {
        match label {
            "play_music" => Self::PlayMusic,
            "get_weather" => Self::GetWeather,
            "navigate" => Self::Navigate,
            "adjust_temperature" => Self::AdjustTemperature,
            "call_person" => Self::CallPerson,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::PlayMusic => "play_music",
            Self::GetWeather => "get_weather",
            Self::Navigate => "navigate",
            Self::AdjustTemperature => "adjust_temperature",
            Self::CallPerson => "call_person",
            Self::Other(label) => label,
        }
    }
}

/// Slots the extractor can fill for one command. All absent by default;
/// each intent populates a small subset. Request-scoped, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntitySet {
    pub mood: Option<String>,
    pub language: Option<String>,
    pub artist: Option<String>,
    pub location: Option<String>,
    pub contact_name: Option<String>,
}
