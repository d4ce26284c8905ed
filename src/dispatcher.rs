// src/dispatcher.rs
// One pass per command: classify, extract, route, respond. No retained state.

use tracing::info;

use crate::handlers::stubs;
use crate::nlp::Intent;
use crate::state::AppState;

pub const CLARIFY_MESSAGE: &str =
    "I'm sorry, I'm having trouble understanding. Could you rephrase?";
pub const UNSUPPORTED_MESSAGE: &str = "I'm not sure how to handle that intent yet.";

pub async fn dispatch(state: &AppState, text: &str) -> String {
    info!("Received command: '{}'", text);

    let Some(intent) = state.intent_classifier.classify(text).await else {
        return CLARIFY_MESSAGE.to_string();
    };
    info!("Predicted intent: '{}'", intent.label());

    let entities = state.entity_extractor.extract(text, &intent).await;

    let response = match &intent {
        Intent::PlayMusic => state.music.play_music(&entities).await,
        Intent::GetWeather => state.weather.get_weather(entities.location.as_deref()).await,
        Intent::Navigate => stubs::handle_navigation(&entities),
        Intent::AdjustTemperature => stubs::handle_temperature_change(text),
        Intent::CallPerson => stubs::handle_calling(&entities),
        Intent::Other(label) => {
            info!("No handler for intent '{}'", label);
            UNSUPPORTED_MESSAGE.to_string()
        }
    };

    info!("Sending response: '{}'", response);
    response
}
