// tests/dispatch_pipeline.rs
// End-to-end dispatch scenarios over fake collaborators.

mod common;

use std::sync::Arc;

use carmind::dispatcher::{self, CLARIFY_MESSAGE, UNSUPPORTED_MESSAGE};
use carmind::nlp::Intent;

use common::{
    FailingSearch, FixedEmotions, FixedNer, RecordingSearch, StateBuilder, WireReplyIntent,
    emotion, entity_group,
};

#[tokio::test]
async fn sad_hindi_command_searches_by_language() {
    // Language wins over mood: the mood slot is filled but never reaches the
    // query because the language already did.
    let search = Arc::new(RecordingSearch::with_playlist("Hindi Evergreens"));
    let mut builder = StateBuilder::new(Some(Intent::PlayMusic));
    builder.ner = Some(Arc::new(FixedNer(Vec::new())));
    builder.emotion = Some(Arc::new(FixedEmotions(vec![
        emotion("sadness", 0.91),
        emotion("neutral", 0.05),
    ])));
    builder.search = Some(search.clone());
    let state = builder.build();

    let reply = dispatcher::dispatch(&state, "play some sad hindi songs for me").await;

    assert_eq!(search.queries.lock().unwrap().as_slice(), ["hindi"]);
    assert_eq!(reply, "Playing 'Hindi Evergreens' on Spotify for you.");
}

#[tokio::test]
async fn artist_command_searches_by_artist() {
    let search = Arc::new(RecordingSearch::with_playlist("This Is Arijit Singh"));
    let mut builder = StateBuilder::new(Some(Intent::PlayMusic));
    builder.ner = Some(Arc::new(FixedNer(vec![entity_group("PER", "Arijit Singh")])));
    builder.emotion = Some(Arc::new(FixedEmotions(vec![emotion("neutral", 0.9)])));
    builder.search = Some(search.clone());
    let state = builder.build();

    dispatcher::dispatch(&state, "I want to listen to Arijit Singh").await;

    let queries = search.queries.lock().unwrap();
    assert!(queries[0].starts_with("Arijit Singh"));
}

#[tokio::test]
async fn weather_command_uses_extracted_location() {
    let mut builder = StateBuilder::new(Some(Intent::GetWeather));
    builder.ner = Some(Arc::new(FixedNer(vec![entity_group("LOC", "Guwahati")])));
    let state = builder.build();

    let reply = dispatcher::dispatch(&state, "what is the weather like in Guwahati").await;
    assert!(reply.starts_with("Currently in Guwahati,"));
}

#[tokio::test]
async fn warmer_command_returns_fixed_string_regardless_of_entities() {
    let state = StateBuilder::new(Some(Intent::AdjustTemperature)).build();
    let reply = dispatcher::dispatch(&state, "it's chilly, make it warmer").await;
    assert_eq!(reply, "Okay, making it a bit warmer in here.");
}

#[tokio::test]
async fn call_command_names_the_contact() {
    let mut builder = StateBuilder::new(Some(Intent::CallPerson));
    builder.ner = Some(Arc::new(FixedNer(vec![entity_group("PER", "Soni")])));
    let state = builder.build();

    let reply = dispatcher::dispatch(&state, "can you please call Soni").await;
    assert_eq!(reply, "Calling Soni now...");
}

#[tokio::test]
async fn navigation_without_location_asks_for_one() {
    let state = StateBuilder::new(Some(Intent::Navigate)).build();
    let reply = dispatcher::dispatch(&state, "navigate").await;
    assert_eq!(reply, "Where would you like to navigate to?");
}

#[tokio::test]
async fn absent_intent_maps_to_the_clarification_message() {
    let state = StateBuilder::new(None).build();
    let reply = dispatcher::dispatch(&state, "mumble mumble").await;
    assert_eq!(reply, CLARIFY_MESSAGE);
}

#[tokio::test]
async fn unparseable_wire_reply_maps_to_the_clarification_message() {
    let mut builder = StateBuilder::new(None);
    builder.intent = Arc::new(WireReplyIntent("Space is still building...".to_string()));
    let state = builder.build();

    let reply = dispatcher::dispatch(&state, "play something").await;
    assert_eq!(reply, CLARIFY_MESSAGE);
}

#[tokio::test]
async fn unknown_label_maps_to_the_unsupported_message() {
    let mut builder = StateBuilder::new(None);
    builder.intent = Arc::new(WireReplyIntent("Intent: open_sunroof (Score: 0.88)".to_string()));
    let state = builder.build();

    let reply = dispatcher::dispatch(&state, "open the sunroof").await;
    assert_eq!(reply, UNSUPPORTED_MESSAGE);
}

#[tokio::test]
async fn spotify_fault_still_yields_a_reply() {
    let mut builder = StateBuilder::new(Some(Intent::PlayMusic));
    builder.search = Some(Arc::new(FailingSearch));
    let state = builder.build();

    let reply = dispatcher::dispatch(&state, "play something").await;
    assert_eq!(reply, "Sorry, an error occurred while searching on Spotify.");
}
