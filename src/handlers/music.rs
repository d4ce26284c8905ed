// src/handlers/music.rs
// Builds the catalog search query and turns the result into a reply.

use std::sync::Arc;
use tracing::{info, warn};

use super::spotify::PlaylistSearch;
use crate::nlp::EntitySet;

/// Search terms used when only a mood is known. Unmapped moods fall back
/// to plain pop.
fn genre_terms_for_mood(mood: &str) -> &'static [&'static str] {
    match mood {
        "happy" => &["happy", "pop", "dance", "upbeat"],
        "sad" => &["sad", "acoustic", "rainy day", "chill"],
        "angry" => &["angry", "rock", "metal", "workout"],
        "relaxed" => &["lo-fi", "chill", "ambient", "focus"],
        "excited" => &["party", "edm", "dance-pop", "energetic"],
        "neutral" => &["top hits", "trending", "pop"],
        _ => &["pop"],
    }
}

/// Query priority: artist first, language appended independently, mood-derived
/// genre terms only when neither produced anything, then the generic fallback.
pub fn build_search_query(entities: &EntitySet) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(artist) = &entities.artist {
        parts.push(artist.clone());
    }
    if let Some(language) = &entities.language {
        parts.push(language.clone());
    }
    if parts.is_empty() {
        if let Some(mood) = &entities.mood {
            parts.extend(genre_terms_for_mood(mood).iter().map(|t| t.to_string()));
        }
    }
    if parts.is_empty() {
        parts.push("top hits".to_string());
    }

    parts.join(" ")
}

pub struct MusicHandler {
    search: Option<Arc<dyn PlaylistSearch>>,
    open_links: bool,
}

impl MusicHandler {
    pub fn new(search: Option<Arc<dyn PlaylistSearch>>, open_links: bool) -> Self {
        Self { search, open_links }
    }

    pub fn is_available(&self) -> bool {
        self.search.is_some()
    }

    /// Never fails: collaborator faults become fixed user-facing strings.
    pub async fn play_music(&self, entities: &EntitySet) -> String {
        let Some(search) = &self.search else {
            warn!("Spotify client is not available, cannot play music");
            return "Sorry, I can't connect to Spotify right now.".to_string();
        };

        let query = build_search_query(entities);
        info!("Spotify search query: '{}'", query);

        match search.find_playlist(&query).await {
            Ok(Some(playlist)) => {
                info!("Found playlist '{}' ({})", playlist.name, playlist.external_url);
                if self.open_links {
                    if let Err(err) = webbrowser::open(&playlist.external_url) {
                        warn!("Could not open playlist link: {}", err);
                    }
                }
                format!("Playing '{}' on Spotify for you.", playlist.name)
            }
            Ok(None) => {
                info!("No playlists found for query '{}'", query);
                format!("Sorry, I couldn't find any playlists for '{}'.", query)
            }
            Err(err) => {
                warn!("Spotify search failed: {}", err);
                "Sorry, an error occurred while searching on Spotify.".to_string()
            }
        }
    }
}
