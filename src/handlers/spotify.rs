// src/handlers/spotify.rs
// Spotify Web API client using the client-credentials flow.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";

/// Refresh the cached token this long before Spotify's stated expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Spotify API returned HTTP {0}")]
    Status(StatusCode),

    #[error("Spotify rejected the client credentials")]
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub name: String,
    pub external_url: String,
}

/// Catalog search collaborator: query in, at most one playlist out.
#[async_trait]
pub trait PlaylistSearch: Send + Sync {
    async fn find_playlist(&self, query: &str) -> Result<Option<Playlist>, SpotifyError>;
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

pub struct SpotifyClient {
    http: Client,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<CachedToken>>,
}

#[derive(Deserialize)]
struct TokenReply {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SearchReply {
    playlists: Option<PlaylistPage>,
}

#[derive(Deserialize)]
struct PlaylistPage {
    // Spotify can return null entries inside the items array.
    #[serde(default)]
    items: Vec<Option<PlaylistItem>>,
}

#[derive(Deserialize)]
struct PlaylistItem {
    name: String,
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: String,
}

impl SpotifyClient {
    pub fn new(
        client_id: &str,
        client_secret: &str,
        timeout: Duration,
    ) -> Result<Self, SpotifyError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("carmind/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token: RwLock::new(None),
        })
    }

    /// Cached bearer token, refreshed when stale. Concurrent refreshes are
    /// harmless: last writer wins with an equally valid token.
    async fn access_token(&self) -> Result<String, SpotifyError> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref() {
                if token.expires_at > Instant::now() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!("Requesting new Spotify access token");
        let response = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            return Err(SpotifyError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SpotifyError::Status(status));
        }

        let reply: TokenReply = response.json().await?;
        let expires_at = Instant::now()
            + Duration::from_secs(reply.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let access_token = reply.access_token.clone();
        *self.token.write().await = Some(CachedToken {
            access_token: reply.access_token,
            expires_at,
        });
        Ok(access_token)
    }
}

#[async_trait]
impl PlaylistSearch for SpotifyClient {
    async fn find_playlist(&self, query: &str) -> Result<Option<Playlist>, SpotifyError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(SEARCH_URL)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "playlist"), ("limit", "1")])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Token may have been revoked; drop it so the next call re-authenticates.
            *self.token.write().await = None;
            return Err(SpotifyError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(SpotifyError::Status(response.status()));
        }

        let reply: SearchReply = response.json().await?;
        Ok(reply
            .playlists
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .next()
            .map(|item| Playlist {
                name: item.name,
                external_url: item.external_urls.spotify,
            }))
    }
}
