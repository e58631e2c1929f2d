//! Spotify Web API connector implementation
//!
//! Implements the `SourceCatalog` trait for the Spotify Web API.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use catalog_traits::catalog::SourceCatalog;
use catalog_traits::http::{HttpClient, HttpMethod, HttpRequest};
use catalog_traits::model::{SourcePlaylist, TrackDescriptor};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{Result, SpotifyError};
use crate::types::{PlaylistObject, PlaylistTracksPage, TokenResponse, TrackObject};

/// Spotify Web API base URL
const API_BASE: &str = "https://api.spotify.com/v1";

/// Token endpoint for the client-credentials grant
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tracks per page (Spotify Web API maximum)
const PAGE_SIZE: u32 = 100;

/// Spotify Web API connector
///
/// Implements `SourceCatalog` for Spotify playlists.
///
/// # Features
///
/// - Playlist ID extraction from share URLs or bare IDs
/// - Transparent pagination of playlist tracks in source order
/// - Client-credentials token exchange helper
///
/// # Example
///
/// ```ignore
/// use provider_spotify::SpotifyConnector;
/// use catalog_traits::SourceCatalog;
///
/// let token = SpotifyConnector::exchange_client_credentials(
///     http_client.clone(), client_id, client_secret,
/// ).await?;
/// let connector = SpotifyConnector::new(http_client, token);
/// let playlist = connector
///     .read_playlist("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M")
///     .await?;
/// ```
pub struct SpotifyConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// OAuth 2.0 access token
    access_token: String,
}

impl SpotifyConnector {
    /// Create a new Spotify connector with an existing access token
    pub fn new(http_client: Arc<dyn HttpClient>, access_token: String) -> Self {
        Self {
            http_client,
            access_token,
        }
    }

    /// Obtain an app-only access token via the client-credentials grant.
    ///
    /// # Errors
    ///
    /// Returns `SpotifyError::TokenExchange` when the token endpoint rejects
    /// the client credentials.
    #[instrument(skip(http_client, client_secret))]
    pub async fn exchange_client_credentials(
        http_client: Arc<dyn HttpClient>,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String> {
        let params = [("grant_type", "client_credentials")];
        let encoded_body = serde_urlencoded::to_string(params)
            .map_err(|e| SpotifyError::TokenExchange(format!("Failed to encode request: {}", e)))?;
        let credentials = BASE64.encode(format!("{}:{}", client_id, client_secret));

        let request = HttpRequest::new(HttpMethod::Post, TOKEN_URL)
            .header("Authorization", format!("Basic {}", credentials))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Bytes::from(encoded_body));

        let response = http_client.execute(request).await?;

        if !response.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SpotifyError::TokenExchange(format!(
                "Token endpoint returned {}: {}",
                response.status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| SpotifyError::Parse(format!("Failed to parse token response: {}", e)))?;

        info!(
            "Obtained client-credentials token (expires in {}s)",
            token.expires_in
        );
        Ok(token.access_token)
    }

    /// Extract a playlist ID from a share URL or accept a bare ID.
    fn extract_playlist_id(playlist_url: &str) -> Option<String> {
        const URL_MARKER: &str = "spotify.com/playlist/";

        if let Some(idx) = playlist_url.find(URL_MARKER) {
            let rest = &playlist_url[idx + URL_MARKER.len()..];
            let id: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect();
            if id.is_empty() {
                None
            } else {
                Some(id)
            }
        } else if !playlist_url.is_empty()
            && playlist_url.chars().all(|c| c.is_ascii_alphanumeric())
        {
            Some(playlist_url.to_string())
        } else {
            None
        }
    }

    /// Map a Spotify track object to the pipeline's descriptor shape.
    ///
    /// Missing metadata becomes empty strings rather than errors.
    fn convert_track(track: TrackObject) -> TrackDescriptor {
        TrackDescriptor {
            title: track.name,
            artist: track
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            album: track.album.map(|a| a.name).filter(|n| !n.is_empty()),
            duration_secs: track.duration_ms.map(|ms| (ms / 1000) as u32),
        }
    }

    /// Execute a GET request and map Spotify status codes to the error taxonomy.
    async fn get_json<T: DeserializeOwned>(&self, url: String, resource: &str) -> Result<T> {
        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(&self.access_token)
            .header("Accept", "application/json");

        let response = self.http_client.execute(request).await?;

        match response.status {
            200 => response
                .json()
                .map_err(|e| SpotifyError::Parse(format!("{}: {}", resource, e))),
            404 => Err(SpotifyError::PlaylistNotFound(resource.to_string())),
            401 | 403 => Err(SpotifyError::AccessDenied(
                response.text().unwrap_or_default(),
            )),
            status => Err(SpotifyError::Api {
                status,
                message: response.text().unwrap_or_default(),
            }),
        }
    }

    async fn read_playlist_internal(&self, playlist_url: &str) -> Result<SourcePlaylist> {
        let playlist_id = Self::extract_playlist_id(playlist_url)
            .ok_or_else(|| SpotifyError::InvalidPlaylistUrl(playlist_url.to_string()))?;

        let metadata_url = format!("{}/playlists/{}?fields=id,name,description", API_BASE, playlist_id);
        let playlist: PlaylistObject = self.get_json(metadata_url, &playlist_id).await?;

        // Page through the track listing, preserving source order. The
        // offset counts raw page items, not kept tracks: unresolvable
        // entries are dropped below but still occupy index positions on
        // the Spotify side.
        let mut tracks: Vec<TrackDescriptor> = Vec::new();
        let mut offset = 0usize;
        loop {
            let page_url = format!(
                "{}/playlists/{}/tracks?limit={}&offset={}",
                API_BASE, playlist_id, PAGE_SIZE, offset
            );
            let page: PlaylistTracksPage = self.get_json(page_url, &playlist_id).await?;

            let page_len = page.items.len();
            offset += page_len;
            tracks.extend(
                page.items
                    .into_iter()
                    // Entries Spotify can no longer resolve carry a null track.
                    .filter_map(|item| item.track)
                    .map(Self::convert_track),
            );

            debug!(
                playlist_id = %playlist_id,
                fetched = page_len,
                total = page.total,
                "Fetched playlist page"
            );

            if page.next.is_none() || page_len == 0 {
                break;
            }
        }

        info!(
            playlist_id = %playlist_id,
            track_count = tracks.len(),
            "Read Spotify playlist"
        );

        Ok(SourcePlaylist {
            id: playlist.id,
            name: playlist.name,
            description: playlist.description.filter(|d| !d.is_empty()),
            tracks,
        })
    }
}

#[async_trait]
impl SourceCatalog for SpotifyConnector {
    #[instrument(skip(self), fields(playlist_url = %playlist_url))]
    async fn read_playlist(&self, playlist_url: &str) -> catalog_traits::Result<SourcePlaylist> {
        self.read_playlist_internal(playlist_url)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_traits::error::CatalogError;
    use catalog_traits::http::HttpResponse;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> catalog_traits::Result<HttpResponse>;
        }
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.as_bytes().to_vec()),
        }
    }

    #[test]
    fn test_extract_playlist_id_from_url() {
        let id = SpotifyConnector::extract_playlist_id(
            "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=xyz",
        );
        assert_eq!(id, Some("37i9dQZF1DXcBWIGoYBM5M".to_string()));
    }

    #[test]
    fn test_extract_playlist_id_from_bare_id() {
        let id = SpotifyConnector::extract_playlist_id("37i9dQZF1DXcBWIGoYBM5M");
        assert_eq!(id, Some("37i9dQZF1DXcBWIGoYBM5M".to_string()));
    }

    #[test]
    fn test_extract_playlist_id_rejects_other_urls() {
        assert_eq!(
            SpotifyConnector::extract_playlist_id("https://example.com/playlist/abc"),
            None
        );
        assert_eq!(SpotifyConnector::extract_playlist_id(""), None);
        assert_eq!(
            SpotifyConnector::extract_playlist_id("https://open.spotify.com/album/xyz123"),
            None
        );
    }

    #[test]
    fn test_convert_track_maps_fields() {
        let track: TrackObject = serde_json::from_str(
            r#"{
                "name": "Karma Police",
                "artists": [{"name": "Radiohead"}, {"name": "Someone Else"}],
                "album": {"name": "OK Computer"},
                "duration_ms": 261000
            }"#,
        )
        .unwrap();

        let descriptor = SpotifyConnector::convert_track(track);
        assert_eq!(descriptor.title, "Karma Police");
        assert_eq!(descriptor.artist, "Radiohead");
        assert_eq!(descriptor.album, Some("OK Computer".to_string()));
        assert_eq!(descriptor.duration_secs, Some(261));
    }

    #[test]
    fn test_convert_track_tolerates_missing_fields() {
        let track: TrackObject = serde_json::from_str("{}").unwrap();
        let descriptor = SpotifyConnector::convert_track(track);

        assert_eq!(descriptor.title, "");
        assert_eq!(descriptor.artist, "");
        assert!(descriptor.album.is_none());
        assert!(descriptor.duration_secs.is_none());
    }

    #[tokio::test]
    async fn test_read_playlist_paginates() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(3).returning(|req| {
            if req.url.contains("/tracks") {
                if req.url.contains("offset=0") {
                    Ok(json_response(
                        200,
                        r#"{
                            "items": [
                                {"track": {"name": "Track A", "artists": [{"name": "Artist A"}], "duration_ms": 180000}}
                            ],
                            "next": "https://api.spotify.com/v1/playlists/pl1/tracks?offset=1",
                            "total": 2
                        }"#,
                    ))
                } else {
                    Ok(json_response(
                        200,
                        r#"{
                            "items": [
                                {"track": {"name": "Track B", "artists": [{"name": "Artist B"}], "duration_ms": 200000}}
                            ],
                            "next": null,
                            "total": 2
                        }"#,
                    ))
                }
            } else {
                Ok(json_response(
                    200,
                    r#"{"id": "pl1", "name": "Mix", "description": "desc"}"#,
                ))
            }
        });

        let connector = SpotifyConnector::new(Arc::new(mock_http), "token".to_string());
        let playlist = connector.read_playlist("pl1").await.unwrap();

        assert_eq!(playlist.name, "Mix");
        assert_eq!(playlist.tracks.len(), 2);
        assert_eq!(playlist.tracks[0].title, "Track A");
        assert_eq!(playlist.tracks[1].title, "Track B");
    }

    #[tokio::test]
    async fn test_read_playlist_skips_null_track_entries() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(2).returning(|req| {
            if req.url.contains("/tracks") {
                Ok(json_response(
                    200,
                    r#"{
                        "items": [
                            {"track": null},
                            {"track": {"name": "Track A", "artists": [{"name": "Artist A"}]}}
                        ],
                        "next": null,
                        "total": 2
                    }"#,
                ))
            } else {
                Ok(json_response(200, r#"{"id": "pl1", "name": "Mix"}"#))
            }
        });

        let connector = SpotifyConnector::new(Arc::new(mock_http), "token".to_string());
        let playlist = connector.read_playlist("pl1").await.unwrap();

        assert_eq!(playlist.tracks.len(), 1);
        assert_eq!(playlist.tracks[0].title, "Track A");
    }

    #[tokio::test]
    async fn test_pagination_offset_counts_unresolvable_entries() {
        let mut mock_http = MockHttpClient::new();

        // Page 1 holds two raw items (one unresolvable), so the next page
        // must start at offset 2 even though only one track was kept.
        mock_http.expect_execute().times(3).returning(|req| {
            if req.url.contains("/tracks") {
                if req.url.contains("offset=0") {
                    Ok(json_response(
                        200,
                        r#"{
                            "items": [
                                {"track": null},
                                {"track": {"name": "Track A", "artists": [{"name": "Artist A"}]}}
                            ],
                            "next": "https://api.spotify.com/v1/playlists/pl1/tracks?offset=2",
                            "total": 3
                        }"#,
                    ))
                } else {
                    assert!(req.url.contains("offset=2"), "unexpected url: {}", req.url);
                    Ok(json_response(
                        200,
                        r#"{
                            "items": [
                                {"track": {"name": "Track B", "artists": [{"name": "Artist B"}]}}
                            ],
                            "next": null,
                            "total": 3
                        }"#,
                    ))
                }
            } else {
                Ok(json_response(200, r#"{"id": "pl1", "name": "Mix"}"#))
            }
        });

        let connector = SpotifyConnector::new(Arc::new(mock_http), "token".to_string());
        let playlist = connector.read_playlist("pl1").await.unwrap();

        let titles: Vec<&str> = playlist.tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Track A", "Track B"]);
    }

    #[tokio::test]
    async fn test_read_playlist_not_found() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(404, r#"{"error": {"status": 404}}"#)));

        let connector = SpotifyConnector::new(Arc::new(mock_http), "token".to_string());
        let result = connector.read_playlist("doesnotexist1").await;

        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_read_playlist_access_denied() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(401, r#"{"error": {"status": 401}}"#)));

        let connector = SpotifyConnector::new(Arc::new(mock_http), "expired".to_string());
        let result = connector.read_playlist("pl1").await;

        assert!(matches!(result, Err(CatalogError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_found() {
        let mock_http = MockHttpClient::new();
        let connector = SpotifyConnector::new(Arc::new(mock_http), "token".to_string());

        let result = connector
            .read_playlist("https://example.com/not-a-playlist")
            .await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_exchange_client_credentials_success() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|req| {
            assert!(req.headers.get("Authorization").unwrap().starts_with("Basic "));
            let body = req.body.as_ref().unwrap();
            assert_eq!(&body[..], b"grant_type=client_credentials");
            Ok(json_response(
                200,
                r#"{"access_token": "app-token", "token_type": "Bearer", "expires_in": 3600}"#,
            ))
        });

        let token = SpotifyConnector::exchange_client_credentials(
            Arc::new(mock_http),
            "client-id",
            "client-secret",
        )
        .await
        .unwrap();

        assert_eq!(token, "app-token");
    }

    #[tokio::test]
    async fn test_exchange_client_credentials_rejected() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(400, r#"{"error": "invalid_client"}"#)));

        let result = SpotifyConnector::exchange_client_credentials(
            Arc::new(mock_http),
            "bad-id",
            "bad-secret",
        )
        .await;

        assert!(matches!(result, Err(SpotifyError::TokenExchange(_))));
    }
}
