//! YouTube Music innertube connector implementation
//!
//! Implements the `DestinationCatalog` trait against the endpoints the
//! YouTube Music web client itself calls. Authentication reuses the
//! browser session headers (Cookie plus SAPISIDHASH Authorization)
//! supplied by the caller.

use async_trait::async_trait;
use catalog_traits::catalog::DestinationCatalog;
use catalog_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use catalog_traits::model::{Candidate, TrackDescriptor};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{Result, YtMusicError};
use crate::parser::parse_search_results;
use crate::types::{
    ClientContext, CreatePlaylistRequest, CreatePlaylistResponse, EditAction,
    EditPlaylistRequest, EditPlaylistResponse, SearchRequest,
};

/// Innertube API base URL
const YTM_API_BASE: &str = "https://music.youtube.com/youtubei/v1";

/// Origin required by the innertube endpoints
const YTM_ORIGIN: &str = "https://music.youtube.com";

/// Web client identity for music.youtube.com
const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20240101.01.00";

/// Search params restricting results to songs
const FILTER_SONGS: &str = "EgWKAQIIAWoKEAkQBRAKEAMQBA%3D%3D";

/// Candidates returned per search
const MAX_SEARCH_RESULTS: usize = 5;

/// Privacy status for created playlists
const PRIVACY_PRIVATE: &str = "PRIVATE";

/// Headers that must be present for authenticated requests
const REQUIRED_HEADERS: [&str; 2] = ["Cookie", "Authorization"];

/// YouTube Music connector
///
/// Implements `DestinationCatalog` over the innertube API.
///
/// # Features
///
/// - Session credential validation before any write
/// - Song-filtered search with the WEB_REMIX client context
/// - Private playlist creation
/// - Batched track insertion via `browse/edit_playlist`
///
/// # Example
///
/// ```ignore
/// use provider_ytmusic::YtMusicConnector;
/// use catalog_traits::DestinationCatalog;
///
/// let connector = YtMusicConnector::new(http_client, auth_headers);
/// connector.verify_credentials().await?;
/// let candidates = connector.search(&descriptor).await?;
/// ```
pub struct YtMusicConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Browser session headers, merged into every request
    auth_headers: HashMap<String, String>,
}

impl YtMusicConnector {
    /// Create a new YouTube Music connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `auth_headers` - Session headers copied from an authenticated
    ///   browser session, including `Cookie` and `Authorization`
    pub fn new(http_client: Arc<dyn HttpClient>, auth_headers: HashMap<String, String>) -> Self {
        Self {
            http_client,
            auth_headers,
        }
    }

    fn context() -> ClientContext {
        ClientContext::web_remix(CLIENT_NAME, CLIENT_VERSION)
    }

    /// Look up a session header ignoring key case.
    fn header_value(&self, name: &str) -> Option<&str> {
        self.auth_headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn check_credentials(&self) -> Result<()> {
        for name in REQUIRED_HEADERS {
            match self.header_value(name) {
                Some(value) if !value.trim().is_empty() => {}
                _ => {
                    return Err(YtMusicError::MissingCredentials(format!(
                        "Required header '{}' is missing or empty",
                        name
                    )));
                }
            }
        }
        Ok(())
    }

    /// POST a JSON body to an innertube endpoint and map the status code.
    async fn post_json<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<HttpResponse> {
        let url = format!("{}/{}?alt=json", YTM_API_BASE, endpoint);

        let request = HttpRequest::new(HttpMethod::Post, url)
            .headers(&self.auth_headers)
            .header("Origin", YTM_ORIGIN)
            .header("X-Origin", YTM_ORIGIN)
            .json(body)?;

        let response = self.http_client.execute(request).await?;

        match response.status {
            200 => Ok(response),
            401 | 403 => Err(YtMusicError::AccessDenied(
                response.text().unwrap_or_default(),
            )),
            status => Err(YtMusicError::Api {
                status,
                message: response.text().unwrap_or_default(),
            }),
        }
    }

    async fn search_internal(&self, track: &TrackDescriptor) -> Result<Vec<Candidate>> {
        let body = SearchRequest {
            context: Self::context(),
            query: track.search_query(),
            params: FILTER_SONGS.to_string(),
        };

        let response = self.post_json("search", &body).await?;
        let value: serde_json::Value = response
            .json()
            .map_err(|e| YtMusicError::Parse(format!("search response: {}", e)))?;

        let candidates = parse_search_results(&value, MAX_SEARCH_RESULTS);
        debug!(
            query = %body.query,
            candidates = candidates.len(),
            "Searched YouTube Music"
        );
        Ok(candidates)
    }

    async fn create_playlist_internal(&self, name: &str, description: &str) -> Result<String> {
        let body = CreatePlaylistRequest {
            context: Self::context(),
            title: name.to_string(),
            description: description.to_string(),
            privacy_status: PRIVACY_PRIVATE.to_string(),
        };

        let response = self.post_json("playlist/create", &body).await?;
        let created: CreatePlaylistResponse = response
            .json()
            .map_err(|e| YtMusicError::Parse(format!("playlist/create response: {}", e)))?;

        info!(playlist_id = %created.playlist_id, "Created YouTube Music playlist");
        Ok(created.playlist_id)
    }

    async fn add_tracks_internal(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        if track_ids.is_empty() {
            return Ok(());
        }

        // Browse IDs carry a VL prefix the edit endpoint does not accept.
        let playlist_id = playlist_id.strip_prefix("VL").unwrap_or(playlist_id);

        let body = EditPlaylistRequest {
            context: Self::context(),
            playlist_id: playlist_id.to_string(),
            actions: track_ids.iter().map(EditAction::add_video).collect(),
        };

        let response = self.post_json("browse/edit_playlist", &body).await?;
        let edit: EditPlaylistResponse = response
            .json()
            .map_err(|e| YtMusicError::Parse(format!("edit_playlist response: {}", e)))?;

        if !edit.succeeded() {
            return Err(YtMusicError::WriteFailed(format!(
                "edit_playlist returned status {:?}",
                edit.status
            )));
        }

        info!(
            playlist_id = %playlist_id,
            track_count = track_ids.len(),
            "Added tracks to YouTube Music playlist"
        );
        Ok(())
    }
}

#[async_trait]
impl DestinationCatalog for YtMusicConnector {
    #[instrument(skip(self))]
    async fn verify_credentials(&self) -> catalog_traits::Result<()> {
        self.check_credentials().map_err(Into::into)
    }

    #[instrument(skip(self, track), fields(title = %track.title, artist = %track.artist))]
    async fn search(&self, track: &TrackDescriptor) -> catalog_traits::Result<Vec<Candidate>> {
        self.search_internal(track).await.map_err(Into::into)
    }

    #[instrument(skip(self, description))]
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> catalog_traits::Result<String> {
        self.create_playlist_internal(name, description)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self, track_ids), fields(track_count = track_ids.len()))]
    async fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> catalog_traits::Result<()> {
        self.add_tracks_internal(playlist_id, track_ids)
            .await
            .map_err(Into::into)
    }
}
