//! Request and response types for the YouTube Music innertube API
//!
//! Request bodies are fully typed. Search responses are navigated as raw
//! JSON in `parser` because the renderer tree is deeply nested and most
//! of it is irrelevant here.

use serde::{Deserialize, Serialize};

/// Innertube client context sent with every request
#[derive(Debug, Clone, Serialize)]
pub struct ClientContext {
    pub client: ClientInfo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_name: String,
    pub client_version: String,
}

impl ClientContext {
    pub fn web_remix(client_name: &str, client_version: &str) -> Self {
        Self {
            client: ClientInfo {
                client_name: client_name.to_string(),
                client_version: client_version.to_string(),
            },
        }
    }
}

/// Body for `search`
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub context: ClientContext,
    pub query: String,
    pub params: String,
}

/// Body for `playlist/create`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    pub context: ClientContext,
    pub title: String,
    pub description: String,
    pub privacy_status: String,
}

/// Body for `browse/edit_playlist`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPlaylistRequest {
    pub context: ClientContext,
    pub playlist_id: String,
    pub actions: Vec<EditAction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAction {
    pub action: String,
    pub added_video_id: String,
}

impl EditAction {
    pub fn add_video(video_id: impl Into<String>) -> Self {
        Self {
            action: "ACTION_ADD_VIDEO".to_string(),
            added_video_id: video_id.into(),
        }
    }
}

/// Response for `playlist/create`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistResponse {
    pub playlist_id: String,
}

/// Response for `browse/edit_playlist`
#[derive(Debug, Deserialize)]
pub struct EditPlaylistResponse {
    #[serde(default)]
    pub status: Option<String>,
}

impl EditPlaylistResponse {
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() == Some("STATUS_SUCCEEDED")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_serialization() {
        let request = SearchRequest {
            context: ClientContext::web_remix("WEB_REMIX", "1.20240101.01.00"),
            query: "Karma Police Radiohead".to_string(),
            params: "EgWKAQII".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["context"]["client"]["clientName"], "WEB_REMIX");
        assert_eq!(json["query"], "Karma Police Radiohead");
    }

    #[test]
    fn test_edit_action_serialization() {
        let action = EditAction::add_video("vid123");
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(json["action"], "ACTION_ADD_VIDEO");
        assert_eq!(json["addedVideoId"], "vid123");
    }

    #[test]
    fn test_create_playlist_response_deserialization() {
        let response: CreatePlaylistResponse =
            serde_json::from_str(r#"{"playlistId": "PLabc123"}"#).unwrap();
        assert_eq!(response.playlist_id, "PLabc123");
    }

    #[test]
    fn test_edit_playlist_response_status() {
        let ok: EditPlaylistResponse =
            serde_json::from_str(r#"{"status": "STATUS_SUCCEEDED"}"#).unwrap();
        assert!(ok.succeeded());

        let failed: EditPlaylistResponse =
            serde_json::from_str(r#"{"status": "STATUS_FAILED"}"#).unwrap();
        assert!(!failed.succeeded());

        let missing: EditPlaylistResponse = serde_json::from_str("{}").unwrap();
        assert!(!missing.succeeded());
    }
}
