//! Search response parsing
//!
//! The innertube search response is a renderer tree. Song results live in
//! `musicShelfRenderer` sections, one `musicResponsiveListItemRenderer`
//! per hit, with the title in the first flex column and artist plus
//! duration in the second. Items missing a video ID are skipped.

use catalog_traits::model::Candidate;
use serde_json::Value;
use tracing::trace;

/// Extract song candidates from a search response, up to `limit` results.
pub fn parse_search_results(response: &Value, limit: usize) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    let sections = response
        .pointer("/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents")
        .and_then(Value::as_array);

    let Some(sections) = sections else {
        trace!("Search response has no section list");
        return candidates;
    };

    for section in sections {
        let Some(items) = section
            .pointer("/musicShelfRenderer/contents")
            .and_then(Value::as_array)
        else {
            continue;
        };

        for item in items {
            if candidates.len() >= limit {
                return candidates;
            }
            if let Some(candidate) =
                parse_item(item.pointer("/musicResponsiveListItemRenderer"))
            {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

fn parse_item(renderer: Option<&Value>) -> Option<Candidate> {
    let renderer = renderer?;

    let id = renderer
        .pointer("/playlistItemData/videoId")
        .and_then(Value::as_str)?
        .to_string();

    let title = flex_column_run(renderer, 0, 0).unwrap_or_default();
    let artist = flex_column_run(renderer, 1, 0).unwrap_or_default();
    let duration_secs = last_flex_column_run(renderer, 1).and_then(parse_duration);

    Some(Candidate {
        id,
        title,
        artist,
        duration_secs,
    })
}

/// Text of run `run_index` in flex column `column_index`.
fn flex_column_run(renderer: &Value, column_index: usize, run_index: usize) -> Option<String> {
    renderer
        .pointer(&format!(
            "/flexColumns/{}/musicResponsiveListItemFlexColumnRenderer/text/runs/{}/text",
            column_index, run_index
        ))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Text of the last run in a flex column, where the duration sits.
fn last_flex_column_run(renderer: &Value, column_index: usize) -> Option<String> {
    let runs = renderer
        .pointer(&format!(
            "/flexColumns/{}/musicResponsiveListItemFlexColumnRenderer/text/runs",
            column_index
        ))
        .and_then(Value::as_array)?;

    runs.last()
        .and_then(|run| run.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Parse a clock-style duration ("3:45" or "1:02:10") into seconds.
fn parse_duration(text: String) -> Option<u32> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut seconds: u32 = 0;
    for part in &parts {
        let value: u32 = part.trim().parse().ok()?;
        seconds = seconds.checked_mul(60)?.checked_add(value)?;
    }
    Some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn song_item(video_id: &str, title: &str, artist: &str, duration: &str) -> Value {
        json!({
            "musicResponsiveListItemRenderer": {
                "playlistItemData": {"videoId": video_id},
                "flexColumns": [
                    {
                        "musicResponsiveListItemFlexColumnRenderer": {
                            "text": {"runs": [{"text": title}]}
                        }
                    },
                    {
                        "musicResponsiveListItemFlexColumnRenderer": {
                            "text": {"runs": [
                                {"text": artist},
                                {"text": " \u{2022} "},
                                {"text": "Album"},
                                {"text": " \u{2022} "},
                                {"text": duration}
                            ]}
                        }
                    }
                ]
            }
        })
    }

    fn search_response(items: Vec<Value>) -> Value {
        json!({
            "contents": {
                "tabbedSearchResultsRenderer": {
                    "tabs": [{
                        "tabRenderer": {
                            "content": {
                                "sectionListRenderer": {
                                    "contents": [
                                        {"musicShelfRenderer": {"contents": items}}
                                    ]
                                }
                            }
                        }
                    }]
                }
            }
        })
    }

    #[test]
    fn test_parse_search_results() {
        let response = search_response(vec![
            song_item("vid1", "Karma Police", "Radiohead", "4:21"),
            song_item("vid2", "Karma Police (Live)", "Radiohead", "4:45"),
        ]);

        let candidates = parse_search_results(&response, 5);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "vid1");
        assert_eq!(candidates[0].title, "Karma Police");
        assert_eq!(candidates[0].artist, "Radiohead");
        assert_eq!(candidates[0].duration_secs, Some(261));
    }

    #[test]
    fn test_parse_respects_limit() {
        let items = (0..8)
            .map(|i| song_item(&format!("vid{}", i), "Song", "Artist", "3:00"))
            .collect();
        let response = search_response(items);

        let candidates = parse_search_results(&response, 5);
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_parse_skips_items_without_video_id() {
        let mut missing_id = song_item("x", "Ghost", "Artist", "3:00");
        missing_id["musicResponsiveListItemRenderer"]
            .as_object_mut()
            .unwrap()
            .remove("playlistItemData");

        let response = search_response(vec![
            missing_id,
            song_item("vid1", "Real", "Artist", "3:00"),
        ]);

        let candidates = parse_search_results(&response, 5);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Real");
    }

    #[test]
    fn test_parse_empty_response() {
        let candidates = parse_search_results(&json!({}), 5);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("3:45".to_string()), Some(225));
        assert_eq!(parse_duration("1:02:10".to_string()), Some(3730));
        assert_eq!(parse_duration("45".to_string()), Some(45));
        assert_eq!(parse_duration("not a time".to_string()), None);
        assert_eq!(parse_duration("1:2:3:4".to_string()), None);
    }
}
