use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// The search response carries no usable duration, so every track gets
/// this stand-in until a detail lookup exists.
const PLACEHOLDER_DURATION: &str = "3:45";

/// Normalized playable unit built from one search result.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel_title: String,
    pub duration: String,
}

// --- Wire shapes (YouTube Data API v3 `search.list`) ---

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

pub struct SearchClient {
    client: Client,
    api_key: String,
    max_results: u8,
}

impl SearchClient {
    pub fn new(client: Client, api_key: String, max_results: u8) -> Self {
        Self {
            client,
            api_key,
            max_results,
        }
    }

    /// Single keyword search, mapped into tracks. Quota/network failures
    /// bubble up as errors; callers log and fall back to an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let max_results = self.max_results.to_string();
        let params = [
            ("part", "snippet"),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
            ("type", "video"),
            ("q", query),
        ];

        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;
        let data: SearchResponse = resp.json().await?;
        Ok(Self::map_items(data))
    }

    /// Pure mapping from the wire shape, kept separate for testing.
    /// Items without a videoId (channels, playlists) are dropped.
    fn map_items(data: SearchResponse) -> Vec<Track> {
        data.items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                Some(Track {
                    id,
                    title: item.snippet.title,
                    thumbnail: item
                        .snippet
                        .thumbnails
                        .default
                        .map(|t| t.url)
                        .unwrap_or_default(),
                    channel_title: item.snippet.channel_title,
                    duration: PLACEHOLDER_DURATION.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_json(n: usize) -> String {
        format!(
            r#"{{
                "id": {{ "kind": "youtube#video", "videoId": "vid{n}" }},
                "snippet": {{
                    "title": "Track {n}",
                    "channelTitle": "Channel {n}",
                    "thumbnails": {{ "default": {{ "url": "https://i.ytimg.com/vi/vid{n}/default.jpg" }} }}
                }}
            }}"#
        )
    }

    #[test]
    fn test_map_trending_response() {
        let items: Vec<String> = (0..10).map(item_json).collect();
        let raw = format!(r#"{{ "items": [{}] }}"#, items.join(","));
        let data: SearchResponse = serde_json::from_str(&raw).unwrap();

        let tracks = SearchClient::map_items(data);
        assert_eq!(tracks.len(), 10);
        for track in &tracks {
            assert!(!track.id.is_empty());
            assert!(!track.title.is_empty());
            assert!(track.thumbnail.starts_with("https://"));
            assert_eq!(track.duration, "3:45");
        }
    }

    #[test]
    fn test_items_without_video_id_are_dropped() {
        // Channel results have no id.videoId
        let raw = format!(
            r#"{{ "items": [
                {{ "id": {{ "kind": "youtube#channel", "channelId": "ch1" }},
                   "snippet": {{ "title": "A Channel", "channelTitle": "A Channel",
                                 "thumbnails": {{}} }} }},
                {}
            ] }}"#,
            item_json(1)
        );
        let data: SearchResponse = serde_json::from_str(&raw).unwrap();

        let tracks = SearchClient::map_items(data);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "vid1");
    }

    #[test]
    fn test_missing_thumbnail_maps_to_empty_url() {
        let raw = r#"{ "items": [
            { "id": { "videoId": "vid9" },
              "snippet": { "title": "T", "channelTitle": "C" } }
        ] }"#;
        let data: SearchResponse = serde_json::from_str(raw).unwrap();

        let tracks = SearchClient::map_items(data);
        assert_eq!(tracks.len(), 1);
        assert!(tracks[0].thumbnail.is_empty());
    }

    #[test]
    fn test_empty_response_maps_to_empty_list() {
        let data: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(SearchClient::map_items(data).is_empty());
    }
}
