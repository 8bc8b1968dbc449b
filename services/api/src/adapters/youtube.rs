//! services/api/src/adapters/youtube.rs
//!
//! This module contains the adapter for the YouTube Data API v3 search endpoint.
//! It implements the `VideoSearchService` port from the `core` crate.

use crate::adapters::gemini_llm::transport_error;
use async_trait::async_trait;
use bytementor_core::{
    domain::Video,
    ports::{PortError, PortResult, VideoSearchService},
};
use serde::Deserialize;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

//=========================================================================================
// Wire Shapes
//=========================================================================================

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: Option<ItemId>,
    snippet: Option<Snippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    channel_title: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

impl SearchItem {
    fn into_video(self) -> Option<Video> {
        let video_id = self.id?.video_id?;
        let snippet = self.snippet?;
        Some(Video {
            title: snippet.title?,
            url: format!("{}{}", WATCH_URL, video_id),
            thumbnail: snippet.thumbnails?.medium?.url?,
            channel: snippet.channel_title?,
        })
    }
}

impl SearchResponse {
    /// Converts every hit, in order. A single incomplete hit rejects the whole page.
    fn into_videos(self, max_results: usize) -> PortResult<Vec<Video>> {
        self.items
            .into_iter()
            .take(max_results)
            .enumerate()
            .map(|(idx, item)| {
                item.into_video().ok_or_else(|| {
                    PortError::MalformedBody(format!("search item {} is missing fields", idx))
                })
            })
            .collect()
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `VideoSearchService` using the YouTube Data API.
#[derive(Clone)]
pub struct YouTubeSearchAdapter {
    client: reqwest::Client,
    search_url: String,
    api_key: String,
}

impl YouTubeSearchAdapter {
    /// Creates a new `YouTubeSearchAdapter`.
    pub fn new(client: reqwest::Client, search_url: String, api_key: String) -> Self {
        Self {
            client,
            search_url,
            api_key,
        }
    }
}

//=========================================================================================
// `VideoSearchService` Trait Implementation
//=========================================================================================

#[async_trait]
impl VideoSearchService for YouTubeSearchAdapter {
    async fn search(&self, query: &str, max_results: usize) -> PortResult<Vec<Video>> {
        let max = max_results.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortError::Status(status.as_u16()));
        }

        let parsed: SearchResponse = response.json().await.map_err(transport_error)?;
        parsed.into_videos(max_results)
    }
}
