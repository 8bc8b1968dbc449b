//! services/api/src/providers/videos.rs
//!
//! Looks up tutorial videos. There is no synthetic fallback: any failure yields
//! an empty list.

use bytementor_core::{
    domain::{Topic, Video, MAX_VIDEOS},
    ports::{PortError, PortResult, VideoSearchService},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const VIDEO_TIMEOUT: Duration = Duration::from_secs(15);

pub struct VideoProvider {
    search: Option<Arc<dyn VideoSearchService>>,
    timeout: Duration,
}

impl VideoProvider {
    pub fn new(search: Option<Arc<dyn VideoSearchService>>) -> Self {
        Self {
            search,
            timeout: VIDEO_TIMEOUT,
        }
    }

    pub fn query(topic: &Topic) -> String {
        format!("{} tutorial", topic)
    }

    pub async fn generate(&self, topic: &Topic) -> Vec<Video> {
        match self.lookup(topic).await {
            Ok(mut videos) => {
                videos.truncate(MAX_VIDEOS);
                videos
            }
            Err(PortError::MissingCredential(_)) => {
                debug!("No video search credential configured; returning no videos.");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Video lookup failed; returning no videos.");
                Vec::new()
            }
        }
    }

    async fn lookup(&self, topic: &Topic) -> PortResult<Vec<Video>> {
        let search = self
            .search
            .as_ref()
            .ok_or_else(|| PortError::MissingCredential("video search".to_string()))?;
        tokio::time::timeout(self.timeout, search.search(&Self::query(topic), MAX_VIDEOS))
            .await
            .map_err(|_| PortError::Timeout)?
    }
}
