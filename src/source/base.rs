use anyhow::Result;

use crate::common::Video;

/// Source for the videos shown in the carousel (e.g a curated Vimeo
/// collection).
pub trait VideoSource {
    /// Fetch the complete list of videos. Called once per carousel, so
    /// implementations should not cache or retry.
    fn videos(&self) -> Result<Vec<Video>>;
}
