use anyhow::Result;
use attohttpc::header::{AUTHORIZATION, CONTENT_TYPE};
use log::{debug, trace};
use thiserror::Error;

use crate::common::{Video, DESCRIPTION_MAX_LENGTH, NO_DESCRIPTION};
use crate::config::Config;
use crate::source::base::VideoSource;
use crate::truncate::truncate_description;
use crate::worker::{WorkerPool, DEFAULT_WORKERS};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch videos")]
    BadStatus(u16),

    #[error("Failed to parse video list: {0}")]
    Parse(#[source] serde_json::Error),
}

/*
{
  data: [
    {
      name: String,
      description: String | null,
      pictures: {
        sizes: [ { width: Int, height: Int, link: String } ]  // smallest first
      }
    }
  ]
}
*/
#[derive(Serialize, Deserialize, Debug, Clone)]
struct VimeoVideoPage {
    data: Vec<VimeoVideoInfo>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct VimeoVideoInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    pictures: Option<VimeoPictures>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct VimeoPictures {
    #[serde(default)]
    sizes: Option<Vec<VimeoPictureSize>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct VimeoPictureSize {
    #[serde(default)]
    link: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Return the largest thumbnail link, sizes being ordered smallest first
fn choose_largest_thumbnail(pictures: &Option<VimeoPictures>) -> String {
    pictures
        .as_ref()
        .and_then(|p| p.sizes.as_ref())
        .and_then(|sizes| sizes.last())
        .and_then(|s| s.link.clone())
        .unwrap_or_default()
}

/// Everything needed to query a curated collection
#[derive(Debug, Clone)]
pub struct VimeoSettings {
    pub api_prefix: String,
    pub access_token: Option<String>,
    pub collection: String,
    pub per_page: u32,
    pub description_length: usize,
    pub sample_workers: usize,
}

impl VimeoSettings {
    pub fn from_config(cfg: &Config) -> VimeoSettings {
        VimeoSettings {
            api_prefix: cfg.api_prefix.clone(),
            access_token: cfg.access_token.clone(),
            collection: cfg.collection.clone(),
            per_page: cfg.per_page,
            description_length: DESCRIPTION_MAX_LENGTH,
            sample_workers: DEFAULT_WORKERS,
        }
    }
}

/// Object to query the videos in a Vimeo collection
#[derive(Debug)]
pub struct VimeoQuery {
    settings: VimeoSettings,
}

impl VimeoQuery {
    pub fn new(settings: VimeoSettings) -> VimeoQuery {
        VimeoQuery { settings }
    }

    fn url(&self) -> String {
        format!(
            "{prefix}/channels/{collection}/videos?per_page={per_page}",
            prefix = self.settings.api_prefix.trim_end_matches('/'),
            collection = self.settings.collection,
            per_page = self.settings.per_page,
        )
    }

    fn request_page(&self) -> Result<VimeoVideoPage> {
        let url = self.url();
        debug!("Retrieving URL {}", &url);

        let mut req = attohttpc::get(&url).header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.settings.access_token {
            req = req.try_header(AUTHORIZATION, format!("Bearer {}", token))?;
        }
        let resp = req.send()?;
        if !resp.is_success() {
            debug!("Request to {} failed with status {}", &url, resp.status());
            return Err(FetchError::BadStatus(resp.status().as_u16()).into());
        }

        let text = resp.text()?;
        trace!("Raw response: {}", &text);
        let data: VimeoVideoPage = serde_json::from_str(&text).map_err(FetchError::Parse)?;
        trace!("Raw deserialisation: {:?}", &data);
        Ok(data)
    }
}

impl VideoSource for VimeoQuery {
    fn videos(&self) -> Result<Vec<Video>> {
        let page = self.request_page()?;

        let images: Vec<String> = page
            .data
            .iter()
            .map(|v| choose_largest_thumbnail(&v.pictures))
            .collect();

        // Wait for every color so the list is complete when returned
        let pool = WorkerPool::start(self.settings.sample_workers);
        let colors = pool.sample_all(&images);

        let ret: Vec<Video> = page
            .data
            .into_iter()
            .zip(images.into_iter().zip(colors))
            .map(|(d, (image, dominant_color))| {
                let description = match d.description {
                    Some(ref desc) if !desc.is_empty() => desc.as_str(),
                    _ => NO_DESCRIPTION,
                };
                Video {
                    title: d.name.unwrap_or_default(),
                    description: truncate_description(
                        description,
                        self.settings.description_length,
                    ),
                    image,
                    dominant_color,
                }
            })
            .collect();

        debug!("Fetched {} videos from {}", ret.len(), self.settings.collection);
        Ok(ret)
    }
}
