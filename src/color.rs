use anyhow::{Context, Result};
use log::{debug, trace};
use thiserror::Error;

use crate::common::DEFAULT_ACCENT_COLOR;

/// Every 5th RGBA pixel is sampled
const SAMPLE_STRIDE_PIXELS: usize = 5;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("No image URL given")]
    NoImage,

    #[error("Image request to {0} failed with status {1}")]
    BadStatus(String, u16),

    #[error("Image contains no pixels")]
    Empty,
}

/// Average color of an RGBA8 buffer as a `#rrggbb` string
pub fn average_color(rgba: &[u8]) -> Option<String> {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for px in rgba.chunks_exact(4).step_by(SAMPLE_STRIDE_PIXELS) {
        sums[0] += px[0] as u64;
        sums[1] += px[1] as u64;
        sums[2] += px[2] as u64;
        count += 1;
    }
    if count == 0 {
        return None;
    }

    let avg = |sum: u64| -> u8 { (sum as f64 / count as f64).round().min(255.0) as u8 };
    Some(format!(
        "#{:02x}{:02x}{:02x}",
        avg(sums[0]),
        avg(sums[1]),
        avg(sums[2])
    ))
}

/// Decode an encoded image (PNG, JPEG, WebP) and average its pixels
pub fn decode_average(bytes: &[u8]) -> Result<String> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = img.to_rgba8();
    trace!("Decoded {}x{} image", rgba.width(), rgba.height());
    average_color(rgba.as_raw()).ok_or_else(|| SampleError::Empty.into())
}

fn fetch_image(url: &str) -> Result<Vec<u8>> {
    if url.is_empty() {
        return Err(SampleError::NoImage.into());
    }
    debug!("Retrieving image {}", url);
    let resp = attohttpc::get(url).send()?;
    if !resp.is_success() {
        return Err(SampleError::BadStatus(url.into(), resp.status().as_u16()).into());
    }
    let bytes = resp.bytes()?;
    Ok(bytes)
}

/// Fetch and sample the image at `url`
pub fn sample_color(url: &str) -> Result<String> {
    let bytes = fetch_image(url)?;
    decode_average(&bytes).with_context(|| format!("Failed to sample color from {}", url))
}

/// Like `sample_color` but never fails, falling back to the default accent
pub fn dominant_color(url: &str) -> String {
    match sample_color(url) {
        Ok(c) => c,
        Err(e) => {
            debug!("Using default color for {:?} - {:?}", url, e);
            DEFAULT_ACCENT_COLOR.into()
        }
    }
}
