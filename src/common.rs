/// Accent color used whenever a video's dominant color can't be determined
pub const DEFAULT_ACCENT_COLOR: &str = "#3B82F6";

/// Shown in place of a missing description
pub const NO_DESCRIPTION: &str = "No description available";

/// Maximum length (in characters) of a displayed video description
pub const DESCRIPTION_MAX_LENGTH: usize = 150;

/// Important info about a video shown in the carousel
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub title: String,
    /// Already truncated for display
    pub description: String,
    /// URL of the largest thumbnail, empty if the video has none
    pub image: String,
    /// Hex triplet such as `#1f2e3d`
    pub dominant_color: String,
}

impl Video {
    pub fn accent_color(&self) -> &str {
        if self.dominant_color.is_empty() {
            DEFAULT_ACCENT_COLOR
        } else {
            &self.dominant_color
        }
    }
}
