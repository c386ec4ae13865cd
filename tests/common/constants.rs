//! Shared constants for end-to-end tests

pub const JPEG: &str = "image/jpeg";
pub const MP4: &str = "video/mp4";

/// Relative path of a plain download folder
pub const DOWNLOAD_PATH: &str = "Download/";

/// Relative path of a folder that belongs to no album
pub const PICTURES_PATH: &str = "Pictures/";

pub const SCREENSHOTS_PATH: &str = "Pictures/Screenshots/";

pub const IMAGE_SIZE_BYTES: u64 = 8000;
pub const VIDEO_DURATION_MS: u64 = 5;
