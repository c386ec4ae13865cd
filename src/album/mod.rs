//! Virtual albums derived from catalog row attributes.
//!
//! Albums are a closed set presented in a fixed order. A row may belong to
//! several albums at once, e.g. a video shot into `DCIM/Camera/` is in both
//! [`Album::Camera`] and [`Album::Videos`]. Membership ignores visibility;
//! queries always intersect it with the visible rows.

use crate::catalog::{CatalogRow, MediaType};
use crate::error::FacadeError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Relative path of the camera album.
pub const RELATIVE_PATH_CAMERA: &str = "DCIM/Camera/";

/// `LIKE` pattern for screenshot folders nested under any directory.
pub const RELATIVE_PATH_SCREENSHOTS: &str = "%/Screenshots/";

const SCREENSHOTS_DIR: &str = "Screenshots/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Album {
    Camera,
    Videos,
    Screenshots,
    Downloads,
}

impl Album {
    /// All albums, in presentation order.
    pub const ALL: [Album; 4] = [
        Album::Camera,
        Album::Videos,
        Album::Screenshots,
        Album::Downloads,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Album::Camera => "Camera",
            Album::Videos => "Videos",
            Album::Screenshots => "Screenshots",
            Album::Downloads => "Downloads",
        }
    }

    /// SQL condition over `files` selecting the album's rows.
    ///
    /// `LIKE` without wildcards is an ASCII case-insensitive equality.
    pub(crate) fn where_clause(&self) -> String {
        match self {
            Album::Camera => format!("relative_path LIKE '{}'", RELATIVE_PATH_CAMERA),
            Album::Videos => format!("media_type = {}", MediaType::Video.code()),
            Album::Screenshots => format!(
                "(relative_path LIKE '{}' OR relative_path LIKE '{}')",
                SCREENSHOTS_DIR, RELATIVE_PATH_SCREENSHOTS
            ),
            Album::Downloads => "is_download = 1".to_string(),
        }
    }

    /// Whether `row` belongs to the album, regardless of its visibility.
    pub fn contains(&self, row: &CatalogRow) -> bool {
        match self {
            Album::Camera => row.relative_path.eq_ignore_ascii_case(RELATIVE_PATH_CAMERA),
            Album::Videos => row.media_type == MediaType::Video,
            Album::Screenshots => is_screenshots_path(&row.relative_path),
            Album::Downloads => row.is_download,
        }
    }
}

fn is_screenshots_path(relative_path: &str) -> bool {
    let path = relative_path.to_ascii_lowercase();
    let dir = SCREENSHOTS_DIR.to_ascii_lowercase();
    path == dir || path.ends_with(&format!("/{}", dir))
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Album {
    type Err = FacadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Album::ALL
            .into_iter()
            .find(|album| album.id() == s)
            .ok_or_else(|| FacadeError::InvalidArgument(format!("Unknown album id: {:?}", s)))
    }
}

/// Localized album names supplied by the host. Never inspected by the facade.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlbumDisplayNames {
    pub camera: String,
    pub videos: String,
    pub screenshots: String,
    pub downloads: String,
}

impl Default for AlbumDisplayNames {
    fn default() -> Self {
        Self {
            camera: "Camera".to_string(),
            videos: "Videos".to_string(),
            screenshots: "Screenshots".to_string(),
            downloads: "Downloads".to_string(),
        }
    }
}

impl AlbumDisplayNames {
    pub fn get(&self, album: Album) -> &str {
        match album {
            Album::Camera => &self.camera,
            Album::Videos => &self.videos,
            Album::Screenshots => &self.screenshots,
            Album::Downloads => &self.downloads,
        }
    }
}
