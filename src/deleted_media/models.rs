//! Data models for the deleted-media log.

use serde::{Deserialize, Serialize};

/// Records that `id` was visible media and no longer is, as of
/// `generation_modified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tombstone {
    pub id: u64,
    pub generation_modified: u64,
}
