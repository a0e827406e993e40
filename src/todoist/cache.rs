//! On-disk cache of the accumulated sync state.
//!
//! Caching keeps restarts cheap: the saved sync token lets the next run ask
//! only for changes instead of a full dump. Every failure mode here degrades
//! to "no cache", which just means one extra full sync.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::SyncState;

/// Cache location for the given account under the platform cache directory.
pub fn default_cache_path(token: &str) -> Option<PathBuf> {
    let dir = dirs::cache_dir()?;
    Some(
        dir.join("nextaction")
            .join(format!("{}.json", token_fingerprint(token))),
    )
}

/// The file is keyed by a fingerprint of the token so that switching
/// accounts cannot replay another account's state. The token itself never
/// reaches disk.
fn token_fingerprint(token: &str) -> String {
    let mut hasher = DefaultHasher::new();
    token.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

pub fn load(path: &Path) -> Option<SyncState> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read sync cache");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(state) => {
            debug!(path = %path.display(), "loaded sync cache");
            Some(state)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "discarding corrupt sync cache");
            None
        }
    }
}

/// Best effort: a failed write is logged and the process carries on with
/// its in-memory state.
pub fn save(path: &Path, state: &SyncState) {
    let persist = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(state).map_err(std::io::Error::other)?;
        fs::write(path, raw)
    };
    if let Err(e) = persist() {
        warn!(path = %path.display(), error = %e, "failed to write sync cache");
    }
}
