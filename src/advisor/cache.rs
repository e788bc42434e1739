//! Best-effort file cache for advice responses, keyed by a content hash of
//! the fully-rendered prompt. Not a correctness mechanism: every error path
//! degrades to a cache miss or a dropped write.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Clone)]
pub struct AdviceCache {
    dir: PathBuf,
    ttl: Duration,
}

impl AdviceCache {
    pub fn new() -> Self {
        let dir = dotenv::var("ADVICE_CACHE_DIR").unwrap_or_else(|_| "cache/advice".to_string());
        Self::with_dir(dir.into(), DEFAULT_TTL)
    }

    pub fn with_dir(dir: PathBuf, ttl: Duration) -> Self {
        AdviceCache { dir, ttl }
    }

    pub fn get(&self, prompt: &str) -> Option<String> {
        let path = self.dir.join(key(prompt));
        let modified = fs::metadata(&path).ok()?.modified().ok()?;
        if modified.elapsed().ok()? > self.ttl {
            return None;
        }
        let text = fs::read_to_string(&path).ok()?;
        debug!("Advice cache hit: {}", path.display());
        Some(text)
    }

    pub fn put(&self, prompt: &str, text: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(self.dir.join(key(prompt)), text))
        {
            debug!("Advice cache write skipped: {e}");
        }
    }
}

impl Default for AdviceCache {
    fn default() -> Self {
        Self::new()
    }
}

fn key(prompt: &str) -> String {
    hex::encode(Sha256::digest(prompt.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AdviceCache::with_dir(dir.path().to_path_buf(), DEFAULT_TTL);
        assert_eq!(cache.get("prompt a"), None);
        cache.put("prompt a", "tip a");
        assert_eq!(cache.get("prompt a"), Some("tip a".to_string()));
        assert_eq!(cache.get("prompt b"), None);
    }

    #[test]
    fn expired_entries_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AdviceCache::with_dir(dir.path().to_path_buf(), Duration::from_secs(0));
        cache.put("prompt", "tip");
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get("prompt"), None);
    }

    #[test]
    fn distinct_prompts_have_distinct_keys() {
        assert_ne!(key("a"), key("b"));
        assert_eq!(key("a"), key("a"));
    }
}
