//! Cookie storage for the session token.
//!
//! The login flow writes through the `CookieStore` trait so the front end
//! decides where cookies live. Expired cookies are never handed out.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Cookie file name in cache directory
const COOKIE_FILE: &str = "cookies.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieOptions {
    pub path: String,
    pub expires: DateTime<Utc>,
    /// Only send over secure transport
    pub secure: bool,
}

impl CookieOptions {
    /// Site-wide, secure cookie expiring at `expires`
    pub fn site_wide(expires: DateTime<Utc>) -> Self {
        Self {
            path: "/".to_string(),
            expires,
            secure: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub options: CookieOptions,
}

impl Cookie {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.options.expires
    }
}

pub trait CookieStore: Send {
    fn set(&mut self, name: &str, value: &str, options: CookieOptions) -> Result<()>;

    /// Get a cookie by name, if present and not expired
    fn get(&self, name: &str) -> Option<Cookie>;

    fn remove(&mut self, name: &str) -> Result<()>;
}

/// In-process cookie jar
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: HashMap<String, Cookie>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieStore for MemoryCookieStore {
    fn set(&mut self, name: &str, value: &str, options: CookieOptions) -> Result<()> {
        self.cookies.insert(
            name.to_string(),
            Cookie {
                name: name.to_string(),
                value: value.to_string(),
                options,
            },
        );
        Ok(())
    }

    fn get(&self, name: &str) -> Option<Cookie> {
        self.cookies.get(name).filter(|c| !c.is_expired()).cloned()
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        self.cookies.remove(name);
        Ok(())
    }
}

/// Cookie jar persisted as JSON in the cache directory
pub struct FileCookieStore {
    cache_dir: PathBuf,
    cookies: HashMap<String, Cookie>,
}

impl FileCookieStore {
    /// Open the store, loading any unexpired cookies from disk
    pub fn open(cache_dir: PathBuf) -> Result<Self> {
        let mut store = Self {
            cache_dir,
            cookies: HashMap::new(),
        };

        let path = store.cookie_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read cookie file")?;
            let cookies: Vec<Cookie> = serde_json::from_str(&contents)
                .context("Failed to parse cookie file")?;

            let total = cookies.len();
            store.cookies = cookies
                .into_iter()
                .filter(|c| !c.is_expired())
                .map(|c| (c.name.clone(), c))
                .collect();
            debug!(loaded = store.cookies.len(), dropped = total - store.cookies.len(), "Cookies loaded");
        }

        Ok(store)
    }

    /// Open the store, starting empty if the cookie file is unreadable.
    /// The next `set` overwrites the bad file.
    pub fn open_or_empty(cache_dir: PathBuf) -> Self {
        match Self::open(cache_dir.clone()) {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Ignoring unreadable cookie file");
                Self {
                    cache_dir,
                    cookies: HashMap::new(),
                }
            }
        }
    }

    /// Write via a temp file and rename so an interrupted save never
    /// leaves a truncated cookie file behind.
    fn save(&self) -> Result<()> {
        let path = self.cookie_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let cookies: Vec<&Cookie> = self.cookies.values().collect();
        let contents = serde_json::to_string_pretty(&cookies)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write cookie file {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace cookie file {}", path.display()))?;
        Ok(())
    }

    fn cookie_path(&self) -> PathBuf {
        self.cache_dir.join(COOKIE_FILE)
    }
}

impl CookieStore for FileCookieStore {
    fn set(&mut self, name: &str, value: &str, options: CookieOptions) -> Result<()> {
        self.cookies.insert(
            name.to_string(),
            Cookie {
                name: name.to_string(),
                value: value.to_string(),
                options,
            },
        );
        self.save()
    }

    fn get(&self, name: &str) -> Option<Cookie> {
        self.cookies.get(name).filter(|c| !c.is_expired()).cloned()
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        if self.cookies.remove(name).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn in_one_hour() -> CookieOptions {
        CookieOptions::site_wide(Utc::now() + Duration::hours(1))
    }

    #[test]
    fn test_site_wide_options() {
        let opts = in_one_hour();
        assert_eq!(opts.path, "/");
        assert!(opts.secure);
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryCookieStore::new();
        assert!(store.get("ENLACEE_TOKEN").is_none());

        store.set("ENLACEE_TOKEN", "T", in_one_hour()).unwrap();
        assert_eq!(store.get("ENLACEE_TOKEN").unwrap().value, "T");

        store.remove("ENLACEE_TOKEN").unwrap();
        assert!(store.get("ENLACEE_TOKEN").is_none());
    }

    #[test]
    fn test_memory_store_hides_expired() {
        let mut store = MemoryCookieStore::new();
        let expired = CookieOptions::site_wide(Utc::now() - Duration::seconds(1));
        store.set("ENLACEE_TOKEN", "T", expired).unwrap();
        assert!(store.get("ENLACEE_TOKEN").is_none());
    }

    #[test]
    fn test_file_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = FileCookieStore::open(dir.path().to_path_buf()).unwrap();
        store.set("ENLACEE_TOKEN", "T", in_one_hour()).unwrap();
        store
            .set("stale", "x", CookieOptions::site_wide(Utc::now() - Duration::minutes(1)))
            .unwrap();

        let reopened = FileCookieStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("ENLACEE_TOKEN").unwrap().value, "T");
        assert!(reopened.get("stale").is_none());
        assert!(!reopened.cookies.contains_key("stale"));
    }

    #[test]
    fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileCookieStore::open(dir.path().to_path_buf()).unwrap();
        store.set("ENLACEE_TOKEN", "T", in_one_hour()).unwrap();
        store.remove("ENLACEE_TOKEN").unwrap();

        let reopened = FileCookieStore::open(dir.path().to_path_buf()).unwrap();
        assert!(reopened.get("ENLACEE_TOKEN").is_none());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(COOKIE_FILE), "not json").unwrap();
        assert!(FileCookieStore::open(dir.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_truncated_file_opens_empty_and_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(COOKIE_FILE);
        std::fs::write(&path, r#"[{"name":"ENLACEE_TO"#).unwrap();

        let mut store = FileCookieStore::open_or_empty(dir.path().to_path_buf());
        assert!(store.get("ENLACEE_TOKEN").is_none());

        store.set("ENLACEE_TOKEN", "T", in_one_hour()).unwrap();

        let reopened = FileCookieStore::open(dir.path().to_path_buf())
            .expect("cookie file should be valid after set");
        assert_eq!(reopened.get("ENLACEE_TOKEN").unwrap().value, "T");
        assert!(!dir.path().join("cookies.json.tmp").exists());
    }

    #[test]
    fn test_open_or_empty_keeps_valid_cookies() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileCookieStore::open(dir.path().to_path_buf()).unwrap();
        store.set("ENLACEE_TOKEN", "T", in_one_hour()).unwrap();

        let reopened = FileCookieStore::open_or_empty(dir.path().to_path_buf());
        assert_eq!(reopened.get("ENLACEE_TOKEN").unwrap().value, "T");
    }
}
