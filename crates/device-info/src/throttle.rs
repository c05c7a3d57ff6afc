//! Collection throttling.
//!
//! The last-collection timestamp is the only persisted state this crate
//! owns. It lives in a small JSON preference file under the platform
//! config dir and must survive process restarts; everything else about
//! the store is best-effort (a corrupt or unwritable file degrades to
//! defaults with a warning, never an error to the caller).

use std::collections::HashMap;
use std::path::PathBuf;

/// Minimum elapsed time between two collection runs: 30 days.
pub const THROTTLE_WINDOW_MS: i64 = 1000 * 60 * 60 * 24 * 30;

/// Preference key holding the last-collection timestamp.
pub const PREF_LAST_COLLECTED: &str = "last_time_device_info_collected";

/// Errors from the preference store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persistent key-value store for integer preferences.
pub trait PrefStore: Send + Sync {
    fn get_i64(&self, key: &str) -> Option<i64>;

    fn put_i64(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// File-backed store: one JSON object of integer preferences.
#[derive(Debug)]
pub struct JsonPrefStore {
    path: PathBuf,
    values: HashMap<String, i64>,
}

impl JsonPrefStore {
    /// Opens the store at `path`, reading existing values if present.
    /// A missing or unparsable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        %err,
                        "failed to parse preference file, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, values }
    }

    /// Default preference file location for the host platform.
    pub fn default_path() -> PathBuf {
        config_base_dir().join("alohalytics").join("prefs.json")
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, &json)?;
        set_permissions_0600(&self.path);
        Ok(())
    }
}

impl PrefStore for JsonPrefStore {
    fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn put_i64(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

/// In-memory store for tests and embedding hosts with their own prefs.
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
    values: HashMap<String, i64>,
}

impl PrefStore for MemoryPrefStore {
    fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn put_i64(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Decides whether a collection run is due.
///
/// When no timestamp has ever been stored, the stored value defaults to
/// `now`, so the first-ever trigger seeds the timestamp and waits a full
/// window rather than collecting immediately. This lazy-seeding policy is
/// deliberate: device metadata rarely changes, and the first window's
/// worth of app starts is not worth the battery and traffic.
pub struct ThrottleGate<S: PrefStore> {
    store: S,
}

impl<S: PrefStore> ThrottleGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns `true` iff more than the throttle window has elapsed since
    /// the last recorded collection.
    pub fn should_collect(&self, now_ms: i64) -> bool {
        let last = self.store.get_i64(PREF_LAST_COLLECTED).unwrap_or(now_ms);
        now_ms - last > THROTTLE_WINDOW_MS
    }

    /// Persists `now_ms` as the last collection time. Must run before the
    /// background pass is handed off so a second trigger within the window
    /// is suppressed even while the pass is still in flight. A store
    /// failure is logged and absorbed; the pending run proceeds anyway.
    pub fn mark_collected(&mut self, now_ms: i64) {
        if let Err(err) = self.store.put_i64(PREF_LAST_COLLECTED, now_ms) {
            tracing::warn!(%err, "failed to persist last-collection timestamp");
        }
    }

    /// Seeds the timestamp on first use without collecting.
    pub fn seed_if_unset(&mut self, now_ms: i64) {
        if self.store.get_i64(PREF_LAST_COLLECTED).is_none() {
            self.mark_collected(now_ms);
        }
    }
}

fn set_permissions_0600(path: &std::path::Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_trigger_seeds_and_waits() {
        let gate = ThrottleGate::new(MemoryPrefStore::default());
        // No stored timestamp: last defaults to now, delta is zero.
        assert!(!gate.should_collect(1_000_000));
    }

    #[test]
    fn within_window_is_suppressed() {
        let t0 = 1_000_000_000_000;
        let mut gate = ThrottleGate::new(MemoryPrefStore::default());
        gate.mark_collected(t0);

        assert!(!gate.should_collect(t0 + 1));
        assert!(!gate.should_collect(t0 + THROTTLE_WINDOW_MS));
    }

    #[test]
    fn past_window_collects_again() {
        let t0 = 1_000_000_000_000;
        let mut gate = ThrottleGate::new(MemoryPrefStore::default());
        gate.mark_collected(t0);

        assert!(gate.should_collect(t0 + THROTTLE_WINDOW_MS + 1));
    }

    #[test]
    fn clock_rollback_does_not_panic() {
        let t0 = 1_000_000_000_000;
        let mut gate = ThrottleGate::new(MemoryPrefStore::default());
        gate.mark_collected(t0);

        // Rolled-back clock: negative delta, simply not due.
        assert!(!gate.should_collect(t0 - 5_000));
    }

    #[test]
    fn seed_if_unset_only_seeds_once() {
        let mut gate = ThrottleGate::new(MemoryPrefStore::default());
        gate.seed_if_unset(500);
        gate.seed_if_unset(900);
        assert_eq!(gate.store.get_i64(PREF_LAST_COLLECTED), Some(500));
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = JsonPrefStore::open(&path);
        assert_eq!(store.get_i64(PREF_LAST_COLLECTED), None);
        store.put_i64(PREF_LAST_COLLECTED, 42).unwrap();

        let store = JsonPrefStore::open(&path);
        assert_eq!(store.get_i64(PREF_LAST_COLLECTED), Some(42));
    }

    #[test]
    fn json_store_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonPrefStore::open(&path);
        assert_eq!(store.get_i64(PREF_LAST_COLLECTED), None);
    }

    #[test]
    fn json_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("prefs.json");

        let mut store = JsonPrefStore::open(&path);
        store.put_i64(PREF_LAST_COLLECTED, 7).unwrap();
        assert!(path.exists());
    }
}
