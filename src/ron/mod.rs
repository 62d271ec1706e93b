//! RON file loading and change watching.
//!
//! Small helpers for reading RON configuration from disk plus a filesystem
//! watcher resource that raises a shared flag when the watched directory
//! changes. Used by the settings module for hot-reload during development.

use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File-watcher resource for RON hot-reload.
#[derive(Resource)]
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Set to `true` when a watched file is modified.
    _watcher: Option<notify::RecommendedWatcher>, // Kept alive so the OS watcher isn't dropped.
}

impl RonWatcher {
    /// A `RonWatcher` without an active OS watcher. Fallback for when watcher
    /// creation fails; `changed` stays `false` forever.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }
}

/// Load all `.ron` files from a directory and deserialize each into `T`.
///
/// Files that fail to parse are skipped with a warning on stderr, so a
/// half-edited config can't take the game down mid-reload.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let mut items = Vec::new();

    if let Ok(entries) = std::fs::read_dir(path) {
        for entry in entries.flatten() {
            if let Ok(metadata) = entry.metadata()
                && metadata.is_file()
                && entry.path().extension().is_some_and(|ext| ext == "ron")
                && let Ok(content) = std::fs::read_to_string(entry.path())
            {
                match ron::from_str::<T>(&content) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        eprintln!("Failed to parse {}: {e:?}", entry.path().display());
                    }
                }
            }
        }
    }

    items
}

/// Create a `RonWatcher` that watches `path` for modifications.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be created
/// or registered for the provided path.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    // Canonicalize so events can be filtered against the watched directory
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, notify::EventKind::Modify(_)) {
                    let relevant = event.paths.iter().any(|p| {
                        std::fs::canonicalize(p)
                            .unwrap_or_else(|_| p.clone())
                            .starts_with(&watched_path)
                    });
                    if relevant
                        && let Ok(mut flag) = changed_clone.lock()
                    {
                        *flag = true;
                    }
                }
            }
            Err(e) => eprintln!("Watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher { changed, _watcher: Some(watcher) })
}
