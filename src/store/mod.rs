//! Layout Set persistence.
//!
//! The Layout Set is the ordered list of custom layouts, stored under one key
//! of a workspace-scoped settings file. It is always written as a whole.
//! When it is empty the built-in presets are served instead; the two are
//! never mixed.
//!
//! The applier's session state lives in a small JSON file next to the
//! settings file, so every invocation against one workspace shares it.

mod settings;

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::applier::LayoutSessionState;
use crate::config::schema::StoreConfig;
use crate::error::StoreError;
use crate::layout::{self, LayoutConfig};

pub use settings::{read_settings, write_settings_atomic};

/// File name of the session state, beside the settings file.
pub const SESSION_FILE_NAME: &str = "layout-manager.session.json";

/// Reads and writes the Layout Set of one workspace.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    path: PathBuf,
    key: String,
}

impl LayoutStore {
    /// Creates a store over `path`, keeping the Layout Set under `key`.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Creates a store for `workspace` using the configured file and key.
    pub fn for_workspace(workspace: &Path, config: &StoreConfig) -> Self {
        Self::new(workspace.join(&config.settings_file), config.setting_key.clone())
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settings key holding the Layout Set.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the persisted Layout Set, or the built-in presets when it is
    /// empty.
    pub fn load_all(&self) -> Result<Vec<LayoutConfig>, StoreError> {
        let custom = self.load_custom()?;
        if custom.is_empty() {
            tracing::debug!("No custom layouts in {:?}, using built-in presets", self.path);
            return Ok(layout::default_layouts());
        }
        Ok(custom)
    }

    /// Returns the persisted Layout Set only (possibly empty).
    pub fn load_custom(&self) -> Result<Vec<LayoutConfig>, StoreError> {
        let document = read_settings(&self.path)?;
        match document.get(&self.key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                message: format!("invalid \"{}\": {}", self.key, e),
            }),
        }
    }

    /// Replaces the persisted Layout Set with `layouts`.
    ///
    /// Other keys in the settings file are preserved. The store does not
    /// filter built-in layouts out; callers decide what gets persisted.
    pub fn save_all(&self, layouts: &[LayoutConfig]) -> Result<(), StoreError> {
        let mut document = read_settings(&self.path)?;
        let set = serde_json::to_value(layouts).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        if let Some(object) = document.as_object_mut() {
            object.insert(self.key.clone(), set);
        }
        write_settings_atomic(&self.path, &document)?;

        tracing::info!(count = layouts.len(), path = ?self.path, "Saved layout set");
        Ok(())
    }

    /// Returns `true` if `name` is a built-in layout.
    pub fn is_built_in(&self, name: &str) -> bool {
        layout::is_built_in(name)
    }

    /// Path of the session state file.
    pub fn session_path(&self) -> PathBuf {
        self.path.with_file_name(SESSION_FILE_NAME)
    }

    /// Reads the persisted session state.
    ///
    /// A missing file is a fresh session. An unreadable or malformed one is
    /// logged and also treated as fresh, since the state only steers the
    /// maximize toggle.
    pub fn load_session(&self) -> LayoutSessionState {
        let path = self.session_path();
        let state = read_settings(&path).and_then(|document| {
            serde_json::from_value::<LayoutSessionState>(document).map_err(|e| StoreError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })
        });
        match state {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring session state");
                LayoutSessionState::default()
            }
        }
    }

    /// Persists the session state.
    pub fn save_session(&self, state: LayoutSessionState) -> Result<(), StoreError> {
        let path = self.session_path();
        let document = serde_json::to_value(state).map_err(|e| StoreError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        write_settings_atomic(&path, &document)?;
        tracing::debug!(state = ?state, path = ?path, "Saved session state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PanelView, Side, SidebarView};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    const KEY: &str = "layoutManager.layouts";

    fn store_in(dir: &Path) -> LayoutStore {
        LayoutStore::new(dir.join(".vscode").join("settings.json"), KEY)
    }

    #[test]
    fn test_empty_workspace_serves_defaults() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = store_in(dir.path());
        assert_eq!(store.load_all().expect("load failed"), layout::default_layouts());
        assert!(store.load_custom().expect("load failed").is_empty());
    }

    #[test]
    fn test_empty_array_and_null_serve_defaults() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = store_in(dir.path());
        for value in [json!([]), Value::Null] {
            write_settings_atomic(store.path(), &json!({ KEY: value })).expect("write failed");
            assert_eq!(store.load_all().expect("load failed").len(), 4);
        }
    }

    #[test]
    fn test_persisted_set_replaces_defaults() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = store_in(dir.path());
        let focus = LayoutConfig::new("Focus").with_panel(PanelView::Output, false);

        store.save_all(std::slice::from_ref(&focus)).expect("save failed");

        assert_eq!(store.load_all().expect("load failed"), vec![focus]);
    }

    #[test]
    fn test_session_round_trips_beside_settings() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = store_in(dir.path());
        assert_eq!(store.load_session(), LayoutSessionState::default());

        let maximized = LayoutSessionState {
            panel_maximized: true,
        };
        store.save_session(maximized).expect("save failed");

        assert_eq!(
            store.session_path(),
            dir.path().join(".vscode").join(SESSION_FILE_NAME)
        );
        assert_eq!(store.load_session(), maximized);
        let raw = fs::read_to_string(store.session_path()).expect("read failed");
        assert!(raw.contains("\"panelMaximized\": true"));
        // The Layout Set is untouched.
        assert!(!store.path().exists());
    }

    #[test]
    fn test_malformed_session_is_fresh() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = store_in(dir.path());
        fs::create_dir_all(dir.path().join(".vscode")).expect("mkdir failed");
        fs::write(store.session_path(), "[1, 2").expect("write failed");

        assert_eq!(store.load_session(), LayoutSessionState::default());
    }

    #[test]
    fn test_save_replaces_whole_set() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = store_in(dir.path());
        let a = LayoutConfig::new("A").with_primary_sidebar(SidebarView::Debug, Side::Left);
        let b = LayoutConfig::new("B");

        store.save_all(&[a.clone(), b]).expect("save failed");
        store.save_all(&[a.clone()]).expect("save failed");

        assert_eq!(store.load_custom().expect("load failed"), vec![a]);
    }

    #[test]
    fn test_save_preserves_other_settings() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = store_in(dir.path());
        fs::create_dir_all(store.path().parent().expect("has parent")).expect("mkdir failed");
        fs::write(
            store.path(),
            r#"{
  // user settings
  "editor.tabSize": 2,
  "files.exclude": {"target": true}
}"#,
        )
        .expect("write failed");

        store
            .save_all(&[LayoutConfig::new("Bare")])
            .expect("save failed");

        let document = read_settings(store.path()).expect("read failed");
        assert_eq!(document.get("editor.tabSize").expect("should exist"), 2);
        assert_eq!(
            document.get("files.exclude").expect("should exist"),
            &json!({"target": true})
        );
        assert_eq!(document.get(KEY).expect("should exist"), &json!([{"name": "Bare"}]));
    }

    #[test]
    fn test_invalid_layout_set_is_parse_error() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = store_in(dir.path());
        write_settings_atomic(store.path(), &json!({ KEY: [{"label": "no name"}] }))
            .expect("write failed");

        let err = store.load_all().expect_err("should fail");
        assert!(err.to_string().contains(KEY), "error should name the key: {err}");
    }

    #[test]
    fn test_custom_key() {
        let dir = tempdir().expect("tempdir creation failed");
        let store = LayoutStore::new(dir.path().join("settings.json"), "my.layouts");
        store.save_all(&[LayoutConfig::new("Mine")]).expect("save failed");

        let document = read_settings(store.path()).expect("read failed");
        assert!(document.get("my.layouts").is_some());
        assert!(document.get(KEY).is_none());
    }

    #[test]
    fn test_for_workspace_joins_configured_file() {
        let config = StoreConfig::default();
        let store = LayoutStore::for_workspace(Path::new("/ws"), &config);
        assert_eq!(store.path(), Path::new("/ws/.vscode/settings.json"));
        assert_eq!(store.key(), KEY);
    }

    #[test]
    fn test_is_built_in_delegates_to_presets() {
        let store = LayoutStore::new("settings.json", KEY);
        assert!(store.is_built_in("search"));
        assert!(!store.is_built_in("Focus"));
    }
}
