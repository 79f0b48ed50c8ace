//! Location of the configuration file.
//!
//! `$XDG_CONFIG_HOME/layout-manager/config.toml` when the variable is set and
//! non-empty, otherwise the platform config directory from `dirs`.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "layout-manager";
const CONFIG_FILE: &str = "config.toml";

/// Directory holding `config.toml`.
pub fn config_dir() -> PathBuf {
    base_dir().join(APP_NAME)
}

fn base_dir() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default path of the configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Creates `path` and its parents, owner-only on unix.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Runs `f` with `XDG_CONFIG_HOME` set to `value`, then restores it.
    fn with_config_home<F: FnOnce()>(value: Option<&str>, f: F) {
        let original = std::env::var_os("XDG_CONFIG_HOME");
        match value {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        f();
        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    #[test]
    #[serial(env)]
    fn test_config_home_override() {
        with_config_home(Some("/custom/config"), || {
            assert_eq!(
                config_path(),
                PathBuf::from("/custom/config/layout-manager/config.toml")
            );
        });
    }

    #[test]
    #[serial(env)]
    fn test_empty_config_home_is_ignored() {
        with_config_home(Some(""), || {
            let expected = dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("layout-manager");
            assert_eq!(config_dir(), expected);
        });
    }

    #[test]
    #[serial(env)]
    fn test_unset_config_home_uses_platform_dir() {
        with_config_home(None, || {
            assert!(config_path().ends_with("layout-manager/config.toml"));
        });
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let dir = tmp.path().join("a/b/secure");
        ensure_dir(&dir).expect("ensure_dir failed");
        let mode = fs::metadata(&dir)
            .expect("failed to read metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
