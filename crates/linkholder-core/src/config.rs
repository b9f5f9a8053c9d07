use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// XDG prefix shared by config, state (store, log, badge, socket) paths.
pub const APP_PREFIX: &str = "linkholder";

/// Global configuration loaded from `~/.config/linkholder/config.toml`.
///
/// The download folder name is not here: it is user-editable state and lives
/// in the link store next to the lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkholderConfig {
    /// Root directory bulk downloads land under (`{download_dir}/{folder}/{file}`).
    /// None = current working directory of the CLI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    /// Maximum characters of a URL shown in the panel before shortening.
    pub shorten_max_length: usize,
    /// Maximum transfers in flight at once during a bulk download.
    /// 0 = no limit: every request is issued up front.
    pub max_concurrent_downloads: usize,
    /// Connect timeout per download, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout per download, in seconds.
    pub transfer_timeout_secs: u64,
    /// How often the agent polls the store for writes made by other processes.
    pub watch_interval_ms: u64,
}

impl Default for LinkholderConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            shorten_max_length: 50,
            max_concurrent_downloads: 0,
            connect_timeout_secs: 30,
            transfer_timeout_secs: 3600,
            watch_interval_ms: 500,
        }
    }
}

impl LinkholderConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn transfer_timeout(&self) -> Duration {
        Duration::from_secs(self.transfer_timeout_secs)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms.max(50))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// State directory: `~/.local/state/linkholder`.
pub fn state_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
    Ok(xdg_dirs.get_state_home().join(APP_PREFIX))
}

/// Files one store instance uses: the database plus the agent's control
/// socket, the published badge and the menu manifest.
///
/// The default set lives in the state dir. A store opened from an explicit
/// path gets its own set beside it, so a second store never talks to the
/// default agent or overwrites the default badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub store: PathBuf,
    pub control_socket: PathBuf,
    pub badge: PathBuf,
    pub menu: PathBuf,
}

impl StatePaths {
    pub fn default_paths() -> Result<Self> {
        let dir = state_dir()?;
        Ok(Self {
            store: dir.join("store.db"),
            control_socket: dir.join("control.sock"),
            badge: dir.join("badge.json"),
            menu: dir.join("menu.json"),
        })
    }

    /// `/data/parts.db` → `/data/parts.sock`, `/data/parts.badge.json`, `/data/parts.menu.json`.
    pub fn beside_store(store: &Path) -> Self {
        let stem = store
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        let sibling = |suffix: &str| store.with_file_name(format!("{stem}{suffix}"));
        Self {
            store: store.to_path_buf(),
            control_socket: sibling(".sock"),
            badge: sibling(".badge.json"),
            menu: sibling(".menu.json"),
        }
    }

    /// Default paths, or the set beside `store` when one is given.
    pub fn resolve(store: Option<&Path>) -> Result<Self> {
        match store {
            Some(path) => Ok(Self::beside_store(path)),
            None => Self::default_paths(),
        }
    }
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LinkholderConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LinkholderConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LinkholderConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = LinkholderConfig::default();
        assert!(cfg.download_dir.is_none());
        assert_eq!(cfg.shorten_max_length, 50);
        assert_eq!(cfg.max_concurrent_downloads, 0);
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            download_dir = "/srv/parts"
            shorten_max_length = 80
            max_concurrent_downloads = 2
            connect_timeout_secs = 5
            transfer_timeout_secs = 60
            watch_interval_ms = 250
        "#;
        let cfg: LinkholderConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.download_dir, Some(PathBuf::from("/srv/parts")));
        assert_eq!(cfg.shorten_max_length, 80);
        assert_eq!(cfg.max_concurrent_downloads, 2);
        assert_eq!(cfg.watch_interval(), Duration::from_millis(250));
    }

    #[test]
    fn watch_interval_has_floor() {
        let cfg = LinkholderConfig {
            watch_interval_ms: 0,
            ..LinkholderConfig::default()
        };
        assert_eq!(cfg.watch_interval(), Duration::from_millis(50));
    }

    #[test]
    fn explicit_store_gets_its_own_sidecar_files() {
        let paths = StatePaths::beside_store(Path::new("/tmp/x/parts.db"));
        assert_eq!(paths.store, Path::new("/tmp/x/parts.db"));
        assert_eq!(paths.control_socket, Path::new("/tmp/x/parts.sock"));
        assert_eq!(paths.badge, Path::new("/tmp/x/parts.badge.json"));
        assert_eq!(paths.menu, Path::new("/tmp/x/parts.menu.json"));
    }

    #[test]
    fn resolve_uses_explicit_store() {
        let paths = StatePaths::resolve(Some(Path::new("/srv/a.db"))).unwrap();
        assert_eq!(paths.control_socket, Path::new("/srv/a.sock"));
    }

    #[test]
    fn default_config_serializes_without_download_dir() {
        let toml = toml::to_string_pretty(&LinkholderConfig::default()).unwrap();
        assert!(!toml.contains("download_dir"));
        let parsed: LinkholderConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.shorten_max_length, 50);
    }
}
