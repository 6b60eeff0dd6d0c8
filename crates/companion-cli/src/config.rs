//! Runtime configuration, layered from an optional TOML file and
//! `COMPANION_*` environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use companion_core::client::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Discovery API root; `/pois/discover` is appended.
  pub api_base_url:         String,
  /// SQLite file holding vehicles and favorites. A leading `~/` is expanded.
  pub database_path:        PathBuf,
  pub page_size:            u32,
  /// South-west corner of the discovery box, `"lon,lat"`.
  pub sw_corner:            String,
  /// North-east corner of the discovery box, `"lon,lat"`.
  pub ne_corner:            String,
  pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      api_base_url:         "https://api2.roadtrippers.com/api/v2".into(),
      database_path:        "~/.local/share/companion/companion.db".into(),
      page_size:            DEFAULT_PAGE_SIZE,
      sw_corner:            "-122.5280,37.7049".into(),
      ne_corner:            "-122.3480,37.8349".into(),
      request_timeout_secs: None,
    }
  }
}

impl AppConfig {
  /// Read `path` (if it exists), then apply `COMPANION_*` overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("COMPANION"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }

  pub fn database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }

  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("companion-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_file_gives_defaults() {
    let cfg = AppConfig::load(Path::new("/nonexistent/companion.toml")).unwrap();
    assert_eq!(cfg.page_size, 50);
    assert_eq!(cfg.sw_corner, "-122.5280,37.7049");
    assert_eq!(cfg.request_timeout(), None);
  }

  #[test]
  fn file_values_override_defaults() {
    let path = scratch_file(
      "override.toml",
      "page_size = 10\nne_corner = \"1,2\"\nrequest_timeout_secs = 5\n",
    );

    let cfg = AppConfig::load(&path).unwrap();

    assert_eq!(cfg.page_size, 10);
    assert_eq!(cfg.ne_corner, "1,2");
    assert_eq!(cfg.sw_corner, AppConfig::default().sw_corner);
    assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(5)));
  }

  #[test]
  fn tilde_is_expanded() {
    let cfg = AppConfig { database_path: "~/garage.db".into(), ..AppConfig::default() };
    let expanded = cfg.database_path();
    assert!(!expanded.starts_with("~"));
    assert!(expanded.ends_with("garage.db"));
  }
}
