//! Runtime configuration: an optional TOML file overlaid by `HOSPITAL_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context as _, ensure};
use hospital_service::TokenConfig;
use serde::Deserialize;

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  pub store_path:           PathBuf,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
  pub jwt:                  TokenConfig,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_request_timeout_secs() -> u64 { 5 }

/// Upper bound on `jwt.access_expiration_minutes` (one week).
pub const MAX_ACCESS_EXPIRATION_MINUTES: u32 = 7 * 24 * 60;

/// Upper bound on `jwt.refresh_expiration_days` (ten years).
pub const MAX_REFRESH_EXPIRATION_DAYS: u32 = 10 * 365;

impl ServerConfig {
  /// Read `path` (if it exists), then apply environment overrides such as
  /// `HOSPITAL_PORT` or `HOSPITAL_JWT__ACCESS_SECRET`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("HOSPITAL")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?;

    let cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.validate()?;
    Ok(cfg)
  }

  /// Reject settings that would only fail later, at first use.
  pub fn validate(&self) -> anyhow::Result<()> {
    ensure!(!self.jwt.access_secret.is_empty(), "jwt.access_secret must be set");
    ensure!(!self.jwt.refresh_secret.is_empty(), "jwt.refresh_secret must be set");
    ensure!(
      self.jwt.access_secret != self.jwt.refresh_secret,
      "access and refresh tokens must use different secrets"
    );
    ensure!(
      (1..=MAX_ACCESS_EXPIRATION_MINUTES).contains(&self.jwt.access_expiration_minutes),
      "jwt.access_expiration_minutes must be between 1 and {MAX_ACCESS_EXPIRATION_MINUTES}"
    );
    ensure!(
      (1..=MAX_REFRESH_EXPIRATION_DAYS).contains(&self.jwt.refresh_expiration_days),
      "jwt.refresh_expiration_days must be between 1 and {MAX_REFRESH_EXPIRATION_DAYS}"
    );
    ensure!(self.request_timeout_secs > 0, "request_timeout_secs must be positive");
    Ok(())
  }

  pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
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

  fn write_config(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hospital-{name}-{}.toml", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
  }

  const FULL: &str = r#"
host       = "0.0.0.0"
port       = 9000
store_path = "/tmp/hospital.db"

[jwt]
access_secret             = "a"
access_expiration_minutes = 15
refresh_secret            = "r"
refresh_expiration_days   = 30
"#;

  #[test]
  fn loads_file_and_fills_defaults() {
    let path = write_config("full", FULL);
    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.address(), "0.0.0.0:9000");
    assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
    assert_eq!(cfg.jwt.access_expiration_minutes, 15);
    assert_eq!(cfg.jwt.refresh_expiration_days, 30);
  }

  #[test]
  fn shared_secret_is_rejected() {
    let path = write_config("shared", &FULL.replace("\"r\"", "\"a\""));
    let err = ServerConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(err.to_string().contains("different secrets"));
  }

  #[test]
  fn lifetimes_are_bounded() {
    let path = write_config("longrefresh", &FULL.replace("= 30", "= 200000000"));
    let err = ServerConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(err.to_string().contains("jwt.refresh_expiration_days"));

    let path = write_config("zeroaccess", &FULL.replace("= 15", "= 0"));
    let err = ServerConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(err.to_string().contains("jwt.access_expiration_minutes"));

    let path = write_config("longaccess", &FULL.replace("= 15", "= 10081"));
    assert!(ServerConfig::load(&path).is_err());
    std::fs::remove_file(&path).ok();
  }

  #[test]
  fn missing_jwt_table_fails() {
    let path = write_config("nojwt", "store_path = \"/tmp/x.db\"\n");
    assert!(ServerConfig::load(&path).is_err());
    std::fs::remove_file(&path).ok();
  }

  #[test]
  fn tilde_expansion() {
    let home = std::env::var("HOME").unwrap_or_default();
    if home.is_empty() {
      return;
    }
    assert_eq!(expand_tilde(Path::new("~/db.sqlite")), PathBuf::from(&home).join("db.sqlite"));
    assert_eq!(expand_tilde(Path::new("/abs/db.sqlite")), PathBuf::from("/abs/db.sqlite"));
  }
}
