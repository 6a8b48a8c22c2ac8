// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Secret used to sign and verify bearer tokens. Required: an empty
    /// secret is a startup failure, not a per-request error.
    pub token_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    /// log2 work factor for password hashing
    pub hash_cost: u8,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

/// Password complexity requirements
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordRequirements {
    /// Minimum password length
    pub min_length: usize,
    /// Require uppercase letters
    pub require_uppercase: bool,
    /// Require lowercase letters
    pub require_lowercase: bool,
    /// Require digits
    pub require_digit: bool,
    /// Require special characters
    pub require_special: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            token_secret: String::new(),
            token_ttl_secs: 60 * 60, // 1 hour
            hash_cost: 12,
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl Settings {
    /// Load settings from `config/default.toml` merged with
    /// `GATEKEEPER_`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from("config/default.toml")
    }

    /// Load settings from an explicit config file, then environment overrides.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings: Settings = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("GATEKEEPER_"))
            .extract()?;

        settings.validate()
    }

    /// Reject configurations the process must not start with.
    fn validate(self) -> Result<Self> {
        if self.token_secret.is_empty() {
            bail!("token_secret is not configured; refusing to start");
        }
        if self.hash_cost == 0 || self.hash_cost > 24 {
            bail!("hash_cost must be between 1 and 24");
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_fails_without_token_secret() {
        let file = write_config("bind_addr = \"127.0.0.1:0\"\n");
        let result = Settings::load_from(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("token_secret"));
    }

    #[test]
    fn load_applies_defaults_around_required_fields() {
        let file = write_config("token_secret = \"unit-test-secret\"\n");
        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.token_ttl_secs, 3600);
        assert_eq!(settings.hash_cost, 12);
        assert_eq!(settings.password_requirements.min_length, 8);
        assert!(settings.password_requirements.require_special);
    }

    #[test]
    fn load_rejects_out_of_range_hash_cost() {
        let file = write_config("token_secret = \"s\"\nhash_cost = 40\n");
        assert!(Settings::load_from(file.path()).is_err());
    }
}
