// ============================
// identity-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Data directory path for flat-file identity storage
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// scrypt cost parameters for the credential hasher
    pub scrypt: ScryptSettings,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScryptSettings {
    /// log2 of the CPU/memory cost
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelism
    pub p: u32,
}

/// Password complexity requirements
#[derive(Debug, Clone, Deserialize)]
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
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            scrypt: ScryptSettings::default(),
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Default for ScryptSettings {
    fn default() -> Self {
        // the scrypt crate's recommended cost
        Self {
            log_n: 17,
            r: 8,
            p: 1,
        }
    }
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: 10,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` and `IDENTITY_`-prefixed
    /// environment variables, environment taking precedence.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings from an explicit config file path plus the environment.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("IDENTITY_").split("__"))
            .extract()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.scrypt.log_n, 17);
        assert_eq!(settings.password_requirements.min_length, 10);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_env_and_errors_without_fields() {
        // with no file and no env vars there is nothing to extract from,
        // so required fields are missing
        let result = Settings::load_from("does-not-exist.toml");
        assert!(result.is_err());
    }
}
