//! Server configuration.
//!
//! Values come from built-in defaults, optionally overlaid by a YAML file
//! named in `GRADEBOOK_CONFIG`, with `LISTEN` taking precedence for the
//! listen address.

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Environment variable naming a YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "GRADEBOOK_CONFIG";

/// Environment variable overriding the listen address.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the server binds to and the client connects to
    pub listen_addr: String,

    /// Pending-connection queue length passed to `listen(2)`
    pub backlog: u32,

    /// Maximum number of bytes consumed by one receive call
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:11000".to_string(),
            backlog: 16,
            buffer_size: 8192,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path))?;
                Self::parse_yaml(&text)
                    .with_context(|| format!("Invalid config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.listen_addr = addr;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a YAML document; fields it omits keep their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// # use gradebook::config::Config;
    /// let cfg = Config::from_yaml_str("backlog: 64").unwrap();
    /// assert_eq!(cfg.backlog, 64);
    /// assert_eq!(cfg.buffer_size, 8192);
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg = Self::parse_yaml(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn parse_yaml(text: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    fn validate(&self) -> Result<()> {
        if self.listen_addr.trim().is_empty() {
            bail!("listen_addr must not be empty");
        }
        if self.backlog == 0 {
            bail!("backlog must be greater than zero");
        }
        if self.buffer_size == 0 {
            bail!("buffer_size must be greater than zero");
        }
        Ok(())
    }
}
