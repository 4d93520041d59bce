use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tkit_diff::{Algorithm, InputLimits};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Algorithm used when a request does not name one.
    pub algorithm: Algorithm,
    /// Ceiling on a whole request body, enforced before parsing.
    pub max_body_bytes: usize,
    pub allow_cors: bool,
    /// Per-document ceilings.
    pub limits: InputLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            algorithm: Algorithm::Lcs,
            max_body_bytes: 16 * 1024 * 1024,
            allow_cors: true,
            limits: InputLimits::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
