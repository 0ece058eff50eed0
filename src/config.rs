use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;

use crate::manifest::{ManifestInfo, ManifestMode};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub manifest_mode: ManifestMode,
    pub manifest: ManifestInfo,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            manifest_mode: ManifestMode::default(),
            manifest: ManifestInfo::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `HOST`, `PORT` and `MCP_MANIFEST_MODE`, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host
                .trim()
                .parse()
                .with_context(|| format!("HOST `{}` is not an IP address", host))?;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT `{}` is not a valid port number", port))?;
        }

        if let Some(mode) = lookup("MCP_MANIFEST_MODE") {
            config.manifest_mode = mode.parse()?;
        }

        Ok(config)
    }

    /// Apply command-line flags on top of the loaded settings.
    pub fn with_overrides(
        mut self,
        host: Option<IpAddr>,
        port: Option<u16>,
        manifest_mode: Option<ManifestMode>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(mode) = manifest_mode {
            self.manifest_mode = mode;
        }
        self
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.manifest_mode, ManifestMode::Negotiate);
        assert_eq!(config.manifest.name, "tiny-add-mcp-python");
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("MCP_MANIFEST_MODE", "sse"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.manifest_mode, ManifestMode::Sse);
    }

    #[test]
    fn test_flags_override_env() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "8080"), ("MCP_MANIFEST_MODE", "sse")]))
            .unwrap()
            .with_overrides(Some(IpAddr::V4(Ipv4Addr::LOCALHOST)), Some(9000), None);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.manifest_mode, ManifestMode::Sse);

        let config = ServerConfig::default().with_overrides(None, None, Some(ManifestMode::Json));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.manifest_mode, ManifestMode::Json);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "abc")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn test_invalid_manifest_mode() {
        assert!(ServerConfig::from_lookup(lookup(&[("MCP_MANIFEST_MODE", "xml")])).is_err());
    }
}
