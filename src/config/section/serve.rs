//! `[serve]` section configuration.
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"
//! port = 5277          # next free port is used when taken
//! root = "public"      # built site; 404.html here gets the suggestion list
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub interface: IpAddr,
    pub port: u16,
    /// Static file directory, relative to the project root.
    pub root: PathBuf,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5277,
            root: PathBuf::from("public"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::net::IpAddr;
    use std::path::Path;

    #[test]
    fn test_serve_overrides() {
        let config = test_parse_config("[serve]\ninterface = \"::1\"\nport = 8080\nroot = \"dist\"");
        assert_eq!(config.serve.interface, "::1".parse::<IpAddr>().unwrap());
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.root, Path::new("dist"));
    }

    #[test]
    fn test_serve_defaults() {
        let config = test_parse_config("[serve]");
        assert!(config.serve.interface.is_loopback());
        assert_eq!(config.serve.port, 5277);
        assert_eq!(config.serve.root, Path::new("public"));
    }
}
