use std::env;
use std::net::SocketAddr;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Where the relay listens and which backend it forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub backend_url: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl RelayConfig {
    /// Reads `HOST`, `PORT` and `BACKEND_URL`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn backend_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.backend_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_backend_url_trailing_slash() {
        let config = RelayConfig {
            backend_url: "http://backend:8080/api/".into(),
            ..RelayConfig::default()
        };
        assert_eq!(config.backend_url(), "http://backend:8080/api");
    }

    #[test]
    fn test_bad_host_is_rejected() {
        let config = RelayConfig {
            host: "not a host".into(),
            ..RelayConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
