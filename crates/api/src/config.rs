/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Externally reachable base URL used to build resource links.
    pub public_url: String,
    /// Base URL of the catalog synchronization engine.
    pub sync_url: String,
    /// Timeout for a single synchronization call in seconds (default: `300`).
    pub sync_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_URL`           | `http://localhost:3000`    |
    /// | `SYNC_URL`             | `http://localhost:8088`    |
    /// | `SYNC_TIMEOUT_SECS`    | `300`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_url = std::env::var("PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        let sync_url = std::env::var("SYNC_URL")
            .unwrap_or_else(|_| "http://localhost:8088".into())
            .trim_end_matches('/')
            .to_string();

        let sync_timeout_secs: u64 = std::env::var("SYNC_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("SYNC_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_url,
            sync_url,
            sync_timeout_secs,
        }
    }

    /// URL of a scope's template collection, the root of every resource link.
    ///
    /// The scope is percent-encoded so it stays a single path segment.
    pub fn templates_url(&self, scope: &str) -> String {
        format!(
            "{}/api/v1/scopes/{}/templates",
            self.public_url,
            urlencoding::encode(scope)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 3000,
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            public_url: "http://catalog.test".into(),
            sync_url: "http://sync.test".into(),
            sync_timeout_secs: 5,
        }
    }

    #[test]
    fn templates_url_for_plain_scope() {
        assert_eq!(
            config().templates_url("envA"),
            "http://catalog.test/api/v1/scopes/envA/templates"
        );
    }

    #[test]
    fn templates_url_encodes_scope() {
        assert_eq!(
            config().templates_url("team a/b?x"),
            "http://catalog.test/api/v1/scopes/team%20a%2Fb%3Fx/templates"
        );
    }
}
