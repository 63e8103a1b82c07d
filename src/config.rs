use serde::Deserialize;
use std::path::PathBuf;

const MB: u64 = 1024 * 1024;
const MULTIPART_OVERHEAD_MB: u64 = 10;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_app_title")]
    pub app_title: String,
    #[serde(default = "default_app_version")]
    pub app_version: String,
    #[serde(default)]
    pub debug: bool,

    // Comma separated; "*" allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,

    // Projects are created under this directory.
    // If not set, falls back to a folder in the system temp dir.
    pub upload_dir: Option<PathBuf>,

    // Artificial latency for the mock transcriber
    #[serde(default)]
    pub mock_delay_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_app_title() -> String {
    "Content Repurposer IA API".to_string()
}

fn default_app_version() -> String {
    "2.0.0".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_upload_size() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            app_title: default_app_title(),
            app_version: default_app_version(),
            debug: false,
            cors_origins: default_cors_origins(),
            max_upload_size_mb: default_max_upload_size(),
            upload_dir: None,
            mock_delay_ms: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb.saturating_mul(MB)
    }

    pub fn max_request_body_bytes(&self) -> usize {
        // Allow some overhead for multipart boundaries/headers.
        let bytes = self
            .max_upload_size_mb
            .saturating_add(MULTIPART_OVERHEAD_MB)
            .saturating_mul(MB);
        usize::try_from(bytes).unwrap_or(usize::MAX)
    }

    pub fn upload_root(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("content-repurposer"))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o.trim() == "*")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.app_title, "Content Repurposer IA API");
        assert!(!config.debug);
        assert!(config.allows_any_origin());
        assert_eq!(config.max_upload_size_bytes(), 100 * 1024 * 1024);
        assert!(config.max_request_body_bytes() as u64 > config.max_upload_size_bytes());
        assert!(config.upload_root().ends_with("content-repurposer"));
    }

    #[test]
    fn test_huge_upload_limit_saturates() {
        let config = Config {
            max_upload_size_mb: u64::MAX,
            ..Config::default()
        };
        assert_eq!(config.max_upload_size_bytes(), u64::MAX);
        assert_eq!(
            config.max_request_body_bytes(),
            usize::try_from(u64::MAX).unwrap_or(usize::MAX)
        );

        let config = Config {
            max_upload_size_mb: u64::MAX / MB + 1,
            ..Config::default()
        };
        assert_eq!(config.max_upload_size_bytes(), u64::MAX);
    }

    #[test]
    fn test_from_iter() {
        let config: Config = envy::from_iter(vec![
            ("APP_TITLE".to_string(), "Test API".to_string()),
            ("DEBUG".to_string(), "true".to_string()),
            (
                "CORS_ORIGINS".to_string(),
                "http://localhost:3000,https://example.com".to_string(),
            ),
            ("UPLOAD_DIR".to_string(), "/srv/uploads".to_string()),
            ("PORT".to_string(), "9000".to_string()),
        ])
        .unwrap();

        assert_eq!(config.app_title, "Test API");
        assert!(config.debug);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(!config.allows_any_origin());
        assert_eq!(config.upload_root(), PathBuf::from("/srv/uploads"));
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.app_version, "2.0.0");
    }
}
