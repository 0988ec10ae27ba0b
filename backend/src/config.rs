//! Runtime settings, read once at startup from `CSV_VIEWER_*` environment
//! variables with working defaults for local use.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file; the parent directory is created on startup.
    pub database_path: String,
    /// Directory for in-flight upload artifacts.
    pub upload_dir: String,
    /// Artificial pause applied to each upload before persistence.
    pub upload_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: "data/records.db".to_string(),
            upload_dir: "data/uploads".to_string(),
            upload_delay_ms: 0,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the environment. Unset or unparseable
    /// variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("CSV_VIEWER_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("CSV_VIEWER_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(path) = env::var("CSV_VIEWER_DB") {
            config.database_path = path;
        }
        if let Ok(dir) = env::var("CSV_VIEWER_UPLOAD_DIR") {
            config.upload_dir = dir;
        }
        if let Ok(delay) = env::var("CSV_VIEWER_UPLOAD_DELAY_MS") {
            if let Ok(delay) = delay.parse() {
                config.upload_delay_ms = delay;
            }
        }

        config
    }

    /// Create the database parent directory and the upload directory so
    /// the first upload does not fail on a missing path.
    pub fn ensure_directories(&self) -> io::Result<()> {
        if let Some(parent) = Path::new(&self.database_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::create_dir_all(&self.upload_dir)
    }
}
