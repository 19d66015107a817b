use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: PathBuf::from(
                env::var("BURSARY_UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            ),
            max_upload_bytes: env::var("BURSARY_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }
}
