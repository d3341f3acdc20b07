//! General application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory downloaded reports are written to.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Open downloaded files with the system handler.
    #[serde(default)]
    pub open_downloads: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            open_downloads: false,
        }
    }
}
