//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] over a single pretty-printed JSON file.
//!
//! - Validation: thresholds are checked while deserialising, every other
//!   field by [`MonitorConfig::validate`], on load *and* before save.
//! - Atomic writes: the file is written to a sibling temp file and renamed
//!   over the original, so a crash mid-write never leaves half a config.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::MonitorConfig;

pub struct FileConfigAdapter {
    path: PathBuf,
}

impl FileConfigAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for FileConfigAdapter {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigError::NotFound),
            Err(e) => return Err(ConfigError::IoError(e.kind())),
        };
        let cfg: MonitorConfig =
            serde_json::from_str(&text).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        cfg.validate()?;
        info!("FileConfigAdapter: loaded config from {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| ConfigError::IoError(e.kind()))?;
        fs::rename(&tmp, &self.path).map_err(|e| ConfigError::IoError(e.kind()))?;
        info!("FileConfigAdapter: config saved to {}", self.path.display());
        Ok(())
    }
}
