//! JSON runtime configuration for the command-line tool.
use crate::error::{Error, Result};
use crate::fusion::FusionParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Where the tone-mapped image is written.
    pub image_out: PathBuf,
    pub report_json: Option<PathBuf>,
    /// Directory for per-level debug images.
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    pub output: OutputConfig,
    #[serde(default)]
    pub params: FusionParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&contents).map_err(|source| Error::Config {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_config(contents: &str) -> serde_json::Result<RuntimeConfig> {
    serde_json::from_str(contents)
}
