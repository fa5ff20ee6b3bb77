use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Open(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for building a [`Stream`](crate::input::Stream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Used in diagnostics.
    #[serde(default = "default_name")]
    pub name: String,

    /// Initial look-ahead buffer capacity in code points.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Size the buffer to the whole input when the source knows its length.
    #[serde(default = "default_true")]
    pub size_to_input: bool,
}

impl StreamConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            buffer_capacity: default_buffer_capacity(),
            size_to_input: default_true(),
        }
    }
}

fn default_name() -> String {
    "input".to_string()
}

fn default_buffer_capacity() -> usize {
    4096
}

fn default_true() -> bool {
    true
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, ConfigError> {
    Ok(serde_json::from_str(s)?)
}
