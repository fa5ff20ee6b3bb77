use thiserror::Error;

use crate::config::ConfigError;
use crate::input::InputError;
use crate::parse::ParseError;
use crate::scanner::ScanError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
