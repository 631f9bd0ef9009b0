use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubconvError {
    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    #[error("Malformed timecode digits: {0}")]
    MalformedTimecodeDigits(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SubconvError>;
