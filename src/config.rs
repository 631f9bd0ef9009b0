use crate::error::{Result, SubconvError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Srt,
    Sbv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Sbv => write!(f, "sbv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "srt" => Ok(OutputFormat::Srt),
            "sbv" => Ok(OutputFormat::Sbv),
            _ => Err(format!("Unknown format: {}. Use 'srt' or 'sbv'", s)),
        }
    }
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Srt, OutputFormat::Sbv];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Srt => "srt",
            OutputFormat::Sbv => "sbv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_format: OutputFormat,
    /// Write both SRT and SBV unless a single format is requested.
    pub emit_both: bool,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default(),
            emit_both: false,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(config_path) => Self::load_file(&config_path),
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Read a config file, falling back to defaults when it is missing,
    /// unreadable or invalid.
    pub fn load_file(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }

        let contents = match fs::read_to_string(config_path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Ignoring unreadable config file {:?}: {}", config_path, e);
                return Self::default();
            }
        };

        match Self::from_toml(&contents) {
            Ok(file_config) => {
                debug!("Loaded config from {:?}", config_path);
                file_config
            }
            Err(e) => {
                warn!("Ignoring invalid config file {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Override fields from `SUBCONV_*` environment variables.
    fn apply_env(&mut self) {
        if let Ok(format) = std::env::var("SUBCONV_DEFAULT_FORMAT") {
            if let Ok(f) = format.parse() {
                self.default_format = f;
            }
        }
        if let Ok(both) = std::env::var("SUBCONV_EMIT_BOTH") {
            if let Ok(b) = both.parse() {
                self.emit_both = b;
            }
        }
        if let Ok(dir) = std::env::var("SUBCONV_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.output_dir = Some(PathBuf::from(dir));
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(SubconvError::Config(format!(
                    "output_dir is not a directory: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Formats to emit when the caller does not pick one explicitly.
    pub fn formats(&self) -> Vec<OutputFormat> {
        if self.emit_both {
            OutputFormat::ALL.to_vec()
        } else {
            vec![self.default_format]
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_file_path()
            .ok_or_else(|| SubconvError::Config("No config directory available".to_string()))?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(config_path)
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subconv").join("config.toml"))
    }
}
