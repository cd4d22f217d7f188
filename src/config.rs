use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use zeroize::Zeroizing;

use fortuna_gen::Error;

const DEFAULT_CONFIG_PATH: &str = "/etc/fortuna-gen.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Hexadecimal (lowercase)
    Hex,
    /// Uppercase hexadecimal
    HexUpper,
    /// Raw binary bytes
    Raw,
    /// Base64 (standard, with padding)
    Base64,
    /// Base64 URL-safe (no padding)
    Base64url,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub bytes: usize,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bytes: 32,
            format: OutputFormat::Hex,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// Seed files folded in before any seed given on the command line.
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
    pub seed: SeedConfig,
}

/// Material for one reseed, in the order it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    File(PathBuf),
    Hex(String),
}

impl SeedSource {
    pub fn load(&self) -> Result<Zeroizing<Vec<u8>>, Error> {
        match self {
            SeedSource::File(path) => fs::read(path).map(Zeroizing::new).map_err(|e| {
                Error::Io(io::Error::new(
                    e.kind(),
                    format!("cannot read seed file {}: {}", path.display(), e),
                ))
            }),
            SeedSource::Hex(text) => hex::decode(text.trim())
                .map(Zeroizing::new)
                .map_err(|e| Error::InvalidArgs(format!("invalid hex seed: {}", e))),
        }
    }
}

/// Load configuration from a TOML file.
///
/// - If `explicit_path` is `Some` and the file is missing, returns an error.
/// - If `explicit_path` is `None`, tries `/etc/fortuna-gen.toml`; if missing, returns defaults.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config, Error> {
    let path = match explicit_path {
        Some(p) if !p.exists() => {
            return Err(Error::InvalidArgs(format!(
                "config file not found: {}",
                p.display()
            )));
        }
        Some(p) => p,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };

    let contents = fs::read_to_string(path).map_err(|e| {
        Error::InvalidArgs(format!("failed to read config {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| {
        Error::InvalidArgs(format!("failed to parse config {}: {}", path.display(), e))
    })?;

    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
