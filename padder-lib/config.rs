//! Padder configuration.
//!
//! ```toml
//! smart-close-max-parse-length = 1000
//!
//! [smart-pairs]
//! "(" = ")"
//! "[" = "]"
//! "{" = "}"
//! '"' = '"'
//! "'" = "'"
//! "`" = "`"
//! ```

use std::{
  fs,
  io,
};

use indexmap::IndexMap;
use padder_loader::merge_toml_values;
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::pairs::{
  DEFAULT_PAIRS,
  PairRegistry,
};

pub const DEFAULT_MAX_PARSE_LENGTH: usize = 1000;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error("failed to read config: {0}")]
  Io(#[from] io::Error),
  #[error("bad config: {0}")]
  BadConfig(#[from] toml::de::Error),
  #[error("closing delimiter {close:?} is configured for both {first:?} and {second:?}")]
  DuplicateClosing {
    close:  char,
    first:  char,
    second: char,
  },
  #[error("whitespace {0:?} cannot be used as a delimiter")]
  WhitespaceDelimiter(char),
}

impl ConfigError {
  fn is_not_found(&self) -> bool {
    matches!(self, Self::Io(err) if err.kind() == io::ErrorKind::NotFound)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PadderConfig {
  /// Opening delimiter → closing delimiter, in priority order.
  pub smart_pairs:                  IndexMap<char, char>,
  /// Lines longer than this many chars are never scanned for SkipClose.
  pub smart_close_max_parse_length: usize,
}

impl Default for PadderConfig {
  fn default() -> Self {
    Self {
      smart_pairs:                  DEFAULT_PAIRS.iter().copied().collect(),
      smart_close_max_parse_length: DEFAULT_MAX_PARSE_LENGTH,
    }
  }
}

impl PadderConfig {
  pub fn from_toml(source: &str) -> Result<Self> {
    let config: Self = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  /// Combine the user config with the workspace config.
  ///
  /// Top-level keys of `local` override those of `global`. A parse error in
  /// either file is returned as is; a file that cannot be read is skipped in
  /// favour of the other one, and when neither exists the defaults apply.
  pub fn load(global: Result<String>, local: Result<String>) -> Result<Self> {
    let global_config: Result<toml::Value> =
      global.and_then(|file| toml::from_str(&file).map_err(ConfigError::BadConfig));
    let local_config: Result<toml::Value> =
      local.and_then(|file| toml::from_str(&file).map_err(ConfigError::BadConfig));

    let value = match (global_config, local_config) {
      (Ok(global), Ok(local)) => merge_toml_values(global, local, 1),
      (_, Err(ConfigError::BadConfig(err))) | (Err(ConfigError::BadConfig(err)), _) => {
        return Err(ConfigError::BadConfig(err));
      },
      (Ok(value), Err(_)) | (Err(_), Ok(value)) => value,
      (Err(err), Err(_)) if err.is_not_found() => {
        tracing::debug!("no config file found, using defaults");
        return Ok(Self::default());
      },
      (Err(err), Err(_)) => return Err(err),
    };

    let config: Self = value.try_into()?;
    config.validate()?;
    Ok(config)
  }

  /// Load the user config file and the workspace config file.
  pub fn load_default() -> Result<Self> {
    let global = padder_loader::config_file()
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))
      .and_then(fs::read_to_string)
      .map_err(ConfigError::Io);
    let local =
      fs::read_to_string(padder_loader::workspace_config_file()).map_err(ConfigError::Io);
    Self::load(global, local)
  }

  pub fn validate(&self) -> Result<()> {
    let mut closings: IndexMap<char, char> = IndexMap::with_capacity(self.smart_pairs.len());
    for (&open, &close) in &self.smart_pairs {
      if let Some(ch) = [open, close].into_iter().find(|ch| ch.is_whitespace()) {
        return Err(ConfigError::WhitespaceDelimiter(ch));
      }
      if let Some(&first) = closings.get(&close) {
        return Err(ConfigError::DuplicateClosing {
          close,
          first,
          second: open,
        });
      }
      closings.insert(close, open);
    }
    Ok(())
  }

  pub fn registry(&self) -> PairRegistry {
    PairRegistry::new(&self.smart_pairs)
  }
}
