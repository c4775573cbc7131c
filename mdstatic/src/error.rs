use thiserror::Error;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error(
    "Missing required setting `{key}`; pass {flag} or set it in a config file"
  )]
  Missing {
    key:  &'static str,
    flag: &'static str,
  },
}
