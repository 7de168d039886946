//! Configuration for the completion endpoint

use serde::{Deserialize, Serialize};
use log::debug;
use std::path::Path;
use crate::error::{Error, Result};

pub const MODEL_ENV: &str = "CATALOG_AI_MODEL";
pub const API_URL_ENV: &str = "CATALOG_AI_API_URL";

/// Model and endpoint the interactor talks to.
/// Values are passed through untouched; a bad URL surfaces as a
/// transport error on the first call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractorConfig
{   /// API identifier of the model
    pub model: String
  , /// Full URL of the completions endpoint
    pub api_url: String
}

impl InteractorConfig
{   pub fn new(
      model: impl Into<String>
    , api_url: impl Into<String>
    ) -> Self
    {   InteractorConfig
        {   model: model.into()
          , api_url: api_url.into()
        }
    }

    /// Read `CATALOG_AI_MODEL` and `CATALOG_AI_API_URL`
    pub fn from_env() -> Result<Self>
    {   let read = |name: &str| {
          std::env::var(name).map_err(|_| {
            Error::InvalidConfiguration(
              format!("environment variable {} not set", name)
            )
          })
        };
        let config = InteractorConfig::new(
          read(MODEL_ENV)?,
          read(API_URL_ENV)?
        );
        debug!("Loaded config from env for model: {}", config.model);
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self>
    {   serde_json::from_str(json).map_err(|e| {
          Error::InvalidConfiguration(e.to_string())
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self>
    {   let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| {
          Error::InvalidConfiguration(
            format!("{}: {}", path.display(), e)
          )
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn parses_json_config()
    {   let config = InteractorConfig::from_json_str(
          r#"{"model":"saiga","api_url":"http://localhost:1234/v1/completions"}"#
        ).unwrap();
        assert_eq!(config.model, "saiga");
        assert_eq!(config.api_url, "http://localhost:1234/v1/completions");
    }

    #[test]
    fn missing_field_is_invalid_configuration()
    {   let err = InteractorConfig::from_json_str(r#"{"model":"saiga"}"#)
          .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn missing_file_is_invalid_configuration()
    {   let err = InteractorConfig::from_file("/nonexistent/catalog.json")
          .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }
}
