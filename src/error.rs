use thiserror::Error;

/// Errors produced by the enrichment client.
///
/// A single build → send → parse call fails with exactly one of
/// `Transport`, `MalformedEnvelope`, `EmptyChoices` or `MalformedPayload`.
/// `InvalidConfiguration` only comes out of config loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error
{   /// Non-2xx status or network-level failure
    #[error("transport error{}: {message}", status_suffix(.status))]
    Transport
    {   status: Option<u16>
      , message: String
    }
  , /// Response body is not a completion envelope
    #[error("malformed completion envelope: {0}")]
    MalformedEnvelope(String)
  , /// Envelope carried zero choices
    #[error("completion response contained no choices")]
    EmptyChoices
  , /// First choice text does not satisfy the task schema
    #[error("malformed completion payload: {0}")]
    MalformedPayload(String)
  , /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String)
}

impl Error
{   /// HTTP status preserved by a `Transport` failure, if any
    pub fn status(&self) -> Option<u16>
    {   match self
        {   Error::Transport { status, .. } => *status
          , _ => None
        }
    }

    pub(crate) fn transport(e: reqwest::Error) -> Self
    {   Error::Transport
        {   status: e.status().map(|s| s.as_u16())
          , message: e.to_string()
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String
{   status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;
