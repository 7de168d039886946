//! Completion envelope and task payload parsing

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use log::{debug, error};
use crate::error::{Error, Result};
use crate::request::Task;

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionEnvelope
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   /// Raw completion, expected to be a JSON document
    pub text: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory
{   pub product_category: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductParameter
{   pub parameter_name: String
  , pub parameter_value: String
}

/// The model is asked for at most ten entries; the count is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductParametersResult
{   pub product_parameters: Vec<ProductParameter>
}

/// Typed result of one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutput
{   Category(String)
  , Parameters(Vec<ProductParameter>)
}

impl CompletionEnvelope
{   pub fn from_body(body: &str) -> Result<Self>
    {   serde_json::from_str(body).map_err(|e| {
          error!("Envelope parse error: {}", e);
          Error::MalformedEnvelope(e.to_string())
        })
    }

    /// Text of the first choice; an empty envelope is an error
    pub fn first_text(&self) -> Result<&str>
    {   self.choices.first()
          .map(|c| c.text.as_str())
          .ok_or_else(|| {
            error!("No choices in response");
            Error::EmptyChoices
          })
    }
}

fn payload<T: DeserializeOwned>(body: &str) -> Result<T>
{   let envelope = CompletionEnvelope::from_body(body)?;
    let text = envelope.first_text()?;
    debug!("First choice carries {} bytes", text.len());
    serde_json::from_str(text).map_err(|e| {
      error!("Payload parse error: {}", e);
      Error::MalformedPayload(e.to_string())
    })
}

pub fn parse_category(body: &str) -> Result<String>
{   payload::<ProductCategory>(body).map(|c| c.product_category)
}

pub fn parse_parameters(body: &str) -> Result<Vec<ProductParameter>>
{   payload::<ProductParametersResult>(body)
      .map(|p| p.product_parameters)
}

pub fn parse(task: Task, body: &str) -> Result<TaskOutput>
{   match task
    {   Task::Classify => parse_category(body).map(TaskOutput::Category)
      , Task::Parameterize => {
          parse_parameters(body).map(TaskOutput::Parameters)
        }
    }
}
