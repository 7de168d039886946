use log::{debug, trace, error, info};
use reqwest::header::CONTENT_TYPE;
use crate::config::InteractorConfig;
use crate::error::{Error, Result};
use crate::request::{self, CompletionRequest, Task};
use crate::response::{self, ProductParameter, TaskOutput};

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Sends one completion request per call.
///
/// No connection state survives between calls: every `send` builds its
/// own transport, and dropping the returned future aborts the round trip
/// and releases the connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionClient;

impl CompletionClient
{   pub fn new() -> Self
    {   CompletionClient
    }

    /// POST `request` to `endpoint` and return the raw response body
    pub async fn send(
      &self
    , endpoint: &str
    , request: &CompletionRequest
    ) -> Result<String>
    {   let body = serde_json::to_vec(request).map_err(|e| {
          error!("Request encoding error: {}", e);
          Error::Transport { status: None, message: e.to_string() }
        })?;
        trace!("POST {} ({} bytes)", endpoint, body.len());

        let http_client = reqwest::Client::builder()
          .pool_max_idle_per_host(0)
          .build()
          .map_err(Error::transport)?;

        let response = http_client
          .post(endpoint)
          .header(CONTENT_TYPE, JSON_UTF8)
          .body(body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::transport(e)
          })?;

        let status = response.status();
        trace!("Completion response status: {}", status);

        if !status.is_success()
        {   error!("Completion endpoint returned {}", status);
            return Err(Error::Transport
            {   status: Some(status.as_u16())
              , message: status
                  .canonical_reason()
                  .unwrap_or("unsuccessful status")
                  .to_string()
            });
        }

        response.text().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          Error::transport(e)
        })
    }
}

/// Classifies and parameterizes product descriptions against one
/// OpenAI-like completions endpoint.
#[derive(Debug, Clone)]
pub struct ModelInteractor
{   config: InteractorConfig
  , client: CompletionClient
}

impl ModelInteractor
{   pub fn new(config: InteractorConfig) -> Self
    {   debug!("Creating ModelInteractor for model: {}", config.model);
        ModelInteractor
        {   config
          , client: CompletionClient::new()
        }
    }

    pub fn model(&self) -> &str
    {   &self.config.model
    }

    pub fn api_url(&self) -> &str
    {   &self.config.api_url
    }

    pub fn set_model(&mut self, model: impl Into<String>)
    {   self.config.model = model.into();
        debug!("Model set to: {}", self.config.model);
    }

    pub fn set_api_url(&mut self, api_url: impl Into<String>)
    {   self.config.api_url = api_url.into();
        debug!("API url set to: {}", self.config.api_url);
    }

    /// Build → send → parse once for `task`, with `parse` picking the
    /// typed projection
    async fn complete<T>(
      &self
    , task: Task
    , text: &str
    , parse: fn(&str) -> Result<T>
    ) -> Result<T>
    {   debug!("Running {:?} with model: {}", task, self.config.model);
        let request = request::build(task, &self.config.model, text);
        let body = self.client.send(&self.config.api_url, &request).await?;
        let output = parse(&body)?;
        info!("{:?} completed", task);
        Ok(output)
    }

    pub async fn run(&self, task: Task, text: &str) -> Result<TaskOutput>
    {   match task
        {   Task::Classify => {
              self.classify(text).await.map(TaskOutput::Category)
            }
          , Task::Parameterize => {
              self.parameterize(text).await.map(TaskOutput::Parameters)
            }
        }
    }

    /// General category of the described product
    pub async fn classify(&self, text: &str) -> Result<String>
    {   self.complete(Task::Classify, text, response::parse_category).await
    }

    /// Main parameters of the described product
    pub async fn parameterize(
      &self
    , text: &str
    ) -> Result<Vec<ProductParameter>>
    {   self.complete(Task::Parameterize, text, response::parse_parameters)
          .await
    }
}
