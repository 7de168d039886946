//! Catalog enrichment over an OpenAI-like completions API.
//!
//! Each call builds a schema-constrained prompt, POSTs it to the
//! endpoint and parses the first choice into typed output:
//!
//! ```text
//! request::build(task, model, text) -> CompletionRequest
//!   -> CompletionClient::send(url, &request) -> raw body
//!   -> response::parse(task, &body) -> TaskOutput
//! ```
//!
//! `ModelInteractor` wraps the pipeline; `enrich::Enricher` drives it
//! over a `catalog::ProductCatalog` and writes categories back.

pub mod error;
pub mod config;
pub mod request;
pub mod response;
pub mod client;
pub mod catalog;
pub mod enrich;

pub use error::{Error, Result};
pub use config::InteractorConfig;
pub use request::{CompletionRequest, ResponseFormat, SchemaSpec, Task};
pub use response::{
  CompletionEnvelope, Choice, ProductCategory, ProductParameter,
  ProductParametersResult, TaskOutput
};
pub use client::{CompletionClient, ModelInteractor};
pub use catalog::{MemoryCatalog, Product, ProductCatalog};
pub use enrich::{EnrichReport, Enricher};

/// Install `env_logger` once; later calls are no-ops
pub fn init_logger()
{   let _ = env_logger::try_init();
}
