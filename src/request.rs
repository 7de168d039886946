//! Schema-constrained completion requests

use serde::Serialize;
use serde_json::{json, Value};
use log::trace;

const CLASSIFY_PREFIX: &str
  = "Выбери общую категорию для продукта: ";
const PARAMETERIZE_PREFIX: &str
  = "Укажи список основных параметров (не более 10) этого продукта: ";

const MAX_TOKENS: usize = 512;
const SCHEMA_LANGUAGE: &str = "ru";

/// What the model is asked to do with a product description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task
{   /// Pick a general category (`product_category`)
    Classify
  , /// List up to ten name/value pairs (`product_parameters`)
    Parameterize
}

impl Task
{   fn prompt_prefix(self) -> &'static str
    {   match self
        {   Task::Classify => CLASSIFY_PREFIX
          , Task::Parameterize => PARAMETERIZE_PREFIX
        }
    }

    fn temperature(self) -> f32
    {   match self
        {   Task::Classify => 0.9
          , Task::Parameterize => 0.6
        }
    }

    fn schema_name(self) -> &'static str
    {   match self
        {   Task::Classify => "product_category_response"
          , Task::Parameterize => "product_parameters_response"
        }
    }

    /// The single top-level field the schema requires
    pub fn field(self) -> &'static str
    {   match self
        {   Task::Classify => "product_category"
          , Task::Parameterize => "product_parameters"
        }
    }

    fn field_schema(self) -> Value
    {   match self
        {   Task::Classify => json!({ "type": "string" })
          , Task::Parameterize => json!({
              "type": "array",
              "items": {
                "type": "object",
                "properties": {
                  "parameter_name": { "type": "string" },
                  "parameter_value": { "type": "string" }
                },
                "required": ["parameter_name", "parameter_value"]
              }
            })
        }
    }

    /// JSON schema object describing the expected completion text
    pub fn schema(self) -> Value
    {   let mut properties = serde_json::Map::new();
        properties.insert(self.field().to_string(), self.field_schema());
        json!({
          "type": "object",
          "properties": properties,
          "required": [self.field()]
        })
    }
}

/// Schema constraint handed to the endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSpec
{   pub name: String
  , pub strict: bool
  , pub language: String
  , pub schema: Value
}

/// `response_format` member of the request body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat
{   JsonSchema
    {   json_schema: SchemaSpec
    }
}

impl ResponseFormat
{   pub fn schema_spec(&self) -> &SchemaSpec
    {   match self
        {   ResponseFormat::JsonSchema { json_schema } => json_schema
        }
    }
}

/// Body POSTed to the completions endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest
{   pub model: String
  , pub prompt: String
  , pub max_tokens: usize
  , pub response_format: ResponseFormat
  , pub temperature: f32
}

/// Build the request for `task`. `text` lands verbatim after the
/// task's instruction prefix; nothing is validated here.
pub fn build(
  task: Task
, model: &str
, text: &str
) -> CompletionRequest
{   let request = CompletionRequest
    {   model: model.to_string()
      , prompt: format!("{}{}", task.prompt_prefix(), text)
      , max_tokens: MAX_TOKENS
      , response_format: ResponseFormat::JsonSchema
        {   json_schema: SchemaSpec
            {   name: task.schema_name().to_string()
              , strict: true
              , language: SCHEMA_LANGUAGE.to_string()
              , schema: task.schema()
            }
        }
      , temperature: task.temperature()
    };
    trace!("Built {:?} request: {:?}", task, request);
    request
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn classify_requires_only_product_category()
    {   let request = build(Task::Classify, "saiga", "Болт М12");
        let spec = request.response_format.schema_spec();
        assert_eq!(spec.schema["required"], json!(["product_category"]));
        assert_eq!(spec.schema["properties"]["product_category"]["type"], "string");
        assert_eq!(spec.name, "product_category_response");
        assert_eq!(request.max_tokens, 512);
        assert_eq!(request.temperature, 0.9);
    }

    #[test]
    fn parameterize_requires_only_product_parameters()
    {   let request = build(Task::Parameterize, "saiga", "Болт М12");
        let spec = request.response_format.schema_spec();
        assert_eq!(spec.schema["required"], json!(["product_parameters"]));
        let items = &spec.schema["properties"]["product_parameters"]["items"];
        assert_eq!(items["properties"]["parameter_name"]["type"], "string");
        assert_eq!(items["properties"]["parameter_value"]["type"], "string");
        assert_eq!(
          items["required"],
          json!(["parameter_name", "parameter_value"])
        );
        assert_eq!(request.temperature, 0.6);
    }

    #[test]
    fn prompt_embeds_text_after_prefix()
    {   let request = build(Task::Parameterize, "m", "Гайка {\"x\"}");
        assert_eq!(
          request.prompt,
          format!("{}Гайка {{\"x\"}}", PARAMETERIZE_PREFIX)
        );
        let empty = build(Task::Classify, "m", "");
        assert_eq!(empty.prompt, CLASSIFY_PREFIX);
    }

    #[test]
    fn serializes_openai_response_format()
    {   let body = serde_json::to_value(
          build(Task::Classify, "saiga", "x")
        ).unwrap();
        assert_eq!(body["model"], "saiga");
        assert_eq!(body["response_format"]["type"], "json_schema");
        let spec = &body["response_format"]["json_schema"];
        assert_eq!(spec["strict"], true);
        assert_eq!(spec["language"], "ru");
        assert_eq!(spec["schema"]["type"], "object");
    }
}
