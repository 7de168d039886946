//! Product catalog store the enrichment results are written back to

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use std::collections::HashMap;
use log::debug;
use crate::error::Result;

/// One catalog record, as read from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product
{   pub id: String
  , pub name: String
  , pub marking: String
  , pub parameters_text: String
  , pub measure_unit_name: String
  , pub okpd2_category_name: String
}

impl Product
{   /// Free-text description handed to the model.
    /// Empty fields are left out.
    pub fn description(&self) -> String
    {   [ &self.name
        , &self.marking
        , &self.parameters_text
        , &self.measure_unit_name
        , &self.okpd2_category_name
        ]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
    }
}

/// Persistence collaborator. Implementations must bind `group` as a
/// value, never splice it into query text.
#[async_trait]
pub trait ProductCatalog: Send + Sync
{   /// Page of products starting at `start_index`, in store order
    async fn fetch_products(
      &self
    , start_index: usize
    , page_size: usize
    ) -> Result<Vec<Product>>;

    /// Store `group` for the product; `false` when no row matched
    async fn update_group(
      &self
    , product_id: &str
    , group: &str
    ) -> Result<bool>;
}

/// Catalog kept in memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryCatalog
{   products: Vec<Product>
  , groups: RwLock<HashMap<String, String>>
}

impl MemoryCatalog
{   pub fn new(products: Vec<Product>) -> Self
    {   MemoryCatalog
        {   products
          , groups: RwLock::new(HashMap::new())
        }
    }

    pub async fn group_of(&self, product_id: &str) -> Option<String>
    {   self.groups.read().await.get(product_id).cloned()
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog
{   async fn fetch_products(
      &self
    , start_index: usize
    , page_size: usize
    ) -> Result<Vec<Product>>
    {   debug!("fetch_products start={} size={}", start_index, page_size);
        Ok(self.products
          .iter()
          .skip(start_index)
          .take(page_size)
          .cloned()
          .collect())
    }

    async fn update_group(
      &self
    , product_id: &str
    , group: &str
    ) -> Result<bool>
    {   if !self.products.iter().any(|p| p.id == product_id)
        {   debug!("update_group: no product {}", product_id);
            return Ok(false);
        }
        self.groups.write().await
          .insert(product_id.to_string(), group.to_string());
        Ok(true)
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    fn product(id: &str) -> Product
    {   Product
        {   id: id.to_string()
          , name: format!("Болт {}", id)
          , marking: "М12х80".to_string()
          , parameters_text: "".to_string()
          , measure_unit_name: "шт".to_string()
          , okpd2_category_name: "Изделия крепежные".to_string()
        }
    }

    #[test]
    fn description_skips_empty_fields()
    {   assert_eq!(
          product("1").description(),
          "Болт 1; М12х80; шт; Изделия крепежные"
        );
    }

    #[tokio::test]
    async fn pages_and_updates()
    {   let catalog = MemoryCatalog::new(
          (1..=5).map(|i| product(&i.to_string())).collect()
        );
        let page = catalog.fetch_products(3, 5).await.unwrap();
        let ids: Vec<_> = page.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "5"]);

        assert!(catalog.update_group("2", "Крепеж").await.unwrap());
        assert!(!catalog.update_group("99", "Крепеж").await.unwrap());
        assert_eq!(catalog.group_of("2").await.as_deref(), Some("Крепеж"));
    }
}
