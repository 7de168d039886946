//! Paging a catalog through the model and writing categories back

use log::{debug, error, info};
use crate::catalog::{Product, ProductCatalog};
use crate::client::ModelInteractor;
use crate::error::{Error, Result};
use crate::response::ProductParameter;

/// Outcome of one enrichment page
#[derive(Debug, Default)]
pub struct EnrichReport
{   /// Products whose group was written
    pub updated: Vec<String>
  , /// Products the store did not accept the write for
    pub not_found: Vec<String>
  , /// Products skipped because the model call failed
    pub failed: Vec<(String, Error)>
}

impl EnrichReport
{   pub fn processed(&self) -> usize
    {   self.updated.len() + self.not_found.len() + self.failed.len()
    }
}

pub struct Enricher<'a, C: ProductCatalog + ?Sized>
{   interactor: &'a ModelInteractor
  , catalog: &'a C
}

impl<'a, C: ProductCatalog + ?Sized> Enricher<'a, C>
{   pub fn new(interactor: &'a ModelInteractor, catalog: &'a C) -> Self
    {   Enricher { interactor, catalog }
    }

    /// Classify one page of products and store each category as the
    /// product group. A failed model call skips that product; store
    /// errors abort the page.
    pub async fn enrich_page(
      &self
    , start_index: usize
    , page_size: usize
    ) -> Result<EnrichReport>
    {   let products = self.catalog
          .fetch_products(start_index, page_size)
          .await?;
        debug!("Enriching {} products from {}", products.len(), start_index);

        let mut report = EnrichReport::default();
        for product in products
        {   match self.interactor.classify(&product.description()).await
            {   Ok(category) => {
                  if self.catalog.update_group(&product.id, &category).await?
                  {   debug!("{} -> {}", product.id, category);
                      report.updated.push(product.id);
                  } else
                  {   report.not_found.push(product.id);
                  }
                }
              , Err(e) => {
                  error!("Classify failed for {}: {}", product.id, e);
                  report.failed.push((product.id, e));
                }
            }
        }
        info!(
          "Page at {}: {} updated, {} failed",
          start_index, report.updated.len(), report.failed.len()
        );
        Ok(report)
    }

    /// Page through the whole catalog until a short page comes back
    pub async fn enrich_all(&self, page_size: usize) -> Result<EnrichReport>
    {   let mut total = EnrichReport::default();
        if page_size == 0
        {   return Ok(total);
        }
        let mut start = 0;
        loop
        {   let page = self.enrich_page(start, page_size).await?;
            let seen = page.processed();
            total.updated.extend(page.updated);
            total.not_found.extend(page.not_found);
            total.failed.extend(page.failed);
            if seen < page_size
            {   break;
            }
            start += page_size;
        }
        Ok(total)
    }

    pub async fn describe_parameters(
      &self
    , product: &Product
    ) -> Result<Vec<ProductParameter>>
    {   self.interactor.parameterize(&product.description()).await
    }
}
