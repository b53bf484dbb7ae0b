use serde::{Deserialize, Serialize};

use crate::platform_types::{Product, ProductSpec, Variant};

//--------------------------------------    CatalogQuery     ---------------------------------------------------------

/// How the platform matches the search text against product fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Match the search text as a phrase prefix. Precise, but misses reordered terms.
    #[default]
    PhrasePrefix,
    /// Match any of the terms anywhere. The fallback when a phrase-prefix search finds nothing.
    AnyTerm,
}

impl SearchMode {
    pub fn wire_value(&self) -> &'static str {
        match self {
            Self::PhrasePrefix => "ExactPhrasePrefix",
            Self::AnyTerm => "AnyTerm",
        }
    }
}

/// A shopper's catalog search. Filters are passed to the platform verbatim as `field=value`
/// pairs.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub filters: Vec<(String, String)>,
}

impl CatalogQuery {
    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_filter<K: Into<String>, V: Into<String>>(mut self, field: K, value: V) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }
}

//--------------------------------------   ProductDetail     ---------------------------------------------------------

/// A fully priced product detail view: the product with its (marked-up and converted) price
/// schedule, its specs with converted option surcharges, and the first page of variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductDetail {
    pub product: Product,
    #[serde(default)]
    pub specs: Vec<ProductSpec>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

//--------------------------------------  ProductInfoRequest -------------------------------------------------------

/// Template body for the supplier-contact email a shopper sends from a product page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductInfoRequest {
    #[serde(rename = "ProductID", default)]
    pub product_id: String,
    pub product_name: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub note: String,
}
