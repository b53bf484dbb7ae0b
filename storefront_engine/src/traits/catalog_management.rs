use crate::{
    platform_types::{Product, ProductPage, ProductSpec, Shopper, UserGroup, Variant},
    sfe_api::product_objects::{CatalogQuery, SearchMode},
    traits::PlatformError,
};

/// The `CatalogManagement` trait defines the shopper-facing catalog surface of the platform.
///
/// Most calls run under the shopper's own token, because product visibility and negotiated prices
/// are assigned per buyer. The exception is [`CatalogManagement::product_variants`], which the
/// platform only exposes to the elevated service identity.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Runs a product search as the shopper. `mode` selects the platform's matching strategy; the
    /// orchestrator retries a failed phrase-prefix search with any-term matching.
    async fn search_products(
        &self,
        query: &CatalogQuery,
        mode: SearchMode,
        user_token: &str,
    ) -> Result<ProductPage, PlatformError>;

    /// Fetches a single product, with its price schedule embedded, as the shopper sees it.
    async fn get_product(&self, product_id: &str, user_token: &str) -> Result<Product, PlatformError>;

    async fn product_specs(&self, product_id: &str, user_token: &str) -> Result<Vec<ProductSpec>, PlatformError>;

    /// Lists the first `page_size` variants of the product under the service identity.
    async fn product_variants(&self, product_id: &str, page_size: u32) -> Result<Vec<Variant>, PlatformError>;

    /// Resolves the calling shopper's profile from their token.
    async fn shopper_profile(&self, user_token: &str) -> Result<Shopper, PlatformError>;

    /// Lists the shopper's buyer-location user groups. Implementations filter on the group kind;
    /// the orchestrator picks the first group that declares a currency.
    async fn shopper_location_groups(&self, user_token: &str) -> Result<Vec<UserGroup>, PlatformError>;
}
