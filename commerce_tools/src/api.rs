use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sfg_common::Currency;
use storefront_engine::{
    platform_types::{
        Buyer,
        CatalogAssignment,
        ConversionRate,
        ImpersonationConfig,
        Incrementor,
        MessageSenderAssignment,
        OrderWorksheet,
        Payment,
        PaymentPatch,
        Product,
        ProductPage,
        ProductSpec,
        SecurityProfileAssignment,
        Shopper,
        UserGroup,
        Variant,
    },
    product_objects::{CatalogQuery, SearchMode},
    traits::{
        BuyerManagement,
        CatalogManagement,
        ExchangeRateProvider,
        PaymentManagement,
        PlatformError,
    },
};

use crate::{config::CommerceConfig, CommerceApiError};

/// REST client for the remote commerce platform.
///
/// One instance carries the elevated service identity in its default headers. Calls that must run
/// as a shopper (the `/me` surface, outgoing payments) override the bearer token per request with
/// the token the engine passed down. The client is cheap to clone and safe to share.
#[derive(Clone)]
pub struct CommerceApi {
    config: CommerceConfig,
    client: Arc<Client>,
}

/// The platform wraps every collection response in a page envelope. Only the items matter here;
/// paging is driven by query parameters.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ListPage<T> {
    #[serde(rename = "Items", default)]
    items: Vec<T>,
}

impl CommerceApi {
    pub fn new(config: CommerceConfig) -> Result<Self, CommerceApiError> {
        let mut headers = HeaderMap::with_capacity(3);
        let bearer = format!("Bearer {}", config.access_token.reveal());
        let val = HeaderValue::from_str(&bearer).map_err(|e| CommerceApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        let val = HeaderValue::from_str(&config.marketplace_id)
            .map_err(|e| CommerceApiError::Initialization(e.to_string()))?;
        headers.insert("X-Marketplace-Id", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| CommerceApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Sends a REST request and deserializes the response body. `token` switches the request from
    /// the service identity to the given shopper's bearer token.
    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<B>,
        token: Option<&str>,
    ) -> Result<T, CommerceApiError> {
        let response = self
            .request(method, path, params, body, token)
            .send()
            .await
            .map_err(|e| CommerceApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("🛒️ REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| CommerceApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| CommerceApiError::RestResponseError(e.to_string()))?;
            Err(CommerceApiError::QueryError { status, message })
        }
    }

    /// As [`CommerceApi::rest_query`], for endpoints that answer with an empty body.
    pub async fn rest_call<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<B>,
        token: Option<&str>,
    ) -> Result<(), CommerceApiError> {
        let response = self
            .request(method, path, params, body, token)
            .send()
            .await
            .map_err(|e| CommerceApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("🛒️ REST call successful. {}", response.status());
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| CommerceApiError::RestResponseError(e.to_string()))?;
            Err(CommerceApiError::QueryError { status, message })
        }
    }

    fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<B>,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let url = self.url(path);
        trace!("🛒️ Sending REST request: {url}");
        let mut req = self.client.request(method, url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        req
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}{path}", self.config.api_base, self.config.api_version)
    }
}

//--------------------------------------  BuyerManagement     --------------------------------------------------------

impl BuyerManagement for CommerceApi {
    async fn create_buyer(&self, buyer: &Buyer) -> Result<Buyer, PlatformError> {
        debug!("🛒️ Creating a new buyer organization");
        let buyer = self.rest_query::<Buyer, _>(Method::POST, "/buyers", &[], Some(buyer), None).await?;
        info!("🛒️ Created buyer [{}]", buyer.id);
        Ok(buyer)
    }

    async fn save_buyer(&self, buyer_id: &str, buyer: &Buyer) -> Result<Buyer, PlatformError> {
        let path = format!("/buyers/{buyer_id}");
        debug!("🛒️ Saving buyer [{buyer_id}]");
        let buyer = self.rest_query::<Buyer, _>(Method::PUT, &path, &[], Some(buyer), None).await?;
        Ok(buyer)
    }

    async fn get_buyer(&self, buyer_id: &str) -> Result<Buyer, PlatformError> {
        let path = format!("/buyers/{buyer_id}");
        let buyer = self.rest_query::<Buyer, ()>(Method::GET, &path, &[], None, None).await?;
        Ok(buyer)
    }

    async fn patch_buyer_markup(&self, buyer_id: &str, markup_percent: Decimal) -> Result<Buyer, PlatformError> {
        let path = format!("/buyers/{buyer_id}");
        let body = serde_json::json!({ "xp": { "MarkupPercent": markup_percent } });
        debug!("🛒️ Patching markup of {markup_percent}% onto buyer [{buyer_id}]");
        let buyer = self.rest_query::<Buyer, _>(Method::PATCH, &path, &[], Some(body), None).await?;
        Ok(buyer)
    }

    async fn save_security_profile_assignment(
        &self,
        assignment: &SecurityProfileAssignment,
    ) -> Result<(), PlatformError> {
        debug!("🛒️ Assigning security profile [{}] to buyer [{}]", assignment.security_profile_id, assignment.buyer_id);
        self.rest_call(Method::POST, "/securityprofiles/assignments", &[], Some(assignment), None).await?;
        Ok(())
    }

    async fn save_message_sender_assignment(&self, assignment: &MessageSenderAssignment)
        -> Result<(), PlatformError> {
        debug!("🛒️ Assigning message sender [{}] to buyer [{}]", assignment.message_sender_id, assignment.buyer_id);
        self.rest_call(Method::POST, "/messagesenders/assignments", &[], Some(assignment), None).await?;
        Ok(())
    }

    async fn save_catalog_assignment(&self, assignment: &CatalogAssignment) -> Result<(), PlatformError> {
        debug!("🛒️ Assigning catalog [{}] to buyer [{}]", assignment.catalog_id, assignment.buyer_id);
        self.rest_call(Method::POST, "/catalogs/assignments", &[], Some(assignment), None).await?;
        Ok(())
    }

    async fn save_incrementor(&self, incrementor: &Incrementor) -> Result<Incrementor, PlatformError> {
        let path = format!("/incrementors/{}", incrementor.id);
        debug!("🛒️ Saving incrementor [{}]", incrementor.id);
        let incrementor = self.rest_query::<Incrementor, _>(Method::PUT, &path, &[], Some(incrementor), None).await?;
        Ok(incrementor)
    }

    async fn impersonation_configs_for_buyer(&self, buyer_id: &str)
        -> Result<Vec<ImpersonationConfig>, PlatformError> {
        let params = [("BuyerID", buyer_id)];
        let page = self
            .rest_query::<ListPage<ImpersonationConfig>, ()>(Method::GET, "/impersonationconfigs", &params, None, None)
            .await?;
        Ok(page.items)
    }

    async fn create_impersonation_config(
        &self,
        config: &ImpersonationConfig,
    ) -> Result<ImpersonationConfig, PlatformError> {
        debug!("🛒️ Creating impersonation config [{}]", config.id);
        let config = self
            .rest_query::<ImpersonationConfig, _>(Method::POST, "/impersonationconfigs", &[], Some(config), None)
            .await?;
        info!("🛒️ Created impersonation config [{}]", config.id);
        Ok(config)
    }

    async fn save_impersonation_config(
        &self,
        config_id: &str,
        config: &ImpersonationConfig,
    ) -> Result<ImpersonationConfig, PlatformError> {
        let path = format!("/impersonationconfigs/{config_id}");
        debug!("🛒️ Saving impersonation config [{config_id}]");
        let config = self.rest_query::<ImpersonationConfig, _>(Method::PUT, &path, &[], Some(config), None).await?;
        Ok(config)
    }

    async fn delete_impersonation_config(&self, config_id: &str) -> Result<(), PlatformError> {
        let path = format!("/impersonationconfigs/{config_id}");
        self.rest_call::<()>(Method::DELETE, &path, &[], None, None).await?;
        info!("🛒️ Deleted impersonation config [{config_id}]");
        Ok(())
    }
}

//--------------------------------------  CatalogManagement   --------------------------------------------------------

impl CatalogManagement for CommerceApi {
    async fn search_products(
        &self,
        query: &CatalogQuery,
        mode: SearchMode,
        user_token: &str,
    ) -> Result<ProductPage, PlatformError> {
        let page = query.page.map(|p| p.to_string());
        let page_size = query.page_size.map(|p| p.to_string());
        let mut params: Vec<(&str, &str)> = vec![("searchType", mode.wire_value())];
        if let Some(search) = query.search.as_deref() {
            params.push(("search", search));
        }
        if let Some(page) = page.as_deref() {
            params.push(("page", page));
        }
        if let Some(page_size) = page_size.as_deref() {
            params.push(("pageSize", page_size));
        }
        for (field, value) in &query.filters {
            params.push((field.as_str(), value.as_str()));
        }
        debug!("🛒️ Searching products ({})", mode.wire_value());
        let page = self
            .rest_query::<ProductPage, ()>(Method::GET, "/me/products", &params, None, Some(user_token))
            .await?;
        Ok(page)
    }

    async fn get_product(&self, product_id: &str, user_token: &str) -> Result<Product, PlatformError> {
        let path = format!("/me/products/{product_id}");
        let product = self.rest_query::<Product, ()>(Method::GET, &path, &[], None, Some(user_token)).await?;
        Ok(product)
    }

    async fn product_specs(&self, product_id: &str, user_token: &str) -> Result<Vec<ProductSpec>, PlatformError> {
        let path = format!("/me/products/{product_id}/specs");
        let page = self.rest_query::<ListPage<ProductSpec>, ()>(Method::GET, &path, &[], None, Some(user_token)).await?;
        Ok(page.items)
    }

    async fn product_variants(&self, product_id: &str, page_size: u32) -> Result<Vec<Variant>, PlatformError> {
        let path = format!("/products/{product_id}/variants");
        let page_size = page_size.to_string();
        let params = [("page", "1"), ("pageSize", page_size.as_str())];
        let page = self.rest_query::<ListPage<Variant>, ()>(Method::GET, &path, &params, None, None).await?;
        Ok(page.items)
    }

    async fn shopper_profile(&self, user_token: &str) -> Result<Shopper, PlatformError> {
        let shopper = self.rest_query::<Shopper, ()>(Method::GET, "/me", &[], None, Some(user_token)).await?;
        Ok(shopper)
    }

    async fn shopper_location_groups(&self, user_token: &str) -> Result<Vec<UserGroup>, PlatformError> {
        let params = [("xp.Type", "BuyerLocation")];
        let page = self
            .rest_query::<ListPage<UserGroup>, ()>(Method::GET, "/me/usergroups", &params, None, Some(user_token))
            .await?;
        Ok(page.items)
    }
}

//--------------------------------------  PaymentManagement   --------------------------------------------------------

impl PaymentManagement for CommerceApi {
    async fn order_worksheet(&self, order_id: &str) -> Result<OrderWorksheet, PlatformError> {
        let path = format!("/orders/incoming/{order_id}/worksheet");
        let worksheet = self.rest_query::<OrderWorksheet, ()>(Method::GET, &path, &[], None, None).await?;
        Ok(worksheet)
    }

    async fn payments_for_order(&self, order_id: &str) -> Result<Vec<Payment>, PlatformError> {
        let path = format!("/orders/incoming/{order_id}/payments");
        let page = self.rest_query::<ListPage<Payment>, ()>(Method::GET, &path, &[], None, None).await?;
        Ok(page.items)
    }

    async fn create_incoming_payment(&self, order_id: &str, payment: &Payment) -> Result<Payment, PlatformError> {
        let path = format!("/orders/incoming/{order_id}/payments");
        debug!("🛒️ Creating a {} payment on order [{order_id}]", payment.kind);
        let payment = self.rest_query::<Payment, _>(Method::POST, &path, &[], Some(payment), None).await?;
        info!("🛒️ Created payment [{}] on order [{order_id}]", payment.id);
        Ok(payment)
    }

    async fn create_outgoing_payment(
        &self,
        order_id: &str,
        payment: &Payment,
        user_token: &str,
    ) -> Result<Payment, PlatformError> {
        let path = format!("/orders/outgoing/{order_id}/payments");
        debug!("🛒️ Creating a {} payment on order [{order_id}] as the shopper", payment.kind);
        let payment = self.rest_query::<Payment, _>(Method::POST, &path, &[], Some(payment), Some(user_token)).await?;
        info!("🛒️ Created payment [{}] on order [{order_id}]", payment.id);
        Ok(payment)
    }

    async fn patch_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        patch: &PaymentPatch,
    ) -> Result<Payment, PlatformError> {
        let path = format!("/orders/incoming/{order_id}/payments/{payment_id}");
        debug!("🛒️ Patching payment [{payment_id}] on order [{order_id}]");
        let payment = self.rest_query::<Payment, _>(Method::PATCH, &path, &[], Some(patch), None).await?;
        Ok(payment)
    }

    async fn delete_payment(&self, order_id: &str, payment_id: &str) -> Result<(), PlatformError> {
        let path = format!("/orders/incoming/{order_id}/payments/{payment_id}");
        self.rest_call::<()>(Method::DELETE, &path, &[], None, None).await?;
        info!("🛒️ Deleted payment [{payment_id}] on order [{order_id}]");
        Ok(())
    }
}

//-------------------------------------- ExchangeRateProvider --------------------------------------------------------

impl ExchangeRateProvider for CommerceApi {
    async fn rates_for(&self, base: Currency) -> Result<Vec<ConversionRate>, PlatformError> {
        let path = format!("/exchangerates/{base}");
        let page = self.rest_query::<ListPage<ConversionRate>, ()>(Method::GET, &path, &[], None, None).await?;
        debug!("🛒️ Fetched {} conversion rates against {base}", page.items.len());
        Ok(page.items)
    }
}
