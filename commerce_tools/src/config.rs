use log::*;
use sfg_common::Secret;

#[derive(Debug, Clone, Default)]
pub struct CommerceConfig {
    pub api_base: String,
    pub api_version: String,
    pub marketplace_id: String,
    pub access_token: Secret<String>,
}

impl CommerceConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_base = std::env::var("SFG_API_BASE").unwrap_or_else(|_| {
            warn!("SFG_API_BASE not set, using (probably useless) default");
            "https://api.commerce.example".to_string()
        });
        let api_version = std::env::var("SFG_API_VERSION").unwrap_or_else(|_| {
            warn!("SFG_API_VERSION not set, using v1 as default");
            "v1".to_string()
        });
        let marketplace_id = std::env::var("SFG_MARKETPLACE_ID").unwrap_or_else(|_| {
            warn!("SFG_MARKETPLACE_ID not set, using (probably useless) default");
            "storefront-gateway".to_string()
        });
        let access_token = Secret::new(std::env::var("SFG_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("SFG_ACCESS_TOKEN not set, using (probably useless) default");
            "sfg_00000000000000".to_string()
        }));
        Self { api_base, api_version, marketplace_id, access_token }
    }
}
