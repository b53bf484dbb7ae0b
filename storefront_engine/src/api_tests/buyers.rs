use mockall::Sequence;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    api_tests::mocks::{new_aggregate, platform_buyer, stored_impersonation, MockCommercePlatform},
    platform_types::ImpersonationConfig,
    traits::PlatformError,
    BuyerApi,
    BuyerApiError,
    BUYER_ID_PLACEHOLDER,
};

#[tokio::test]
async fn create_provisions_the_full_aggregate() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    expect_baseline_provisioning(&mut platform, "0005", dec!(10));
    let api = BuyerApi::new(platform);

    let aggregate = api.create(new_aggregate(dec!(10))).await.unwrap();
    assert_eq!(aggregate.buyer.id, "0005");
    assert_eq!(aggregate.markup.percent, dec!(10));
    assert!(aggregate.impersonation_config.is_none());
}

#[tokio::test]
async fn create_synthesizes_the_impersonation_config_id() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    expect_baseline_provisioning(&mut platform, "0005", dec!(10));
    platform.expect_impersonation_configs_for_buyer().withf(|id| id == "0005").times(1).returning(|_| Ok(vec![]));
    platform
        .expect_create_impersonation_config()
        .withf(|config| {
            config.id == "admin_0005" &&
                config.buyer_id == "0005" &&
                config.security_profile_id == "BaseBuyer" &&
                config.group_id.as_deref() == Some("support-group")
        })
        .times(1)
        .returning(|config| Ok(config.clone()));
    let api = BuyerApi::new(platform);

    let mut requested = new_aggregate(dec!(10));
    requested.impersonation_config =
        Some(ImpersonationConfig { group_id: Some("support-group".to_string()), ..ImpersonationConfig::default() });
    let aggregate = api.create(requested).await.unwrap();
    let config = aggregate.impersonation_config.unwrap();
    assert_eq!(config.id, "admin_0005");
    assert_eq!(config.buyer_id, "0005");
}

#[tokio::test]
async fn create_on_only_touches_the_supplied_client() {
    let _ = env_logger::try_init().ok();
    // The API's own client gets no expectations, so any call to it panics the test.
    let own = MockCommercePlatform::new();
    let mut other = MockCommercePlatform::new();
    expect_baseline_provisioning(&mut other, "0031", dec!(5));
    let api = BuyerApi::new(own);

    let aggregate = api.create_on(&other, new_aggregate(dec!(5))).await.unwrap();
    assert_eq!(aggregate.buyer.id, "0031");
}

#[tokio::test]
async fn create_rejects_a_buyer_left_with_the_placeholder_id() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform
        .expect_create_buyer()
        .times(1)
        .returning(|buyer| Ok(platform_buyer(BUYER_ID_PLACEHOLDER, buyer.xp.markup_percent)));
    let api = BuyerApi::new(platform);

    let err = api.create(new_aggregate(dec!(10))).await.expect_err("Expected provisioning to stop");
    assert!(matches!(err, BuyerApiError::MissingBuyerId));
}

#[tokio::test]
async fn create_stops_at_the_first_provisioning_failure() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_create_buyer().times(1).returning(|_| Ok(platform_buyer("0005", None)));
    platform.expect_save_security_profile_assignment().times(1).returning(|_| Ok(()));
    platform.expect_save_message_sender_assignment().times(1).returning(|_| Ok(()));
    platform
        .expect_save_incrementor()
        .times(1)
        .returning(|_| Err(PlatformError::Upstream { status: 500, message: "boom".to_string() }));
    let api = BuyerApi::new(platform);

    let err = api.create(new_aggregate(dec!(10))).await.expect_err("Expected provisioning to stop");
    assert!(matches!(err, BuyerApiError::Platform(PlatformError::Upstream { status: 500, .. })));
}

#[tokio::test]
async fn update_forces_the_path_id_over_the_body() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_impersonation_configs_for_buyer().withf(|id| id == "0005").times(1).returning(|_| Ok(vec![]));
    platform
        .expect_save_buyer()
        .withf(|buyer_id, buyer| buyer_id == "0005" && buyer.id == "0005")
        .times(1)
        .returning(|_, buyer| Ok(buyer.clone()));
    platform
        .expect_patch_buyer_markup()
        .withf(|buyer_id, percent| buyer_id == "0005" && *percent == dec!(15))
        .times(1)
        .returning(|buyer_id, percent| Ok(platform_buyer(buyer_id, Some(percent))));
    let api = BuyerApi::new(platform);

    let mut requested = new_aggregate(dec!(15));
    requested.buyer.id = "9999".to_string();
    let aggregate = api.update("0005", requested).await.unwrap();
    assert_eq!(aggregate.buyer.id, "0005");
    assert_eq!(aggregate.markup.percent, dec!(15));
}

#[tokio::test]
async fn update_deletes_a_dropped_impersonation_config() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform
        .expect_impersonation_configs_for_buyer()
        .times(1)
        .returning(|id| Ok(vec![stored_impersonation(id)]));
    platform.expect_delete_impersonation_config().withf(|id| id == "admin_0005").times(1).returning(|_| Ok(()));
    platform.expect_save_buyer().times(1).returning(|_, buyer| Ok(buyer.clone()));
    platform
        .expect_patch_buyer_markup()
        .times(1)
        .returning(|buyer_id, percent| Ok(platform_buyer(buyer_id, Some(percent))));
    let api = BuyerApi::new(platform);

    let aggregate = api.update("0005", new_aggregate(dec!(10))).await.unwrap();
    assert!(aggregate.impersonation_config.is_none());
}

#[tokio::test]
async fn update_saves_over_the_existing_config_id() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform
        .expect_impersonation_configs_for_buyer()
        .times(1)
        .returning(|id| Ok(vec![stored_impersonation(id)]));
    platform
        .expect_save_impersonation_config()
        .withf(|config_id, config| config_id == "admin_0005" && config.group_id.as_deref() == Some("vip-desk"))
        .times(1)
        .returning(|_, config| Ok(config.clone()));
    platform.expect_save_buyer().times(1).returning(|_, buyer| Ok(buyer.clone()));
    platform
        .expect_patch_buyer_markup()
        .times(1)
        .returning(|buyer_id, percent| Ok(platform_buyer(buyer_id, Some(percent))));
    let api = BuyerApi::new(platform);

    let mut requested = new_aggregate(dec!(10));
    requested.impersonation_config =
        Some(ImpersonationConfig { group_id: Some("vip-desk".to_string()), ..ImpersonationConfig::default() });
    let aggregate = api.update("0005", requested).await.unwrap();
    assert_eq!(aggregate.impersonation_config.unwrap().group_id.as_deref(), Some("vip-desk"));
}

#[tokio::test]
async fn update_saves_the_buyer_before_touching_the_impersonation_config() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    let mut seq = Sequence::new();
    platform
        .expect_save_buyer()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, buyer| Ok(buyer.clone()));
    platform
        .expect_patch_buyer_markup()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|buyer_id, percent| Ok(platform_buyer(buyer_id, Some(percent))));
    platform
        .expect_impersonation_configs_for_buyer()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|id| Ok(vec![stored_impersonation(id)]));
    platform
        .expect_delete_impersonation_config()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let api = BuyerApi::new(platform);

    let aggregate = api.update("0005", new_aggregate(dec!(10))).await.unwrap();
    assert!(aggregate.impersonation_config.is_none());
}

#[tokio::test]
async fn update_stops_at_a_failed_buyer_save() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    // No impersonation expectations: a failed save must leave the stored config untouched.
    platform
        .expect_save_buyer()
        .times(1)
        .returning(|_, _| Err(PlatformError::Upstream { status: 500, message: "boom".to_string() }));
    let api = BuyerApi::new(platform);

    let err = api.update("0005", new_aggregate(dec!(10))).await.expect_err("Expected the save failure to propagate");
    assert!(matches!(err, BuyerApiError::Platform(PlatformError::Upstream { status: 500, .. })));
}

#[tokio::test]
async fn get_assembles_the_aggregate() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform
        .expect_get_buyer()
        .withf(|id| id == "0005")
        .times(1)
        .returning(|id| Ok(platform_buyer(id, Some(dec!(12.5)))));
    platform
        .expect_impersonation_configs_for_buyer()
        .withf(|id| id == "0005")
        .times(1)
        .returning(|id| Ok(vec![stored_impersonation(id)]));
    let api = BuyerApi::new(platform);

    let aggregate = api.get("0005").await.unwrap();
    assert_eq!(aggregate.buyer.name, "Northwind Traders");
    assert_eq!(aggregate.markup.percent, dec!(12.5));
    assert_eq!(aggregate.impersonation_config.unwrap().id, "admin_0005");
}

#[tokio::test]
async fn get_defaults_a_missing_markup_to_zero() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_get_buyer().times(1).returning(|id| Ok(platform_buyer(id, None)));
    platform.expect_impersonation_configs_for_buyer().times(1).returning(|_| Ok(vec![]));
    let api = BuyerApi::new(platform);

    let aggregate = api.get("0005").await.unwrap();
    assert_eq!(aggregate.markup.percent, Decimal::ZERO);
    assert!(aggregate.impersonation_config.is_none());
}

/// Installs the seven provisioning expectations every successful create runs through, minus the
/// optional impersonation upsert.
fn expect_baseline_provisioning(platform: &mut MockCommercePlatform, buyer_id: &'static str, markup: Decimal) {
    platform
        .expect_create_buyer()
        .withf(|buyer| buyer.id == BUYER_ID_PLACEHOLDER)
        .times(1)
        .returning(move |_| Ok(platform_buyer(buyer_id, None)));
    platform
        .expect_save_security_profile_assignment()
        .withf(move |a| a.buyer_id == buyer_id && a.security_profile_id == "BaseBuyer")
        .times(1)
        .returning(|_| Ok(()));
    platform
        .expect_save_message_sender_assignment()
        .withf(move |a| a.buyer_id == buyer_id && a.message_sender_id == "BuyerEmails")
        .times(1)
        .returning(|_| Ok(()));
    platform
        .expect_save_incrementor()
        .withf(move |inc| inc.id == format!("{buyer_id}-UserIncrementor") && inc.left_padding_count == 5)
        .times(1)
        .returning(|inc| Ok(inc.clone()));
    platform
        .expect_save_incrementor()
        .withf(move |inc| inc.id == format!("{buyer_id}-LocationIncrementor") && inc.left_padding_count == 4)
        .times(1)
        .returning(|inc| Ok(inc.clone()));
    platform
        .expect_save_catalog_assignment()
        .withf(move |a| {
            a.buyer_id == buyer_id && a.catalog_id == buyer_id && a.view_all_categories && !a.view_all_products
        })
        .times(1)
        .returning(|_| Ok(()));
    platform
        .expect_patch_buyer_markup()
        .withf(move |id, percent| id == buyer_id && *percent == markup)
        .times(1)
        .returning(|id, percent| Ok(platform_buyer(id, Some(percent))));
}
