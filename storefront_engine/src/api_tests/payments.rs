use rust_decimal_macros::dec;
use sfg_common::Money;

use crate::{
    api_tests::mocks::{
        cc_payment,
        po_payment,
        requested_cc,
        requested_po,
        sa_payment,
        worksheet,
        MockCardGateway,
        MockCommercePlatform,
    },
    traits::CardProcessorError,
    PaymentsApi,
    PaymentsApiError,
};

fn order_total() -> Money {
    Money::from(dec!(125.50))
}

#[tokio::test]
async fn settled_card_payment_makes_no_mutating_calls() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform
        .expect_payments_for_order()
        .times(2)
        .returning(|_| Ok(vec![cc_payment("pay-1", "card-A", order_total())]));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    let payments = api.save_payments("ord-1", &[requested_cc("card-A")], "shopper-token").await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, "pay-1");
}

#[tokio::test]
async fn missing_card_payment_is_created_at_the_order_total() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform.expect_payments_for_order().times(2).returning(|_| Ok(vec![]));
    platform
        .expect_create_outgoing_payment()
        .withf(|order_id, payment, token| {
            order_id == "ord-1" &&
                payment.credit_card_id.as_deref() == Some("card-A") &&
                payment.amount == order_total() &&
                !payment.accepted &&
                token == "shopper-token"
        })
        .times(1)
        .returning(|_, payment, _| Ok(payment.clone()));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    api.save_payments("ord-1", &[requested_cc("card-A")], "shopper-token").await.unwrap();
}

#[tokio::test]
async fn stale_card_amount_is_voided_and_patched_back_to_the_total() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform
        .expect_payments_for_order()
        .times(2)
        .returning(|_| Ok(vec![cc_payment("pay-1", "card-A", Money::from(dec!(100.00)))]));
    platform
        .expect_patch_payment()
        .withf(|order_id, payment_id, patch| {
            order_id == "ord-1" &&
                payment_id == "pay-1" &&
                patch.accepted == Some(false) &&
                patch.amount == Some(order_total())
        })
        .times(1)
        .returning(|_, _, _| Ok(cc_payment("pay-1", "card-A", order_total())));
    let mut processor = MockCardGateway::new();
    processor
        .expect_void_transaction()
        .withf(|payment, order, token| payment.id == "pay-1" && order.id == "ord-1" && token == "shopper-token")
        .times(1)
        .returning(|_, _, _| Ok(()));
    let api = PaymentsApi::new(platform, processor);

    api.save_payments("ord-1", &[requested_cc("card-A")], "shopper-token").await.unwrap();
}

#[tokio::test]
async fn card_change_voids_deletes_and_recreates() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform
        .expect_payments_for_order()
        .times(2)
        .returning(|_| Ok(vec![cc_payment("pay-1", "card-A", order_total())]));
    platform
        .expect_delete_payment()
        .withf(|order_id, payment_id| order_id == "ord-1" && payment_id == "pay-1")
        .times(1)
        .returning(|_, _| Ok(()));
    platform
        .expect_create_outgoing_payment()
        .withf(|_, payment, _| {
            payment.credit_card_id.as_deref() == Some("card-B") && payment.amount == order_total() && !payment.accepted
        })
        .times(1)
        .returning(|_, payment, _| Ok(payment.clone()));
    let mut processor = MockCardGateway::new();
    processor.expect_void_transaction().withf(|payment, _, _| payment.id == "pay-1").times(1).returning(|_, _, _| Ok(()));
    let api = PaymentsApi::new(platform, processor);

    api.save_payments("ord-1", &[requested_cc("card-B")], "shopper-token").await.unwrap();
}

#[tokio::test]
async fn a_declined_void_stops_the_reconciliation() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform
        .expect_payments_for_order()
        .times(1)
        .returning(|_| Ok(vec![cc_payment("pay-1", "card-A", Money::from(dec!(100.00)))]));
    // No patch expectation: the payment must stay untouched when the void fails.
    let mut processor = MockCardGateway::new();
    processor
        .expect_void_transaction()
        .times(1)
        .returning(|_, _, _| Err(CardProcessorError::VoidDeclined("insufficient funds".to_string())));
    let api = PaymentsApi::new(platform, processor);

    let err = api
        .save_payments("ord-1", &[requested_cc("card-A")], "shopper-token")
        .await
        .expect_err("Expected the void failure to propagate");
    assert!(matches!(err, PaymentsApiError::Processor(CardProcessorError::VoidDeclined(_))));
}

#[tokio::test]
async fn purchase_order_payment_is_created_at_the_order_total() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform.expect_payments_for_order().times(2).returning(|_| Ok(vec![]));
    platform
        .expect_create_incoming_payment()
        .withf(|order_id, payment| order_id == "ord-1" && payment.amount == order_total())
        .times(1)
        .returning(|_, payment| Ok(payment.clone()));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    api.save_payments("ord-1", &[requested_po()], "shopper-token").await.unwrap();
}

#[tokio::test]
async fn stale_purchase_order_amount_is_patched_to_the_total() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform
        .expect_payments_for_order()
        .times(2)
        .returning(|_| Ok(vec![po_payment("pay-po", Money::from(dec!(100.00)))]));
    platform
        .expect_patch_payment()
        .withf(|_, payment_id, patch| {
            payment_id == "pay-po" && patch.amount == Some(order_total()) && patch.accepted.is_none()
        })
        .times(1)
        .returning(|_, _, _| Ok(po_payment("pay-po", order_total())));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    api.save_payments("ord-1", &[requested_po()], "shopper-token").await.unwrap();
}

#[tokio::test]
async fn settled_purchase_order_is_left_alone() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform.expect_payments_for_order().times(2).returning(|_| Ok(vec![po_payment("pay-po", order_total())]));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    api.save_payments("ord-1", &[requested_po()], "shopper-token").await.unwrap();
}

#[tokio::test]
async fn stale_purchase_order_payment_is_deleted_exactly_once() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform.expect_payments_for_order().times(2).returning(|_| Ok(vec![po_payment("pay-po", order_total())]));
    platform
        .expect_delete_payment()
        .withf(|order_id, payment_id| order_id == "ord-1" && payment_id == "pay-po")
        .times(1)
        .returning(|_, _| Ok(()));
    platform
        .expect_create_outgoing_payment()
        .withf(|_, payment, _| payment.credit_card_id.as_deref() == Some("card-A"))
        .times(1)
        .returning(|_, payment, _| Ok(payment.clone()));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    api.save_payments("ord-1", &[requested_cc("card-A")], "shopper-token").await.unwrap();
}

#[tokio::test]
async fn stale_spending_account_payment_is_deleted() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform.expect_payments_for_order().times(2).returning(|_| Ok(vec![sa_payment("pay-sa", order_total())]));
    platform
        .expect_delete_payment()
        .withf(|_, payment_id| payment_id == "pay-sa")
        .times(1)
        .returning(|_, _| Ok(()));
    platform.expect_create_incoming_payment().times(1).returning(|_, payment| Ok(payment.clone()));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    api.save_payments("ord-1", &[requested_po()], "shopper-token").await.unwrap();
}

#[tokio::test]
async fn requested_spending_account_payment_is_ignored() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform.expect_payments_for_order().times(2).returning(|_| Ok(vec![]));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    let payments = api.save_payments("ord-1", &[sa_payment("", order_total())], "shopper-token").await.unwrap();
    assert!(payments.is_empty());
}

#[tokio::test]
async fn repeated_call_with_settled_payments_is_read_only() {
    let _ = env_logger::try_init().ok();
    let mut platform = MockCommercePlatform::new();
    platform.expect_order_worksheet().times(1).returning(|id| Ok(worksheet(id, order_total())));
    platform
        .expect_payments_for_order()
        .times(2)
        .returning(|_| Ok(vec![cc_payment("pay-1", "card-A", order_total()), po_payment("pay-po", order_total())]));
    let api = PaymentsApi::new(platform, MockCardGateway::new());

    let requested = [requested_cc("card-A"), requested_po()];
    let payments = api.save_payments("ord-1", &requested, "shopper-token").await.unwrap();
    assert_eq!(payments.len(), 2);
}
