use crate::{
    platform_types::{OrderWorksheet, Payment, PaymentPatch},
    traits::PlatformError,
};

/// The `PaymentManagement` trait defines the order and payment surface the reconciliation engine
/// works against.
///
/// The platform models payments directionally: the seller's (incoming) view is where payments are
/// listed, patched and deleted, while credit card payments referencing a shopper's saved card must
/// be created through the shopper's own (outgoing) view, since the service identity cannot read
/// personal cards.
#[allow(async_fn_in_trait)]
pub trait PaymentManagement {
    /// Fetches the calculated worksheet for the order. `worksheet.order.total` is the amount every
    /// reconciled payment settles at.
    async fn order_worksheet(&self, order_id: &str) -> Result<OrderWorksheet, PlatformError>;

    async fn payments_for_order(&self, order_id: &str) -> Result<Vec<Payment>, PlatformError>;

    /// Creates a payment in the seller's view of the order.
    async fn create_incoming_payment(&self, order_id: &str, payment: &Payment) -> Result<Payment, PlatformError>;

    /// Creates a payment in the shopper's view of the order, under the shopper's token.
    async fn create_outgoing_payment(
        &self,
        order_id: &str,
        payment: &Payment,
        user_token: &str,
    ) -> Result<Payment, PlatformError>;

    async fn patch_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        patch: &PaymentPatch,
    ) -> Result<Payment, PlatformError>;

    async fn delete_payment(&self, order_id: &str, payment_id: &str) -> Result<(), PlatformError>;
}
