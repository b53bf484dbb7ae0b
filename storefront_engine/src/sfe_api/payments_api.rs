use std::fmt::Debug;

use log::*;

use crate::{
    platform_types::{Payment, PaymentKind, PaymentPatch, WorksheetOrder},
    sfe_api::errors::PaymentsApiError,
    traits::{CreditCardProcessor, PaymentManagement},
};

/// `PaymentsApi` reconciles the payments held against an order with the set checkout requested.
///
/// The order's worksheet total is the only amount that matters: whatever checkout sent in the
/// request bodies, every surviving payment ends up settled at the worksheet total. Credit card
/// payments carry an authorization at the card gateway, and that authorization is always voided
/// before the payment it backs is re-priced, replaced or deleted.
pub struct PaymentsApi<B, P> {
    platform: B,
    processor: P,
}

impl<B, P> Debug for PaymentsApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentsApi")
    }
}

impl<B, P> PaymentsApi<B, P> {
    pub fn new(platform: B, processor: P) -> Self {
        Self { platform, processor }
    }
}

impl<B, P> PaymentsApi<B, P>
where
    B: PaymentManagement,
    P: CreditCardProcessor,
{
    /// Brings the order's payments in line with `requested`.
    ///
    /// The reconciliation runs in four steps:
    /// 1. load the order worksheet (the authoritative total) and the existing payments;
    /// 2. delete every existing payment whose kind is absent from the request, voiding the card
    ///    authorization first where one exists — each stale payment is deleted exactly once;
    /// 3. walk the requested payments and create, patch or skip against the existing payment of
    ///    the same kind (an order holds at most one payment per kind);
    /// 4. return the refreshed payment list.
    ///
    /// A repeated call with an unchanged request and total makes no mutating calls at all.
    /// Concurrent calls for the same order are not serialized against each other; the platform's
    /// own consistency is the only arbiter between them.
    pub async fn save_payments(
        &self,
        order_id: &str,
        requested: &[Payment],
        user_token: &str,
    ) -> Result<Vec<Payment>, PaymentsApiError> {
        let worksheet = self.platform.order_worksheet(order_id).await?;
        let existing = self.platform.payments_for_order(order_id).await?;
        debug!(
            "💳️ Reconciling {} requested against {} existing payments on order [{order_id}] (total {})",
            requested.len(),
            existing.len(),
            worksheet.order.total
        );
        let existing = self.delete_stale_payments(requested, existing, &worksheet.order, user_token).await?;
        for requested_payment in requested {
            let current = existing.iter().find(|payment| payment.kind == requested_payment.kind);
            match requested_payment.kind {
                PaymentKind::CreditCard => {
                    self.reconcile_credit_card_payment(requested_payment, current, &worksheet.order, user_token)
                        .await?
                },
                PaymentKind::PurchaseOrder => {
                    self.reconcile_purchase_order_payment(requested_payment, current, &worksheet.order).await?
                },
                PaymentKind::SpendingAccount => {
                    warn!(
                        "💳️ Spending account payments cannot be changed at checkout. Ignoring the request on order \
                         [{order_id}]"
                    );
                },
            }
        }
        let refreshed = self.platform.payments_for_order(order_id).await?;
        Ok(refreshed)
    }

    /// Deletes every existing payment whose kind does not appear in the request, and returns the
    /// payments that survive. Credit card payments are voided at the processor before deletion.
    async fn delete_stale_payments(
        &self,
        requested: &[Payment],
        existing: Vec<Payment>,
        order: &WorksheetOrder,
        user_token: &str,
    ) -> Result<Vec<Payment>, PaymentsApiError> {
        let mut remaining = Vec::with_capacity(existing.len());
        for payment in existing {
            if requested.iter().any(|p| p.kind == payment.kind) {
                remaining.push(payment);
                continue;
            }
            match payment.kind {
                PaymentKind::CreditCard => {
                    info!("💳️🗑️ Voiding and deleting stale credit card payment [{}] on order [{}]", payment.id, order.id);
                    self.processor.void_transaction(&payment, order, user_token).await?;
                    self.platform.delete_payment(&order.id, &payment.id).await?;
                },
                PaymentKind::PurchaseOrder => {
                    info!("💳️🗑️ Deleting stale purchase order payment [{}] on order [{}]", payment.id, order.id);
                    self.platform.delete_payment(&order.id, &payment.id).await?;
                },
                PaymentKind::SpendingAccount => {
                    info!("💳️🗑️ Deleting stale spending account payment [{}] on order [{}]", payment.id, order.id);
                    self.platform.delete_payment(&order.id, &payment.id).await?;
                },
            }
        }
        Ok(remaining)
    }

    /// Settles the requested credit card payment against whatever card payment the order holds.
    ///
    /// * No existing payment: create one at the order total, not yet accepted. Creation goes
    ///   through the shopper's own view because the service identity cannot read personal saved
    ///   cards.
    /// * Same card, same amount: nothing to do.
    /// * Same card, stale amount: void the old authorization and patch the amount back to the
    ///   total.
    /// * Different card: void and delete the old payment, then create a new one as above.
    async fn reconcile_credit_card_payment(
        &self,
        requested: &Payment,
        existing: Option<&Payment>,
        order: &WorksheetOrder,
        user_token: &str,
    ) -> Result<(), PaymentsApiError> {
        let total = order.total;
        match existing {
            None => {
                debug!("💳️ No credit card payment on order [{}] yet. Creating one at {total}", order.id);
                let payment = requested.clone().with_amount(total).with_accepted(false);
                self.platform.create_outgoing_payment(&order.id, &payment, user_token).await?;
            },
            Some(current) if current.credit_card_id == requested.credit_card_id => {
                if current.amount == total {
                    trace!("💳️ Credit card payment [{}] is already settled at {total}", current.id);
                    return Ok(());
                }
                debug!("💳️ Re-pricing credit card payment [{}] from {} to {total}", current.id, current.amount);
                self.processor.void_transaction(current, order, user_token).await?;
                let patch = PaymentPatch { accepted: Some(false), amount: Some(total), xp: requested.xp.clone() };
                self.platform.patch_payment(&order.id, &current.id, &patch).await?;
            },
            Some(current) => {
                debug!("💳️ Card changed on order [{}]. Replacing payment [{}]", order.id, current.id);
                self.processor.void_transaction(current, order, user_token).await?;
                self.platform.delete_payment(&order.id, &current.id).await?;
                let payment = requested.clone().with_amount(total).with_accepted(false);
                self.platform.create_outgoing_payment(&order.id, &payment, user_token).await?;
            },
        }
        Ok(())
    }

    /// Settles the requested purchase order payment: created at the order total when absent,
    /// otherwise patched back to the total. Purchase orders hold no card authorization, so there
    /// is never anything to void.
    async fn reconcile_purchase_order_payment(
        &self,
        requested: &Payment,
        existing: Option<&Payment>,
        order: &WorksheetOrder,
    ) -> Result<(), PaymentsApiError> {
        let total = order.total;
        match existing {
            None => {
                debug!("💳️ No purchase order payment on order [{}] yet. Creating one at {total}", order.id);
                let payment = requested.clone().with_amount(total);
                self.platform.create_incoming_payment(&order.id, &payment).await?;
            },
            Some(current) => {
                if current.amount == total {
                    trace!("💳️ Purchase order payment [{}] is already settled at {total}", current.id);
                    return Ok(());
                }
                debug!("💳️ Re-pricing purchase order payment [{}] from {} to {total}", current.id, current.amount);
                let patch = PaymentPatch { amount: Some(total), ..PaymentPatch::default() };
                self.platform.patch_payment(&order.id, &current.id, &patch).await?;
            },
        }
        Ok(())
    }
}
