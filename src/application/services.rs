use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::domain::entities::{
    ErrorDescriptor, InvoiceOptions, LocationDetails, MerchantSummary, Money, Outcome,
};
use crate::infrastructure::config::{
    SquareConfig, CASH_SOURCE_ID, EXTERNAL_PAYMENT_TYPE, EXTERNAL_SOURCE_ID,
    PAYMENT_REQUEST_TYPE, TAX_SCOPE,
};
use crate::infrastructure::http_clients::{SquareClient, TransportError, API_ERROR_CATEGORY};
use crate::infrastructure::utils::{generate_idempotency_key, random_letters, IDEMPOTENCY_KEY_LEN};

/// One method per supported Square call. Each method builds the request body,
/// performs a single round trip and returns the [`Outcome`] untouched, apart
/// from [`Dispatcher::retrieve_merchant`] which reduces the payload to a
/// [`MerchantSummary`].
#[derive(Clone, Debug)]
pub struct Dispatcher {
    client: SquareClient,
}

impl Dispatcher {
    pub fn new(client: SquareClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: SquareConfig) -> Result<Self, TransportError> {
        Ok(Self::new(SquareClient::new(config)?))
    }

    pub fn client(&self) -> &SquareClient {
        &self.client
    }

    fn money(&self, amount: i64) -> Money {
        Money::new(amount, self.client.config().currency.as_str())
    }

    // Merchants

    pub async fn retrieve_merchant(&self, merchant_id: &str) -> Outcome<MerchantSummary> {
        let outcome = self
            .client
            .get(&["merchants", merchant_id])
            .await
            .and_then(|body| {
                match body.get("merchant").cloned().map(serde_json::from_value::<MerchantSummary>) {
                    Some(Ok(summary)) => Outcome::Success(summary),
                    _ => Outcome::Error(vec![ErrorDescriptor::local(
                        API_ERROR_CATEGORY,
                        "UNEXPECTED_RESPONSE",
                        Some("merchant is missing business_name, country or language_code".into()),
                    )]),
                }
            });
        report("retrieve_merchant", outcome)
    }

    // Locations

    pub async fn create_location(&self, details: &LocationDetails) -> Outcome {
        let body = json!({ "location": details });
        report("create_location", self.client.post(&["locations"], &body).await)
    }

    pub async fn update_location(&self, location_id: &str, details: &LocationDetails) -> Outcome {
        let body = json!({ "location": details });
        report(
            "update_location",
            self.client.put(&["locations", location_id], &body).await,
        )
    }

    pub async fn retrieve_location(&self, location_id: &str) -> Outcome {
        report(
            "retrieve_location",
            self.client.get(&["locations", location_id]).await,
        )
    }

    pub async fn list_locations(&self) -> Outcome {
        report("list_locations", self.client.get(&["locations"]).await)
    }

    // Payments

    /// Charges the configured card nonce.
    pub async fn create_card_payment(&self, amount: i64) -> Outcome {
        let body = json!({
            "source_id": self.client.config().card_source_id,
            "idempotency_key": generate_idempotency_key(),
            "amount_money": self.money(amount),
        });
        self.create_payment("create_card_payment", &body).await
    }

    /// Charges the configured bank account nonce.
    pub async fn create_bank_transfer_payment(&self, amount: i64) -> Outcome {
        let body = json!({
            "source_id": self.client.config().bank_transfer_source_id,
            "idempotency_key": generate_idempotency_key(),
            "amount_money": self.money(amount),
        });
        self.create_payment("create_bank_transfer_payment", &body).await
    }

    /// Records cash taken in person; `amount_supplied` is what the buyer handed over.
    pub async fn create_cash_payment(&self, amount_required: i64, amount_supplied: i64) -> Outcome {
        let body = json!({
            "source_id": CASH_SOURCE_ID,
            "idempotency_key": generate_idempotency_key(),
            "amount_money": self.money(amount_required),
            "cash_details": {
                "buyer_supplied_money": self.money(amount_supplied),
            },
        });
        self.create_payment("create_cash_payment", &body).await
    }

    /// Records a payment taken outside Square.
    pub async fn create_external_payment(
        &self,
        amount_paid: i64,
        source: &str,
        transaction_fee: i64,
    ) -> Outcome {
        let body = json!({
            "source_id": EXTERNAL_SOURCE_ID,
            "idempotency_key": generate_idempotency_key(),
            "amount_money": self.money(amount_paid),
            "external_details": {
                "type": EXTERNAL_PAYMENT_TYPE,
                "source": source,
                "source_fee_money": self.money(transaction_fee),
            },
        });
        self.create_payment("create_external_payment", &body).await
    }

    async fn create_payment(&self, operation: &'static str, body: &Value) -> Outcome {
        report(operation, self.client.post(&["payments"], body).await)
    }

    /// First page only; the cursor, if any, is left in the payload.
    pub async fn list_payments(&self) -> Outcome {
        report("list_payments", self.client.get(&["payments"]).await)
    }

    pub async fn get_payment(&self, payment_id: &str) -> Outcome {
        report("get_payment", self.client.get(&["payments", payment_id]).await)
    }

    // Refunds

    pub async fn refund_payment(&self, payment_id: &str, amount: i64) -> Outcome {
        let body = json!({
            "idempotency_key": generate_idempotency_key(),
            "amount_money": self.money(amount),
            "payment_id": payment_id,
        });
        report("refund_payment", self.client.post(&["refunds"], &body).await)
    }

    pub async fn get_refund(&self, refund_id: &str) -> Outcome {
        report("get_refund", self.client.get(&["refunds", refund_id]).await)
    }

    pub async fn list_refunds(&self) -> Outcome {
        report("list_refunds", self.client.get(&["refunds"]).await)
    }

    // Orders

    /// Creates an order at `location_id` with one order-scoped tax line.
    ///
    /// `taxes` sits beside `order` in the body rather than inside it, matching
    /// the payload this call has always sent.
    pub async fn create_order(
        &self,
        location_id: &str,
        tax_name: &str,
        tax_percentage: &str,
        tax_amount: i64,
    ) -> Outcome {
        let body = json!({
            "order": {
                "location_id": location_id,
            },
            "taxes": [{
                "uid": random_letters(IDEMPOTENCY_KEY_LEN),
                "name": tax_name,
                "percentage": tax_percentage,
                "applied_money": self.money(tax_amount),
                "scope": TAX_SCOPE,
            }],
            "idempotency_key": generate_idempotency_key(),
        });
        report("create_order", self.client.post(&["orders"], &body).await)
    }

    /// The copy is created in DRAFT state by Square.
    pub async fn clone_order(&self, order_id: &str) -> Outcome {
        let body = json!({ "order_id": order_id });
        report("clone_order", self.client.post(&["orders", "clone"], &body).await)
    }

    // Customers and invoices

    pub async fn create_customer(&self, email_address: &str) -> Outcome {
        let body = json!({
            "idempotency_key": generate_idempotency_key(),
            "email_address": email_address,
        });
        report("create_customer", self.client.post(&["customers"], &body).await)
    }

    /// Creates a DRAFT invoice asking `customer_id` for the balance of `order_id`.
    pub async fn create_invoice(
        &self,
        order_id: &str,
        customer_id: &str,
        options: &InvoiceOptions,
    ) -> Outcome {
        let body = json!({
            "idempotency_key": generate_idempotency_key(),
            "invoice": {
                "order_id": order_id,
                "primary_recipient": {
                    "customer_id": customer_id,
                },
                "payment_requests": [{
                    "request_type": PAYMENT_REQUEST_TYPE,
                    "due_date": options.due_date,
                }],
                "delivery_method": options.delivery_method,
                "title": options.title,
                "accepted_payment_methods": {
                    "card": true,
                    "square_gift_card": true,
                },
            },
        });
        report("create_invoice", self.client.post(&["invoices"], &body).await)
    }

    /// `version` must be the invoice's current version or Square rejects the call.
    pub async fn publish_invoice(&self, invoice_id: &str, version: i64) -> Outcome {
        let body = json!({
            "version": version,
            "idempotency_key": generate_idempotency_key(),
        });
        report(
            "publish_invoice",
            self.client.post(&["invoices", invoice_id, "publish"], &body).await,
        )
    }
}

fn report<T>(operation: &'static str, outcome: Outcome<T>) -> Outcome<T> {
    match &outcome {
        Outcome::Success(_) => info!(operation, "square call succeeded"),
        Outcome::Error(errors) => {
            warn!(operation, errors = errors.len(), "square call returned errors");
            for error in errors {
                debug!(
                    operation,
                    category = error.category.as_deref().unwrap_or("-"),
                    code = error.code.as_deref().unwrap_or("-"),
                    "error descriptor"
                );
            }
        }
    }
    outcome
}
