use serde_json::Value;

use crate::api::cli::Command;
use crate::application::Dispatcher;
use crate::domain::entities::{ErrorDescriptor, InvoiceOptions, Outcome};

/// Runs one command and turns a successful payload into display text.
/// Errors are left as descriptors for [`render`].
pub async fn execute(dispatcher: &Dispatcher, command: Command) -> Outcome<String> {
    let outcome = match command {
        Command::Merchant { merchant_id } => {
            return dispatcher
                .retrieve_merchant(&merchant_id)
                .await
                .map(|summary| summary.to_string());
        }
        Command::CreateLocation { location } => dispatcher.create_location(&location.into()).await,
        Command::UpdateLocation {
            location_id,
            location,
        } => {
            dispatcher
                .update_location(&location_id, &location.into())
                .await
        }
        Command::Location { location_id } => dispatcher.retrieve_location(&location_id).await,
        Command::Locations => dispatcher.list_locations().await,
        Command::CardPayment { amount } => dispatcher.create_card_payment(amount).await,
        Command::BankTransferPayment { amount } => {
            dispatcher.create_bank_transfer_payment(amount).await
        }
        Command::CashPayment {
            amount_required,
            amount_supplied,
        } => {
            dispatcher
                .create_cash_payment(amount_required, amount_supplied)
                .await
        }
        Command::ExternalPayment {
            amount_paid,
            source,
            fee,
        } => {
            dispatcher
                .create_external_payment(amount_paid, &source, fee)
                .await
        }
        Command::Payments => dispatcher.list_payments().await,
        Command::Payment { payment_id } => dispatcher.get_payment(&payment_id).await,
        Command::Refund { payment_id, amount } => {
            dispatcher.refund_payment(&payment_id, amount).await
        }
        Command::RefundStatus { refund_id } => dispatcher.get_refund(&refund_id).await,
        Command::Refunds => dispatcher.list_refunds().await,
        Command::CreateOrder {
            location_id,
            tax_name,
            tax_percentage,
            tax_amount,
        } => {
            dispatcher
                .create_order(&location_id, &tax_name, &tax_percentage, tax_amount)
                .await
        }
        Command::CloneOrder { order_id } => dispatcher.clone_order(&order_id).await,
        Command::CreateCustomer { email_address } => {
            dispatcher.create_customer(&email_address).await
        }
        Command::CreateInvoice {
            order_id,
            customer_id,
            title,
            due_date,
        } => {
            let mut options = InvoiceOptions::default();
            if let Some(title) = title {
                options.title = title;
            }
            if let Some(due_date) = due_date {
                options.due_date = due_date;
            }
            dispatcher
                .create_invoice(&order_id, &customer_id, &options)
                .await
        }
        Command::PublishInvoice {
            invoice_id,
            version,
        } => dispatcher.publish_invoice(&invoice_id, version).await,
    };
    outcome.map(|payload| pretty(&payload))
}

pub fn render(outcome: &Outcome<String>) -> String {
    match outcome {
        Outcome::Success(text) => text.clone(),
        Outcome::Error(errors) => render_errors(errors),
    }
}

/// The descriptors exactly as received, as a pretty JSON array.
pub fn render_errors(errors: &[ErrorDescriptor]) -> String {
    serde_json::to_string_pretty(errors).unwrap_or_else(|_| format!("{errors:#?}"))
}

fn pretty(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
