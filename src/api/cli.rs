use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::entities::{LocationDetails, LocationType};

/// Call the Square API one operation at a time.
///
/// Credentials and environment come from SQUARE_ACCESS_TOKEN,
/// SQUARE_ENVIRONMENT and friends.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// Name of the location
    #[arg(long)]
    pub name: String,
    /// MOBILE or PHYSICAL
    #[arg(long = "type")]
    pub location_type: LocationType,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Instagram handle without the '@'
    #[arg(long, default_value = "")]
    pub instagram_username: String,
}

impl From<LocationArgs> for LocationDetails {
    fn from(args: LocationArgs) -> Self {
        LocationDetails {
            name: args.name,
            location_type: args.location_type,
            description: args.description,
            instagram_username: args.instagram_username,
        }
    }
}

// Amounts are passed through unchecked; negative values are Square's to reject.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Business name, country and language of a merchant
    Merchant { merchant_id: String },
    CreateLocation {
        #[command(flatten)]
        location: LocationArgs,
    },
    UpdateLocation {
        location_id: String,
        #[command(flatten)]
        location: LocationArgs,
    },
    Location { location_id: String },
    Locations,
    /// Charge the sandbox card nonce
    CardPayment {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Charge the sandbox bank account nonce
    BankTransferPayment {
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    CashPayment {
        #[arg(long, allow_negative_numbers = true)]
        amount_required: i64,
        #[arg(long, allow_negative_numbers = true)]
        amount_supplied: i64,
    },
    /// Record a payment taken outside Square
    ExternalPayment {
        #[arg(long, allow_negative_numbers = true)]
        amount_paid: i64,
        #[arg(long)]
        source: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        fee: i64,
    },
    Payments,
    Payment { payment_id: String },
    Refund {
        payment_id: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    RefundStatus { refund_id: String },
    Refunds,
    CreateOrder {
        #[arg(long)]
        location_id: String,
        #[arg(long)]
        tax_name: String,
        /// Percentage as a decimal string, e.g. 7.25
        #[arg(long)]
        tax_percentage: String,
        #[arg(long, allow_negative_numbers = true)]
        tax_amount: i64,
    },
    /// Duplicate an order into a new DRAFT order
    CloneOrder { order_id: String },
    CreateCustomer { email_address: String },
    CreateInvoice {
        order_id: String,
        customer_id: String,
        #[arg(long)]
        title: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due_date: Option<NaiveDate>,
    },
    PublishInvoice { invoice_id: String, version: i64 },
}
