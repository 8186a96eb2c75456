pub use crate::application::Dispatcher;
pub use crate::domain::entities::{
    ErrorDescriptor, InvoiceOptions, LocationDetails, LocationType, MerchantSummary, Money, Outcome,
};
pub use crate::infrastructure::config::{ConfigError, Environment, SquareConfig};
pub use crate::infrastructure::http_clients::{SquareClient, TransportError};

pub mod api;
pub mod infrastructure;
pub mod domain;
pub mod application;
