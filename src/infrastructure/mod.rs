pub mod utils;
pub mod config;
pub mod http_clients;

pub use utils::{
    generate_idempotency_key, random_letters
};

pub use http_clients::{
    classify, SquareClient
};
