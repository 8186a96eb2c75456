pub mod services;

pub use services::Dispatcher;
