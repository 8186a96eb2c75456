pub mod cli;
pub mod handlers;

pub use handlers::{execute, render};
