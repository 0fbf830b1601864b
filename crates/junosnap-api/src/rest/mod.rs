mod client;
pub mod decode;

pub use client::{DEFAULT_PORT, RestClient};
