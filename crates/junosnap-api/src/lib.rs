// junosnap-api: Async transport for Junos devices (REST RPC + captured replay)

pub mod error;
pub mod replay;
pub mod rest;
pub mod rpc;
pub mod transport;

pub use error::Error;
pub use replay::ReplayTransport;
pub use rest::RestClient;
pub use rpc::{AnyTransport, Rpc, Transport};
pub use transport::{TlsMode, TransportConfig};
