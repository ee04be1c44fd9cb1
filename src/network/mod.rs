//! Network Module
//!
//! TCP server, connection handling, and a blocking client.
//!
//! ## Architecture
//! - Single non-blocking acceptor loop
//! - One scoped thread per connection (joined before `Server::run` returns)
//! - Commands executed directly against the shared `Store`

mod server;
mod connection;
mod client;

pub use server::{Server, ShutdownHandle};
pub use connection::{execute, Connection};
pub use client::Client;
