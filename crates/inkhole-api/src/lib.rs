// inkhole-api: async client for the Pi-hole admin API.
//
// Handles password authentication (both response nesting shapes the
// appliance has shipped), session token caching across process
// invocations, and the raw statistics endpoints. Schema normalization
// lives in `inkhole-core` -- this crate returns raw payloads.

pub mod client;
pub mod error;
pub mod session;
pub mod transport;

pub use client::PiholeClient;
pub use error::Error;
pub use session::{
    CachedSession, FileSessionStore, MemorySessionStore, SessionManager, SessionStore,
    SessionToken,
};
pub use transport::TransportConfig;
