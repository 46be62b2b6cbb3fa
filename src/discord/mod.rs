//! Discord session plumbing: gateway websocket and REST client.
//!
//! The gateway owns connection lifecycle and fires the readiness event that
//! starts the scheduler; all mutations (icon update, announcements) go
//! through the REST client.

pub mod gateway;
pub mod rest;

pub use gateway::ReadyEvent;
pub use rest::RestClient;
