//! relayd - a multi-client, line-oriented chat relay server.
//!
//! Every accepted connection is a Client Actor with its own event queue;
//! the nick registry is owned by a single Server Actor. See
//! [`state::ServerActor`] and [`network::spawn_client`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod launch;
pub mod network;
pub mod state;
pub mod store;
pub mod telemetry;

pub use launch::{Running, launch};
