//! Configuration loading.
//!
//! - [`types`]: the top-level [`Config`] and its `[server]`, `[store]` and
//!   `[shutdown]` sections
//! - [`listen`]: listener descriptions kept in the store ([`ListenSpec`])
//! - [`limits`]: line length limits (`[limits]`)

mod limits;
mod listen;
mod types;

pub use limits::LimitsConfig;
pub use listen::{ListenSpec, TlsSpec};
pub use types::{Config, ConfigError, ServerConfig, ShutdownConfig, StoreConfig};
