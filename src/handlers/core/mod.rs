//! Handler infrastructure: context, trait and dispatch table.

mod context;
mod table;

pub use context::{Context, Handler};
pub use table::{CommandSpec, CommandTable};
