//! Query resolution over the plugin and application catalogs.

mod apps;
mod assemble;
mod commands;
mod pattern;

pub use apps::query_apps;
pub use assemble::{assemble, resolve, select_best};
pub use commands::query_commands;
pub use pattern::compile_pattern;
