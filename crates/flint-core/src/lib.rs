//! Query resolution and ranking for the Flint launcher.
//!
//! A query is matched against plugin commands and installed applications,
//! classified, deduplicated and handed back in catalog order. The
//! [`controller`] debounces typed queries and drives the hotkey path.

pub mod abbrev;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod matching;
pub mod query;
pub mod scorer;

mod error;

#[cfg(test)]
mod tests;

pub use catalog::{DirectoryRegistry, PluginRegistry, StaticRegistry, load_app_catalog};
pub use controller::{DEBOUNCE, QueryController};
pub use dispatch::{Dispatcher, invoke};
pub use error::{Error, Result};
pub use matching::{MatchPrimitives, PinyinMatcher};
pub use query::{assemble, query_apps, query_commands, resolve, select_best};

pub use flint_types::*;
