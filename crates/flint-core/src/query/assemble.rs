use super::{query_apps, query_commands};
use crate::matching::MatchPrimitives;
use flint_types::{AppEntry, Plugin, ResultItem};
use std::collections::HashSet;
use tracing::debug;

/// Concatenate command results then app results, dropping repeated identities.
///
/// The first occurrence of each identity key wins; order is otherwise kept.
#[must_use]
pub fn assemble(commands: Vec<ResultItem>, apps: Vec<ResultItem>) -> Vec<ResultItem> {
    let mut seen = HashSet::new();
    commands
        .into_iter()
        .chain(apps)
        .filter(|item| seen.insert(item.identity.clone()))
        .collect()
}

/// First best match, else the first item
#[must_use]
pub fn select_best(items: &[ResultItem]) -> Option<&ResultItem> {
    items
        .iter()
        .find(|item| item.is_best_match)
        .or_else(|| items.first())
}

/// Resolve one query against both catalogs
pub fn resolve<P: MatchPrimitives + ?Sized>(
    primitives: &mut P,
    plugins: &[Plugin],
    apps: &[AppEntry],
    query: &str,
    strict: bool,
) -> Vec<ResultItem> {
    let commands = query_commands(primitives, plugins, query, strict);
    let app_items = query_apps(primitives, apps, query);
    let (command_count, app_count) = (commands.len(), app_items.len());

    let items = assemble(commands, app_items);
    debug!(
        "Resolved '{}' (strict={}): {} commands, {} apps, {} results",
        query,
        strict,
        command_count,
        app_count,
        items.len()
    );
    items
}
