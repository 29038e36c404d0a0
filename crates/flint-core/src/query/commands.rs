use super::pattern::compile_pattern;
use crate::matching::MatchPrimitives;
use crate::scorer::{Score, rank_hint};
use flint_types::{
    Action, Cmd, CommandContext, ExtendedPayload, Feature, IdentityKey, Plugin, ResultItem,
    ResultSource,
};
use tracing::warn;

/// Match `query` against every command of every plugin, in catalog order.
///
/// Literal commands match by span or abbreviation. Regex and catch-all
/// commands only take part when `strict` is false; other typed commands
/// never match typed text. An empty query matches nothing, while a blank one
/// still reaches regex and catch-all commands.
pub fn query_commands<P: MatchPrimitives + ?Sized>(
    primitives: &mut P,
    plugins: &[Plugin],
    query: &str,
    strict: bool,
) -> Vec<ResultItem> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for plugin in plugins {
        for feature in &plugin.features {
            for cmd in &feature.cmds {
                let label = cmd.display_name();
                let score = Score::evaluate(primitives, label, query);

                if cmd_matches(cmd, &score, query, strict) {
                    results.push(command_item(plugin, feature, cmd, &score, query));
                }
            }
        }
    }
    results
}

fn cmd_matches(cmd: &Cmd, score: &Score, query: &str, strict: bool) -> bool {
    match cmd {
        Cmd::Literal(_) => score.matched(),
        Cmd::Regex { pattern, .. } if !strict => match compile_pattern(pattern) {
            Ok(re) => re.is_match(query),
            Err(e) => {
                warn!("Skipping command: {}", e);
                false
            }
        },
        Cmd::CatchAll { .. } => !strict,
        Cmd::Regex { .. } | Cmd::Other { .. } => false,
    }
}

fn command_item(
    plugin: &Plugin,
    feature: &Feature,
    cmd: &Cmd,
    score: &Score,
    query: &str,
) -> ResultItem {
    let name = cmd.display_name();
    let ext = (!cmd.is_literal()).then(|| ExtendedPayload {
        code: feature.code.clone(),
        cmd_type: cmd.cmd_type().to_string(),
        payload: query.to_string(),
    });

    ResultItem {
        name: name.to_string(),
        value: ResultSource::Plugin,
        icon: plugin.logo.clone(),
        desc: feature.explain.clone(),
        kind: plugin.plugin_type.clone(),
        match_span: score.span,
        rank_hint: rank_hint(score.span.is_some(), cmd.has_label()),
        is_best_match: score.is_best_match(),
        identity: IdentityKey::command(&plugin.name, &feature.code, name, cmd.cmd_type()),
        action: Action::Command(CommandContext {
            plugin: plugin.clone(),
            feature: feature.clone(),
            cmd: cmd.clone(),
            ext,
        }),
    }
}
