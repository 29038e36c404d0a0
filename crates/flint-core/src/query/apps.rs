use crate::matching::MatchPrimitives;
use crate::scorer::Score;
use flint_types::{APP_KIND, Action, AppEntry, IdentityKey, ResultItem, ResultSource};

/// Match `query` against the keywords of every application.
///
/// Each entry yields at most one item, labelled with the first keyword that
/// matches by span or abbreviation. An empty query matches nothing.
pub fn query_apps<P: MatchPrimitives + ?Sized>(
    primitives: &mut P,
    apps: &[AppEntry],
    query: &str,
) -> Vec<ResultItem> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for app in apps {
        for keyword in &app.key_words {
            let score = Score::evaluate(primitives, keyword, query);
            if score.matched() {
                results.push(app_item(app, keyword, &score));
                break;
            }
        }
    }
    results
}

fn app_item(app: &AppEntry, keyword: &str, score: &Score) -> ResultItem {
    ResultItem {
        name: keyword.to_string(),
        value: ResultSource::App,
        icon: app.icon.clone(),
        desc: app.desc.clone().unwrap_or_default(),
        kind: APP_KIND.to_string(),
        match_span: score.span,
        rank_hint: 0,
        is_best_match: score.is_best_match(),
        identity: IdentityKey::app(app.identity_key()),
        action: Action::App(app.clone()),
    }
}
