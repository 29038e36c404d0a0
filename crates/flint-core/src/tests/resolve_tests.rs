//! Tests for end-to-end resolution: commands then apps, dedup, best match

use super::fixtures::*;
use crate::matching::PinyinMatcher;
use crate::query::{resolve, select_best};
use flint_types::{Action, ResultItem};

fn run(query: &str, strict: bool) -> Vec<ResultItem> {
    resolve(
        &mut PinyinMatcher::new(),
        &sample_plugins(),
        &sample_apps(),
        query,
        strict,
    )
}

#[test]
fn test_pinyin_initials_reach_cjk_command() {
    let items = run("fy", false);
    assert_eq!(
        names(&items),
        vec!["翻译", "Translate word", "Translate anything"]
    );
    assert!(items.iter().all(ResultItem::is_command));
}

#[test]
fn test_strict_keeps_only_literals() {
    let items = run("fy", true);
    assert_eq!(names(&items), vec!["翻译"]);
}

#[test]
fn test_abbreviation_reaches_app() {
    let items = run("gd", false);
    assert_eq!(
        names(&items),
        vec!["Translate word", "Translate anything", "GitHub Desktop"]
    );

    let app = items.last().unwrap();
    assert!(app.is_app());
    assert!(app.match_span.is_none());
    assert!(app.is_best_match);

    // The best match wins over earlier plain matches
    assert_eq!(select_best(&items).unwrap().name, "GitHub Desktop");
}

#[test]
fn test_strict_abbreviation_selects_app() {
    let items = run("gd", true);
    assert_eq!(names(&items), vec!["GitHub Desktop"]);
    let Action::App(entry) = &select_best(&items).unwrap().action else {
        panic!("expected app action");
    };
    assert_eq!(entry.name, "GitHub Desktop");
}

#[test]
fn test_best_match_threshold() {
    let items = run("no", false);
    assert_eq!(
        names(&items),
        vec!["Translate word", "Translate anything", "Notes", "Notion"]
    );

    let notes = &items[2];
    let notion = &items[3];
    assert!(notes.is_command());
    assert!(notes.is_best_match, "5-char prefix match is a best match");
    assert!(notion.is_app());
    assert!(!notion.is_best_match, "6-char prefix match is not");
}

#[test]
fn test_cjk_keyword_match_names_item_after_keyword() {
    let items = run("wx", true);
    assert_eq!(names(&items), vec!["微信"]);
    assert_eq!(items[0].desc, "/Applications/WeChat.app");
    assert!(items[0].is_best_match);
}

#[test]
fn test_regex_command_for_arithmetic() {
    let items = run("12 + 3", false);
    assert_eq!(names(&items), vec!["Translate anything", "Calculate"]);

    let Action::Command(context) = &items[1].action else {
        panic!("expected command action");
    };
    let ext = context.ext.as_ref().unwrap();
    assert_eq!(ext.code, "calculate");
    assert_eq!(ext.cmd_type, "regex");
    assert_eq!(ext.payload, "12 + 3");
}

#[test]
fn test_catch_all_alone() {
    let plugins = vec![make_plugin("web", "search", vec![catch_all("Search the web")])];
    let mut primitives = PinyinMatcher::new();

    let items = resolve(&mut primitives, &plugins, &[], "xyz", false);
    assert_eq!(names(&items), vec!["Search the web"]);

    let items = resolve(&mut primitives, &plugins, &[], "xyz", true);
    assert!(items.is_empty());
}

#[test]
fn test_apps_sharing_desc_keep_first() {
    let apps = vec![
        make_app_with_desc("Foo", "/Applications/Foo.app", &["Foo"]),
        make_app_with_desc("Foo Helper", "/Applications/Foo.app", &["Foo Helper"]),
        make_app("Food", &["Food"]),
    ];

    let items = resolve(&mut PinyinMatcher::new(), &[], &apps, "foo", false);
    assert_eq!(names(&items), vec!["Foo", "Food"]);
}

#[test]
fn test_duplicate_literal_commands_collapse() {
    let plugins = vec![make_plugin(
        "notes",
        "open",
        vec![literal("Notes"), literal("notes "), literal("Notes app")],
    )];

    let items = resolve(&mut PinyinMatcher::new(), &plugins, &[], "notes", false);
    assert_eq!(names(&items), vec!["Notes", "Notes app"]);
}

#[test]
fn test_same_command_in_two_features_is_kept() {
    let mut plugin = make_plugin("notes", "open", vec![literal("Notes")]);
    let mut second = plugin.features[0].clone();
    second.code = "new".to_string();
    plugin.features.push(second);

    let items = resolve(&mut PinyinMatcher::new(), &[plugin], &[], "notes", false);
    assert_eq!(items.len(), 2);
}

#[test]
fn test_no_results() {
    assert!(run("", false).is_empty());
    assert!(run("", true).is_empty());
    assert!(run("zzzz", true).is_empty());
    assert!(select_best(&run("zzzz", true)).is_none());
}

#[test]
fn test_blank_query_reaches_catch_all_only() {
    let plugins = vec![make_plugin(
        "web",
        "search",
        vec![catch_all("Search the web")],
    )];

    let items = resolve(
        &mut PinyinMatcher::new(),
        &plugins,
        &sample_apps(),
        "   ",
        false,
    );
    assert_eq!(names(&items), vec!["Search the web"]);
    assert_eq!(select_best(&items).map(|i| i.name.as_str()), Some("Search the web"));

    let strict = resolve(
        &mut PinyinMatcher::new(),
        &plugins,
        &sample_apps(),
        "   ",
        true,
    );
    assert!(strict.is_empty());
}
