//! Benchmarks for per-keystroke query resolution.
//!
//! Run with: cargo bench -p flint-core
//! Results are saved to target/criterion/

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use flint_core::matching::PinyinMatcher;
use flint_core::resolve;
use flint_types::{AppEntry, Cmd, Feature, Plugin};

const APPS: [(&str, &[&str]); 12] = [
    ("Firefox", &["Firefox", "browser"]),
    ("Google Chrome", &["Google Chrome", "谷歌浏览器"]),
    ("Visual Studio Code", &["Visual Studio Code", "code"]),
    ("WeChat", &["WeChat", "微信"]),
    ("QQ Music", &["QQ Music", "QQ音乐"]),
    ("NetEase Music", &["NetEase Music", "网易云音乐"]),
    ("GitHub Desktop", &["GitHub Desktop"]),
    ("Terminal", &["Terminal", "终端"]),
    ("Notion", &["Notion"]),
    ("Slack", &["Slack"]),
    ("DingTalk", &["DingTalk", "钉钉"]),
    ("Calculator", &["Calculator", "计算器"]),
];

fn generate_apps(count: usize) -> Vec<AppEntry> {
    (0..count)
        .map(|i| {
            let (name, key_words) = APPS[i % APPS.len()];
            AppEntry {
                name: name.to_string(),
                display_name: None,
                desc: Some(format!("/Applications/{name}_{i}.app")),
                action: None,
                icon: String::new(),
                key_words: key_words.iter().map(ToString::to_string).collect(),
            }
        })
        .collect()
}

fn generate_plugins(count: usize) -> Vec<Plugin> {
    (0..count)
        .map(|i| Plugin {
            name: format!("plugin_{i}"),
            logo: String::new(),
            plugin_type: "ui".to_string(),
            features: vec![Feature {
                code: "main".to_string(),
                explain: String::new(),
                cmds: vec![
                    Cmd::Literal(format!("command {i}")),
                    Cmd::Literal("翻译".to_string()),
                    Cmd::Regex {
                        pattern: "/^\\d+$/".to_string(),
                        label: "Number".to_string(),
                    },
                    Cmd::CatchAll {
                        label: "Search".to_string(),
                    },
                ],
            }],
        })
        .collect()
}

fn bench_resolve_basic(c: &mut Criterion) {
    let plugins = generate_plugins(20);
    let apps = generate_apps(200);
    let mut primitives = PinyinMatcher::new();

    c.bench_function("resolve_basic_200", |b| {
        b.iter(|| {
            resolve(
                &mut primitives,
                black_box(&plugins),
                black_box(&apps),
                black_box("fire"),
                false,
            )
        });
    });
}

fn bench_resolve_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_scaling");
    let plugins = generate_plugins(20);

    for size in &[100, 500, 1000, 5000] {
        let apps = generate_apps(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            let mut primitives = PinyinMatcher::new();
            b.iter(|| resolve(&mut primitives, &plugins, black_box(&apps), "wx", false));
        });
    }
    group.finish();
}

fn bench_resolve_queries(c: &mut Criterion) {
    let plugins = generate_plugins(20);
    let apps = generate_apps(1000);
    let mut group = c.benchmark_group("resolve_queries");

    let queries = [
        ("latin_prefix", "vis"),
        ("latin_long", "visual studio code"),
        ("abbreviation", "gd"),
        ("pinyin_initials", "wyyyy"),
        ("pinyin_full", "wangyiyun"),
        ("cjk", "音乐"),
        ("no_match", "zzzz"),
    ];

    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::new("query", name), query, |b, q| {
            let mut primitives = PinyinMatcher::new();
            b.iter(|| resolve(&mut primitives, &plugins, &apps, black_box(q), false));
        });
    }
    group.finish();
}

fn bench_strict(c: &mut Criterion) {
    let plugins = generate_plugins(20);
    let apps = generate_apps(1000);

    c.bench_function("resolve_strict_1000", |b| {
        let mut primitives = PinyinMatcher::new();
        b.iter(|| resolve(&mut primitives, &plugins, &apps, black_box("fy"), true));
    });
}

criterion_group!(
    benches,
    bench_resolve_basic,
    bench_resolve_scaling,
    bench_resolve_queries,
    bench_strict
);
criterion_main!(benches);
