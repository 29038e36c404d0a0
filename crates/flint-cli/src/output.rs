use anyhow::Result;
use flint_core::config::DisplayConfig;
use flint_types::{Action, AppEntry, Plugin, ResultItem};

/// Print results one per line, best matches starred
pub fn print_results(items: &[ResultItem], display: &DisplayConfig) {
    if items.is_empty() {
        println!("No results");
        return;
    }

    for (i, item) in items.iter().take(display.max_results).enumerate() {
        let marker = if item.is_best_match { '*' } else { ' ' };
        let rank = if display.show_rank_hint {
            format!(" [{:+}]", item.rank_hint)
        } else {
            String::new()
        };
        println!(
            "{:>3}. {} {:<32} {:<8}{} {}",
            i + 1,
            marker,
            item.name,
            item.kind,
            rank,
            source_label(item)
        );
    }

    let hidden = items.len().saturating_sub(display.max_results);
    if hidden > 0 {
        println!("     ... {hidden} more");
    }
}

pub fn print_results_json(items: &[ResultItem], display: &DisplayConfig) -> Result<()> {
    let shown = &items[..items.len().min(display.max_results)];
    println!("{}", serde_json::to_string_pretty(shown)?);
    Ok(())
}

fn source_label(item: &ResultItem) -> String {
    match &item.action {
        Action::Command(context) => format!("{}/{}", context.plugin.name, context.feature.code),
        Action::App(app) => app.desc.clone().unwrap_or_default(),
    }
}

pub fn print_plugins(plugins: &[Plugin]) {
    if plugins.is_empty() {
        println!("No plugins installed");
        return;
    }

    for plugin in plugins {
        println!("{} ({})", plugin.name, plugin.plugin_type);
        for feature in &plugin.features {
            let cmds: Vec<String> = feature
                .cmds
                .iter()
                .map(|cmd| format!("{} <{}>", cmd.display_name(), cmd.cmd_type()))
                .collect();
            println!("  {}: {}", feature.code, cmds.join(", "));
        }
    }
}

pub fn print_apps(apps: &[AppEntry]) {
    if apps.is_empty() {
        println!("No apps in catalog");
        return;
    }

    for app in apps {
        println!("{:<32} {}", app.name, app.key_words.join(", "));
    }
}
