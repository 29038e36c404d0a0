//! Flint launcher CLI
//!
//! Runs the query engine from a terminal. Provides:
//! - One-shot queries and the hotkey path
//! - Catalog inspection (plugins, apps, abbreviations)
//! - An interactive session driving the debounced controller

mod dispatch;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dispatch::LaunchDispatcher;
use flint_core::abbrev::abbreviate;
use flint_core::config::{Config, Directories};
use flint_core::{
    DirectoryRegistry, PinyinMatcher, PluginRegistry, QueryController, QueryEvent, QueryUpdate,
    load_app_catalog, resolve,
};
use flint_types::AppEntry;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

/// Flint launcher CLI
#[derive(Parser)]
#[command(name = "flint")]
#[command(about = "Flint launcher - query plugin commands and installed apps")]
#[command(version)]
#[command(after_help = "\
Examples:
  flint query wx              Resolve a query and list the results
  flint query gd --strict     Only literal commands and apps
  flint hotkey gd             Launch the best strict match
  flint abbrev 'GitHub Desktop'
  flint interactive           Type queries, see debounced results
")]
struct Cli {
    /// Config file (defaults to ~/.config/flint/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a query and print the results
    Query {
        /// Query text (words are joined with spaces)
        #[arg(required = true)]
        query: Vec<String>,

        /// Exclude regex and catch-all commands
        #[arg(long)]
        strict: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve strictly and invoke the best match
    Hotkey {
        #[arg(required = true)]
        query: Vec<String>,

        /// Print the launch action instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the first-letter abbreviation of a label
    Abbrev { label: Vec<String> },

    /// List installed plugins and their commands
    Plugins,

    /// List the application catalog
    Apps,

    /// Interactive session (`:hotkey <q>`, `:plugin on|off`, `:clipboard on|off`, `:quit`)
    Interactive {
        /// Print launch actions instead of running them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Config plus both catalogs, loaded once before any query runs
struct Session {
    config: Config,
    registry: DirectoryRegistry,
    apps: Vec<AppEntry>,
}

impl Session {
    fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let dirs = Directories::new().context("Failed to determine flint directories")?;
        dirs.ensure_exists().context("Failed to create flint directories")?;
        let config_path = config_path.unwrap_or_else(|| dirs.config_file.clone());
        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let registry = DirectoryRegistry::load(config.plugin_dirs(&dirs))
            .context("Failed to scan plugin directories")?;

        let apps_path = config.apps_file(&dirs);
        let apps = load_app_catalog(&apps_path)
            .with_context(|| format!("Failed to load app catalog {}", apps_path.display()))?;

        debug!(
            "Session loaded: {} plugins, {} apps",
            registry.local_plugins().len(),
            apps.len()
        );
        Ok(Self {
            config,
            registry,
            apps,
        })
    }

    fn into_controller(self, dry_run: bool) -> (QueryController, Config) {
        let controller = QueryController::new(
            Box::new(self.registry),
            self.apps,
            Box::new(PinyinMatcher::new()),
            Box::new(LaunchDispatcher::new(dry_run)),
        );
        (controller, self.config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging();

    match cli.command {
        Commands::Query {
            query,
            strict,
            json,
        } => {
            let session = Session::load(cli.config)?;
            let items = resolve(
                &mut PinyinMatcher::new(),
                session.registry.local_plugins(),
                &session.apps,
                &query.join(" "),
                strict,
            );
            if json {
                output::print_results_json(&items, &session.config.display)?;
            } else {
                output::print_results(&items, &session.config.display);
            }
        }
        Commands::Hotkey { query, dry_run } => {
            let (mut controller, _) = Session::load(cli.config)?.into_controller(dry_run);
            let query = query.join(" ");
            match controller.resolve_strict(&query) {
                Some(item) => info!("Invoked {}", item.name),
                None => println!("Nothing to run for '{query}'"),
            }
        }
        Commands::Abbrev { label } => {
            println!("{}", abbreviate(&PinyinMatcher::new(), &label.join(" ")));
        }
        Commands::Plugins => {
            let session = Session::load(cli.config)?;
            output::print_plugins(session.registry.local_plugins());
        }
        Commands::Apps => {
            let session = Session::load(cli.config)?;
            output::print_apps(&session.apps);
        }
        Commands::Interactive { dry_run } => {
            let session = Session::load(cli.config)?;
            run_interactive(session, dry_run).await?;
        }
    }

    Ok(())
}

async fn run_interactive(session: Session, dry_run: bool) -> Result<()> {
    let (controller, config) = session.into_controller(dry_run);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    let driver = tokio::spawn(controller.run(event_rx, update_tx));
    let printer = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            match update {
                QueryUpdate::Results { results } => {
                    output::print_results(&results, &config.display);
                }
                QueryUpdate::Invoked { item } => println!("Invoked {}", item.name),
            }
        }
    });

    // rustyline blocks, so the prompt gets its own thread
    let prompt = tokio::task::spawn_blocking(move || read_events(&event_tx));
    prompt.await.context("Prompt thread panicked")??;

    driver.await.context("Controller task panicked")?;
    printer.await.context("Printer task panicked")?;
    Ok(())
}

/// Read lines until `:quit` or EOF, forwarding each as a controller event
fn read_events(events: &UnboundedSender<QueryEvent>) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to open line editor")?;

    loop {
        let line = match editor.readline("flint> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read line"),
        };
        record_history(editor.history_mut(), &line);

        let event = match parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        if events.send(event).is_err() {
            break;
        }
    }
    Ok(())
}

fn record_history(history: &mut impl History, line: &str) {
    if let Err(e) = history.add(line) {
        debug!("Failed to record history entry: {}", e);
    }
}

/// `Ok(None)` means quit
fn parse_line(line: &str) -> std::result::Result<Option<QueryEvent>, String> {
    let Some(directive) = line.trim_start().strip_prefix(':') else {
        return Ok(Some(QueryEvent::QueryChanged {
            query: line.to_string(),
        }));
    };

    let (name, arg) = directive
        .split_once(char::is_whitespace)
        .map_or((directive, ""), |(name, arg)| (name, arg.trim()));

    match name {
        "quit" | "q" => Ok(None),
        "hotkey" => Ok(Some(QueryEvent::Hotkey {
            query: arg.to_string(),
        })),
        "plugin" => parse_switch(arg).map(|active| Some(QueryEvent::PluginActive { active })),
        "clipboard" => {
            parse_switch(arg).map(|active| Some(QueryEvent::ClipboardActive { active }))
        }
        _ => Err(format!("Unknown command ':{name}'")),
    }
}

fn parse_switch(arg: &str) -> std::result::Result<bool, String> {
    match arg {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("Expected 'on' or 'off', got '{arg}'")),
    }
}
