//! Handing a chosen result to whatever runs it.

use crate::Result;
use flint_types::{Action, AppEntry, CommandContext, ResultItem};
use tracing::debug;

/// Runs invoked results: plugin commands go to the plugin host, applications
/// to the platform launcher.
pub trait Dispatcher {
    /// Open the plugin feature behind a command.
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin host cannot be reached.
    fn dispatch_command(&mut self, context: &CommandContext) -> Result<()>;

    /// Launch an application.
    ///
    /// # Errors
    ///
    /// Returns an error if the application cannot be started.
    fn dispatch_app(&mut self, app: &AppEntry, item: &ResultItem) -> Result<()>;
}

/// Route `item` to the matching dispatcher method.
///
/// # Errors
///
/// Returns whatever error the dispatcher reports.
pub fn invoke<D: Dispatcher + ?Sized>(dispatcher: &mut D, item: &ResultItem) -> Result<()> {
    debug!("Invoking '{}' ({:?})", item.name, item.value);
    match &item.action {
        Action::Command(context) => dispatcher.dispatch_command(context),
        Action::App(app) => dispatcher.dispatch_app(app, item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flint_types::{Cmd, Feature, IdentityKey, Plugin, ResultSource};

    #[derive(Default)]
    struct Log(Vec<String>);

    impl Dispatcher for Log {
        fn dispatch_command(&mut self, context: &CommandContext) -> Result<()> {
            self.0.push(format!("cmd:{}", context.feature.code));
            Ok(())
        }

        fn dispatch_app(&mut self, app: &AppEntry, _item: &ResultItem) -> Result<()> {
            self.0.push(format!("app:{}", app.name));
            Ok(())
        }
    }

    fn item(action: Action) -> ResultItem {
        ResultItem {
            name: "x".to_string(),
            value: ResultSource::Plugin,
            icon: String::new(),
            desc: String::new(),
            kind: "ui".to_string(),
            match_span: None,
            rank_hint: 0,
            is_best_match: false,
            identity: IdentityKey::app("x"),
            action,
        }
    }

    #[test]
    fn test_invoke_routes_by_action() {
        let feature = Feature {
            code: "translate".to_string(),
            explain: String::new(),
            cmds: vec![Cmd::Literal("fanyi".to_string())],
        };
        let command = item(Action::Command(CommandContext {
            plugin: Plugin {
                name: "t".to_string(),
                logo: String::new(),
                plugin_type: "ui".to_string(),
                features: vec![feature.clone()],
            },
            feature,
            cmd: Cmd::Literal("fanyi".to_string()),
            ext: None,
        }));
        let app = item(Action::App(AppEntry {
            name: "Firefox".to_string(),
            display_name: None,
            desc: None,
            action: None,
            icon: String::new(),
            key_words: Vec::new(),
        }));

        let mut log = Log::default();
        invoke(&mut log, &command).unwrap();
        invoke(&mut log, &app).unwrap();
        assert_eq!(log.0, vec!["cmd:translate", "app:Firefox"]);
    }
}
