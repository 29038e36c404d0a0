use flint_core::{Dispatcher, Error, Result};
use flint_types::{AppEntry, CommandContext, ResultItem};
use std::process::{Command, Stdio};
use tracing::info;

/// Launches apps through the shell and prints commands for the plugin host.
///
/// With `dry_run` set, apps are printed instead of started.
pub struct LaunchDispatcher {
    dry_run: bool,
}

impl LaunchDispatcher {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

impl Dispatcher for LaunchDispatcher {
    fn dispatch_command(&mut self, context: &CommandContext) -> Result<()> {
        println!("{}", serde_json::to_string(context)?);
        Ok(())
    }

    fn dispatch_app(&mut self, app: &AppEntry, item: &ResultItem) -> Result<()> {
        let action = app
            .action
            .as_deref()
            .filter(|action| !action.trim().is_empty())
            .ok_or_else(|| Error::Dispatch(format!("no launch action for '{}'", item.name)))?;

        if self.dry_run {
            println!("{action}");
            return Ok(());
        }

        info!("Launching {}: {}", app.name, action);
        Command::new("sh")
            .arg("-c")
            .arg(action)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}
