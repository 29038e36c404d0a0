//! Debounced query controller.
//!
//! Typing schedules a resolution [`DEBOUNCE`] after the last keystroke; the
//! hotkey path resolves strictly and invokes the best match at once. All
//! state lives in one [`QueryController`], driven either by hand (tests,
//! embedding) or by [`QueryController::run`] on a single tokio task.

use crate::catalog::PluginRegistry;
use crate::dispatch::{Dispatcher, invoke};
use crate::matching::MatchPrimitives;
use crate::query::{resolve, select_best};
use flint_types::{AppEntry, ResultItem};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;
use tracing::{debug, error, info};

pub use flint_types::{QueryEvent, QueryUpdate};

/// Quiet period after the last keystroke before a query resolves
pub const DEBOUNCE: Duration = Duration::from_millis(100);

pub struct QueryController {
    registry: Box<dyn PluginRegistry + Send>,
    apps: Vec<AppEntry>,
    primitives: Box<dyn MatchPrimitives + Send>,
    dispatcher: Box<dyn Dispatcher + Send>,

    query: String,
    plugin_active: bool,
    clipboard_active: bool,
    deadline: Option<Instant>,
    results: Vec<ResultItem>,
    resolutions: u64,
}

impl QueryController {
    pub fn new(
        registry: Box<dyn PluginRegistry + Send>,
        apps: Vec<AppEntry>,
        primitives: Box<dyn MatchPrimitives + Send>,
        dispatcher: Box<dyn Dispatcher + Send>,
    ) -> Self {
        Self {
            registry,
            apps,
            primitives,
            dispatcher,
            query: String::new(),
            plugin_active: false,
            clipboard_active: false,
            deadline: None,
            results: Vec::new(),
            resolutions: 0,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Last published result list
    #[must_use]
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// Pending debounce deadline, if a resolution is scheduled
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Number of debounced resolutions run so far
    #[must_use]
    pub fn resolutions(&self) -> u64 {
        self.resolutions
    }

    /// Whether typed queries are currently ignored
    #[must_use]
    pub fn is_gated(&self) -> bool {
        self.plugin_active || self.clipboard_active
    }

    pub fn set_plugin_active(&mut self, active: bool) {
        self.plugin_active = active;
    }

    pub fn set_clipboard_active(&mut self, active: bool) {
        self.clipboard_active = active;
    }

    /// Record a new query.
    ///
    /// Returns the list to publish right away when nothing will resolve (a
    /// gate is active or the query is empty). Otherwise the pending deadline
    /// is replaced with `now + DEBOUNCE` and `None` is returned.
    pub fn on_query_changed(&mut self, query: &str, now: Instant) -> Option<Vec<ResultItem>> {
        query.clone_into(&mut self.query);

        if self.is_gated() || query.is_empty() {
            return Some(self.clear());
        }

        self.deadline = Some(now + DEBOUNCE);
        None
    }

    /// Run the pending resolution if its deadline has passed.
    ///
    /// Gates are checked again here: a gate switched on while the deadline
    /// was pending drops the resolution and publishes an empty list.
    pub fn fire(&mut self, now: Instant) -> Option<Vec<ResultItem>> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        if self.is_gated() || self.query.is_empty() {
            return Some(self.clear());
        }

        self.deadline = None;
        self.results = resolve(
            &mut *self.primitives,
            self.registry.local_plugins(),
            &self.apps,
            &self.query,
            false,
        );
        self.resolutions += 1;
        Some(self.results.clone())
    }

    /// Resolve `query` strictly and invoke the best match.
    ///
    /// Ignores gates and the debounce. Returns the invoked item; an empty
    /// result list or a failed dispatch invokes nothing.
    pub fn resolve_strict(&mut self, query: &str) -> Option<ResultItem> {
        let items = resolve(
            &mut *self.primitives,
            self.registry.local_plugins(),
            &self.apps,
            query,
            true,
        );

        let best = select_best(&items)?.clone();
        match invoke(&mut *self.dispatcher, &best) {
            Ok(()) => Some(best),
            Err(e) => {
                error!("Failed to invoke '{}': {}", best.name, e);
                None
            }
        }
    }

    fn clear(&mut self) -> Vec<ResultItem> {
        self.deadline = None;
        self.results.clear();
        Vec::new()
    }

    /// Apply one event, returning the updates it produces
    pub fn handle(&mut self, event: QueryEvent, now: Instant) -> Vec<QueryUpdate> {
        match event {
            QueryEvent::QueryChanged { query } => self
                .on_query_changed(&query, now)
                .map(|results| QueryUpdate::Results { results })
                .into_iter()
                .collect(),
            QueryEvent::PluginActive { active } => {
                self.set_plugin_active(active);
                Vec::new()
            }
            QueryEvent::ClipboardActive { active } => {
                self.set_clipboard_active(active);
                Vec::new()
            }
            QueryEvent::Hotkey { query } => self
                .resolve_strict(&query)
                .map(|item| QueryUpdate::Invoked { item })
                .into_iter()
                .collect(),
        }
    }

    /// Drive the controller from `events` until the channel closes or the
    /// update receiver goes away.
    pub async fn run(
        mut self,
        mut events: UnboundedReceiver<QueryEvent>,
        updates: UnboundedSender<QueryUpdate>,
    ) {
        info!("Query controller started");

        loop {
            let deadline = self.deadline;
            let produced = tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        debug!("Event channel closed");
                        break;
                    };
                    self.handle(event, Instant::now())
                }
                () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.fire(Instant::now())
                        .map(|results| QueryUpdate::Results { results })
                        .into_iter()
                        .collect()
                }
            };

            for update in produced {
                if updates.send(update).is_err() {
                    debug!("Update receiver dropped");
                    return;
                }
            }
        }

        info!("Query controller stopped");
    }
}
