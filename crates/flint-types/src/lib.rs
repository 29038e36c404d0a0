//! Shared types for Flint launcher components.
//!
//! This crate provides the catalog and result types used by flint-core and
//! flint-cli. Catalog types mirror the JSON a plugin manifest or an
//! application enumerator produces; result types are serializable so a UI
//! host can render them without linking the engine.

use serde::{Deserialize, Deserializer, Serialize};
use std::convert::TryFrom;

/// `cmdType` of a plain-text command
pub const CMD_TYPE_TEXT: &str = "text";

/// `cmdType` of a regex command
pub const CMD_TYPE_REGEX: &str = "regex";

/// `cmdType` of a catch-all command
pub const CMD_TYPE_OVER: &str = "over";

/// Kind reported for application results
pub const APP_KIND: &str = "app";

/// Deserialize a Vec that may be null or missing (both become empty vec)
fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

fn default_plugin_type() -> String {
    "ui".to_string()
}

/// Lower-case and trim a display name for identity comparison
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

// ============================================================================
// Plugin catalog
// ============================================================================

/// A registered plugin (plugin.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,

    #[serde(default)]
    pub logo: String,

    #[serde(default = "default_plugin_type")]
    pub plugin_type: String,

    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub features: Vec<Feature>,
}

/// A feature exposed by a plugin, reachable through its commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub code: String,

    #[serde(default)]
    pub explain: String,

    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub cmds: Vec<Cmd>,
}

/// A command that triggers a feature.
///
/// In manifests a bare string is a literal command. Objects carry a `type`:
/// `regex` (with a `match` pattern), `over` (catch-all), or any other kind
/// the launcher cannot resolve from typed text (`img`, `files`, `window`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCmd", into = "RawCmd")]
pub enum Cmd {
    /// Plain text matched directly against the query
    Literal(String),

    /// Pattern in `/body/flags` notation tested against the query
    Regex { pattern: String, label: String },

    /// Matches every query
    CatchAll { label: String },

    /// A typed command with no text-matching rule
    Other { kind: String, label: String },
}

impl Cmd {
    /// Text shown for this command: the literal itself or the label.
    /// Falls back to the pattern/kind when a typed command has no label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Regex { pattern, label } if label.is_empty() => pattern,
            Self::Regex { label, .. } | Self::CatchAll { label } => label,
            Self::Other { kind, label } if label.is_empty() => kind,
            Self::Other { label, .. } => label,
        }
    }

    /// `cmdType` used for identity and the extended payload
    #[must_use]
    pub fn cmd_type(&self) -> &str {
        match self {
            Self::Literal(_) => CMD_TYPE_TEXT,
            Self::Regex { .. } => CMD_TYPE_REGEX,
            Self::CatchAll { .. } => CMD_TYPE_OVER,
            Self::Other { kind, .. } => kind,
        }
    }

    /// Whether the command carries a display label distinct from its raw form
    #[must_use]
    pub fn has_label(&self) -> bool {
        match self {
            Self::Literal(_) => false,
            Self::Regex { label, .. } | Self::CatchAll { label } | Self::Other { label, .. } => {
                !label.is_empty()
            }
        }
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCmd {
    Text(String),
    Typed(TypedCmd),
}

#[derive(Serialize, Deserialize)]
struct TypedCmd {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,

    #[serde(default)]
    label: String,
}

impl TryFrom<RawCmd> for Cmd {
    type Error = String;

    fn try_from(raw: RawCmd) -> Result<Self, Self::Error> {
        let typed = match raw {
            RawCmd::Text(text) => return Ok(Self::Literal(text)),
            RawCmd::Typed(typed) => typed,
        };

        match typed.kind.as_str() {
            CMD_TYPE_REGEX => {
                let pattern = typed
                    .pattern
                    .ok_or_else(|| "regex cmd is missing its `match` pattern".to_string())?;
                Ok(Self::Regex {
                    pattern,
                    label: typed.label,
                })
            }
            CMD_TYPE_OVER => Ok(Self::CatchAll { label: typed.label }),
            CMD_TYPE_TEXT => Err("text cmds are written as plain strings".to_string()),
            _ => Ok(Self::Other {
                kind: typed.kind,
                label: typed.label,
            }),
        }
    }
}

impl From<Cmd> for RawCmd {
    fn from(cmd: Cmd) -> Self {
        match cmd {
            Cmd::Literal(text) => Self::Text(text),
            Cmd::Regex { pattern, label } => Self::Typed(TypedCmd {
                kind: CMD_TYPE_REGEX.to_string(),
                pattern: Some(pattern),
                label,
            }),
            Cmd::CatchAll { label } => Self::Typed(TypedCmd {
                kind: CMD_TYPE_OVER.to_string(),
                pattern: None,
                label,
            }),
            Cmd::Other { kind, label } => Self::Typed(TypedCmd {
                kind,
                pattern: None,
                label,
            }),
        }
    }
}

// ============================================================================
// Application catalog
// ============================================================================

/// An installed application as reported by the platform enumerator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub name: String,

    #[serde(default, alias = "_name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Usually the install path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Launch command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default)]
    pub icon: String,

    /// Searchable names, including translated aliases
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub key_words: Vec<String>,
}

impl AppEntry {
    /// Identity of the application: desc, else action, else display name, else name.
    /// Empty strings count as absent.
    #[must_use]
    pub fn identity_key(&self) -> &str {
        non_empty(self.desc.as_ref())
            .or_else(|| non_empty(self.action.as_ref()))
            .or_else(|| non_empty(self.display_name.as_ref()))
            .unwrap_or(&self.name)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Matched span in character positions, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span starts at the first character
    #[must_use]
    pub fn is_prefix(&self) -> bool {
        self.start == 0
    }

    /// Span covers a label of `len` characters entirely
    #[must_use]
    pub fn covers(&self, len: usize) -> bool {
        self.start == 0 && len > 0 && self.end == len - 1
    }
}

/// Which catalog produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Plugin,
    App,
}

/// Key used to suppress duplicate results within one result set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdentityKey {
    Command {
        plugin_name: String,
        feature_code: String,
        name: String,
        cmd_type: String,
    },
    App {
        key: String,
    },
}

impl IdentityKey {
    /// Build a command key; the name is normalized
    #[must_use]
    pub fn command(plugin_name: &str, feature_code: &str, name: &str, cmd_type: &str) -> Self {
        Self::Command {
            plugin_name: plugin_name.to_string(),
            feature_code: feature_code.to_string(),
            name: normalize_name(name),
            cmd_type: cmd_type.to_string(),
        }
    }

    #[must_use]
    pub fn app(key: impl Into<String>) -> Self {
        Self::App { key: key.into() }
    }
}

/// Extra data handed to a plugin when a typed command fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedPayload {
    pub code: String,

    #[serde(rename = "type")]
    pub cmd_type: String,

    /// The raw query that triggered the command
    pub payload: String,
}

/// Everything the plugin host needs to run a matched command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandContext {
    pub plugin: Plugin,
    pub feature: Feature,
    pub cmd: Cmd,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<ExtendedPayload>,
}

/// What invoking a result does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
// CommandContext is the common case; boxing it would only add indirection
#[allow(clippy::large_enum_variant)]
pub enum Action {
    Command(CommandContext),
    App(AppEntry),
}

/// A single actionable result produced by one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    /// Command label or the application keyword that matched
    pub name: String,

    pub value: ResultSource,

    pub icon: String,

    pub desc: String,

    /// Plugin type for commands, `app` for applications
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_span: Option<MatchSpan>,

    #[serde(default)]
    pub rank_hint: i32,

    #[serde(default)]
    pub is_best_match: bool,

    pub identity: IdentityKey,

    pub action: Action,
}

impl ResultItem {
    #[must_use]
    pub fn is_app(&self) -> bool {
        self.value == ResultSource::App
    }

    #[must_use]
    pub fn is_command(&self) -> bool {
        self.value == ResultSource::Plugin
    }
}

// ============================================================================
// Controller protocol
// ============================================================================

/// Events sent from the UI host to the query controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryEvent {
    /// Search box text changed (debounced)
    QueryChanged { query: String },

    /// A plugin view took over or released the window
    PluginActive { active: bool },

    /// A clipboard file is attached to the search box
    ClipboardActive { active: bool },

    /// Global shortcut: run the best literal match for `query` at once
    Hotkey { query: String },
}

/// Updates sent from the query controller to the UI host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryUpdate {
    /// Full replacement of the displayed results
    Results { results: Vec<ResultItem> },

    /// A result was handed to the dispatcher
    Invoked { item: ResultItem },
}
