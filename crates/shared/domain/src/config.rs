use serde::Deserialize;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the core library and the shell.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PorticoConfigInner {
    pub portal: PortalConfig,
    pub logging: LoggingConfig,
    /// Default page category per site type and tool id: `categories.<site_type>.<tool_id>`.
    pub categories: HashMap<String, HashMap<String, String>>,
    /// Registered tools known to the tool registry.
    pub tools: Vec<ToolEntry>,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct PorticoConfig {
    #[serde(flatten, default)]
    inner: Arc<PorticoConfigInner>,
}

impl Deref for PorticoConfig {
    type Target = PorticoConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PorticoConfig {
    fn deref_mut(&mut self) -> &mut PorticoConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Portal location used to build absolute page URLs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub url: String,
}

/// Logging knobs consumed by the logger crate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Module directives, e.g. `portico=debug`.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when absent.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// A registered tool: id plus its human-readable title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolEntry {
    pub id: String,
    pub title: String,
}

// --- Default ---

impl Default for PortalConfig {
    fn default() -> Self {
        Self { url: "http://localhost:8080/portal".to_owned() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, path: None, json: false, max_files: 10 }
    }
}
