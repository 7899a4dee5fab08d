//! Suspension marker registry
//!
//! The pluggable boundary between the inference core and language-specific
//! primitive names. An entry records a primitive's name, arity, and whether
//! a matching call is a direct suspension point.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered primitive operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub name: String,
    pub arity: usize,
    /// Whether a call matching this entry is a direct suspension point
    pub suspends: bool,
}

/// Registry of recognized primitive operations plus the launcher name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerRegistry {
    entries: HashMap<String, Vec<MarkerEntry>>,
    /// Name of the fire-and-forget launcher
    launcher: String,
}

impl MarkerRegistry {
    /// An empty registry with the default launcher name
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            launcher: "detach".into(),
        }
    }

    /// Register a primitive
    pub fn register(&mut self, name: impl Into<String>, arity: usize, suspends: bool) {
        let name = name.into();
        self.entries
            .entry(name.clone())
            .or_default()
            .push(MarkerEntry {
                name,
                arity,
                suspends,
            });
    }

    /// Builder-style registration
    pub fn with(mut self, name: impl Into<String>, arity: usize, suspends: bool) -> Self {
        self.register(name, arity, suspends);
        self
    }

    /// Override the launcher name
    pub fn with_launcher(mut self, name: impl Into<String>) -> Self {
        self.launcher = name.into();
        self
    }

    /// Whether a call with this name and arity is a direct suspension point
    pub fn is_suspension_primitive(&self, name: &str, arity: usize) -> bool {
        self.entries
            .get(name)
            .map(|es| es.iter().any(|e| e.arity == arity && e.suspends))
            .unwrap_or(false)
    }

    /// Whether this name is a registered primitive at any arity
    pub fn is_primitive(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether this name is the fire-and-forget launcher
    pub fn is_launcher(&self, name: &str) -> bool {
        name == self.launcher
    }

    pub fn launcher_name(&self) -> &str {
        &self.launcher
    }
}

impl Default for MarkerRegistry {
    /// The default registry mirrors the primitives of the reference
    /// runtime: `delay` and `run_concurrent` suspend, `print` is a known
    /// non-suspending primitive, and `detach` is the launcher.
    fn default() -> Self {
        Self::empty()
            .with("delay", 1, true)
            .with("run_concurrent", 1, true)
            .with("print", 1, false)
    }
}
