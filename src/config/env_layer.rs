//! Layered raw setting values.
//!
//! Raw strings for every known setting are collected into layers before any
//! typed parsing happens. Later layers win, and each value remembers which
//! layer it came from so `hoard config` can explain where a setting was set.

use std::collections::HashMap;

/// Source name for values read from the process environment.
pub const ENVIRONMENT_SOURCE: &str = "environment";

/// Source name for values forced by command-line flags.
pub const COMMAND_LINE_SOURCE: &str = "command line";

/// A named set of raw setting values.
///
/// # Example
///
/// ```
/// use hoard::config::EnvLayer;
///
/// let mut layer = EnvLayer::new("environment");
/// layer.set("TIMEOUT", "30");
///
/// assert_eq!(layer.get("TIMEOUT"), Some("30"));
/// assert_eq!(layer.source, "environment");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvLayer {
    /// Raw values in this layer.
    pub vars: HashMap<String, String>,
    /// Where the values came from.
    pub source: String,
}

impl EnvLayer {
    /// Create an empty layer with the given source name.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            vars: HashMap::new(),
            source: source.into(),
        }
    }

    /// Set a raw value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Check if this layer sets a key.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Check if this layer is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Ordered stack of layers, lowest priority first.
///
/// # Example
///
/// ```
/// use hoard::config::{EnvLayer, EnvLayerStack};
///
/// let mut stack = EnvLayerStack::new();
///
/// let mut env = EnvLayer::new("environment");
/// env.set("OUTPUT_DIR", "/data/archive");
/// env.set("TIMEOUT", "30");
/// stack.push(env);
///
/// let mut flags = EnvLayer::new("command line");
/// flags.set("OUTPUT_DIR", "/tmp/archive");
/// stack.push(flags);
///
/// assert_eq!(stack.get("OUTPUT_DIR"), Some("/tmp/archive"));
/// assert_eq!(stack.get("TIMEOUT"), Some("30"));
/// assert_eq!(stack.source_of("OUTPUT_DIR"), Some("command line"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvLayerStack {
    layers: Vec<EnvLayer>,
}

impl EnvLayerStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self { layers: vec![] }
    }

    /// Push a layer on top; it overrides everything below it.
    pub fn push(&mut self, layer: EnvLayer) {
        if !layer.is_empty() {
            self.layers.push(layer);
        }
    }

    /// The value from the highest priority layer that sets `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers.iter().rev().find_map(|layer| layer.get(key))
    }

    /// The source of the layer that provides `key`.
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.contains(key))
            .map(|layer| layer.source.as_str())
    }

    /// Number of non-empty layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_layers_override_lower() {
        let mut stack = EnvLayerStack::new();

        let mut env = EnvLayer::new(ENVIRONMENT_SOURCE);
        env.set("USE_COLOR", "true");
        stack.push(env);

        let mut flags = EnvLayer::new(COMMAND_LINE_SOURCE);
        flags.set("USE_COLOR", "false");
        stack.push(flags);

        assert_eq!(stack.get("USE_COLOR"), Some("false"));
        assert_eq!(stack.source_of("USE_COLOR"), Some(COMMAND_LINE_SOURCE));
    }

    #[test]
    fn missing_key_returns_none() {
        let stack = EnvLayerStack::new();
        assert_eq!(stack.get("MISSING"), None);
        assert_eq!(stack.source_of("MISSING"), None);
    }

    #[test]
    fn empty_value_is_still_present() {
        let mut stack = EnvLayerStack::new();
        let mut env = EnvLayer::new(ENVIRONMENT_SOURCE);
        env.set("CHROME_USER_DATA_DIR", "");
        stack.push(env);

        assert_eq!(stack.get("CHROME_USER_DATA_DIR"), Some(""));
    }

    #[test]
    fn empty_layers_are_not_pushed() {
        let mut stack = EnvLayerStack::new();
        stack.push(EnvLayer::new(COMMAND_LINE_SOURCE));
        assert_eq!(stack.layer_count(), 0);
    }

    #[test]
    fn lower_layer_visible_when_not_overridden() {
        let mut stack = EnvLayerStack::new();

        let mut env = EnvLayer::new(ENVIRONMENT_SOURCE);
        env.set("TIMEOUT", "90");
        stack.push(env);

        let mut flags = EnvLayer::new(COMMAND_LINE_SOURCE);
        flags.set("OUTPUT_DIR", "/tmp/x");
        stack.push(flags);

        assert_eq!(stack.get("TIMEOUT"), Some("90"));
        assert_eq!(stack.source_of("TIMEOUT"), Some(ENVIRONMENT_SOURCE));
    }
}
