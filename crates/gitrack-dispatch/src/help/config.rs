//! Help rendering configuration.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::node::DispatchNode;

/// Configuration for help rendering.
#[derive(Debug, Clone)]
pub struct HelpConfig {
    /// Explicit display order for commands, keyed by command path without
    /// the root (e.g. `"config set"`). Listed commands come first in the
    /// given order; the rest follow alphabetically.
    pub command_order: HashMap<String, usize>,
    /// Whether pages end with the `help <command>` pointer.
    pub show_footer: bool,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            command_order: HashMap::new(),
            show_footer: true,
        }
    }
}

impl HelpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit command order from a list of command paths.
    ///
    /// ```rust
    /// use gitrack_dispatch::HelpConfig;
    ///
    /// let config = HelpConfig::new().order(["track", "untrack", "config set"]);
    /// assert_eq!(config.command_order["untrack"], 1);
    /// ```
    pub fn order<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command_order = paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| (path.into(), index))
            .collect();
        self
    }

    pub fn show_footer(mut self, show: bool) -> Self {
        self.show_footer = show;
        self
    }

    pub(crate) fn rank(&self, command_path: &str) -> usize {
        self.command_order
            .get(command_path)
            .copied()
            .unwrap_or(usize::MAX)
    }
}

/// A help configuration that refers to commands missing from the tree.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("command order lists unknown commands: {}", .0.join(", "))]
pub struct UnknownOrderedCommands(pub Vec<String>);

/// Checks that every command named in `config.command_order` exists in the
/// tree under `root`.
///
/// Call this from a `#[test]` to catch stale ordering entries in CI.
///
/// ```rust
/// use gitrack_dispatch::{validate_command_order, CommandSpec, DispatchNode, HelpConfig};
///
/// let mut root = DispatchNode::root("gitrack", "", "", vec![]);
/// root.add_command(CommandSpec::new("track", "").action(|_, _| Ok(())));
///
/// assert!(validate_command_order(&root, &HelpConfig::new().order(["track"])).is_ok());
/// assert!(validate_command_order(&root, &HelpConfig::new().order(["trak"])).is_err());
/// ```
pub fn validate_command_order(
    root: &DispatchNode,
    config: &HelpConfig,
) -> Result<(), UnknownOrderedCommands> {
    let mut known = HashSet::new();
    root.walk(&mut |node| {
        known.insert(node.command_path().join(" "));
    });

    let mut unknown: Vec<String> = config
        .command_order
        .keys()
        .filter(|path| !known.contains(path.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        unknown.sort();
        Err(UnknownOrderedCommands(unknown))
    }
}
