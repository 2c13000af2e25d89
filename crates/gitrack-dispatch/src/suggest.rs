//! "Did you mean" suggestions for mistyped command names.

use strsim::levenshtein;

use crate::node::DispatchNode;

/// Largest edit distance still considered a likely typo.
pub const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Suggests children of `node` whose names are close to `input`.
///
/// Distance is case-insensitive Levenshtein. Exact matches and candidates
/// further than [`MAX_SUGGESTION_DISTANCE`] are dropped; the rest are ordered
/// by distance, then name, and capped at `max`.
///
/// ```rust
/// use gitrack_dispatch::{suggest_commands, CommandSpec, DispatchNode};
///
/// let mut root = DispatchNode::root("gitrack", "", "", vec![]);
/// root.add_command(CommandSpec::new("track", ""));
/// root.add_command(CommandSpec::new("untrack", ""));
/// root.add_command(CommandSpec::new("logs", ""));
///
/// assert_eq!(suggest_commands(&root, "trak", 3), ["track", "untrack"]);
/// ```
pub fn suggest_commands(node: &DispatchNode, input: &str, max: usize) -> Vec<String> {
    let input = input.to_lowercase();

    let mut candidates: Vec<(usize, &str)> = node
        .children()
        .into_iter()
        .map(|child| (levenshtein(&input, &child.name().to_lowercase()), child.name()))
        .filter(|(distance, _)| (1..=MAX_SUGGESTION_DISTANCE).contains(distance))
        .collect();

    candidates.sort();
    candidates
        .into_iter()
        .take(max)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Every command path below `root`, space-joined without the root name,
/// sorted. Useful as a flat index for global suggestions.
pub fn all_command_paths(root: &DispatchNode) -> Vec<String> {
    let mut paths = Vec::new();
    root.walk(&mut |node| {
        if !node.is_root() {
            paths.push(node.command_path().join(" "));
        }
    });
    paths.sort();
    paths
}
