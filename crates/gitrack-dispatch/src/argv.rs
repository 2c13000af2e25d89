//! Splitting a raw argument vector into command tokens and flags.

use std::collections::HashSet;

use crate::flags::ParsedFlags;
use crate::node::DispatchNode;

/// Splits `argv` (program name already removed) into positional tokens and
/// flags.
///
/// - Tokens starting with `-` are flags; a lone `-` is positional.
/// - A flag with a value hint on the root or on the command being invoked
///   takes the next token as its value when that token does not start with
///   `-`. The pair is joined into `--name=value` so it validates as a single
///   flag. Value hints on other commands have no effect.
/// - `--` ends flag parsing; everything after it is positional.
///
/// ```rust
/// use gitrack_dispatch::{split_args, CommandSpec, DispatchNode, FlagDescriptor};
///
/// let mut root = DispatchNode::root("gitrack", "", "", vec![]);
/// root.add_command(
///     CommandSpec::new("logs", "")
///         .flag(FlagDescriptor::new(["--since"], "").value_hint("<date>"))
///         .flag(FlagDescriptor::new(["--oneline"], "")),
/// );
///
/// let (tokens, flags) = split_args(&root, ["logs", "--since", "2024-01-01", "--oneline", "repo"]);
/// assert_eq!(tokens, ["logs", "repo"]);
/// assert_eq!(flags.raw(), ["--since=2024-01-01", "--oneline"]);
/// ```
pub fn split_args<I, S>(root: &DispatchNode, argv: I) -> (Vec<String>, ParsedFlags)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
    let node = invoked_node(root, &argv);
    let takes_value = value_flags(&[root, node]);

    let mut tokens = Vec::new();
    let mut flags = Vec::new();
    let mut argv = argv.into_iter().peekable();

    while let Some(arg) = argv.next() {
        if arg == "--" {
            tokens.extend(argv.by_ref());
            break;
        }
        if !is_flag(&arg) {
            tokens.push(arg);
            continue;
        }
        if !arg.contains('=') && takes_value.contains(arg.as_str()) {
            if let Some(value) = argv.next_if(|next| !next.starts_with('-')) {
                flags.push(format!("{arg}={value}"));
                continue;
            }
        }
        flags.push(arg);
    }

    tracing::trace!(path = ?node.path(), ?tokens, ?flags, "split argument vector");
    (tokens, ParsedFlags::new(flags))
}

/// Finds the command `argv` invokes by walking its command tokens.
///
/// Only root value flags are known at this point, so only they consume the
/// following token.
fn invoked_node<'a>(root: &'a DispatchNode, argv: &[String]) -> &'a DispatchNode {
    let root_values = value_flags(&[root]);

    let mut node = root;
    let mut args = argv.iter().peekable();
    while let Some(arg) = args.next() {
        if arg == "--" {
            break;
        }
        if is_flag(arg) {
            if !arg.contains('=') && root_values.contains(arg.as_str()) {
                args.next_if(|next| !next.starts_with('-'));
            }
            continue;
        }
        match node.child(arg) {
            Some(child) => node = child,
            None => break,
        }
    }
    node
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && arg != "-"
}

/// Names of every flag declared on `nodes` that expects a value.
fn value_flags<'a>(nodes: &[&'a DispatchNode]) -> HashSet<&'a str> {
    nodes
        .iter()
        .flat_map(|&node| node.flags())
        .filter(|flag| flag.takes_value())
        .flat_map(|flag| flag.names.iter().map(String::as_str))
        .collect()
}
