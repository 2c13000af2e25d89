//! Flag and argument validation for a resolved command.
//!
//! The tree is the single source of truth: a flag is valid on a command if
//! the root or the command itself declares it, and a command's required
//! arguments are whatever it declares as required.

use std::collections::HashSet;

use crate::error::DispatchError;
use crate::flags::{bare_name, ParsedFlags};
use crate::help::data::usage_line;
use crate::node::DispatchNode;

/// Checks every flag token against the flags valid on `node`.
///
/// The valid set is the root's flags plus `node`'s own flags. Tokens are
/// compared by bare name, so `--since=2024-01-01` matches `--since`.
pub fn validate_flags(
    root: &DispatchNode,
    node: &DispatchNode,
    flags: &ParsedFlags,
) -> Result<(), DispatchError> {
    let valid: HashSet<&str> = root
        .flags()
        .iter()
        .chain(node.flags())
        .flat_map(|flag| flag.names.iter().map(String::as_str))
        .collect();

    match flags
        .raw()
        .iter()
        .find(|token| !valid.contains(bare_name(token)))
    {
        Some(token) => Err(DispatchError::InvalidFlag {
            flag: token.clone(),
            usage: usage_line(node),
        }),
        None => Ok(()),
    }
}

/// Checks that `args` satisfies `node`'s required positional arguments.
///
/// With `n` required arguments and `m < n` supplied, the error names the
/// argument declared at index `m`. Extra arguments are passed through.
pub fn validate_args(node: &DispatchNode, args: &[String]) -> Result<(), DispatchError> {
    let required = node.args().iter().filter(|spec| spec.required).count();
    if args.len() >= required {
        return Ok(());
    }

    let name = node
        .args()
        .get(args.len())
        .map(|spec| spec.name.clone())
        .unwrap_or_default();
    Err(DispatchError::MissingArgument {
        name,
        usage: usage_line(node),
    })
}
