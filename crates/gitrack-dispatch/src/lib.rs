//! Command dispatch core for the `gitrack` CLI.
//!
//! `gitrack-dispatch` resolves an invocation against a declared command tree
//! and decides what to do with it: run a command's action, show a help page,
//! or report a usage error. It does no I/O of its own; help comes back as text
//! and actions are plain closures.
//!
//! # Overview
//!
//! - [`DispatchNode`]: the command tree. Built once at startup from a root,
//!   groups, and commands described by [`CommandSpec`].
//! - [`ParsedFlags`]: typed read-only access to the flag tokens of one
//!   invocation.
//! - [`Dispatcher`] / [`dispatch`]: resolution of tokens and flags into a
//!   [`Resolution`].
//! - [`validate_flags`] / [`validate_args`]: the checks resolution runs before
//!   binding an action.
//! - [`suggest_commands`]: "did you mean" candidates for a mistyped name.
//! - [`TopicRegistry`]: free-form help topics reachable through `help <topic>`.
//!
//! Help is always reachable: a `help` token anywhere in the command tokens, or
//! a `--help`/`-h` flag, produces a help page before any validation runs.
//!
//! # Example
//!
//! ```rust
//! use gitrack_dispatch::{
//!     ArgSpec, Category, CommandSpec, DispatchError, Dispatcher, DispatchNode, FlagDescriptor,
//!     Outcome,
//! };
//!
//! let mut root = DispatchNode::root(
//!     "gitrack",
//!     "Track git activity across repositories",
//!     "gitrack <command> [<args>]",
//!     vec![FlagDescriptor::global(["--help", "-h"], "Show help")],
//! );
//! root.add_command(
//!     CommandSpec::new("logs", "Show recent commits")
//!         .category(Category::Activity)
//!         .arg(ArgSpec::optional("repo", "Limit to one repository"))
//!         .flag(FlagDescriptor::new(["--limit", "-n"], "Maximum entries").value_hint("<n>"))
//!         .action(|_args, flags| {
//!             assert_eq!(flags.int("--limit", 20), 5);
//!             Ok(())
//!         }),
//! );
//!
//! let dispatcher = Dispatcher::new(root);
//!
//! let resolution = dispatcher.dispatch_argv(["logs", "--limit", "5"]).unwrap();
//! assert_eq!(resolution.run().unwrap(), Outcome::Completed);
//!
//! let resolution = dispatcher.dispatch_argv(["help", "logs"]).unwrap();
//! assert!(resolution.is_help());
//!
//! let err = dispatcher.dispatch_argv(["logs", "--verbose"]).unwrap_err();
//! assert!(matches!(err, DispatchError::InvalidFlag { .. }));
//! assert_eq!(err.exit_code(), 2);
//! ```

mod argv;
mod dispatch;
mod error;
mod flags;
mod help;
mod node;
mod suggest;
mod topics;
mod validate;

pub use argv::split_args;

pub use dispatch::{
    dispatch, Dispatcher, Execute, HelpPage, HelpSubject, Outcome, Resolution, HELP_FLAGS,
    HELP_KEYWORD,
};

pub use error::{DispatchError, ErrorKind, TopicError};

pub use flags::ParsedFlags;

pub use help::{validate_command_order, HelpConfig, UnknownOrderedCommands};

pub use node::{
    ArgSpec, Category, CommandFunc, CommandSpec, DispatchNode, FlagDescriptor, FlagScope,
};

pub use suggest::{all_command_paths, suggest_commands, MAX_SUGGESTION_DISTANCE};

pub use topics::{Topic, TopicRegistry, TOPICS_KEYWORD};

pub use validate::{validate_args, validate_flags};
