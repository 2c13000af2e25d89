//! Git-style help pages for the command tree.
//!
//! Help is built in two steps: a serializable data model is extracted from
//! the tree, then rendered through embedded text templates.
//!
//! - Root page: usage, then leaf commands grouped by [`Category`](crate::Category),
//!   then the help topics.
//! - Group or command page: usage, description, immediate children, own flags.
//! - [`HelpConfig`]: display order and footer configuration
//! - [`validate_command_order`]: check a [`HelpConfig`] against the tree
//!
//! Rendering is pure: pages are returned as strings and printing or paging
//! them is up to the caller.

mod config;
pub(crate) mod data;
mod render;

pub use config::{validate_command_order, HelpConfig, UnknownOrderedCommands};
pub(crate) use render::{render_help, render_topic, render_topic_list};
