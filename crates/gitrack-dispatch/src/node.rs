//! The declarative command tree.
//!
//! Registration code builds one [`DispatchNode`] tree at startup and never
//! mutates it afterwards. There are three kinds of node:
//!
//! - the **root**, which owns the global flags,
//! - **groups**, which have children but no action and render their own help,
//! - **commands**, which carry an action and are directly executable.
//!
//! Paths are derived during construction, so every non-root node's path is its
//! parent's path plus its own name.
//!
//! ```rust
//! use gitrack_dispatch::{ArgSpec, Category, CommandSpec, DispatchNode, FlagDescriptor};
//!
//! let mut root = DispatchNode::root(
//!     "gitrack",
//!     "Track git activity across repositories",
//!     "gitrack <command> [<args>]",
//!     vec![FlagDescriptor::global(["--help", "-h"], "Show help")],
//! );
//!
//! root.add_command(
//!     CommandSpec::new("track", "Start tracking a repository")
//!         .usage("gitrack track <path>")
//!         .arg(ArgSpec::required("path", "Repository to track"))
//!         .category(Category::Tracking)
//!         .action(|_args, _flags| Ok(())),
//! );
//!
//! let config = root.add_group("config", "Read and write settings", "gitrack config <command>");
//! config.add_command(CommandSpec::new("get", "Print a setting").action(|_args, _flags| Ok(())));
//!
//! let get = root.find(&["config", "get"]).unwrap();
//! assert_eq!(get.path(), ["gitrack", "config", "get"]);
//! assert!(get.is_leaf());
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::flags::ParsedFlags;

/// The action bound to a command.
///
/// Receives the leftover positional arguments and the flag accessor. Errors
/// are surfaced to the user by the caller; dispatch does not interpret them.
pub type CommandFunc = Arc<dyn Fn(&[String], &ParsedFlags) -> anyhow::Result<()> + Send + Sync>;

/// Where a flag is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagScope {
    /// Accepted on every command. Declared on the root.
    Global,
    /// Accepted only on the declaring command.
    #[default]
    Local,
}

/// Declares one flag and its aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDescriptor {
    /// Every accepted spelling, e.g. `["--help", "-h"]`.
    pub names: Vec<String>,
    /// Placeholder for the value in help output, e.g. `<date>`.
    pub value_hint: Option<String>,
    /// One-line description.
    pub description: String,
    /// Where the flag is accepted.
    pub scope: FlagScope,
}

impl FlagDescriptor {
    /// Declares a local flag.
    pub fn new<I, S>(names: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            value_hint: None,
            description: description.into(),
            scope: FlagScope::Local,
        }
    }

    /// Declares a global flag.
    pub fn global<I, S>(names: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scope: FlagScope::Global,
            ..Self::new(names, description)
        }
    }

    /// Sets the value placeholder shown in help.
    pub fn value_hint(mut self, hint: impl Into<String>) -> Self {
        self.value_hint = Some(hint.into());
        self
    }

    /// Returns true if `name` is one of this flag's spellings.
    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns true if the flag expects a value.
    pub fn takes_value(&self) -> bool {
        self.value_hint.is_some()
    }
}

/// Declares one positional argument.
///
/// Required arguments must be declared before optional ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl ArgSpec {
    /// Declares a required argument.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
        }
    }

    /// Declares an optional argument.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }
}

/// Help-output grouping for commands listed on the root page.
///
/// Variants are declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Category {
    /// Getting started.
    Setup,
    /// Adding and removing tracked repositories.
    Tracking,
    /// Reading recorded activity.
    Activity,
    /// Settings and appearance.
    Configuration,
    #[default]
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Setup,
        Category::Tracking,
        Category::Activity,
        Category::Configuration,
        Category::Other,
    ];

    /// Section heading used in help output.
    pub fn title(self) -> &'static str {
        match self {
            Category::Setup => "GETTING STARTED",
            Category::Tracking => "TRACKING",
            Category::Activity => "ACTIVITY",
            Category::Configuration => "CONFIGURATION",
            Category::Other => "OTHER COMMANDS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Everything needed to declare a command under a parent node.
///
/// ```rust
/// use gitrack_dispatch::{ArgSpec, CommandSpec, FlagDescriptor};
///
/// let spec = CommandSpec::new("logs", "Show recorded activity")
///     .usage("gitrack logs [<repo>] [--since <date>]")
///     .flag(FlagDescriptor::new(["--since"], "Only show entries after this date").value_hint("<date>"))
///     .arg(ArgSpec::optional("repo", "Restrict to one repository"))
///     .action(|_args, _flags| Ok(()));
/// ```
#[derive(Default)]
pub struct CommandSpec {
    name: String,
    summary: String,
    description: Option<String>,
    usage: String,
    flags: Vec<FlagDescriptor>,
    args: Vec<ArgSpec>,
    category: Category,
    action: Option<CommandFunc>,
    interactive_action: Option<CommandFunc>,
}

impl CommandSpec {
    /// Starts a command declaration.
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Literal usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Longer description shown on the command's own help page.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn flag(mut self, flag: FlagDescriptor) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn flags(mut self, flags: impl IntoIterator<Item = FlagDescriptor>) -> Self {
        self.flags.extend(flags);
        self
    }

    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Binds the action run when the command is dispatched.
    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String], &ParsedFlags) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(f));
        self
    }

    /// Binds an alternate entry point the caller may choose instead of the
    /// regular action.
    pub fn interactive_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String], &ParsedFlags) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.interactive_action = Some(Arc::new(f));
        self
    }
}

/// A node in the command tree.
pub struct DispatchNode {
    name: String,
    path: Vec<String>,
    summary: String,
    description: Option<String>,
    usage: String,
    category: Category,
    flags: Vec<FlagDescriptor>,
    args: Vec<ArgSpec>,
    children: HashMap<String, DispatchNode>,
    action: Option<CommandFunc>,
    interactive_action: Option<CommandFunc>,
}

impl DispatchNode {
    /// Declares the root of a tree. `flags` are accepted by every command.
    pub fn root(
        name: impl Into<String>,
        summary: impl Into<String>,
        usage: impl Into<String>,
        flags: Vec<FlagDescriptor>,
    ) -> Self {
        let name = name.into();
        Self {
            path: vec![name.clone()],
            name,
            summary: summary.into(),
            description: None,
            usage: usage.into(),
            category: Category::Other,
            flags,
            args: Vec::new(),
            children: HashMap::new(),
            action: None,
            interactive_action: None,
        }
    }

    /// Declares a group under this node and returns it for further nesting.
    ///
    /// A child with the same name is replaced.
    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        summary: impl Into<String>,
        usage: impl Into<String>,
    ) -> &mut DispatchNode {
        self.add_command(CommandSpec::new(name, summary).usage(usage))
    }

    /// Declares a command under this node and returns it for further nesting.
    ///
    /// A child with the same name is replaced.
    pub fn add_command(&mut self, spec: CommandSpec) -> &mut DispatchNode {
        let mut path = self.path.clone();
        path.push(spec.name.clone());

        let node = DispatchNode {
            name: spec.name.clone(),
            path,
            summary: spec.summary,
            description: spec.description,
            usage: spec.usage,
            category: spec.category,
            flags: spec.flags,
            args: spec.args,
            children: HashMap::new(),
            action: spec.action,
            interactive_action: spec.interactive_action,
        };

        match self.children.entry(spec.name) {
            Entry::Occupied(mut slot) => {
                tracing::warn!(
                    parent = %self.path.join(" "),
                    name = %slot.key(),
                    "replacing previously registered command"
                );
                slot.insert(node);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(node),
        }
    }

    /// Sets the longer description shown on this node's help page.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Binds an interactive entry point, typically on a group.
    pub fn set_interactive_action<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&[String], &ParsedFlags) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.interactive_action = Some(Arc::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Segments from the root, root inclusive.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The path without the root segment, as a user would type it.
    pub fn command_path(&self) -> &[String] {
        self.path.get(1..).unwrap_or_default()
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn flags(&self) -> &[FlagDescriptor] {
        &self.flags
    }

    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn action(&self) -> Option<&CommandFunc> {
        self.action.as_ref()
    }

    pub fn interactive_action(&self) -> Option<&CommandFunc> {
        self.interactive_action.as_ref()
    }

    /// Looks up a direct child by exact name.
    pub fn child(&self, name: &str) -> Option<&DispatchNode> {
        self.children.get(name)
    }

    /// Direct children sorted by name.
    pub fn children(&self) -> Vec<&DispatchNode> {
        let mut children: Vec<&DispatchNode> = self.children.values().collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.path.len() == 1
    }

    /// True if this node has an action and is directly executable.
    pub fn is_leaf(&self) -> bool {
        self.action.is_some()
    }

    /// Resolves `segments` exactly, starting below this node.
    ///
    /// Every segment must name a child; an empty slice resolves to `self`.
    pub fn find<S: AsRef<str>>(&self, segments: &[S]) -> Option<&DispatchNode> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    /// Collects every executable command below this node, depth first, in
    /// name order. Groups are skipped but their children are visited.
    pub fn leaf_commands(&self) -> Vec<&DispatchNode> {
        let mut leaves = Vec::new();
        for child in self.children() {
            if child.is_leaf() {
                leaves.push(child);
            }
            leaves.extend(child.leaf_commands());
        }
        leaves
    }

    /// Visits this node and every descendant.
    pub(crate) fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DispatchNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

impl fmt::Debug for DispatchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut children: Vec<&str> = self.children.keys().map(String::as_str).collect();
        children.sort_unstable();
        f.debug_struct("DispatchNode")
            .field("path", &self.path)
            .field("summary", &self.summary)
            .field("category", &self.category)
            .field("flags", &self.flags)
            .field("args", &self.args)
            .field("children", &children)
            .field("action", &self.action.is_some())
            .field("interactive_action", &self.interactive_action.is_some())
            .finish()
    }
}
