//! Command resolution.
//!
//! Resolution turns command tokens and flags into a [`Resolution`]: the node
//! that matched, its positional arguments, and what to execute. The steps run
//! in a fixed order:
//!
//! 1. A literal `help` token anywhere wins over everything else and renders
//!    help for the named command or topic.
//! 2. Leading tokens are matched against child names until one does not
//!    match; the rest are positional arguments.
//! 3. `--help` or `-h` renders help for the deepest matched node without
//!    validating anything.
//! 4. Flags are validated against the root's and the node's declarations.
//! 5. Required positional arguments are checked.
//! 6. A node without an action renders its own help.
//! 7. Otherwise the node's action is bound for execution.
//!
//! Steps 1 and 3 guarantee that help is reachable from any invocation, even a
//! malformed one.

use std::fmt;

use crate::argv::split_args;
use crate::error::DispatchError;
use crate::flags::ParsedFlags;
use crate::help::{render_help, render_topic, render_topic_list, HelpConfig};
use crate::node::{CommandFunc, DispatchNode};
use crate::suggest::suggest_commands;
use crate::topics::{TopicRegistry, TOPICS_KEYWORD};
use crate::validate::{validate_args, validate_flags};

/// The token that requests help when it appears among the command tokens.
pub const HELP_KEYWORD: &str = "help";

/// Flags that request help for the matched command.
pub const HELP_FLAGS: [&str; 2] = ["--help", "-h"];

/// Exit code for an invocation with no command at all.
const NO_COMMAND_EXIT_CODE: i32 = 1;

/// What a help page documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpSubject {
    /// A command or group, by full path (root inclusive).
    Command(Vec<String>),
    /// The list of help topics.
    Topics,
    /// A single help topic, by name.
    Topic(String),
}

/// A rendered help page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpPage {
    pub subject: HelpSubject,
    pub text: String,
}

/// What to run for a [`Resolution`].
#[derive(Clone)]
pub enum Execute {
    /// Run the command's action with the resolution's args and flags.
    Action(CommandFunc),
    /// Show a help page.
    Help(HelpPage),
}

impl fmt::Debug for Execute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execute::Action(_) => f.write_str("Action(..)"),
            Execute::Help(page) => f.debug_tuple("Help").field(&page.subject).finish(),
        }
    }
}

/// Result of running a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran to completion.
    Completed,
    /// Help text for the caller to print or page.
    Help(String),
}

/// The dispatcher's decision for one invocation.
#[derive(Debug)]
pub struct Resolution<'a> {
    /// The matched node.
    pub node: &'a DispatchNode,
    /// Tokens left after the matched path.
    pub args: Vec<String>,
    pub flags: ParsedFlags,
    pub execute: Execute,
    /// Suggested process exit code once execution finishes. Non-zero only
    /// when the invocation named no command at all.
    pub exit_code: i32,
}

impl Resolution<'_> {
    /// Returns true if this resolution shows help instead of running an action.
    pub fn is_help(&self) -> bool {
        matches!(self.execute, Execute::Help(_))
    }

    /// The help page, if this resolution shows help.
    pub fn help(&self) -> Option<&HelpPage> {
        match &self.execute {
            Execute::Help(page) => Some(page),
            Execute::Action(_) => None,
        }
    }

    /// Runs the action, or hands back the help text.
    ///
    /// Errors returned by the action are passed through untouched.
    pub fn run(&self) -> anyhow::Result<Outcome> {
        match &self.execute {
            Execute::Action(action) => {
                action(&self.args, &self.flags)?;
                Ok(Outcome::Completed)
            }
            Execute::Help(page) => Ok(Outcome::Help(page.text.clone())),
        }
    }

    /// Runs the node's interactive action if it has one, otherwise behaves
    /// like [`run`](Self::run).
    ///
    /// Dispatch never picks the interactive entry point on its own; callers
    /// opt in, typically when stdin is a terminal.
    pub fn run_interactive(&self) -> anyhow::Result<Outcome> {
        match self.node.interactive_action() {
            Some(action) => {
                action(&self.args, &self.flags)?;
                Ok(Outcome::Completed)
            }
            None => self.run(),
        }
    }
}

/// A command tree bundled with its help configuration and topics.
///
/// Built once at startup and reused for every dispatch.
///
/// ```rust
/// use gitrack_dispatch::{ArgSpec, CommandSpec, Dispatcher, DispatchNode, FlagDescriptor, Outcome};
///
/// let mut root = DispatchNode::root(
///     "gitrack",
///     "Track git activity across repositories",
///     "gitrack <command> [<args>]",
///     vec![FlagDescriptor::global(["--help", "-h"], "Show help")],
/// );
/// root.add_command(
///     CommandSpec::new("track", "Start tracking a repository")
///         .arg(ArgSpec::required("path", "Repository to track"))
///         .action(|args, _flags| {
///             assert_eq!(args, ["/src/app"]);
///             Ok(())
///         }),
/// );
///
/// let dispatcher = Dispatcher::new(root);
///
/// let resolution = dispatcher.dispatch_argv(["track", "/src/app"]).unwrap();
/// assert_eq!(resolution.run().unwrap(), Outcome::Completed);
///
/// let err = dispatcher.dispatch_argv(["track"]).unwrap_err();
/// assert_eq!(err.exit_code(), 2);
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    root: DispatchNode,
    config: HelpConfig,
    topics: TopicRegistry,
}

impl Dispatcher {
    pub fn new(root: DispatchNode) -> Self {
        Self {
            root,
            config: HelpConfig::default(),
            topics: TopicRegistry::new(),
        }
    }

    pub fn with_config(mut self, config: HelpConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_topics(mut self, topics: TopicRegistry) -> Self {
        self.topics = topics;
        self
    }

    pub fn root(&self) -> &DispatchNode {
        &self.root
    }

    pub fn config(&self) -> &HelpConfig {
        &self.config
    }

    pub fn topics(&self) -> &TopicRegistry {
        &self.topics
    }

    /// Resolves already-split command tokens and flags.
    pub fn dispatch<I, S>(
        &self,
        tokens: I,
        flags: ParsedFlags,
    ) -> Result<Resolution<'_>, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resolver().resolve(collect(tokens), flags)
    }

    /// Splits a raw argument vector (without the program name) and resolves
    /// it. See [`split_args`].
    pub fn dispatch_argv<I, S>(&self, argv: I) -> Result<Resolution<'_>, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (tokens, flags) = split_args(&self.root, argv);
        self.resolver().resolve(tokens, flags)
    }

    /// Suggests commands for the first token of `tokens` that does not name
    /// a command, among the children of the deepest matched node.
    ///
    /// Returns nothing if every token matches.
    pub fn suggest<S: AsRef<str>>(&self, tokens: &[S], max: usize) -> Vec<String> {
        let mut node = &self.root;
        for token in tokens {
            match node.child(token.as_ref()) {
                Some(child) => node = child,
                None => return suggest_commands(node, token.as_ref(), max),
            }
        }
        Vec::new()
    }

    fn resolver(&self) -> Resolver<'_, '_> {
        Resolver {
            root: &self.root,
            config: &self.config,
            topics: &self.topics,
        }
    }
}

/// Resolves tokens against `root` with default help configuration and no
/// help topics.
pub fn dispatch<I, S>(
    root: &DispatchNode,
    tokens: I,
    flags: ParsedFlags,
) -> Result<Resolution<'_>, DispatchError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = HelpConfig::default();
    let topics = TopicRegistry::new();
    Resolver {
        root,
        config: &config,
        topics: &topics,
    }
    .resolve(collect(tokens), flags)
}

fn collect<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tokens.into_iter().map(Into::into).collect()
}

struct Resolver<'a, 'c> {
    root: &'a DispatchNode,
    config: &'c HelpConfig,
    topics: &'c TopicRegistry,
}

impl<'a> Resolver<'a, '_> {
    fn resolve(
        &self,
        tokens: Vec<String>,
        flags: ParsedFlags,
    ) -> Result<Resolution<'a>, DispatchError> {
        if let Some(index) = tokens.iter().position(|token| token == HELP_KEYWORD) {
            let (before, after) = tokens.split_at(index);
            let after = &after[1..];
            let target = if after.is_empty() { before } else { after };
            tracing::debug!(?target, "help keyword intercepted");
            return self.help_target(target, flags);
        }

        let (node, consumed) = self.traverse(&tokens);
        let args = tokens[consumed..].to_vec();

        if HELP_FLAGS.iter().any(|flag| flags.has(flag)) {
            tracing::debug!(path = ?node.path(), "help flag intercepted");
            return self.help_for(node, args, flags, 0);
        }

        if let Err(err) = validate_flags(self.root, node, &flags)
            .and_then(|()| validate_args(node, &args))
        {
            tracing::debug!(path = ?node.path(), error = %err, "invocation rejected");
            return Err(err);
        }

        match node.action() {
            Some(action) => {
                tracing::debug!(path = ?node.path(), ?args, "dispatching command");
                Ok(Resolution {
                    node,
                    args,
                    flags,
                    execute: Execute::Action(action.clone()),
                    exit_code: 0,
                })
            }
            None => {
                let exit_code = if tokens.is_empty() && node.is_root() {
                    NO_COMMAND_EXIT_CODE
                } else {
                    0
                };
                tracing::debug!(path = ?node.path(), exit_code, "no action, showing help");
                self.help_for(node, args, flags, exit_code)
            }
        }
    }

    /// Walks child names from the root; returns the deepest node reached and
    /// how many tokens it consumed.
    fn traverse(&self, tokens: &[String]) -> (&'a DispatchNode, usize) {
        let mut node = self.root;
        let mut consumed = 0;
        for token in tokens {
            match node.child(token) {
                Some(child) => {
                    node = child;
                    consumed += 1;
                }
                None => break,
            }
        }
        tracing::trace!(path = ?node.path(), consumed, "traversed command tree");
        (node, consumed)
    }

    fn help_target(
        &self,
        target: &[String],
        flags: ParsedFlags,
    ) -> Result<Resolution<'a>, DispatchError> {
        if let [single] = target {
            if single == TOPICS_KEYWORD {
                let text = render_topic_list(self.root, self.config, self.topics)?;
                return Ok(self.help_resolution(
                    self.root,
                    Vec::new(),
                    flags,
                    HelpPage {
                        subject: HelpSubject::Topics,
                        text,
                    },
                    0,
                ));
            }
        }

        if let Some(node) = self.root.find(target) {
            return self.help_for(node, Vec::new(), flags, 0);
        }

        if let [single] = target {
            if let Some(topic) = self.topics.get_topic(single) {
                let text = render_topic(topic)?;
                return Ok(self.help_resolution(
                    self.root,
                    Vec::new(),
                    flags,
                    HelpPage {
                        subject: HelpSubject::Topic(topic.name.clone()),
                        text,
                    },
                    0,
                ));
            }
        }

        Err(DispatchError::UnknownCommand {
            path: target.join(" "),
        })
    }

    fn help_for(
        &self,
        node: &'a DispatchNode,
        args: Vec<String>,
        flags: ParsedFlags,
        exit_code: i32,
    ) -> Result<Resolution<'a>, DispatchError> {
        let text = render_help(node, self.config, self.topics)?;
        let page = HelpPage {
            subject: HelpSubject::Command(node.path().to_vec()),
            text,
        };
        Ok(self.help_resolution(node, args, flags, page, exit_code))
    }

    fn help_resolution(
        &self,
        node: &'a DispatchNode,
        args: Vec<String>,
        flags: ParsedFlags,
        page: HelpPage,
        exit_code: i32,
    ) -> Resolution<'a> {
        Resolution {
            node,
            args,
            flags,
            execute: Execute::Help(page),
            exit_code,
        }
    }
}
