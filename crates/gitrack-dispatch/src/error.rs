//! Error types for dispatch and registration.

use thiserror::Error;

/// Broad classification of a [`DispatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A flag the resolved command does not accept.
    InvalidFlag,
    /// Fewer positional arguments than the command requires.
    MissingArgument,
    /// A `help` target that is neither a command nor a topic.
    UnknownCommand,
    /// A help template failed to render.
    Render,
}

/// Errors returned by dispatch.
///
/// Invocation-shape errors map to exit code 2; references to things that do
/// not exist map to exit code 1.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Carries the offending token verbatim, value included.
    #[error("unknown flag: {flag}")]
    InvalidFlag {
        flag: String,
        /// Usage line of the resolved command.
        usage: String,
    },

    #[error("missing required argument <{name}>")]
    MissingArgument {
        name: String,
        /// Usage line of the resolved command.
        usage: String,
    },

    /// `path` is the space-joined help target.
    #[error("unknown command or help topic: '{path}'")]
    UnknownCommand { path: String },

    #[error("failed to render help: {0}")]
    Render(#[from] minijinja::Error),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::InvalidFlag { .. } => ErrorKind::InvalidFlag,
            DispatchError::MissingArgument { .. } => ErrorKind::MissingArgument,
            DispatchError::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            DispatchError::Render(_) => ErrorKind::Render,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidFlag | ErrorKind::MissingArgument => 2,
            ErrorKind::UnknownCommand | ErrorKind::Render => 1,
        }
    }

    /// Usage line to print under the error, if the error is about a command's
    /// invocation.
    pub fn usage(&self) -> Option<&str> {
        match self {
            DispatchError::InvalidFlag { usage, .. }
            | DispatchError::MissingArgument { usage, .. } => Some(usage),
            _ => None,
        }
    }
}

/// Errors raised while registering help topics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopicError {
    #[error("duplicate help topic: {0}")]
    Duplicate(String),

    /// Topic names must not shadow the topics listing keyword.
    #[error("help topic name is reserved: {0}")]
    Reserved(String),
}
