use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::quote::quote_value;

/// RouterOS menu verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Set,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Set => "set",
        }
    }
}

/// A single `key=value` command argument, or a bare keyword such as `fib`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arg {
    pub key: String,
    pub value: Option<String>,
}

/// One RouterOS command carrying its full menu path.
///
/// Arguments keep insertion order so that rendering is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Menu path, for example `/interface bridge port`.
    pub path: String,
    pub action: Action,
    /// Optional item selector for `set`, rendered verbatim (`telnet`, `[find default=yes]`).
    pub target: Option<String>,
    pub args: Vec<Arg>,
}

impl Command {
    /// Create an `add` command under `path`.
    pub fn add(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            action: Action::Add,
            target: None,
            args: Vec::new(),
        }
    }

    /// Create a `set` command under `path` with no item selector.
    pub fn set(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            action: Action::Set,
            target: None,
            args: Vec::new(),
        }
    }

    /// Select the item a `set` applies to.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Append a `key=value` argument.
    pub fn arg(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.args.push(Arg {
            key: key.into(),
            value: Some(value.to_string()),
        });
        self
    }

    /// Append a bare keyword with no value.
    pub fn keyword(mut self, key: impl Into<String>) -> Self {
        self.args.push(Arg {
            key: key.into(),
            value: None,
        });
        self
    }

    /// Append an argument only when a value is present.
    pub fn arg_opt<V: Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.arg(key, value),
            None => self,
        }
    }

    /// Append a RouterOS boolean (`yes`/`no`).
    pub fn flag(self, key: impl Into<String>, enabled: bool) -> Self {
        self.arg(key, if enabled { "yes" } else { "no" })
    }

    /// Append a comma-joined list argument.
    pub fn list<I, V>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.arg(key, joined)
    }

    /// Return the raw (unquoted) value of the first argument named `key`.
    ///
    /// Bare keywords have no value and return `None`; use [`Command::contains`].
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|arg| arg.key == key)
            .and_then(|arg| arg.value.as_deref())
    }

    /// True when an argument or keyword named `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.args.iter().any(|arg| arg.key == key)
    }

    /// True when an argument `key` exists with exactly `value`.
    pub fn has(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.action.as_str())?;
        if let Some(target) = &self.target {
            write!(f, " {target}")?;
        }
        for arg in &self.args {
            match &arg.value {
                Some(value) => write!(f, " {}={}", arg.key, quote_value(value))?,
                None => write!(f, " {}", arg.key)?,
            }
        }
        Ok(())
    }
}

/// One line of script output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Line {
    Comment { text: String },
    Command { command: Command },
}

impl Line {
    pub fn comment(text: impl Into<String>) -> Self {
        Line::Comment { text: text.into() }
    }

    pub fn as_command(&self) -> Option<&Command> {
        match self {
            Line::Command { command } => Some(command),
            Line::Comment { .. } => None,
        }
    }
}

impl From<Command> for Line {
    fn from(command: Command) -> Self {
        Line::Command { command }
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Line::Comment { text } => write!(f, "# {text}"),
            Line::Command { command } => write!(f, "{command}"),
        }
    }
}
