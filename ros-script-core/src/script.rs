use serde::Serialize;

use crate::command::{Command, Line};

/// A named group of consecutive script lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub lines: Vec<Line>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// Append a command line.
    pub fn push(&mut self, command: Command) {
        self.lines.push(Line::from(command));
    }

    /// Append a comment line.
    pub fn comment(&mut self, text: impl Into<String>) {
        self.lines.push(Line::comment(text));
    }

    pub fn extend<I: IntoIterator<Item = Command>>(&mut self, commands: I) {
        self.lines.extend(commands.into_iter().map(Line::from));
    }

    /// Iterate over the command lines, skipping comments.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.lines.iter().filter_map(Line::as_command)
    }
}

/// An ordered RouterOS script: header comments followed by sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script {
    /// Comment lines written before the first section.
    pub header: Vec<String>,
    pub sections: Vec<Section>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Iterate over every command in script order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.sections.iter().flat_map(Section::commands)
    }

    /// Return all commands under the exact menu `path`, in script order.
    pub fn commands_at(&self, path: &str) -> Vec<&Command> {
        self.commands().filter(|c| c.path == path).collect()
    }

    /// Position of the first command matching `pred`, counted over commands only.
    pub fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: Fn(&Command) -> bool,
    {
        self.commands().position(pred)
    }
}
