use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RedirectKind {
    Input,  // <
    Output, // >
    Append, // >>
}

impl RedirectKind {
    pub fn operator(self) -> &'static str {
        match self {
            RedirectKind::Input => "<",
            RedirectKind::Output => ">",
            RedirectKind::Append => ">>",
        }
    }
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Redirection {
    pub kind: RedirectKind,
    pub target: String,
}

impl Redirection {
    pub fn new(kind: RedirectKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }
}

impl fmt::Display for Redirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.target)
    }
}

/// A command name with its arguments and redirections, in source order.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SimpleCommand {
    pub name: String,
    pub arguments: Vec<String>,
    pub redirections: Vec<Redirection>,
}

impl SimpleCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            redirections: Vec::new(),
        }
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn with_redirection(mut self, kind: RedirectKind, target: impl Into<String>) -> Self {
        self.redirections.push(Redirection::new(kind, target));
        self
    }

    /// Command name followed by its arguments, the shape `execvp` expects.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.arguments.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for SimpleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for argument in &self.arguments {
            write!(f, " {}", argument)?;
        }
        for redirection in &self.redirections {
            write!(f, " {}", redirection)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CommandKind {
    Simple(SimpleCommand),
    Pipeline(Box<Command>, Box<Command>),
    Sequence(Box<Command>, Box<Command>),
    LogicalAnd(Box<Command>, Box<Command>),
    LogicalOr(Box<Command>, Box<Command>),
}

/// One node of a parsed line.
///
/// The tree is immutable once built. The only exception is the background
/// flag, which the parser sets on the root it returns and nowhere else.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Command {
    kind: CommandKind,
    background: bool,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            background: false,
        }
    }

    pub fn simple(command: SimpleCommand) -> Self {
        Self::new(CommandKind::Simple(command))
    }

    pub fn pipeline(left: Command, right: Command) -> Self {
        Self::new(CommandKind::Pipeline(Box::new(left), Box::new(right)))
    }

    pub fn sequence(left: Command, right: Command) -> Self {
        Self::new(CommandKind::Sequence(Box::new(left), Box::new(right)))
    }

    pub fn logical_and(left: Command, right: Command) -> Self {
        Self::new(CommandKind::LogicalAnd(Box::new(left), Box::new(right)))
    }

    pub fn logical_or(left: Command, right: Command) -> Self {
        Self::new(CommandKind::LogicalOr(Box::new(left), Box::new(right)))
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    /// Whether an executor should return to the prompt without waiting.
    pub fn is_background(&self) -> bool {
        self.background
    }

    pub(in crate::shell::parser) fn set_background(&mut self) {
        self.background = true;
    }

    pub fn as_simple(&self) -> Option<&SimpleCommand> {
        match &self.kind {
            CommandKind::Simple(command) => Some(command),
            _ => None,
        }
    }

    fn operands(&self) -> Option<(&Command, &Command)> {
        match &self.kind {
            CommandKind::Simple(_) => None,
            CommandKind::Pipeline(left, right)
            | CommandKind::Sequence(left, right)
            | CommandKind::LogicalAnd(left, right)
            | CommandKind::LogicalOr(left, right) => Some((left, right)),
        }
    }

    pub fn left(&self) -> Option<&Command> {
        self.operands().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<&Command> {
        self.operands().map(|(_, right)| right)
    }

    /// Short lower-case name of the node variant, used in logs and the prompt output.
    pub fn label(&self) -> &'static str {
        match self.kind {
            CommandKind::Simple(_) => "simple",
            CommandKind::Pipeline(..) => "pipeline",
            CommandKind::Sequence(..) => "sequence",
            CommandKind::LogicalAnd(..) => "and",
            CommandKind::LogicalOr(..) => "or",
        }
    }
}

// Rendering leaves the background marker out; callers that care check
// `is_background` themselves.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CommandKind::Simple(command) => write!(f, "{}", command),
            CommandKind::Pipeline(left, right) => write!(f, "{} | {}", left, right),
            CommandKind::Sequence(left, right) => write!(f, "{}; {}", left, right),
            CommandKind::LogicalAnd(left, right) => write!(f, "{} && {}", left, right),
            CommandKind::LogicalOr(left, right) => write!(f, "{} || {}", left, right),
        }
    }
}
