#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RedirectType { Input, Output, Error }

impl RedirectType {
	pub fn from_operator(token: &str) -> Option<RedirectType> {
		match token {
			"<" => Some(RedirectType::Input),
			">" => Some(RedirectType::Output),
			"2>" => Some(RedirectType::Error),
			_ => None,
		}
	}

	/// Standard stream the target replaces in the child.
	pub fn fd(self) -> i32 {
		match self {
			RedirectType::Input => 0,
			RedirectType::Output => 1,
			RedirectType::Error => 2,
		}
	}
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Command {
	arguments: Vec<String>,
	input: Option<String>,
	output: Option<String>,
	error: Option<String>,
}

impl Command {
	/// Returns `None` for an empty argument list; a `Command` always names a program.
	pub fn new(arguments: Vec<String>) -> Option<Command> {
		if arguments.is_empty() {
			return None;
		}
		Some(Command { arguments: arguments, input: None, output: None, error: None })
	}

	pub fn arguments(&self) -> &[String] {
		&self.arguments
	}

	pub fn name(&self) -> &str {
		&self.arguments[0]
	}

	pub fn target(&self, typ: RedirectType) -> Option<&str> {
		match typ {
			RedirectType::Input => self.input.as_deref(),
			RedirectType::Output => self.output.as_deref(),
			RedirectType::Error => self.error.as_deref(),
		}
	}

	pub fn set_target(&mut self, typ: RedirectType, path: String) {
		let slot = match typ {
			RedirectType::Input => &mut self.input,
			RedirectType::Output => &mut self.output,
			RedirectType::Error => &mut self.error,
		};
		*slot = Some(path);
	}
}

/// Commands in execution order. The parser only ever produces a single command.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Pipeline {
	pub commands: Vec<Command>,
}

impl Pipeline {
	pub fn single(command: Command) -> Pipeline {
		Pipeline { commands: vec![command] }
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}
}
