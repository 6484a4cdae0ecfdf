use thiserror::Error;

use crate::types::*;

/// Upper bound on plain arguments per line.
pub const MAX_ARGUMENTS: usize = 99;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ParseError {
	#[error("Input file not specified.")]
	MissingInputFilename,
	#[error("Output file not specified.")]
	MissingOutputFilename,
	#[error("Error output file not specified.")]
	MissingErrorFilename,
	#[error("Too many arguments.")]
	TooManyArguments,
}

impl ParseError {
	fn missing(typ: RedirectType) -> ParseError {
		match typ {
			RedirectType::Input => ParseError::MissingInputFilename,
			RedirectType::Output => ParseError::MissingOutputFilename,
			RedirectType::Error => ParseError::MissingErrorFilename,
		}
	}
}

pub type ParseResult<T> = Result<T, ParseError>;

struct Parser<'a> {
	line: &'a str,
	i: usize,
}

impl<'a> Parser<'a> {
	fn proceed_while<F>(&mut self, f: F) where F: Fn(u8) -> bool {
		while let Some(c) = self.line.as_bytes().get(self.i) {
			if !f(*c) { break; }
			self.i += 1;
		}
	}

	fn is_whitespace(c: u8) -> bool {
		match c {
			b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c => true,
			_ => false,
		}
	}

	fn skip_whitespaces(&mut self) {
		self.proceed_while(Parser::is_whitespace);
	}

	// Whitespace is ASCII, so word boundaries always fall on char boundaries.
	fn read_word(&mut self) -> Option<&'a str> {
		self.skip_whitespaces();
		let orig = self.i;
		self.proceed_while(|c| !Parser::is_whitespace(c));
		if orig == self.i {
			None
		} else {
			Some(&self.line[orig .. self.i])
		}
	}

	fn parse_redirect_target(&mut self, typ: RedirectType) -> ParseResult<&'a str> {
		match self.read_word() {
			Some(word) if RedirectType::from_operator(word).is_none() => Ok(word),
			_ => Err(ParseError::missing(typ)),
		}
	}

	fn parse_command(&mut self) -> ParseResult<Option<Command>> {
		let mut arguments: Vec<String> = vec![];
		let mut targets: Vec<(RedirectType, &'a str)> = vec![];

		while let Some(word) = self.read_word() {
			match RedirectType::from_operator(word) {
				Some(typ) => {
					let target = self.parse_redirect_target(typ)?;
					targets.push((typ, target));
				},
				None => {
					if arguments.len() == MAX_ARGUMENTS {
						return Err(ParseError::TooManyArguments);
					}
					arguments.push(word.to_string());
				},
			}
		}

		let mut command = match Command::new(arguments) {
			Some(command) => command,
			None => { return Ok(None); },
		};
		for (typ, target) in targets {
			command.set_target(typ, target.to_string());
		}
		Ok(Some(command))
	}
}

/// Parses one newline-stripped line.
///
/// `Ok(None)` means there is nothing to run: the line was empty, blank, or held only
/// redirection clauses.
pub fn parse_line(line: &str) -> ParseResult<Option<Pipeline>> {
	if line.is_empty() {
		return Ok(None);
	}
	let mut parser = Parser { line: line, i: 0 };
	Ok(parser.parse_command()?.map(Pipeline::single))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn single(line: &str) -> Command {
		let pipeline = parse_line(line).unwrap().unwrap();
		assert_eq!(pipeline.len(), 1);
		pipeline.commands.into_iter().next().unwrap()
	}

	#[test]
	fn empty_and_blank() {
		assert_eq!(parse_line(""), Ok(None));
		assert_eq!(parse_line(" "), Ok(None));
		assert_eq!(parse_line(" \t  \t"), Ok(None));
	}

	#[test]
	fn plain_arguments() {
		let command = single("  ls   -l\t/tmp  ");
		assert_eq!(command.arguments(), vec!["ls", "-l", "/tmp"]);
		assert_eq!(command.target(RedirectType::Input), None);
		assert_eq!(command.target(RedirectType::Output), None);
		assert_eq!(command.target(RedirectType::Error), None);
	}

	#[test]
	fn echo_hello() {
		let command = single("echo hello");
		assert_eq!(command.arguments(), vec!["echo", "hello"]);
		assert_eq!(command.target(RedirectType::Output), None);
	}

	#[test]
	fn sort_with_redirects() {
		let command = single("sort < in.txt > out.txt");
		assert_eq!(command.arguments(), vec!["sort"]);
		assert_eq!(command.target(RedirectType::Input), Some("in.txt"));
		assert_eq!(command.target(RedirectType::Output), Some("out.txt"));
		assert_eq!(command.target(RedirectType::Error), None);
	}

	#[test]
	fn redirects_anywhere() {
		let command = single("2> err.log grep > out -n < in pattern");
		assert_eq!(command.arguments(), vec!["grep", "-n", "pattern"]);
		assert_eq!(command.target(RedirectType::Input), Some("in"));
		assert_eq!(command.target(RedirectType::Output), Some("out"));
		assert_eq!(command.target(RedirectType::Error), Some("err.log"));
	}

	#[test]
	fn last_redirect_wins() {
		let command = single("cat > a > b < x < y 2> e 2> f");
		assert_eq!(command.target(RedirectType::Output), Some("b"));
		assert_eq!(command.target(RedirectType::Input), Some("y"));
		assert_eq!(command.target(RedirectType::Error), Some("f"));
	}

	#[test]
	fn only_redirects() {
		assert_eq!(parse_line("> out"), Ok(None));
		assert_eq!(parse_line("< in > out 2> err"), Ok(None));
	}

	#[test]
	fn trailing_operator() {
		assert_eq!(parse_line("<"), Err(ParseError::MissingInputFilename));
		assert_eq!(parse_line("cat <"), Err(ParseError::MissingInputFilename));
		assert_eq!(parse_line("ls >"), Err(ParseError::MissingOutputFilename));
		assert_eq!(parse_line("ls 2>  "), Err(ParseError::MissingErrorFilename));
	}

	#[test]
	fn operator_as_operand() {
		assert_eq!(parse_line("cat < > out"), Err(ParseError::MissingInputFilename));
		assert_eq!(parse_line("ls > 2> err"), Err(ParseError::MissingOutputFilename));
		assert_eq!(parse_line("ls 2> < in"), Err(ParseError::MissingErrorFilename));
	}

	#[test]
	fn glued_operators_are_arguments() {
		let command = single("echo a>b >> 2>x");
		assert_eq!(command.arguments(), vec!["echo", "a>b", ">>", "2>x"]);
		assert_eq!(command.target(RedirectType::Output), None);
	}

	#[test]
	fn non_ascii_words() {
		let command = single("echo héllo 世界");
		assert_eq!(command.arguments(), vec!["echo", "héllo", "世界"]);
	}

	#[test]
	fn argument_bound() {
		let ok = vec!["x"; MAX_ARGUMENTS].join(" ");
		assert_eq!(single(&ok).arguments().len(), MAX_ARGUMENTS);
		let too_many = vec!["x"; MAX_ARGUMENTS + 1].join(" ");
		assert_eq!(parse_line(&too_many), Err(ParseError::TooManyArguments));
	}

	#[test]
	fn messages() {
		assert_eq!(ParseError::MissingInputFilename.to_string(), "Input file not specified.");
		assert_eq!(ParseError::MissingOutputFilename.to_string(), "Output file not specified.");
		assert_eq!(ParseError::MissingErrorFilename.to_string(), "Error output file not specified.");
	}
}
