#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Builtin { Exit }

/// Built-ins are matched on the whole line, before parsing.
pub fn match_builtin(line: &str) -> Option<Builtin> {
	match line.trim() {
		"exit" => Some(Builtin::Exit),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exit() {
		assert_eq!(match_builtin("exit"), Some(Builtin::Exit));
		assert_eq!(match_builtin("  exit\t"), Some(Builtin::Exit));
		assert_eq!(match_builtin("exit 1"), None);
		assert_eq!(match_builtin("echo exit"), None);
		assert_eq!(match_builtin(""), None);
	}
}
