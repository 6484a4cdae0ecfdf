use std::io;
use io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use ish::builtin::{self, Builtin};
use ish::{eval, parser};

const PROMPT: &str = "$ ";

fn main() {
	let mut stderr = io::stderr();
	let mut editor = match DefaultEditor::new() {
		Ok(editor) => editor,
		Err(e) => {
			let _ = writeln!(stderr, "{}", e);
			std::process::exit(1);
		},
	};
	loop {
		let line = match editor.readline(PROMPT) {
			Ok(line) => line,
			Err(ReadlineError::Interrupted) => { continue; },
			Err(ReadlineError::Eof) => { break; },
			Err(e) => {
				let _ = writeln!(stderr, "{}", e);
				break;
			},
		};
		if !line.trim().is_empty() {
			let _ = editor.add_history_entry(line.as_str());
		}
		if let Some(Builtin::Exit) = builtin::match_builtin(&line) {
			break;
		}
		let pipeline = match parser::parse_line(&line) {
			Ok(Some(pipeline)) => pipeline,
			Ok(None) => { continue; },
			Err(e) => {
				let _ = writeln!(stderr, "{}", e);
				continue;
			},
		};
		if let Err(e) = eval::eval(&pipeline) {
			let _ = writeln!(stderr, "{}", e);
		}
	}
}
