use std::ffi::{CStr, CString, NulError, OsStr};
use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, IntoRawFd};

use nix::errno::Errno;
use nix::unistd;
use thiserror::Error;

use crate::job::{self, WaitStatusExt};
use crate::types::*;

/// Permission bits for files created by `>` and `2>`, before umask.
pub const CREATE_MODE: u32 = 0o644;
/// Child status when a redirection target cannot be opened.
pub const EXIT_REDIRECT_FAILED: u8 = 1;
/// Child status when the program image cannot be replaced.
pub const EXIT_COMMAND_NOT_FOUND: u8 = 127;

pub const COMMAND_NOT_FOUND: &str = "Command not found.";

#[derive(Debug, Error)]
pub enum ExecError {
	#[error("Fork failed: {0}")]
	Fork(#[source] nix::Error),
	#[error("Wait failed: {0}")]
	Wait(#[source] nix::Error),
	#[error("Nul char error: {0}")]
	Nul(#[from] NulError),
	#[error("Empty pipeline.")]
	EmptyPipeline,
	#[error("Pipelines of {0} commands are not supported.")]
	UnsupportedPipeline(usize),
}

// Runs between fork and exec: raw writes only, no stderr lock.
fn report(parts: &[&[u8]]) {
	for part in parts {
		let _ = unistd::write(io::stderr(), part);
	}
}

fn redirect(typ: RedirectType, target: &CStr) -> io::Result<()> {
	let mut oopt = fs::OpenOptions::new();
	let _ = match typ {
		RedirectType::Input => oopt.read(true),
		RedirectType::Output | RedirectType::Error => oopt.write(true).create(true).truncate(true).mode(CREATE_MODE),
	};
	let file = oopt.open(OsStr::from_bytes(target.to_bytes()))?;
	if file.as_raw_fd() == typ.fd() {
		// Already in place, e.g. the parent was started with that stream closed.
		let _ = file.into_raw_fd();
		return Ok(());
	}
	match typ {
		RedirectType::Input => unistd::dup2_stdin(&file)?,
		RedirectType::Output => unistd::dup2_stdout(&file)?,
		RedirectType::Error => unistd::dup2_stderr(&file)?,
	}
	Ok(())
}

/// A command converted for the exec boundary: everything the child needs, with no
/// allocation left to do after the fork.
struct Launch {
	program: CString,
	argv: Vec<CString>,
	targets: Vec<(RedirectType, CString)>,
}

impl Launch {
	fn prepare(command: &Command) -> Result<Launch, NulError> {
		let program = CString::new(command.name())?;
		let argv = command.arguments().iter()
			.map(|s| CString::new(s.as_bytes()))
			.collect::<Result<Vec<_>, _>>()?;
		let mut targets = vec![];
		for &typ in &[RedirectType::Input, RedirectType::Output, RedirectType::Error] {
			if let Some(target) = command.target(typ) {
				targets.push((typ, CString::new(target)?));
			}
		}
		Ok(Launch { program: program, argv: argv, targets: targets })
	}

	fn exec(&self) -> u8 {
		for &(typ, ref target) in &self.targets {
			if let Err(e) = redirect(typ, target) {
				let errno = e.raw_os_error().map_or(Errno::UnknownErrno, Errno::from_raw);
				report(&[target.to_bytes(), b": ", errno.desc().as_bytes(), b"\n"]);
				return EXIT_REDIRECT_FAILED;
			}
		}
		let _ = unistd::execvp(&self.program, &self.argv);
		report(&[COMMAND_NOT_FOUND.as_bytes(), b"\n"]);
		EXIT_COMMAND_NOT_FOUND
	}
}

/// Runs one command in a child process and waits for it.
///
/// Redirections are applied inside the child only, so the caller's own standard
/// streams are never touched. Failures that happen in the child (an unopenable
/// target, an unknown program) surface only as its exit status.
pub fn run(command: &Command) -> Result<u8, ExecError> {
	let launch = Launch::prepare(command)?;
	let mut job = job::spawn(|| launch.exec()).map_err(ExecError::Fork)?;
	let status = job.wait().map_err(ExecError::Wait)?;
	Ok(status.code())
}

pub fn eval(pipeline: &Pipeline) -> Result<u8, ExecError> {
	if pipeline.is_empty() {
		return Err(ExecError::EmptyPipeline);
	}
	match pipeline.commands.as_slice() {
		[command] => run(command),
		commands => Err(ExecError::UnsupportedPipeline(commands.len())),
	}
}
