use std::panic;

use nix::errno::Errno;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};

/// Status of a child whose closure panicked instead of returning.
const EXIT_CHILD_PANICKED: u8 = 101;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum State { Active, Stopped, Terminated }

pub trait WaitStatusExt {
	fn state(self) -> State;
	fn code(self) -> u8;
}

impl WaitStatusExt for WaitStatus {
	fn state(self) -> State {
		match self {
			WaitStatus::Exited(..) | WaitStatus::Signaled(..) => State::Terminated,
			WaitStatus::Stopped(..) => State::Stopped,
			#[cfg(any(target_os = "linux", target_os = "android"))]
			WaitStatus::PtraceEvent(..) | WaitStatus::PtraceSyscall(..) => State::Stopped,
			WaitStatus::Continued(..) | WaitStatus::StillAlive => State::Active,
		}
	}

	/// Shell-style status: the exit code, or 128 plus the signal number.
	fn code(self) -> u8 {
		match self {
			WaitStatus::Exited(_, code) => code as u8,
			WaitStatus::Signaled(_, signal, _) => 128u8.wrapping_add(signal as i32 as u8),
			_ => 0,
		}
	}
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Job {
	pub pid: Pid,
	pub status: WaitStatus,
}

/// Forks and runs `child` in the new process only.
///
/// The closure's return value is the child's exit status; the child leaves through
/// `_exit` without running destructors or flushing buffers inherited from the parent.
/// The parent gets a `Job` for the still-running child.
pub fn spawn<F>(child: F) -> nix::Result<Job> where F: FnOnce() -> u8 {
	match unsafe { unistd::fork() }? {
		ForkResult::Parent { child: pid } => {
			Ok(Job { pid: pid, status: WaitStatus::StillAlive })
		},
		ForkResult::Child => {
			let code = panic::catch_unwind(panic::AssertUnwindSafe(child))
				.unwrap_or(EXIT_CHILD_PANICKED);
			unsafe { libc::_exit(code as libc::c_int) }
		},
	}
}

impl Job {
	/// Blocks until this job's process has terminated.
	pub fn wait(&mut self) -> nix::Result<WaitStatus> {
		while self.status.state() != State::Terminated {
			match wait::waitpid(self.pid, None) {
				Ok(status) => { self.status = status; },
				Err(Errno::EINTR) => (),
				Err(e) => { return Err(e); },
			}
		}
		Ok(self.status)
	}
}
