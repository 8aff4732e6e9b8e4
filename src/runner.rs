use std::{
	path::Path,
	process::Command,
};

use anyhow::anyhow;

use crate::platform::Platform;

/// Blocking subprocess capability behind one interface so the toolchain
/// query and the compile step can be scripted in tests with canned output.
pub trait CommandRunner {
	/// Runs a command string through the platform shell and captures its
	/// standard output as lines.
	fn run_capturing_stdout(
		&self,
		command: &str,
	) -> anyhow::Result<(i32, Vec<String>)>;

	/// Runs a command string through the platform shell with inherited
	/// stdio, returning its exit code.
	fn run_passthrough(
		&self,
		command: &str,
	) -> anyhow::Result<i32>;
}

#[derive(Clone, Copy)]
pub struct ShellRunner {
	platform: Platform,
}

impl ShellRunner {
	pub fn new(platform: Platform) -> Self {
		ShellRunner { platform }
	}

	fn shell_command(
		&self,
		command: &str,
	) -> Command {
		let (shell, flag) = self.platform.shell();
		let mut cmd = Command::new(shell);
		cmd.args([flag, command]);
		cmd
	}
}

impl CommandRunner for ShellRunner {
	fn run_capturing_stdout(
		&self,
		command: &str,
	) -> anyhow::Result<(i32, Vec<String>)> {
		let output = self
			.shell_command(command)
			.output()
			.map_err(|err| anyhow!("error trying to execute {command}! {err}"))?;

		let lines = String::from_utf8_lossy(&output.stdout)
			.lines()
			.map(|line| line.to_string())
			.collect();

		Ok((output.status.code().unwrap_or(-1), lines))
	}

	fn run_passthrough(
		&self,
		command: &str,
	) -> anyhow::Result<i32> {
		let status = self
			.shell_command(command)
			.status()
			.map_err(|err| anyhow!("error trying to execute {command}! {err}"))?;

		Ok(status.code().unwrap_or(-1))
	}
}

/// Runs the compiled artifact directly, forwarding leftover arguments and
/// passing its stdio through to the invoking terminal.
pub fn run_artifact(
	artifact: &Path,
	args: &[String],
) -> anyhow::Result<i32> {
	let status = Command::new(artifact)
		.args(args)
		.status()
		.map_err(|err| {
			anyhow!("error trying to execute {}! {err}", artifact.display())
		})?;

	Ok(status.code().unwrap_or(-1))
}
