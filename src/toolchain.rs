use std::{
	fs,
	path::Path,
};

use crate::environment::Environment;
use crate::error::RezError;
use crate::platform::Platform;
use crate::runner::CommandRunner;
use crate::ui::Ui;

pub const VCVARS_SCRIPT_ENV_VAR: &str = "REZ_VCVARS_SCRIPT";

pub const ARCH_ENV_VAR: &str = "REZ_ARCH";

pub const DEFAULT_VCVARS_SCRIPT: &str =
	"C:\\Program Files (x86)\\Microsoft Visual Studio 14.0\\VC\\vcvarsall.bat";

pub const DEFAULT_ARCH: &str = "x64";

/// Recovers the MSVC compiler environment. Each process starts from a clean
/// environment, so the one-time output of the toolchain setup script is
/// persisted as KEY=VALUE lines and replayed on every later run.
///
/// The cache is Warm when the file exists with non-zero size, Cold
/// otherwise. A Cold cache triggers exactly one query subprocess; the file
/// is written in one shot after a successful query, never appended to.
pub fn apply(
	cache_dir: &Path,
	cache_file: &Path,
	platform: Platform,
	env: &mut dyn Environment,
	runner: &dyn CommandRunner,
	ui: &Ui,
) -> anyhow::Result<()> {
	if is_cold(cache_file) {
		fs::create_dir_all(cache_dir)?;

		let command = query_command(platform, env)?;
		ui.trace(format!("toolchain query command: {command}"));

		let spinner = ui.spinner("querying msvc toolchain...");
		let result = runner.run_capturing_stdout(&command);
		spinner.finish_and_clear();

		let (code, lines) = result?;

		if code != 0 {
			return Err(RezError::ToolchainQuery {
				reason: format!("setup script exited with code {code}"),
			}
			.into());
		}

		// Keep assignment lines only; the script front-matter is noise.
		let block = lines
			.iter()
			.filter(|line| line.contains('='))
			.map(|line| line.as_str())
			.collect::<Vec<&str>>()
			.join("\n");

		if block.is_empty() {
			// Accepted here; the compiler invocation will surface it.
			ui.print_warn("toolchain query captured an empty environment block".to_string());
		}

		fs::write(cache_file, block + "\n")?;
	}

	replay(cache_file, env, ui)
}

fn is_cold(cache_file: &Path) -> bool {
	match fs::metadata(cache_file) {
		Ok(metadata) => metadata.len() == 0,
		Err(_) => true,
	}
}

fn query_command(
	platform: Platform,
	env: &dyn Environment,
) -> anyhow::Result<String> {
	let script = env
		.get(VCVARS_SCRIPT_ENV_VAR)?
		.filter(|val| !val.is_empty())
		.unwrap_or_else(|| DEFAULT_VCVARS_SCRIPT.to_string());

	let arch = env
		.get(ARCH_ENV_VAR)?
		.filter(|val| !val.is_empty())
		.unwrap_or_else(|| DEFAULT_ARCH.to_string());

	Ok(platform.toolchain_query_command(&script, &arch))
}

/// Replays every cached assignment into the environment context. A line
/// with no `=` aborts: a partially applied toolchain environment is worse
/// than none.
fn replay(
	cache_file: &Path,
	env: &mut dyn Environment,
	ui: &Ui,
) -> anyhow::Result<()> {
	let cached = fs::read_to_string(cache_file)?;

	for line in cached.lines() {
		if line.is_empty() {
			continue;
		}

		let (key, value) = line.split_once('=').ok_or_else(|| {
			RezError::EnvironmentApply {
				line: line.to_string(),
			}
		})?;

		ui.trace(format!("applying toolchain variable {key}"));
		env.set(key, value)?;
	}

	Ok(())
}
