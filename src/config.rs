use std::{
	fmt,
	path::{Path, PathBuf},
};

use crate::dialect::Dialect;
use crate::environment::Environment;
use crate::platform::{Platform, DEFAULT_WINDOWS_COMPILER};
use crate::runner::CommandRunner;
use crate::task;
use crate::toolchain;
use crate::ui::Ui;

pub const CACHE_DIR: &str = ".rez";

pub const CACHE_FILE: &str = "rez-env.txt";

pub const ARTIFACT_DIR: &str = "bin";

pub const ARTIFACT_BASENAME: &str = "rez";

/// Flags applied regardless of dialect, ahead of the dialect-specific ones.
pub const COMMON_FLAGS_ENV_VAR: &str = "CPPFLAGS";

/// Everything one invocation needs: the resolved toolchain, the cache and
/// artifact locations, and the exact compile command. Built fresh per run
/// and discarded once the dispatcher has consumed it; only the toolchain
/// cache file and the artifact persist on disk.
pub struct Config {
	pub debug: bool,
	pub platform: Platform,
	pub dialect: Dialect,
	pub task_file: PathBuf,
	pub compiler: String,
	pub cache_dir: PathBuf,
	pub cache_file: PathBuf,
	pub artifact_dir: PathBuf,
	pub artifact_file: PathBuf,
	pub build_command: String,
}

impl Config {
	/// One synchronous resolution pass. The platform profile is detected
	/// once at startup and injected. Filesystem paths are rooted at the
	/// working directory; the synthesized command uses paths relative to it
	/// since that is where the dispatcher runs the compiler.
	pub fn resolve(
		workdir: &Path,
		platform: Platform,
		debug: bool,
		env: &mut dyn Environment,
		runner: &dyn CommandRunner,
		ui: &Ui,
	) -> anyhow::Result<Config> {
		ui.trace(format!("windows-like platform: {}", platform.windows));

		let dialect = task::locate(workdir)?;
		ui.trace(format!("task definition file: {}", dialect.task_file()));

		let mut compiler = platform.default_compiler(dialect).to_string();

		if let Some(compiler_override) = env
			.get(dialect.compiler_env_var())?
			.filter(|val| !val.is_empty())
		{
			ui.trace(format!(
				"compiler override via {}: {compiler_override}",
				dialect.compiler_env_var()
			));
			compiler = compiler_override;
		}

		let cache_dir = workdir.join(CACHE_DIR);
		let cache_file = cache_dir.join(CACHE_FILE);

		if platform.windows && compiler == DEFAULT_WINDOWS_COMPILER {
			toolchain::apply(&cache_dir, &cache_file, platform, env, runner, ui)?;
		}

		let artifact_dir = cache_dir.join(ARTIFACT_DIR);
		let artifact_file = artifact_dir.join(format!(
			"{ARTIFACT_BASENAME}{}",
			platform.executable_extension()
		));

		let mut flags = Vec::new();
		for var in [COMMON_FLAGS_ENV_VAR, dialect.flags_env_var()] {
			if let Some(value) = env.get(var)?.filter(|val| !val.is_empty()) {
				flags.push(value);
			}
		}

		let artifact_in_command = platform.join(
			&platform.join(CACHE_DIR, ARTIFACT_DIR),
			&format!("{ARTIFACT_BASENAME}{}", platform.executable_extension()),
		);

		let build_command = synthesize_build_command(
			platform,
			&compiler,
			&flags,
			dialect.task_file(),
			&artifact_in_command,
		);
		ui.trace(format!("build command: {build_command}"));

		Ok(Config {
			debug,
			platform,
			dialect,
			task_file: workdir.join(dialect.task_file()),
			compiler,
			cache_dir,
			cache_file,
			artifact_dir,
			artifact_file,
			build_command,
		})
	}
}

/// Windows-style puts the source ahead of a `/link /out:` suffix; Unix puts
/// `-o <artifact>` ahead of the source. Flags sit directly after the
/// compiler on both branches.
fn synthesize_build_command(
	platform: Platform,
	compiler: &str,
	flags: &[String],
	task_file: &str,
	artifact: &str,
) -> String {
	let mut parts = vec![compiler.to_string()];
	parts.extend(flags.iter().cloned());

	if platform.windows {
		parts.push(task_file.to_string());
		parts.push("/link".to_string());
		parts.push(format!("/out:{artifact}"));
	} else {
		parts.push("-o".to_string());
		parts.push(artifact.to_string());
		parts.push(task_file.to_string());
	}

	parts.join(" ")
}

impl fmt::Display for Config {
	fn fmt(
		&self,
		f: &mut fmt::Formatter<'_>,
	) -> fmt::Result {
		let dialect: &'static str = self.dialect.into();

		write!(
			f,
			"{{ debug: {}, windows: {}, task_file: {}, dialect: {dialect}, compiler: {}, cache_dir: {}, toolchain_cache: {}, artifact: {}, build_command: {} }}",
			self.debug,
			self.platform.windows,
			self.task_file.display(),
			self.compiler,
			self.cache_dir.display(),
			self.cache_file.display(),
			self.artifact_file.display(),
			self.build_command,
		)
	}
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::Path;

	use crate::environment::MemoryEnvironment;
	use crate::runner::scripted::ScriptedRunner;

	use super::*;

	fn quiet_ui() -> Ui {
		Ui::new(true, false)
	}

	fn write_task_file(
		dir: &Path,
		name: &str,
	) {
		fs::write(dir.join(name), "int main() { return 0; }").unwrap();
	}

	#[test]
	fn unix_secondary_dialect_defaults() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		write_task_file(dir.path(), "rez.c");

		let mut env = MemoryEnvironment::new();
		let runner = ScriptedRunner::new(0, vec![]);

		let config = Config::resolve(
			dir.path(),
			Platform { windows: false },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;

		assert_eq!(config.compiler, "cc");
		assert_eq!(config.build_command, "cc -o .rez/bin/rez rez.c");
		assert_eq!(runner.call_count(), 0);
		Ok(())
	}

	#[test]
	fn windows_primary_dialect_runs_one_toolchain_query() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		write_task_file(dir.path(), "rez.cpp");

		let mut env = MemoryEnvironment::new();
		let runner = ScriptedRunner::new(0, vec!["INCLUDE=C:\\vc\\include".to_string()]);

		let config = Config::resolve(
			dir.path(),
			Platform { windows: true },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;

		assert_eq!(runner.call_count(), 1);
		assert_eq!(config.compiler, "cl");
		assert_eq!(
			config.build_command,
			"cl rez.cpp /link /out:.rez\\bin\\rez.exe"
		);
		assert!(dir.path().join(".rez").join("rez-env.txt").exists());
		assert_eq!(env.get("INCLUDE")?, Some("C:\\vc\\include".to_string()));
		Ok(())
	}

	#[test]
	fn compiler_override_wins_on_both_platforms() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		write_task_file(dir.path(), "rez.cpp");

		let mut env = MemoryEnvironment::new().with("CXX", "clang++");
		let runner = ScriptedRunner::new(0, vec![]);
		let config = Config::resolve(
			dir.path(),
			Platform { windows: false },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;
		assert_eq!(config.compiler, "clang++");

		// A non-MSVC override on a Windows-like platform skips the
		// toolchain query entirely.
		let mut env = MemoryEnvironment::new().with("CXX", "clang++");
		let config = Config::resolve(
			dir.path(),
			Platform { windows: true },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;
		assert_eq!(config.compiler, "clang++");
		assert_eq!(runner.call_count(), 0);
		Ok(())
	}

	#[test]
	fn empty_override_is_ignored() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		write_task_file(dir.path(), "rez.cpp");

		let mut env = MemoryEnvironment::new().with("CXX", "");
		let runner = ScriptedRunner::new(0, vec![]);

		let config = Config::resolve(
			dir.path(),
			Platform { windows: false },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;

		assert_eq!(config.compiler, "c++");
		Ok(())
	}

	#[test]
	fn flags_sit_between_compiler_and_output() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		write_task_file(dir.path(), "rez.cpp");

		let mut env = MemoryEnvironment::new()
			.with("CPPFLAGS", "-DNDEBUG")
			.with("CXXFLAGS", "-O2 -Wall");
		let runner = ScriptedRunner::new(0, vec![]);

		let config = Config::resolve(
			dir.path(),
			Platform { windows: false },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;

		assert_eq!(
			config.build_command,
			"c++ -DNDEBUG -O2 -Wall -o .rez/bin/rez rez.cpp"
		);
		Ok(())
	}

	#[test]
	fn unset_and_empty_flags_are_omitted() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		write_task_file(dir.path(), "rez.cpp");

		let mut env = MemoryEnvironment::new().with("CXXFLAGS", "");
		let runner = ScriptedRunner::new(0, vec![]);

		let config = Config::resolve(
			dir.path(),
			Platform { windows: false },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;

		assert_eq!(config.build_command, "c++ -o .rez/bin/rez rez.cpp");
		Ok(())
	}

	#[test]
	fn resolution_is_idempotent() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		write_task_file(dir.path(), "rez.cpp");
		write_task_file(dir.path(), "rez.c");

		let mut env = MemoryEnvironment::new().with("CXXFLAGS", "-O2");
		let runner = ScriptedRunner::new(0, vec![]);

		let first = Config::resolve(
			dir.path(),
			Platform { windows: false },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;
		let second = Config::resolve(
			dir.path(),
			Platform { windows: false },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		)?;

		assert_eq!(first.build_command, second.build_command);
		assert_eq!(first.dialect, Dialect::Cpp);
		assert_eq!(second.dialect, Dialect::Cpp);
		Ok(())
	}

	#[test]
	fn missing_task_definition_halts_resolution() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;

		let mut env = MemoryEnvironment::new();
		let runner = ScriptedRunner::new(0, vec![]);

		let result = Config::resolve(
			dir.path(),
			Platform { windows: false },
			false,
			&mut env,
			&runner,
			&quiet_ui(),
		);

		assert!(result.is_err());
		assert_eq!(runner.call_count(), 0);
		Ok(())
	}
}
