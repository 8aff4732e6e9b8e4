use std::{
	env,
	fs,
	process::exit,
};

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::environment::ProcessEnvironment;
use crate::platform::Platform;
use crate::runner::{CommandRunner, ShellRunner};
use crate::ui::Ui;

mod cli;
mod config;
mod dialect;
mod environment;
mod error;
mod platform;
mod runner;
mod stale;
mod task;
mod toolchain;
mod ui;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let ui = Ui::new(cli.quiet, cli.debug);

	let workdir = dunce::canonicalize(&cli.workdir)?;
	env::set_current_dir(&workdir)?;

	let cache_dir = workdir.join(config::CACHE_DIR);

	if cli.clean {
		ui.trace(format!("removing cache directory {}", cache_dir.display()));

		if cache_dir.exists() {
			fs::remove_dir_all(&cache_dir)?;
		}

		return Ok(());
	}

	if cli.reload {
		let cache_file = cache_dir.join(config::CACHE_FILE);
		ui.trace(format!("removing cache file {}", cache_file.display()));

		if cache_file.exists() {
			fs::remove_file(&cache_file)?;
		}
	}

	let mut environment = ProcessEnvironment::default();
	let platform = Platform::detect(&environment)?;
	let runner = ShellRunner::new(platform);

	let config = match Config::resolve(
		&workdir,
		platform,
		cli.debug,
		&mut environment,
		&runner,
		&ui,
	) {
		Ok(config) => config,
		Err(err) => {
			ui.print_err(format!("{err}"));
			exit(1);
		}
	};

	if config.debug {
		ui.trace(format!("{config}"));
	}

	if stale::is_stale(&config.artifact_file, &config.task_file)? {
		fs::create_dir_all(&config.artifact_dir)?;
		ui.print_info(format!("running build command: {}", config.build_command));

		let spinner = ui.spinner("compiling task definition...");
		let result = runner.run_passthrough(&config.build_command);
		spinner.finish_and_clear();

		// Compiler diagnostics pass through; its exit code is the result.
		let code = result?;
		if code != 0 {
			exit(code);
		}

		ui.print_ok(format!("built {}", config.artifact_file.display()));
	}

	let code = runner::run_artifact(&config.artifact_file, &cli.args)?;
	exit(code);
}
