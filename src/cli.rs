use clap::Parser;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
	#[arg(long, short, help = "Enable debugging information.")]
	pub debug: bool,

	#[arg(long, short, help = "Remove the rez cache directory and exit.")]
	pub clean: bool,

	#[arg(
		long,
		help = "Discard the cached toolchain environment and query it afresh."
	)]
	pub reload: bool,

	#[arg(
		long = "working-directory",
		short = 'w',
		default_value = ".",
		help = "Working directory for rez."
	)]
	pub workdir: String,

	#[arg(long, short, help = "Silence rez's output.")]
	pub quiet: bool,

	#[arg(
		trailing_var_arg = true,
		help = "Arguments forwarded to the compiled task runner."
	)]
	pub args: Vec<String>,
}
