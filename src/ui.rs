use std::{
	borrow::Cow,
	time::Duration,
};

use console::Style;
use indicatif::{
	MultiProgress,
	ProgressBar,
	ProgressDrawTarget,
};

#[derive(Clone)]
pub struct Ui {
	pub quiet: bool,
	pub debug: bool,

	progress_manager: MultiProgress,

	style_ok: Style,
	style_err: Style,
	style_warn: Style,
	style_debug: Style,
}

impl Ui {
	pub fn new(
		quiet: bool,
		debug: bool,
	) -> Self {
		Ui {
			quiet,
			debug,

			progress_manager: MultiProgress::with_draw_target(if quiet {
				ProgressDrawTarget::hidden()
			} else {
				ProgressDrawTarget::stderr()
			}),

			style_ok: Style::new().green().bold(),
			style_err: Style::new().red().bold(),
			style_warn: Style::new().yellow().bold(),
			style_debug: Style::new().dim(),
		}
	}

	pub fn format_err(
		&self,
		val: String,
	) -> String {
		format!("{} {}", self.style_err.apply_to("error:"), val)
	}

	pub fn format_warn(
		&self,
		val: String,
	) -> String {
		format!("{} {}", self.style_warn.apply_to("warning:"), val)
	}

	pub fn format_ok(
		&self,
		val: String,
	) -> String {
		format!("{} {}", self.style_ok.apply_to("ok:"), val)
	}

	pub fn print_err(
		&self,
		val: String,
	) {
		eprintln!("{}", self.format_err(val));
	}

	pub fn print_warn(
		&self,
		val: String,
	) {
		if !self.quiet {
			eprintln!("{}", self.format_warn(val));
		}
	}

	pub fn print_ok(
		&self,
		val: String,
	) {
		if !self.quiet {
			eprintln!("{}", self.format_ok(val));
		}
	}

	pub fn print_info(
		&self,
		val: String,
	) {
		if !self.quiet {
			eprintln!("{val}");
		}
	}

	/// Verbose decision tracing, enabled by the debug flag only.
	pub fn trace(
		&self,
		val: String,
	) {
		if self.debug {
			eprintln!("{}", self.style_debug.apply_to(val));
		}
	}

	/// Spinner shown while a blocking subprocess runs.
	pub fn spinner(
		&self,
		message: impl Into<Cow<'static, str>>,
	) -> ProgressBar {
		let bar = self
			.progress_manager
			.add(ProgressBar::new_spinner().with_message(message));
		bar.enable_steady_tick(Duration::from_millis(100));
		bar
	}
}
