use crate::dialect::Dialect;
use crate::environment::Environment;
use crate::error::RezError;

pub const COMSPEC_ENV_VAR: &str = "COMSPEC";

pub const DEFAULT_WINDOWS_COMPILER: &str = "cl";

/// Platform profile selected once at startup and injected everywhere a
/// platform branch is needed. Detection is an environment heuristic rather
/// than a compile-time check so resolution behaves identically on every
/// build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
	pub windows: bool,
}

impl Platform {
	/// Windows-like iff the shell-identifying variable naming the active
	/// command interpreter is present.
	pub fn detect(env: &dyn Environment) -> Result<Self, RezError> {
		Ok(Platform {
			windows: env.get(COMSPEC_ENV_VAR)?.is_some(),
		})
	}

	pub fn path_separator(&self) -> &'static str {
		if self.windows {
			"\\"
		} else {
			"/"
		}
	}

	pub fn join(
		&self,
		parent: &str,
		child: &str,
	) -> String {
		format!("{}{}{}", parent, self.path_separator(), child)
	}

	pub fn executable_extension(&self) -> &'static str {
		if self.windows {
			".exe"
		} else {
			""
		}
	}

	pub fn default_compiler(
		&self,
		dialect: Dialect,
	) -> &'static str {
		if self.windows {
			DEFAULT_WINDOWS_COMPILER
		} else {
			dialect.default_unix_compiler()
		}
	}

	/// Shell program and its command-string flag, for running synthesized
	/// command strings.
	pub fn shell(&self) -> (&'static str, &'static str) {
		if self.windows {
			("cmd", "/C")
		} else {
			("sh", "-c")
		}
	}

	/// Command that runs the toolchain setup script for the given target
	/// architecture, then emits the resulting environment block.
	pub fn toolchain_query_command(
		&self,
		script: &str,
		arch: &str,
	) -> String {
		format!("call \"{script}\" {arch} && set")
	}
}
