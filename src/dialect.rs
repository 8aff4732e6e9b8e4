use strum_macros::{EnumString, IntoStaticStr};

/// Which of the two recognized source languages the task definition file is
/// written in. Decides the default Unix compiler and which override/flag
/// variables apply.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Default, IntoStaticStr, EnumString,
)]
pub enum Dialect {
	#[default]
	Cpp,
	C,
}

impl Dialect {
	pub fn task_file(&self) -> &'static str {
		match self {
			Dialect::Cpp => "rez.cpp",
			Dialect::C => "rez.c",
		}
	}

	pub fn default_unix_compiler(&self) -> &'static str {
		match self {
			Dialect::Cpp => "c++",
			Dialect::C => "cc",
		}
	}

	pub fn compiler_env_var(&self) -> &'static str {
		match self {
			Dialect::Cpp => "CXX",
			Dialect::C => "CC",
		}
	}

	pub fn flags_env_var(&self) -> &'static str {
		match self {
			Dialect::Cpp => "CXXFLAGS",
			Dialect::C => "CFLAGS",
		}
	}
}
