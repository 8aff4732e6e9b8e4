use thiserror::Error;

#[derive(Debug, Error)]
pub enum RezError {
	#[error("missing task definition file rez.c[pp]")]
	MissingTaskDefinition,

	#[error("unable to query environment variable {name}")]
	EnvironmentQuery { name: String },

	#[error("toolchain query failed: {reason}")]
	ToolchainQuery { reason: String },

	#[error("unable to apply toolchain environment line: {line}")]
	EnvironmentApply { line: String },
}
