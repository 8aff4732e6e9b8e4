use std::path::Path;

use crate::dialect::Dialect;
use crate::error::RezError;

/// Finds the task definition file in the given directory. `rez.cpp` wins
/// over `rez.c` whenever both exist; neither existing is fatal since there
/// is nothing to build.
pub fn locate(workdir: &Path) -> Result<Dialect, RezError> {
	for dialect in [Dialect::Cpp, Dialect::C] {
		if workdir.join(dialect.task_file()).is_file() {
			return Ok(dialect);
		}
	}

	Err(RezError::MissingTaskDefinition)
}
