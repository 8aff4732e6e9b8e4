use std::{
	fs,
	path::Path,
	time::SystemTime,
};

/// True when the artifact is missing or strictly older than the task
/// definition file. Equal timestamps count as fresh; filesystem timestamp
/// resolution makes them indistinguishable from "built right after".
pub fn is_stale(
	artifact: &Path,
	definition: &Path,
) -> anyhow::Result<bool> {
	let artifact_mtime = match fs::metadata(artifact) {
		Ok(metadata) => Some(metadata.modified()?),
		Err(_) => None,
	};

	let definition_mtime = fs::metadata(definition)?.modified()?;

	Ok(is_stale_times(artifact_mtime, definition_mtime))
}

fn is_stale_times(
	artifact: Option<SystemTime>,
	definition: SystemTime,
) -> bool {
	match artifact {
		None => true,
		Some(artifact) => artifact < definition,
	}
}
