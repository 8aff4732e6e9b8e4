#[cfg(test)]
use std::collections::HashMap;
use std::{
	env,
	env::VarError,
};

use crate::error::RezError;

/// Named-variable store the resolver reads from and the toolchain replay
/// writes into. Backed by the real process environment in production so that
/// every subprocess spawned afterwards inherits the replayed variables.
pub trait Environment {
	/// `Ok(None)` when the variable is unset. Callers that treat an empty
	/// value as absent check for that themselves.
	fn get(
		&self,
		name: &str,
	) -> Result<Option<String>, RezError>;

	fn set(
		&mut self,
		name: &str,
		value: &str,
	) -> Result<(), RezError>;
}

#[derive(Clone, Default)]
pub struct ProcessEnvironment {}

impl Environment for ProcessEnvironment {
	fn get(
		&self,
		name: &str,
	) -> Result<Option<String>, RezError> {
		match env::var(name) {
			Ok(value) => Ok(Some(value)),
			Err(VarError::NotPresent) => Ok(None),
			Err(VarError::NotUnicode(_)) => Err(RezError::EnvironmentQuery {
				name: name.to_string(),
			}),
		}
	}

	fn set(
		&mut self,
		name: &str,
		value: &str,
	) -> Result<(), RezError> {
		env::set_var(name, value);
		Ok(())
	}
}

/// In-memory substitute so tests can exercise resolution without mutating
/// real process state.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryEnvironment {
	values: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryEnvironment {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(
		mut self,
		name: &str,
		value: &str,
	) -> Self {
		self.values.insert(name.to_string(), value.to_string());
		self
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}
}

#[cfg(test)]
impl Environment for MemoryEnvironment {
	fn get(
		&self,
		name: &str,
	) -> Result<Option<String>, RezError> {
		Ok(self.values.get(name).cloned())
	}

	fn set(
		&mut self,
		name: &str,
		value: &str,
	) -> Result<(), RezError> {
		self.values.insert(name.to_string(), value.to_string());
		Ok(())
	}
}
