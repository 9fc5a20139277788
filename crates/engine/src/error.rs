use crate::introspect::ResolveError;
use crate::rules::Violations;

/// Why a dispatch did not reach the target method.
///
/// Failures raised by the target method itself are not errors of the engine;
/// they are carried in [`crate::Invoked::output`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
	/// No method with the requested name is declared.
	#[error("method not found: {type_name}::{method}")]
	NotFound { type_name: Box<str>, method: Box<str> },

	/// Several declarations share the name and the overload policy rejects that.
	#[error("method {type_name}::{method} is ambiguous: {candidates} declarations share this name")]
	Ambiguous {
		type_name: Box<str>,
		method: Box<str>,
		candidates: usize,
	},

	/// The caller supplied the wrong number of arguments.
	#[error("{method} expects {expected} argument(s), got {actual}")]
	ArityMismatch {
		method: Box<str>,
		expected: usize,
		actual: usize,
	},

	/// An argument failed a declared rule.
	#[error("{0}")]
	ValidationFailed(Violations),
}

impl DispatchError {
	/// Returns the violations of a validation failure.
	pub fn violations(&self) -> Option<&Violations> {
		match self {
			Self::ValidationFailed(v) => Some(v),
			_ => None,
		}
	}
}

impl From<ResolveError> for DispatchError {
	fn from(err: ResolveError) -> Self {
		match err {
			ResolveError::NotFound { type_name, method } => Self::NotFound { type_name, method },
			ResolveError::Ambiguous {
				type_name,
				method,
				candidates,
			} => Self::Ambiguous {
				type_name,
				method,
				candidates,
			},
		}
	}
}

impl From<Violations> for DispatchError {
	fn from(v: Violations) -> Self {
		Self::ValidationFailed(v)
	}
}
